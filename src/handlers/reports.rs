// src/handlers/reports.rs

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{DashboardKpis, InstructorPerformance, LevelCounts, TrendBucket},
    services::reporting_service::TREND_WINDOW_DAYS,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TrendQuery {
    // Último dia da janela. Padrão: hoje.
    pub reference_date: Option<NaiveDate>,

    // Tamanho da janela em dias (1 a 366). Padrão: 30.
    pub days: Option<i64>,
}

// GET /api/reports/attendance-trend
#[utoipa::path(
    get,
    path = "/api/reports/attendance-trend",
    tag = "Reports",
    params(TrendQuery),
    responses(
        (status = 200, description = "Um balde por dia da janela, contagem por plano", body = Vec<TrendBucket>),
        (status = 400, description = "Janela fora de 1 a 366 dias")
    )
)]
pub async fn attendance_trend(
    State(app_state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reference = query
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let days = query.days.unwrap_or(TREND_WINDOW_DAYS);

    let buckets = app_state.reporting_service.attendance_trend(reference, days)?;
    Ok((StatusCode::OK, Json(buckets)))
}

// GET /api/reports/classes-by-instructor
#[utoipa::path(
    get,
    path = "/api/reports/classes-by-instructor",
    tag = "Reports",
    responses(
        (status = 200, description = "Quantidade de aulas por professor (nome exato)", body = BTreeMap<String, u64>)
    )
)]
pub async fn classes_by_instructor(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.reporting_service.classes_by_instructor())))
}

// GET /api/reports/membership-distribution
#[utoipa::path(
    get,
    path = "/api/reports/membership-distribution",
    tag = "Reports",
    responses(
        (status = 200, description = "Quantidade de alunos por plano", body = LevelCounts)
    )
)]
pub async fn membership_distribution(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.reporting_service.membership_distribution())))
}

// GET /api/reports/instructor-performance
#[utoipa::path(
    get,
    path = "/api/reports/instructor-performance",
    tag = "Reports",
    responses(
        (status = 200, description = "Aulas dadas e ocupação planejada por professor", body = BTreeMap<String, InstructorPerformance>)
    )
)]
pub async fn instructor_performance(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.reporting_service.instructor_performance())))
}

// GET /api/reports/kpis
#[utoipa::path(
    get,
    path = "/api/reports/kpis",
    tag = "Reports",
    responses(
        (status = 200, description = "Resumo geral do painel (Os Cards do Topo)", body = DashboardKpis)
    )
)]
pub async fn kpis(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.reporting_service.kpis())))
}

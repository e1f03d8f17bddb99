// src/handlers/attendance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{AttendanceRecord, AttendanceStats, MarkingSession},
    services::attendance_service::DraftFieldUpdate,
    services::query_service::AttendanceFilter,
};

// ---
// Payload: BeginMarking
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeginMarkingPayload {
    pub class_id: Uuid,
}

// ---
// Payload: UpdateDraft (um campo de uma linha)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftPayload {
    pub member_id: Uuid,

    #[serde(flatten)]
    pub update: DraftFieldUpdate,
}

// POST /api/attendance/markings
#[utoipa::path(
    post,
    path = "/api/attendance/markings",
    tag = "Attendance",
    request_body = BeginMarkingPayload,
    responses(
        (status = 201, description = "Rascunho de marcação aberto para a aula", body = MarkingSession),
        (status = 404, description = "Aula não encontrada")
    )
)]
pub async fn begin_marking(
    State(app_state): State<AppState>,
    Json(payload): Json<BeginMarkingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state.marking_service.begin_marking(payload.class_id)?;
    Ok((StatusCode::CREATED, Json(session)))
}

// GET /api/attendance/markings/{id}
#[utoipa::path(
    get,
    path = "/api/attendance/markings/{id}",
    tag = "Attendance",
    params(("id" = Uuid, Path, description = "ID da marcação em andamento")),
    responses(
        (status = 200, description = "Rascunho atual da marcação", body = MarkingSession),
        (status = 404, description = "Marcação não encontrada")
    )
)]
pub async fn get_marking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state.marking_service.get(id)?;
    Ok((StatusCode::OK, Json(session)))
}

// PATCH /api/attendance/markings/{id}/draft
#[utoipa::path(
    patch,
    path = "/api/attendance/markings/{id}/draft",
    tag = "Attendance",
    params(("id" = Uuid, Path, description = "ID da marcação em andamento")),
    request_body = UpdateDraftPayload,
    responses(
        (status = 200, description = "Rascunho atualizado", body = MarkingSession),
        (status = 400, description = "Valor inválido (ex.: nota fora de 1 a 5)"),
        (status = 404, description = "Marcação ou aluno não encontrado")
    )
)]
pub async fn update_draft(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDraftPayload>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state
        .marking_service
        .update_draft(id, payload.member_id, payload.update)?;
    Ok((StatusCode::OK, Json(session)))
}

// POST /api/attendance/markings/{id}/commit
#[utoipa::path(
    post,
    path = "/api/attendance/markings/{id}/commit",
    tag = "Attendance",
    params(("id" = Uuid, Path, description = "ID da marcação em andamento")),
    responses(
        (status = 201, description = "Registros anexados ao livro-razão (somente linhas Present)", body = Vec<AttendanceRecord>),
        (status = 404, description = "Marcação não encontrada")
    )
)]
pub async fn commit_marking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appended = app_state.marking_service.commit(id)?;
    Ok((StatusCode::CREATED, Json(appended)))
}

// DELETE /api/attendance/markings/{id}
#[utoipa::path(
    delete,
    path = "/api/attendance/markings/{id}",
    tag = "Attendance",
    params(("id" = Uuid, Path, description = "ID da marcação em andamento")),
    responses(
        (status = 204, description = "Rascunho descartado sem gerar registros"),
        (status = 404, description = "Marcação não encontrada")
    )
)]
pub async fn cancel_marking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.marking_service.cancel(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = "Attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Registros de presença filtrados", body = Vec<AttendanceRecord>)
    )
)]
pub async fn list_attendance(
    State(app_state): State<AppState>,
    Query(filter): Query<AttendanceFilter>,
) -> Result<impl IntoResponse, AppError> {
    let records = app_state.query_service.list(&filter);
    Ok((StatusCode::OK, Json(records)))
}

// GET /api/attendance/stats
#[utoipa::path(
    get,
    path = "/api/attendance/stats",
    tag = "Attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Estatísticas sobre a visão filtrada", body = AttendanceStats)
    )
)]
pub async fn attendance_stats(
    State(app_state): State<AppState>,
    Query(filter): Query<AttendanceFilter>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.query_service.stats(&filter);
    Ok((StatusCode::OK, Json(stats)))
}

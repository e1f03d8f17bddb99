// src/handlers/roster.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        ClassSession, ClassStatus, ClassType, Member, MemberStatus, MembershipLevel,
    },
};

// O cadastro de alunos e a agenda de aulas são colaboradores externos:
// eles mandam a coleção nova INTEIRA e o core a substitui de uma vez.
// Não existe edição item a item por aqui.

// ---
// Payload: aluno vindo do cadastro
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    // Sem id, o cadastro ainda não atribuiu um; geramos aqui.
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,

    pub membership_level: MembershipLevel,
    pub status: MemberStatus,

    pub joined_at: Option<NaiveDate>,
}

// ---
// Payload: aula vinda da agenda
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload {
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,

    #[validate(length(min = 1, message = "O professor é obrigatório."))]
    pub instructor: String,

    pub date: NaiveDate,
    pub time: NaiveTime,

    #[validate(range(min = 1, message = "A duração deve ser de pelo menos 1 minuto."))]
    pub duration_minutes: i64,

    pub capacity: u32,
    pub enrolled: u32,

    pub levels: Vec<MembershipLevel>,
    pub class_type: ClassType,
    pub status: ClassStatus,

    #[serde(default)]
    pub recurring: bool,
}

// PUT /api/members
#[utoipa::path(
    put,
    path = "/api/members",
    tag = "Roster",
    request_body = Vec<MemberPayload>,
    responses(
        (status = 200, description = "Coleção de alunos substituída", body = Vec<Member>),
        (status = 400, description = "Algum aluno inválido")
    )
)]
pub async fn replace_members(
    State(app_state): State<AppState>,
    Json(payload): Json<Vec<MemberPayload>>,
) -> Result<impl IntoResponse, AppError> {
    for member in &payload {
        member.validate()?;
    }

    let members: Vec<Member> = payload
        .into_iter()
        .map(|p| Member {
            id: p.id.unwrap_or_else(Uuid::new_v4),
            name: p.name,
            email: p.email,
            membership_level: p.membership_level,
            status: p.status,
            joined_at: p.joined_at,
        })
        .collect();

    tracing::info!(count = members.len(), "Snapshot de alunos substituído");
    let snapshot = app_state.store.replace_members(members);

    Ok((StatusCode::OK, Json((*snapshot.members).clone())))
}

// GET /api/members
#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Roster",
    responses(
        (status = 200, description = "Snapshot atual de alunos", body = Vec<Member>)
    )
)]
pub async fn get_members(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = app_state.store.snapshot();
    Ok((StatusCode::OK, Json((*snapshot.members).clone())))
}

// PUT /api/classes
#[utoipa::path(
    put,
    path = "/api/classes",
    tag = "Roster",
    request_body = Vec<ClassPayload>,
    responses(
        (status = 200, description = "Agenda de aulas substituída", body = Vec<ClassSession>),
        (status = 400, description = "Alguma aula inválida")
    )
)]
pub async fn replace_classes(
    State(app_state): State<AppState>,
    Json(payload): Json<Vec<ClassPayload>>,
) -> Result<impl IntoResponse, AppError> {
    for class in &payload {
        class.validate()?;
    }

    let classes: Vec<ClassSession> = payload
        .into_iter()
        .map(|p| ClassSession {
            id: p.id.unwrap_or_else(Uuid::new_v4),
            title: p.title,
            instructor: p.instructor,
            date: p.date,
            time: p.time,
            duration_minutes: p.duration_minutes,
            capacity: p.capacity,
            enrolled: p.enrolled,
            levels: p.levels,
            class_type: p.class_type,
            status: p.status,
            recurring: p.recurring,
        })
        .collect();

    tracing::info!(count = classes.len(), "Agenda de aulas substituída");
    let snapshot = app_state.store.replace_classes(classes);

    Ok((StatusCode::OK, Json((*snapshot.classes).clone())))
}

// GET /api/classes
#[utoipa::path(
    get,
    path = "/api/classes",
    tag = "Roster",
    responses(
        (status = 200, description = "Agenda atual de aulas", body = Vec<ClassSession>)
    )
)]
pub async fn get_classes(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = app_state.store.snapshot();
    Ok((StatusCode::OK, Json((*snapshot.classes).clone())))
}

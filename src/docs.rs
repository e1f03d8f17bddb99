// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Roster ---
        handlers::roster::replace_members,
        handlers::roster::get_members,
        handlers::roster::replace_classes,
        handlers::roster::get_classes,

        // --- Attendance ---
        handlers::attendance::begin_marking,
        handlers::attendance::get_marking,
        handlers::attendance::update_draft,
        handlers::attendance::commit_marking,
        handlers::attendance::cancel_marking,
        handlers::attendance::list_attendance,
        handlers::attendance::attendance_stats,

        // --- Reports ---
        handlers::reports::attendance_trend,
        handlers::reports::classes_by_instructor,
        handlers::reports::membership_distribution,
        handlers::reports::instructor_performance,
        handlers::reports::kpis,
    ),
    components(
        schemas(
            // --- Roster ---
            models::member::MembershipLevel,
            models::member::MemberStatus,
            models::member::Member,
            models::class::ClassStatus,
            models::class::ClassType,
            models::class::ClassSession,
            handlers::roster::MemberPayload,
            handlers::roster::ClassPayload,

            // --- Attendance ---
            models::attendance::AttendanceStatus,
            models::attendance::AttendanceRecord,
            models::attendance::DraftEntry,
            models::attendance::MarkingSession,
            services::attendance_service::DraftFieldUpdate,
            handlers::attendance::BeginMarkingPayload,
            handlers::attendance::UpdateDraftPayload,

            // --- Dashboard ---
            models::dashboard::AttendanceStats,
            models::dashboard::TrendBucket,
            models::dashboard::LevelCounts,
            models::dashboard::InstructorPerformance,
            models::dashboard::DashboardKpis,
        )
    ),
    tags(
        (name = "Roster", description = "Snapshots do cadastro de alunos e da agenda de aulas"),
        (name = "Attendance", description = "Marcação de presença e consulta do livro-razão"),
        (name = "Reports", description = "Agregações para os gráficos do painel")
    )
)]
pub struct ApiDoc;

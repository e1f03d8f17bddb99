//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod docs;
mod handlers;
mod models;
mod services;
mod store;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Fluxo de marcação + consulta do livro-razão
    let attendance_routes = Router::new()
        .route("/markings", post(handlers::attendance::begin_marking))
        .route("/markings/{id}"
               ,get(handlers::attendance::get_marking)
               .delete(handlers::attendance::cancel_marking)
        )
        .route("/markings/{id}/draft", axum::routing::patch(handlers::attendance::update_draft))
        .route("/markings/{id}/commit", post(handlers::attendance::commit_marking))
        .route("/", get(handlers::attendance::list_attendance))
        .route("/stats", get(handlers::attendance::attendance_stats));

    // Agregações para os gráficos
    let report_routes = Router::new()
        .route("/attendance-trend", get(handlers::reports::attendance_trend))
        .route("/classes-by-instructor", get(handlers::reports::classes_by_instructor))
        .route("/membership-distribution", get(handlers::reports::membership_distribution))
        .route("/instructor-performance", get(handlers::reports::instructor_performance))
        .route("/kpis", get(handlers::reports::kpis));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Snapshots do cadastro (colaborador CRUD externo)
        .route("/api/members"
               ,put(handlers::roster::replace_members)
               .get(handlers::roster::get_members)
        )
        .route("/api/classes"
               ,put(handlers::roster::replace_classes)
               .get(handlers::roster::get_classes)
        )
        .nest("/api/attendance", attendance_routes)
        .nest("/api/reports", report_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = AppState::bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

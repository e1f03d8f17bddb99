// src/config.rs

use std::env;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveTime};
use uuid::Uuid;

use crate::{
    models::{
        ClassSession, ClassStatus, ClassType, Member, MemberStatus, MembershipLevel,
    },
    services::{MarkingService, QueryService, ReportingService},
    store::EntityStore,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntityStore>,
    pub marking_service: MarkingService,
    pub query_service: QueryService,
    pub reporting_service: ReportingService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let store = Arc::new(EntityStore::new());

        // Tudo vive em memória e morre com o processo; o seed existe só
        // para o painel renderizar de primeira em desenvolvimento.
        if env::var("SEED_DEMO_DATA").is_ok_and(|v| v == "1") {
            seed_demo_data(&store);
            tracing::info!("✅ Dados de demonstração carregados!");
        }

        // --- Monta o gráfico de dependências ---
        let marking_service = MarkingService::new(store.clone());
        let query_service = QueryService::new(store.clone());
        let reporting_service = ReportingService::new(store.clone());

        Ok(Self {
            store,
            marking_service,
            query_service,
            reporting_service,
        })
    }

    pub fn bind_addr() -> String {
        env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
    }
}

// Cadastro e agenda mínimos para demonstração.
fn seed_demo_data(store: &EntityStore) {
    let members = [
        ("Mariana Costa", MembershipLevel::Premium, MemberStatus::Active),
        ("Pedro Lima", MembershipLevel::Basic, MemberStatus::Active),
        ("Ana Souza", MembershipLevel::Standard, MemberStatus::Active),
        ("Caio Ferreira", MembershipLevel::Vip, MemberStatus::Inactive),
        ("Julia Ramos", MembershipLevel::Basic, MemberStatus::Pending),
    ]
    .into_iter()
    .map(|(name, level, status)| Member {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: None,
        membership_level: level,
        status,
        joined_at: None,
    })
    .collect();

    let today = Local::now().date_naive();
    let classes = [
        ("Vinyasa Flow", "Carla Mendes", 0i64, 9, ClassType::InPerson, 3u32),
        ("Hatha Yoga", "Carla Mendes", 0, 18, ClassType::Online, 4),
        ("Power Yoga", "Rafael Duarte", 1, 7, ClassType::Hybrid, 2),
    ]
    .into_iter()
    .map(|(title, instructor, days_ahead, hour, class_type, enrolled)| ClassSession {
        id: Uuid::new_v4(),
        title: title.to_string(),
        instructor: instructor.to_string(),
        date: today + Duration::days(days_ahead),
        time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default(),
        duration_minutes: 60,
        capacity: 20,
        enrolled,
        levels: vec![MembershipLevel::Basic, MembershipLevel::Standard],
        class_type,
        status: ClassStatus::Scheduled,
        recurring: false,
    })
    .collect();

    store.replace_members(members);
    store.replace_classes(classes);
}

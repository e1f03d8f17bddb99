// src/services/reporting_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        AttendanceRecord, ClassSession, DashboardKpis, InstructorPerformance, LevelCounts, Member,
        MemberStatus, MembershipLevel, TrendBucket,
    },
    store::EntityStore,
};

// Janela padrão do gráfico de tendência.
pub const TREND_WINDOW_DAYS: i64 = 30;

// Maior janela aceita (um ano bissexto). Acima disso o balde por dia
// deixa de fazer sentido como gráfico e a alocação sai do controle.
pub const MAX_TREND_WINDOW_DAYS: i64 = 366;

// =============================================================================
//  1. TENDÊNCIA DIÁRIA (data x plano)
// =============================================================================

// Um balde por dia-calendário em [reference - days + 1, reference], em
// ordem cronológica, sempre com exatamente `days` entradas: dia sem
// registro aparece zerado em vez de sumir do eixo.
//
// Registro cujo memberId não resolve para aluno conhecido não conta em
// plano nenhum. Exclusão silenciosa, nunca erro: o painel fica de pé
// mesmo com referência quebrada.
pub fn daily_level_trend(
    records: &[AttendanceRecord],
    members: &[Member],
    reference_date: NaiveDate,
    days: i64,
) -> Vec<TrendBucket> {
    // Função total: janela fora de [0, MAX] é truncada em vez de
    // estourar a alocação. A rejeição com 400 acontece na fachada.
    let days = days.clamp(0, MAX_TREND_WINDOW_DAYS);

    let level_by_member: HashMap<Uuid, MembershipLevel> = members
        .iter()
        .map(|m| (m.id, m.membership_level))
        .collect();

    let mut buckets = Vec::with_capacity(days as usize);

    for offset in (0..days).rev() {
        let date = reference_date - Duration::days(offset);

        let mut levels = LevelCounts::default();
        for record in records.iter().filter(|r| r.date == date) {
            if let Some(level) = level_by_member.get(&record.member_id) {
                levels.bump(*level);
            }
        }

        buckets.push(TrendBucket {
            date,
            label: date.format("%d/%m").to_string(),
            levels,
        });
    }

    buckets
}

// =============================================================================
//  2. AGRUPAMENTOS POR PROFESSOR E POR PLANO
// =============================================================================

// Agrupa por nome exato, sem normalizar caixa ou espaços: duas grafias
// do mesmo professor contam separado (limitação conhecida do cadastro).
pub fn classes_by_instructor(sessions: &[ClassSession]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for session in sessions {
        *counts.entry(session.instructor.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn membership_level_distribution(members: &[Member]) -> LevelCounts {
    let mut counts = LevelCounts::default();
    for member in members {
        counts.bump(member.membership_level);
    }
    counts
}

// Ocupação planejada por professor: soma o `enrolled` definido no
// agendamento, não as presenças reais do livro-razão.
pub fn instructor_performance(sessions: &[ClassSession]) -> BTreeMap<String, InstructorPerformance> {
    let mut performance: BTreeMap<String, InstructorPerformance> = BTreeMap::new();
    for session in sessions {
        let entry = performance.entry(session.instructor.clone()).or_default();
        entry.classes_count += 1;
        entry.total_enrolled += u64::from(session.enrolled);
    }
    performance
}

// =============================================================================
//  3. KPIs (Os Cards do Topo)
// =============================================================================

pub fn scalar_kpis(records: &[AttendanceRecord], members: &[Member]) -> DashboardKpis {
    let stats = crate::services::query_service::compute_stats(records);

    let active_member_count = members
        .iter()
        .filter(|m| m.status == MemberStatus::Active)
        .count();

    let retention_rate = if members.is_empty() {
        "0.0".to_string()
    } else {
        format!("{:.1}", 100.0 * active_member_count as f64 / members.len() as f64)
    };

    DashboardKpis {
        total_attendance: stats.total_records,
        avg_rating: stats.avg_rating,
        avg_duration_minutes: stats.avg_duration_minutes,
        active_member_count,
        retention_rate,
    }
}

// =============================================================================
//  FACHADA
// =============================================================================

// Tudo aqui é recalculado do zero a cada chamada, sobre um snapshot.
// Sem cache e sem agregação incremental: as coleções têm dezenas ou
// centenas de elementos e o recálculo custa microssegundos.
#[derive(Clone)]
pub struct ReportingService {
    store: Arc<EntityStore>,
}

impl ReportingService {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    pub fn attendance_trend(
        &self,
        reference_date: NaiveDate,
        days: i64,
    ) -> Result<Vec<TrendBucket>, AppError> {
        if !(1..=MAX_TREND_WINDOW_DAYS).contains(&days) {
            return Err(Self::window_range_error());
        }

        let snapshot = self.store.snapshot();
        Ok(daily_level_trend(&snapshot.attendance, &snapshot.members, reference_date, days))
    }

    // Mesmo padrão de resposta dos payloads validados com `validator`.
    fn window_range_error() -> AppError {
        let mut errors = validator::ValidationErrors::new();
        let mut error = validator::ValidationError::new("range");
        error.message = Some(format!("A janela deve ter entre 1 e {MAX_TREND_WINDOW_DAYS} dias.").into());
        errors.add("days", error);
        AppError::ValidationError(errors)
    }

    pub fn classes_by_instructor(&self) -> BTreeMap<String, u64> {
        classes_by_instructor(&self.store.snapshot().classes)
    }

    pub fn membership_distribution(&self) -> LevelCounts {
        membership_level_distribution(&self.store.snapshot().members)
    }

    pub fn instructor_performance(&self) -> BTreeMap<String, InstructorPerformance> {
        instructor_performance(&self.store.snapshot().classes)
    }

    pub fn kpis(&self) -> DashboardKpis {
        let snapshot = self.store.snapshot();
        scalar_kpis(&snapshot.attendance, &snapshot.members)
    }
}

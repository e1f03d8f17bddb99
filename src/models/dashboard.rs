// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::member::MembershipLevel;

// 1. Estatísticas da tela de presenças (sobre a visão filtrada)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_records: usize,

    // Média arredondada para o inteiro mais próximo; 0 sem registros.
    pub avg_duration_minutes: i64,

    // Uma casa decimal, como o frontend exibe. "0.0" sem registros.
    #[schema(example = "4.7")]
    pub avg_rating: String,

    // Arredondado; 0 sem registros.
    pub online_percentage: i64,
}

// 2. Um dia do gráfico de tendência (30 dias x 4 planos)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    pub date: NaiveDate,

    // Rótulo curto do eixo X (dd/mm).
    #[schema(example = "05/08")]
    pub label: String,

    pub levels: LevelCounts,
}

// Contagem por plano, um campo por plano para o contrato do gráfico
// ficar explícito (e o match exaustivo pegar plano novo esquecido).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LevelCounts {
    pub basic: u64,
    pub standard: u64,
    pub premium: u64,
    pub vip: u64,
}

impl LevelCounts {
    pub fn bump(&mut self, level: MembershipLevel) {
        match level {
            MembershipLevel::Basic => self.basic += 1,
            MembershipLevel::Standard => self.standard += 1,
            MembershipLevel::Premium => self.premium += 1,
            MembershipLevel::Vip => self.vip += 1,
        }
    }

    pub fn get(&self, level: MembershipLevel) -> u64 {
        match level {
            MembershipLevel::Basic => self.basic,
            MembershipLevel::Standard => self.standard,
            MembershipLevel::Premium => self.premium,
            MembershipLevel::Vip => self.vip,
        }
    }

    pub fn total(&self) -> u64 {
        MembershipLevel::ALL.iter().map(|level| self.get(*level)).sum()
    }
}

// 3. Desempenho por professor (Curva de ocupação)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorPerformance {
    pub classes_count: u64,

    // Soma do campo `enrolled` (planejamento), não das presenças reais.
    pub total_enrolled: u64,
}

// 4. Os Cards do Topo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub total_attendance: usize,

    #[schema(example = "4.7")]
    pub avg_rating: String,

    pub avg_duration_minutes: i64,

    pub active_member_count: usize,

    // 100 * ativos / total, uma casa decimal. "0.0" sem alunos.
    #[schema(example = "85.7")]
    pub retention_rate: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_cobre_todos_os_planos_da_ordem_canonica() {
        let mut counts = LevelCounts::default();
        for level in MembershipLevel::ALL {
            counts.bump(level);
        }

        assert_eq!(counts.total(), MembershipLevel::ALL.len() as u64);
    }
}

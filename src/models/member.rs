// src/models/member.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

// Os 4 planos fixos do estúdio. Enum fechado de propósito:
// a agregação por nível usa match exaustivo, então adicionar um plano
// novo força a revisão de todos os relatórios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MembershipLevel {
    Basic,
    Standard,
    Premium,
    Vip,
}

impl MembershipLevel {
    // Ordem canônica usada pelos gráficos (legenda estável).
    pub const ALL: [MembershipLevel; 4] = [
        MembershipLevel::Basic,
        MembershipLevel::Standard,
        MembershipLevel::Premium,
        MembershipLevel::Vip,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

// --- ALUNO ---

// Snapshot vindo do cadastro de alunos (colaborador externo).
// O core só lê esta coleção; nunca edita um aluno individual.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,

    #[schema(example = "Mariana Costa")]
    pub name: String,

    #[schema(example = "mariana@exemplo.com")]
    pub email: Option<String>,

    pub membership_level: MembershipLevel,
    pub status: MemberStatus,

    pub joined_at: Option<NaiveDate>,
}

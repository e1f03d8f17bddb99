// src/models/class.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::member::MembershipLevel;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ClassStatus {
    Scheduled,
    Completed,
    Cancelled,
}

// Modalidade da aula. É copiada para cada registro de presença no
// momento da marcação (histórico imutável, ver AttendanceRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ClassType {
    Online,
    InPerson,
    Hybrid,
}

// --- AULA ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: Uuid,

    #[schema(example = "Vinyasa Flow")]
    pub title: String,

    // Nome livre, sem normalização. Duas grafias do mesmo professor
    // contam como professores distintos nos relatórios.
    #[schema(example = "Carla Mendes")]
    pub instructor: String,

    pub date: NaiveDate,
    pub time: NaiveTime,

    #[schema(example = 60)]
    pub duration_minutes: i64,

    pub capacity: u32,

    // Figura de planejamento definida no agendamento. NÃO é recalculada
    // a partir das presenças reais e pode divergir delas; os relatórios
    // de professor usam este número de propósito.
    pub enrolled: u32,

    // Planos que podem frequentar a aula.
    pub levels: Vec<MembershipLevel>,

    pub class_type: ClassType,
    pub status: ClassStatus,

    // Armazenado, mas nunca expandido em ocorrências futuras.
    #[serde(default)]
    pub recurring: bool,
}

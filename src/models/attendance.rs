// src/models/attendance.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::class::ClassType;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

// --- REGISTRO DE PRESENÇA (O Livro-Razão) ---

// Criado somente pelo commit da marcação e imutável depois disso.
// `class_name`, `member_name` e `class_type` são cópias desnormalizadas
// feitas na hora da marcação: renomear uma aula ou um aluno depois NÃO
// altera o histórico.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    // Sequencial, atribuído pelo EntityStore no append.
    pub id: u64,

    pub class_id: Uuid,
    #[schema(example = "Vinyasa Flow")]
    pub class_name: String,

    pub date: NaiveDate,

    pub member_id: Uuid,
    #[schema(example = "Mariana Costa")]
    pub member_name: String,

    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,

    // Derivada: check_out - check_in em minutos (só hora do dia conta);
    // sem check_out, cai na duração planejada da aula.
    pub duration_minutes: i64,

    pub class_type: ClassType,

    pub feedback: String,

    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
}

// Registro pronto para o append, ainda sem id. O id nasce dentro do
// EntityStore, sob o mesmo lock do append.
#[derive(Debug, Clone)]
pub struct NewAttendanceRecord {
    pub class_id: Uuid,
    pub class_name: String,
    pub date: NaiveDate,
    pub member_id: Uuid,
    pub member_name: String,
    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,
    pub duration_minutes: i64,
    pub class_type: ClassType,
    pub feedback: String,
    pub rating: u8,
}

// --- RASCUNHO (Estado efêmero da marcação) ---

// Uma linha editável por aluno da lista de chamada. Nunca é persistido:
// descartado no commit ou no cancelamento.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftEntry {
    pub member_id: Uuid,
    pub member_name: String,

    pub status: AttendanceStatus,

    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,

    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,

    pub feedback: String,
}

// Uma sessão de marcação em andamento (Idle -> Marking -> Idle).
// Captura os dados da aula no begin para que o commit não dependa de a
// aula continuar existindo no snapshot.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkingSession {
    pub id: Uuid,

    pub class_id: Uuid,
    pub class_name: String,
    pub class_date: NaiveDate,
    pub class_time: NaiveTime,
    pub class_duration_minutes: i64,
    pub class_type: ClassType,

    // Mantém a ordem da lista de chamada.
    pub draft: Vec<DraftEntry>,
}

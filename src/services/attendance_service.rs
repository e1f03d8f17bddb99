// src/services/attendance_service.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveTime;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        AttendanceRecord, AttendanceStatus, DraftEntry, MarkingSession, NewAttendanceRecord,
    },
    store::EntityStore,
};

// Atualização de exatamente um campo de exatamente uma linha do
// rascunho. O frontend manda `{"memberId": ..., "field": ..., "value": ...}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DraftFieldUpdate {
    Status(AttendanceStatus),
    CheckIn(NaiveTime),
    // `null` limpa o check-out.
    CheckOut(Option<NaiveTime>),
    Rating(u8),
    Feedback(String),
}

// A duração registrada: diferença de relógio entre check-out e check-in
// em minutos (só a hora do dia importa). Sem check-out, vale a duração
// planejada da aula. Check-out antes do check-in produz minutos
// negativos e fica assim mesmo; é problema de exibição, não falha.
pub fn derive_duration(check_in: NaiveTime, check_out: Option<NaiveTime>, class_duration: i64) -> i64 {
    match check_out {
        Some(out) => (out - check_in).num_minutes(),
        None => class_duration,
    }
}

// O fluxo de marcação de presença: Idle -> Marking -> Idle.
// As sessões em andamento vivem aqui, efêmeras, indexadas por id;
// o commit é a única porta de entrada do livro-razão.
#[derive(Clone)]
pub struct MarkingService {
    store: Arc<EntityStore>,
    sessions: Arc<Mutex<HashMap<Uuid, MarkingSession>>>,
}

impl MarkingService {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self {
            store,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // =========================================================================
    //  1. BEGIN (carrega a lista de chamada e abre o rascunho)
    // =========================================================================

    // A lista de chamada é uma aproximação: os primeiros `enrolled`
    // alunos do cadastro, já que não existe matrícula por aula.
    // Rascunho padrão: Present, check-in na hora da aula, nota 5.
    pub fn begin_marking(&self, class_id: Uuid) -> Result<MarkingSession, AppError> {
        let snapshot = self.store.snapshot();

        let class = snapshot
            .classes
            .iter()
            .find(|c| c.id == class_id)
            .ok_or(AppError::ClassNotFound)?;

        let draft: Vec<DraftEntry> = snapshot
            .members
            .iter()
            .take(class.enrolled as usize)
            .map(|member| DraftEntry {
                member_id: member.id,
                member_name: member.name.clone(),
                status: AttendanceStatus::Present,
                check_in: class.time,
                check_out: None,
                rating: 5,
                feedback: String::new(),
            })
            .collect();

        // Captura os dados da aula agora: renomear a aula durante a
        // marcação não pode mudar o que vai para o histórico.
        let session = MarkingSession {
            id: Uuid::new_v4(),
            class_id: class.id,
            class_name: class.title.clone(),
            class_date: class.date,
            class_time: class.time,
            class_duration_minutes: class.duration_minutes,
            class_type: class.class_type,
            draft,
        };

        tracing::info!(
            marking_id = %session.id,
            class = %session.class_name,
            roster = session.draft.len(),
            "Marcação de presença iniciada"
        );

        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(session.id, session.clone());

        Ok(session)
    }

    pub fn get(&self, marking_id: Uuid) -> Result<MarkingSession, AppError> {
        let sessions = self.sessions.lock().unwrap();
        sessions
            .get(&marking_id)
            .cloned()
            .ok_or(AppError::MarkingNotFound)
    }

    // =========================================================================
    //  2. UPDATE (edição campo a campo do rascunho)
    // =========================================================================

    // Marcar Absent só desabilita os outros campos na tela; o rascunho
    // continua guardando o último valor definido de cada um.
    pub fn update_draft(
        &self,
        marking_id: Uuid,
        member_id: Uuid,
        update: DraftFieldUpdate,
    ) -> Result<MarkingSession, AppError> {
        if let DraftFieldUpdate::Rating(rating) = &update {
            if !(1..=5).contains(rating) {
                return Err(Self::rating_range_error());
            }
        }

        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get_mut(&marking_id)
            .ok_or(AppError::MarkingNotFound)?;

        let entry = session
            .draft
            .iter_mut()
            .find(|e| e.member_id == member_id)
            .ok_or(AppError::MemberNotInDraft)?;

        match update {
            DraftFieldUpdate::Status(status) => entry.status = status,
            DraftFieldUpdate::CheckIn(check_in) => entry.check_in = check_in,
            DraftFieldUpdate::CheckOut(check_out) => entry.check_out = check_out,
            DraftFieldUpdate::Rating(rating) => entry.rating = rating,
            DraftFieldUpdate::Feedback(feedback) => entry.feedback = feedback,
        }

        Ok(session.clone())
    }

    // Monta um ValidationErrors manual para manter o padrão de resposta
    // dos payloads validados com `validator`.
    fn rating_range_error() -> AppError {
        let mut errors = validator::ValidationErrors::new();
        let mut error = validator::ValidationError::new("range");
        error.message = Some("A nota deve estar entre 1 e 5.".into());
        errors.add("rating", error);
        AppError::ValidationError(errors)
    }

    // =========================================================================
    //  3. COMMIT / CANCEL (fecha o rascunho)
    // =========================================================================

    // Converte o rascunho em registros definitivos e anexa ao
    // livro-razão. Transformação inteira primeiro, um append só depois:
    // ou todas as linhas qualificadas viram registro, ou nenhuma.
    //
    // Só linhas Present geram registro. Absent E Late são descartadas
    // sem registro nenhum; comportamento herdado da tela original,
    // mantido à risca (um atrasado hoje não entra no histórico).
    pub fn commit(&self, marking_id: Uuid) -> Result<Vec<AttendanceRecord>, AppError> {
        let session = {
            let mut sessions = self.sessions.lock().unwrap();
            sessions
                .remove(&marking_id)
                .ok_or(AppError::MarkingNotFound)?
        };

        let new_records: Vec<NewAttendanceRecord> = session
            .draft
            .iter()
            .filter(|entry| entry.status == AttendanceStatus::Present)
            .map(|entry| NewAttendanceRecord {
                class_id: session.class_id,
                class_name: session.class_name.clone(),
                date: session.class_date,
                member_id: entry.member_id,
                member_name: entry.member_name.clone(),
                check_in: entry.check_in,
                check_out: entry.check_out,
                duration_minutes: derive_duration(
                    entry.check_in,
                    entry.check_out,
                    session.class_duration_minutes,
                ),
                class_type: session.class_type,
                feedback: entry.feedback.clone(),
                rating: entry.rating,
            })
            .collect();

        let appended = self.store.append_attendance(new_records);

        tracing::info!(
            marking_id = %marking_id,
            class = %session.class_name,
            appended = appended.len(),
            dropped = session.draft.len() - appended.len(),
            "Marcação confirmada"
        );

        Ok(appended)
    }

    // Descarta o rascunho sem tocar no livro-razão.
    pub fn cancel(&self, marking_id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions
            .remove(&marking_id)
            .map(|_| ())
            .ok_or(AppError::MarkingNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::models::{
        ClassSession, ClassStatus, ClassType, Member, MemberStatus, MembershipLevel,
    };

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn member(name: &str) -> Member {
        Member {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: None,
            membership_level: MembershipLevel::Standard,
            status: MemberStatus::Active,
            joined_at: None,
        }
    }

    fn class(enrolled: u32) -> ClassSession {
        ClassSession {
            id: Uuid::new_v4(),
            title: "Vinyasa Flow".to_string(),
            instructor: "Carla Mendes".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            time: time(9, 0),
            duration_minutes: 60,
            capacity: 20,
            enrolled,
            levels: vec![MembershipLevel::Standard],
            class_type: ClassType::InPerson,
            status: ClassStatus::Scheduled,
            recurring: false,
        }
    }

    fn setup(enrolled: u32, member_count: usize) -> (Arc<EntityStore>, MarkingService, ClassSession) {
        let store = Arc::new(EntityStore::new());
        let class = class(enrolled);
        store.replace_classes(vec![class.clone()]);
        store.replace_members((0..member_count).map(|i| member(&format!("Aluno {i}"))).collect());
        let service = MarkingService::new(store.clone());
        (store, service, class)
    }

    #[test]
    fn begin_abre_rascunho_com_os_padroes() {
        let (_, service, class) = setup(3, 5);

        let session = service.begin_marking(class.id).unwrap();

        // Lista de chamada: os primeiros `enrolled` alunos do cadastro.
        assert_eq!(session.draft.len(), 3);
        for entry in &session.draft {
            assert_eq!(entry.status, AttendanceStatus::Present);
            assert_eq!(entry.check_in, class.time);
            assert_eq!(entry.check_out, None);
            assert_eq!(entry.rating, 5);
            assert_eq!(entry.feedback, "");
        }
    }

    #[test]
    fn begin_de_aula_inexistente_falha() {
        let (_, service, _) = setup(3, 5);
        assert!(matches!(
            service.begin_marking(Uuid::new_v4()),
            Err(AppError::ClassNotFound)
        ));
    }

    #[test]
    fn commit_gera_registro_so_para_present() {
        let (store, service, class) = setup(4, 4);
        let session = service.begin_marking(class.id).unwrap();

        service
            .update_draft(session.id, session.draft[1].member_id, DraftFieldUpdate::Status(AttendanceStatus::Absent))
            .unwrap();
        service
            .update_draft(session.id, session.draft[2].member_id, DraftFieldUpdate::Status(AttendanceStatus::Late))
            .unwrap();

        let appended = service.commit(session.id).unwrap();

        // 4 linhas, 2 Present: Absent E Late são descartados em silêncio.
        assert_eq!(appended.len(), 2);
        assert_eq!(store.snapshot().attendance.len(), 2);
    }

    #[test]
    fn duracao_vem_da_diferenca_de_relogio() {
        assert_eq!(derive_duration(time(9, 0), Some(time(10, 30)), 60), 90);
    }

    #[test]
    fn duracao_sem_check_out_cai_na_duracao_da_aula() {
        assert_eq!(derive_duration(time(9, 0), None, 75), 75);
    }

    #[test]
    fn check_out_antes_do_check_in_fica_negativo() {
        assert_eq!(derive_duration(time(10, 0), Some(time(9, 15)), 60), -45);
    }

    #[test]
    fn commit_deriva_duracao_e_copia_dados_da_aula() {
        let (_, service, class) = setup(1, 1);
        let session = service.begin_marking(class.id).unwrap();
        let member_id = session.draft[0].member_id;

        service
            .update_draft(session.id, member_id, DraftFieldUpdate::CheckOut(Some(time(10, 30))))
            .unwrap();

        let appended = service.commit(session.id).unwrap();
        let record = &appended[0];

        assert_eq!(record.duration_minutes, 90);
        assert_eq!(record.class_name, class.title);
        assert_eq!(record.date, class.date);
        assert_eq!(record.class_type, class.class_type);
    }

    #[test]
    fn renomear_a_aula_durante_a_marcacao_nao_muda_o_historico() {
        let (store, service, class) = setup(1, 1);
        let session = service.begin_marking(class.id).unwrap();

        let mut renamed = class.clone();
        renamed.title = "Power Yoga".to_string();
        store.replace_classes(vec![renamed]);

        let appended = service.commit(session.id).unwrap();
        assert_eq!(appended[0].class_name, "Vinyasa Flow");
    }

    #[test]
    fn linha_absent_continua_guardando_os_outros_campos() {
        let (_, service, class) = setup(1, 1);
        let session = service.begin_marking(class.id).unwrap();
        let member_id = session.draft[0].member_id;

        service
            .update_draft(session.id, member_id, DraftFieldUpdate::Feedback("Ótima aula".to_string()))
            .unwrap();
        let session = service
            .update_draft(session.id, member_id, DraftFieldUpdate::Status(AttendanceStatus::Absent))
            .unwrap();

        // Desabilitar na tela é cosmético; o valor continua no rascunho.
        assert_eq!(session.draft[0].feedback, "Ótima aula");
    }

    #[test]
    fn atualizar_aluno_fora_da_lista_de_chamada_falha() {
        let (_, service, class) = setup(1, 1);
        let session = service.begin_marking(class.id).unwrap();

        let result = service.update_draft(session.id, Uuid::new_v4(), DraftFieldUpdate::Rating(4));
        assert!(matches!(result, Err(AppError::MemberNotInDraft)));
    }

    #[test]
    fn nota_fora_de_1_a_5_e_rejeitada() {
        let (_, service, class) = setup(1, 1);
        let session = service.begin_marking(class.id).unwrap();
        let member_id = session.draft[0].member_id;

        let result = service.update_draft(session.id, member_id, DraftFieldUpdate::Rating(6));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn lista_de_chamada_vazia_e_legal_e_commit_vira_no_op() {
        let (store, service, class) = setup(0, 5);
        let session = service.begin_marking(class.id).unwrap();

        assert!(session.draft.is_empty());
        let appended = service.commit(session.id).unwrap();
        assert!(appended.is_empty());
        assert!(store.snapshot().attendance.is_empty());
    }

    #[test]
    fn cancel_descarta_o_rascunho_sem_tocar_no_livro_razao() {
        let (store, service, class) = setup(2, 2);
        let session = service.begin_marking(class.id).unwrap();

        service.cancel(session.id).unwrap();

        assert!(store.snapshot().attendance.is_empty());
        assert!(matches!(service.get(session.id), Err(AppError::MarkingNotFound)));
        // Idle de novo: commit do mesmo id não existe mais.
        assert!(matches!(service.commit(session.id), Err(AppError::MarkingNotFound)));
    }

    #[test]
    fn commits_sucessivos_nunca_repetem_id_de_registro() {
        let (store, service, class) = setup(2, 2);

        let first = service.begin_marking(class.id).unwrap();
        service.commit(first.id).unwrap();
        let second = service.begin_marking(class.id).unwrap();
        service.commit(second.id).unwrap();

        let snapshot = store.snapshot();
        let mut ids: Vec<u64> = snapshot.attendance.iter().map(|r| r.id).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}

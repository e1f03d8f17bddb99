// src/store/entity_store.rs

use std::sync::{Arc, RwLock};

use crate::models::{AttendanceRecord, ClassSession, Member, NewAttendanceRecord};

// Visão consistente das três coleções em um instante. Os `Arc` tornam o
// clone barato: quem segura um snapshot continua vendo exatamente os
// mesmos dados mesmo que o store seja substituído depois.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub members: Arc<Vec<Member>>,
    pub classes: Arc<Vec<ClassSession>>,
    pub attendance: Arc<Vec<AttendanceRecord>>,
}

struct StoreInner {
    snapshot: StoreSnapshot,

    // Próximo id de registro de presença. Fica sob o mesmo lock do
    // append: dois commits concorrentes nunca repetem id, mesmo que
    // tenham lido o livro-razão em momentos diferentes.
    next_record_id: u64,
}

// O dono único das coleções. Toda mutação é substituição de coleção
// inteira (um `Arc<Vec>` novo no lugar do antigo), então um leitor
// nunca observa uma escrita pela metade.
pub struct EntityStore {
    inner: RwLock<StoreInner>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                snapshot: StoreSnapshot::default(),
                next_record_id: 1,
            }),
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.read().unwrap().snapshot.clone()
    }

    // =========================================================================
    //  SNAPSHOTS DO CADASTRO (colaborador CRUD)
    // =========================================================================

    // Substitui a coleção de alunos inteira. O core nunca edita um
    // aluno individual; o cadastro manda a lista nova completa.
    pub fn replace_members(&self, members: Vec<Member>) -> StoreSnapshot {
        let mut inner = self.inner.write().unwrap();
        inner.snapshot.members = Arc::new(members);
        inner.snapshot.clone()
    }

    pub fn replace_classes(&self, classes: Vec<ClassSession>) -> StoreSnapshot {
        let mut inner = self.inner.write().unwrap();
        inner.snapshot.classes = Arc::new(classes);
        inner.snapshot.clone()
    }

    // =========================================================================
    //  LIVRO-RAZÃO DE PRESENÇAS (append-only)
    // =========================================================================

    // Anexa os registros de um commit de marcação, atribuindo os ids
    // sequenciais aqui dentro. Devolve os registros já com id.
    pub fn append_attendance(&self, new_records: Vec<NewAttendanceRecord>) -> Vec<AttendanceRecord> {
        let mut inner = self.inner.write().unwrap();

        let mut appended = Vec::with_capacity(new_records.len());
        for record in new_records {
            let id = inner.next_record_id;
            inner.next_record_id += 1;

            appended.push(AttendanceRecord {
                id,
                class_id: record.class_id,
                class_name: record.class_name,
                date: record.date,
                member_id: record.member_id,
                member_name: record.member_name,
                check_in: record.check_in,
                check_out: record.check_out,
                duration_minutes: record.duration_minutes,
                class_type: record.class_type,
                feedback: record.feedback,
                rating: record.rating,
            });
        }

        // Coleção nova = antiga + lote. A antiga continua viva para quem
        // já tinha um snapshot dela.
        let mut ledger: Vec<AttendanceRecord> = (*inner.snapshot.attendance).clone();
        ledger.extend(appended.iter().cloned());
        inner.snapshot.attendance = Arc::new(ledger);

        appended
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

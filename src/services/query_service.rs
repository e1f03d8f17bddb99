// src/services/query_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    models::{AttendanceRecord, AttendanceStats, ClassType},
    store::EntityStore,
};

// Filtros da tela de presenças. Todos opcionais; ausente = "casa tudo".
// Os três predicados são combinados com E lógico.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    // Igualdade exata de aula.
    pub class_id: Option<Uuid>,

    // Igualdade exata de data (sem intervalo).
    pub date: Option<NaiveDate>,

    // Substring, sem diferenciar maiúsculas, sobre o nome do aluno OU o
    // nome da aula (as cópias desnormalizadas do registro).
    pub search: Option<String>,
}

// Aplica o filtro sobre uma visão do livro-razão. Função pura: devolve
// sempre um subconjunto da entrada, possivelmente vazio.
pub fn filter_records(records: &[AttendanceRecord], filter: &AttendanceFilter) -> Vec<AttendanceRecord> {
    let search_lower = filter
        .search
        .as_deref()
        .map(|s| s.to_lowercase());

    records
        .iter()
        .filter(|r| filter.class_id.is_none_or(|id| r.class_id == id))
        .filter(|r| filter.date.is_none_or(|d| r.date == d))
        .filter(|r| {
            search_lower.as_deref().is_none_or(|needle| {
                r.member_name.to_lowercase().contains(needle)
                    || r.class_name.to_lowercase().contains(needle)
            })
        })
        .cloned()
        .collect()
}

// Estatísticas escalares sobre uma visão (filtrada ou não). Entrada
// vazia degrada para zeros em vez de erro: o painel prefere mostrar 0
// a quebrar por divisão por zero.
pub fn compute_stats(records: &[AttendanceRecord]) -> AttendanceStats {
    let total = records.len();

    if total == 0 {
        return AttendanceStats {
            total_records: 0,
            avg_duration_minutes: 0,
            avg_rating: "0.0".to_string(),
            online_percentage: 0,
        };
    }

    let duration_sum: i64 = records.iter().map(|r| r.duration_minutes).sum();
    let rating_sum: u64 = records.iter().map(|r| u64::from(r.rating)).sum();
    let online_count = records
        .iter()
        .filter(|r| r.class_type == ClassType::Online)
        .count();

    AttendanceStats {
        total_records: total,
        avg_duration_minutes: (duration_sum as f64 / total as f64).round() as i64,
        avg_rating: format!("{:.1}", rating_sum as f64 / total as f64),
        online_percentage: (100.0 * online_count as f64 / total as f64).round() as i64,
    }
}

// Fachada sobre o store para os handlers: tira um snapshot e delega às
// funções puras acima.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<EntityStore>,
}

impl QueryService {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    pub fn list(&self, filter: &AttendanceFilter) -> Vec<AttendanceRecord> {
        let snapshot = self.store.snapshot();
        filter_records(&snapshot.attendance, filter)
    }

    pub fn stats(&self, filter: &AttendanceFilter) -> AttendanceStats {
        compute_stats(&self.list(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn record(name: &str, class: &str, class_id: Uuid, day: u32, class_type: ClassType, rating: u8, duration: i64) -> AttendanceRecord {
        AttendanceRecord {
            id: 0,
            class_id,
            class_name: class.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            member_id: Uuid::new_v4(),
            member_name: name.to_string(),
            check_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            check_out: None,
            duration_minutes: duration,
            class_type,
            feedback: String::new(),
            rating,
        }
    }

    fn sample() -> (Vec<AttendanceRecord>, Uuid) {
        let vinyasa = Uuid::new_v4();
        let hatha = Uuid::new_v4();
        let records = vec![
            record("Mariana Costa", "Vinyasa Flow", vinyasa, 10, ClassType::Online, 5, 90),
            record("Pedro Lima", "Vinyasa Flow", vinyasa, 11, ClassType::Online, 4, 75),
            record("Ana Souza", "Hatha Yoga", hatha, 10, ClassType::InPerson, 5, 90),
        ];
        (records, vinyasa)
    }

    #[test]
    fn filtro_combina_os_tres_predicados_com_e_logico() {
        let (records, vinyasa) = sample();

        let filter = AttendanceFilter {
            class_id: Some(vinyasa),
            date: Some(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()),
            search: Some("mariana".to_string()),
        };

        let result = filter_records(&records, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].member_name, "Mariana Costa");
    }

    #[test]
    fn relaxar_um_predicado_nunca_encolhe_o_resultado() {
        let (records, vinyasa) = sample();

        let strict = AttendanceFilter {
            class_id: Some(vinyasa),
            date: Some(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()),
            search: Some("vinyasa".to_string()),
        };
        let strict_len = filter_records(&records, &strict).len();

        for relaxed in [
            AttendanceFilter { class_id: None, ..strict.clone() },
            AttendanceFilter { date: None, ..strict.clone() },
            AttendanceFilter { search: None, ..strict.clone() },
        ] {
            assert!(filter_records(&records, &relaxed).len() >= strict_len);
        }
    }

    #[test]
    fn busca_ignora_caixa_e_casa_nome_da_aula() {
        let (records, _) = sample();

        let filter = AttendanceFilter {
            search: Some("HATHA".to_string()),
            ..Default::default()
        };

        let result = filter_records(&records, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].class_name, "Hatha Yoga");
    }

    #[test]
    fn filtro_vazio_devolve_tudo() {
        let (records, _) = sample();
        let result = filter_records(&records, &AttendanceFilter::default());
        assert_eq!(result.len(), records.len());
    }

    #[test]
    fn estatisticas_do_cenario_de_referencia() {
        // Notas [5,4,5], durações [90,75,90], tipos [Online,Online,InPerson].
        let (records, _) = sample();

        let stats = compute_stats(&records);

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.avg_duration_minutes, 85);
        assert_eq!(stats.avg_rating, "4.7");
        assert_eq!(stats.online_percentage, 67);
    }

    #[test]
    fn estatisticas_de_entrada_vazia_degradam_para_zero() {
        let stats = compute_stats(&[]);

        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.avg_duration_minutes, 0);
        assert_eq!(stats.avg_rating, "0.0");
        assert_eq!(stats.online_percentage, 0);
    }

    #[test]
    fn total_de_registros_sempre_igual_ao_tamanho_da_entrada() {
        let (records, _) = sample();
        assert_eq!(compute_stats(&records).total_records, records.len());
        assert_eq!(compute_stats(&records[..1]).total_records, 1);
    }
}

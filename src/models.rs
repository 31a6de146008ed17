//! Backend payloads and the session handed to the game view.
//!
//! Field names follow the backend's JSON (camelCase, Spanish), the Rust
//! names are the English equivalents.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer mode of a question
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuestionKind {
    /// One option may be picked; a new pick replaces the previous one
    #[default]
    #[serde(rename = "UNICA")]
    Single,
    /// Any number of options may be toggled
    #[serde(rename = "MULTIPLE")]
    Multiple,
}

impl QuestionKind {
    /// Backend tag; anything other than `MULTIPLE` is a single-answer question
    pub fn from_tag(tag: &str) -> Self {
        if tag == "MULTIPLE" {
            QuestionKind::Multiple
        } else {
            QuestionKind::Single
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, QuestionKind::Multiple)
    }
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<QuestionKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.map(|t| QuestionKind::from_tag(&t)).unwrap_or_default())
}

/// A single question of a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "enunciado")]
    pub prompt: String,
    #[serde(rename = "tipo", default, deserialize_with = "deserialize_kind")]
    pub kind: QuestionKind,
    #[serde(rename = "opciones", default)]
    pub options: Vec<String>,
}

impl Question {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Problems with the session identifier carried by a `Partida`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game session carries no identifier (neither `partidaId` nor `id`)")]
    MissingId,
    #[error("game session identifiers disagree: partidaId={partida_id}, id={id}")]
    ConflictingIds { partida_id: i64, id: i64 },
}

/// One quiz attempt as created by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partida {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partida_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nombreJugador", default)]
    pub player_name: String,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "totalPreguntas")]
    pub total_questions: usize,
    #[serde(rename = "preguntas", default)]
    pub questions: Vec<Question>,
}

impl Partida {
    /// Identifier used to correlate answer submissions with this session.
    ///
    /// `partidaId` and `id` are both accepted; when both are present they
    /// must agree.
    pub fn correlation_id(&self) -> Result<i64, SessionError> {
        match (self.partida_id, self.id) {
            (Some(p), Some(i)) if p != i => Err(SessionError::ConflictingIds {
                partida_id: p,
                id: i,
            }),
            (Some(p), _) => Ok(p),
            (None, Some(i)) => Ok(i),
            (None, None) => Err(SessionError::MissingId),
        }
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

/// Body of `POST /api/juego/answer`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub partida_id: i64,
    pub pregunta_id: i64,
    pub respuestas_usuario: Vec<String>,
}

/// Authoritative verdict for one submitted answer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct AnswerResult {
    #[serde(rename = "esCorrecta")]
    pub is_correct: bool,
    #[serde(rename = "respuestasCorrectas", default)]
    pub correct_answers: Vec<String>,
    #[serde(rename = "puntosTotales")]
    pub total_points: i64,
    #[serde(rename = "terminada")]
    pub finished: bool,
}

impl AnswerResult {
    pub fn is_correct_option(&self, option: &str) -> bool {
        self.correct_answers.iter().any(|o| o == option)
    }
}

/// One finished game as listed by `GET /api/juego/historial`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "puntos")]
    pub points: i64,
    #[serde(rename = "aciertos")]
    pub hits: i64,
    #[serde(rename = "totalPreguntas")]
    pub total_questions: i64,
}

impl HistoryEntry {
    /// Human readable date; the raw string when it is not ISO-8601
    pub fn display_date(&self) -> String {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&self.date) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
        self.date.clone()
    }
}

/// Aggregates shown at the top of the profile view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub games: usize,
    pub total_points: i64,
    pub average_points: i64,
}

impl ProfileStats {
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        let games = history.len();
        let total_points: i64 = history.iter().map(|h| h.points).sum();
        let average_points = if games > 0 {
            (total_points as f64 / games as f64).round() as i64
        } else {
            0
        };
        ProfileStats {
            games,
            total_points,
            average_points,
        }
    }
}

/// What the game view hands to the results view once the backend says the
/// session is over
#[derive(Clone, Debug, PartialEq)]
pub struct FinalResults {
    pub resultado: AnswerResult,
    pub partida: Partida,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partida_response() {
        let json = r#"{
            "partidaId": 7,
            "nombreJugador": "Ana",
            "totalPreguntas": 2,
            "preguntas": [
                {"id": 1, "categoria": "ciencia", "enunciado": "2+2?", "tipo": "UNICA", "opciones": ["3", "4"]},
                {"id": 2, "categoria": "ciencia", "enunciado": "Primos?", "tipo": "MULTIPLE", "opciones": ["2", "4", "5"]}
            ]
        }"#;
        let partida: Partida = serde_json::from_str(json).unwrap();
        assert_eq!(partida.correlation_id(), Ok(7));
        assert_eq!(partida.player_name, "Ana");
        assert_eq!(partida.total_questions, 2);
        assert_eq!(partida.questions[0].kind, QuestionKind::Single);
        assert_eq!(partida.questions[1].kind, QuestionKind::Multiple);
        assert_eq!(partida.questions[1].options, vec!["2", "4", "5"]);
    }

    #[test]
    fn test_unknown_kind_is_single() {
        let json = r#"{"id": 3, "enunciado": "?", "tipo": "VERDADERO_FALSO", "opciones": ["V", "F"]}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind, QuestionKind::Single);

        let json = r#"{"id": 3, "enunciado": "?", "opciones": []}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind, QuestionKind::Single);

        // the tag is case sensitive
        assert_eq!(QuestionKind::from_tag("multiple"), QuestionKind::Single);
        assert_eq!(QuestionKind::from_tag("MULTIPLE"), QuestionKind::Multiple);
    }

    #[test]
    fn test_correlation_id_fallback() {
        let base = Partida {
            partida_id: None,
            id: Some(12),
            player_name: String::new(),
            category: None,
            total_questions: 0,
            questions: vec![],
        };
        assert_eq!(base.correlation_id(), Ok(12));

        let both_equal = Partida { partida_id: Some(12), ..base.clone() };
        assert_eq!(both_equal.correlation_id(), Ok(12));

        let conflicting = Partida { partida_id: Some(5), ..base.clone() };
        assert_eq!(
            conflicting.correlation_id(),
            Err(SessionError::ConflictingIds { partida_id: 5, id: 12 })
        );

        let missing = Partida { id: None, ..base };
        assert_eq!(missing.correlation_id(), Err(SessionError::MissingId));
    }

    #[test]
    fn test_answer_request_wire_shape() {
        let req = AnswerRequest {
            partida_id: 7,
            pregunta_id: 3,
            respuestas_usuario: vec!["B".into()],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"partidaId": 7, "preguntaId": 3, "respuestasUsuario": ["B"]})
        );
    }

    #[test]
    fn test_parse_answer_result() {
        let json = r#"{"esCorrecta": false, "respuestasCorrectas": ["A", "C"], "puntosTotales": 20, "terminada": true}"#;
        let res: AnswerResult = serde_json::from_str(json).unwrap();
        assert!(!res.is_correct);
        assert!(res.finished);
        assert_eq!(res.total_points, 20);
        assert!(res.is_correct_option("C"));
        assert!(!res.is_correct_option("B"));
    }

    #[test]
    fn test_profile_stats() {
        let entry = |points| HistoryEntry {
            id: 1,
            category: "historia".into(),
            date: "2025-01-02".into(),
            points,
            hits: 1,
            total_questions: 5,
        };
        let stats = ProfileStats::from_history(&[entry(10), entry(25)]);
        assert_eq!(stats.games, 2);
        assert_eq!(stats.total_points, 35);
        assert_eq!(stats.average_points, 18);

        assert_eq!(ProfileStats::from_history(&[]), ProfileStats::default());
    }

    #[test]
    fn test_display_date() {
        let mut entry: HistoryEntry = serde_json::from_str(
            r#"{"id": 1, "categoria": "arte", "fecha": "2025-03-04T10:15:00", "puntos": 5, "aciertos": 1, "totalPreguntas": 10}"#,
        )
        .unwrap();
        assert_eq!(entry.display_date(), "2025-03-04 10:15");

        entry.date = "ayer".into();
        assert_eq!(entry.display_date(), "ayer");
    }
}

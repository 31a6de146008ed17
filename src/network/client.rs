//! HTTP client wrapper - talks to the quiz backend

use std::time::Duration;
use thiserror::Error;

use crate::constants::{ANSWER_PATH, HISTORY_PATH, REQUEST_TIMEOUT_SECS};
use crate::models::{AnswerRequest, AnswerResult, HistoryEntry};

/// Failures talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No active session found.")]
    MissingCredential,
    #[error("Request timed out ({0}s)")]
    Timeout(u64),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(REQUEST_TIMEOUT_SECS)
        } else if e.is_connect() {
            ApiError::Connect(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status(status)
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Typed access to the two game endpoints
#[derive(Clone, Debug)]
pub struct QuizClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuizClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(create_client(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        QuizClient { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /api/juego/answer`
    pub async fn submit_answer(
        &self,
        token: &str,
        request: &AnswerRequest,
    ) -> Result<AnswerResult, ApiError> {
        let resp = self
            .http
            .post(self.url(ANSWER_PATH))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json::<AnswerResult>().await?)
    }

    /// `GET /api/juego/historial`
    pub async fn fetch_history(&self, token: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        let resp = self
            .http
            .get(self.url(HISTORY_PATH))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json::<Vec<HistoryEntry>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn bearer(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    #[tokio::test]
    async fn test_submit_answer() {
        let app = Router::new().route(
            "/api/juego/answer",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(bearer(&headers).as_deref(), Some("Bearer tok"));
                assert_eq!(
                    body,
                    serde_json::json!({"partidaId": 9, "preguntaId": 4, "respuestasUsuario": ["A", "C"]})
                );
                Json(serde_json::json!({
                    "esCorrecta": true,
                    "respuestasCorrectas": ["A", "C"],
                    "puntosTotales": 30,
                    "terminada": false
                }))
            }),
        );
        let client = QuizClient::new(serve(app).await);
        let result = client
            .submit_answer(
                "tok",
                &AnswerRequest {
                    partida_id: 9,
                    pregunta_id: 4,
                    respuestas_usuario: vec!["A".into(), "C".into()],
                },
            )
            .await
            .unwrap();
        assert!(result.is_correct);
        assert_eq!(result.total_points, 30);
        assert!(!result.finished);
    }

    #[tokio::test]
    async fn test_fetch_history() {
        let app = Router::new().route(
            "/api/juego/historial",
            get(|| async {
                Json(serde_json::json!([
                    {"id": 1, "categoria": "cine", "fecha": "2025-05-01", "puntos": 40, "aciertos": 4, "totalPreguntas": 5},
                    {"id": 2, "categoria": "música", "fecha": "2025-05-02", "puntos": 10, "aciertos": 1, "totalPreguntas": 5}
                ]))
            }),
        );
        let client = QuizClient::new(serve(app).await);
        let history = client.fetch_history("tok").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].category, "música");
        assert_eq!(history[0].hits, 4);
    }

    #[tokio::test]
    async fn test_error_status() {
        let app = Router::new().route(
            "/api/juego/historial",
            get(|| async { StatusCode::UNAUTHORIZED }),
        );
        let client = QuizClient::new(serve(app).await);
        let err = client.fetch_history("bad").await.unwrap_err();
        assert!(matches!(err, ApiError::Status(s) if s == StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = QuizClient::new(format!("http://{}", addr));
        let err = client.fetch_history("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Connect(_)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = QuizClient::new("http://localhost:8080/");
        assert_eq!(client.url(ANSWER_PATH), "http://localhost:8080/api/juego/answer");
    }
}

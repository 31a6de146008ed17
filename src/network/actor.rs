//! Network actor - runs backend calls in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::QuizClient;

/// Network actor that executes backend commands
pub struct NetworkActor {
    client: QuizClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: QuizClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::SubmitAnswer { id, token, request }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, partida_id = request.partida_id, pregunta_id = request.pregunta_id, "Submitting answer");
                                let response = match client.submit_answer(&token, &request).await {
                                    Ok(result) => NetworkResponse::AnswerScored { id, result },
                                    Err(e) => {
                                        tracing::warn!(id, error = %e, "Answer submission failed");
                                        NetworkResponse::AnswerFailed { id, message: e.to_string() }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::FetchHistory { id, token }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "Fetching game history");
                                let response = match client.fetch_history(&token).await {
                                    Ok(entries) => {
                                        tracing::info!(id, count = entries.len(), "History loaded");
                                        NetworkResponse::HistoryLoaded { id, entries }
                                    }
                                    Err(e) => {
                                        tracing::warn!(id, error = %e, "History request failed");
                                        NetworkResponse::HistoryFailed { id, message: e.to_string() }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            // in-flight calls are dropped; their results are never delivered
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

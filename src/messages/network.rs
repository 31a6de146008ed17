//! Network messages - communication between App and Network layers

use crate::models::{AnswerRequest, AnswerResult, HistoryEntry};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Submit the answer for the current question
    SubmitAnswer {
        id: u64,
        token: String,
        request: AnswerRequest,
    },
    /// Load the player's finished games
    FetchHistory {
        id: u64,
        token: String,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    AnswerScored {
        id: u64,
        result: AnswerResult,
    },
    AnswerFailed {
        id: u64,
        message: String,
    },
    HistoryLoaded {
        id: u64,
        entries: Vec<HistoryEntry>,
    },
    HistoryFailed {
        id: u64,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::AnswerScored { id, .. } => *id,
            NetworkResponse::AnswerFailed { id, .. } => *id,
            NetworkResponse::HistoryLoaded { id, .. } => *id,
            NetworkResponse::HistoryFailed { id, .. } => *id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            NetworkResponse::AnswerFailed { .. } | NetworkResponse::HistoryFailed { .. }
        )
    }
}

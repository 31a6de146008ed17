//! # Quiz TUI
//!
//! Terminal client for a quiz game backend.
//!
//! ## Features
//! - Play a started game session question by question
//! - Single and multiple answer questions with instant feedback
//! - Final results screen
//! - Profile with game history and aggregated stats
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod constants;
pub mod config;
pub mod game;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{AnswerRequest, AnswerResult, HistoryEntry, Partida, Question, QuestionKind};
pub use game::{project, reduce, GameEvent, GameState, GameView};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;

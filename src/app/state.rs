//! App state - pure data structure with no I/O logic

use crate::config::TokenStore;
use crate::game::{self, GameState};
use crate::messages::{RenderState, View};
use crate::models::{FinalResults, HistoryEntry, Partida, ProfileStats};

/// Profile view data
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ProfileState {
    #[default]
    Idle,
    Loading,
    Loaded {
        stats: ProfileStats,
        entries: Vec<HistoryEntry>,
    },
    /// Blocking message, no retry until the user asks for one
    Failed(String),
}

/// Answer submission awaiting a network response
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingAnswer {
    pub request_id: u64,
    pub generation: u64,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub view: View,
    pub show_help: bool,

    // Login
    pub login_input: String,
    pub login_message: Option<String>,
    pub tokens: TokenStore,
    /// Whether a token was on disk at the last read
    pub has_token: bool,

    // Game
    pub game: GameState,
    pub option_focus: usize,
    pub pending_answer: Option<PendingAnswer>,

    // Results
    pub results: Option<FinalResults>,

    // Profile
    pub profile: ProfileState,
    pub pending_history: Option<u64>,

    pub next_request_id: u64,
}

impl AppState {
    /// Start on the game view when a valid session was handed over,
    /// otherwise on the login view.
    pub fn new(tokens: TokenStore, partida: Option<Partida>) -> Self {
        let mut state = AppState {
            view: View::Login,
            show_help: false,
            login_input: String::new(),
            login_message: None,
            has_token: tokens.load().is_some(),
            tokens,
            game: GameState::NoSession,
            option_focus: 0,
            pending_answer: None,
            results: None,
            profile: ProfileState::Idle,
            pending_history: None,
            next_request_id: 1,
        };

        match GameState::start(partida) {
            Ok(GameState::NoSession) => {
                tracing::info!("No game session supplied, redirecting to login");
            }
            Ok(game) => {
                state.game = game;
                state.view = View::Game;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected game session");
                state.login_message = Some(e.to_string());
            }
        }
        state
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Number of options of the question on screen
    pub fn option_count(&self) -> usize {
        self.game
            .active()
            .and_then(|g| g.current_question())
            .map(|q| q.options.len())
            .unwrap_or(0)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            view: self.view,
            show_help: self.show_help,
            login_input_len: self.login_input.chars().count(),
            login_message: self.login_message.clone(),
            has_token: self.has_token,
            game: game::project(&self.game),
            option_focus: self.option_focus,
            results: self.results.clone(),
            profile: self.profile.clone(),
        }
    }
}

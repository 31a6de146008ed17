//! Command handlers - business logic for processing UI events

use crate::app::state::{AppState, PendingAnswer, ProfileState};
use crate::game::{self, Effect, GameEvent, GameState, GameStatus};
use crate::messages::{NetworkCommand, NetworkResponse, View};
use crate::models::ProfileStats;
use crate::network::ApiError;

impl AppState {
    // ========================
    // Login
    // ========================

    pub fn login_char(&mut self, c: char) {
        self.login_input.push(c);
    }

    pub fn login_backspace(&mut self) {
        self.login_input.pop();
    }

    /// Store the pasted token and continue to the profile view
    pub fn submit_login(&mut self) -> Option<NetworkCommand> {
        let token = self.login_input.trim().to_string();
        if token.is_empty() {
            self.login_message = Some(String::from(
                "Paste the token issued by the login service.",
            ));
            return None;
        }
        if let Err(e) = self.tokens.save(&token) {
            tracing::warn!(error = %e, "Could not store token");
            self.login_message = Some(format!("Could not store token: {}", e));
            return None;
        }
        tracing::info!(path = %self.tokens.path().display(), "Token stored");
        self.has_token = true;
        self.login_input.clear();
        self.login_message = None;
        self.open_profile()
    }

    pub fn open_login(&mut self) {
        self.leave_game();
        self.view = View::Login;
        self.login_input.clear();
    }

    // ========================
    // Game
    // ========================

    pub fn focus_prev_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_focus = self.option_focus.checked_sub(1).unwrap_or(count - 1);
        }
    }

    pub fn focus_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_focus = (self.option_focus + 1) % count;
        }
    }

    pub fn toggle_focused(&mut self) -> Option<NetworkCommand> {
        self.toggle_at(self.option_focus)
    }

    pub fn toggle_at(&mut self, index: usize) -> Option<NetworkCommand> {
        let option = self
            .game
            .active()
            .and_then(|g| g.current_question())
            .and_then(|q| q.options.get(index))
            .cloned()?;
        self.option_focus = index;
        self.dispatch(GameEvent::Toggle(option))
    }

    /// Enter on the game view: submit while presenting, advance once revealed
    pub fn confirm(&mut self) -> Option<NetworkCommand> {
        match self.game.status() {
            GameStatus::Presenting => self.dispatch(GameEvent::Submit),
            GameStatus::Revealed => self.dispatch(GameEvent::Advance),
            GameStatus::NoSession => self.dispatch(GameEvent::Advance),
            GameStatus::Submitting | GameStatus::Complete => None,
        }
    }

    pub fn dismiss_notice(&mut self) -> Option<NetworkCommand> {
        self.dispatch(GameEvent::DismissNotice)
    }

    /// Run one event through the game reducer and carry out its effect
    pub fn dispatch(&mut self, event: GameEvent) -> Option<NetworkCommand> {
        let cursor_before = self.game.active().map(|g| g.cursor());
        let (next, effect) = game::reduce(std::mem::take(&mut self.game), event);
        self.game = next;
        if self.game.active().map(|g| g.cursor()) != cursor_before {
            self.option_focus = 0;
        }

        match effect? {
            Effect::RedirectToLogin => {
                tracing::info!("No game session, redirecting to login");
                self.view = View::Login;
                None
            }
            Effect::SubmitAnswer { generation, request } => {
                let token = self.tokens.load();
                self.has_token = token.is_some();
                let Some(token) = token else {
                    let message = ApiError::MissingCredential.to_string();
                    return self.dispatch(GameEvent::SubmissionFailed { generation, message });
                };
                let id = self.next_id();
                self.pending_answer = Some(PendingAnswer {
                    request_id: id,
                    generation,
                });
                Some(NetworkCommand::SubmitAnswer { id, token, request })
            }
            Effect::ShowResults(results) => {
                tracing::info!(view = ?View::Results, "Navigating");
                self.results = Some(*results);
                self.game = GameState::NoSession;
                self.pending_answer = None;
                self.view = View::Results;
                None
            }
        }
    }

    /// Discard the current attempt; a late answer for it is dropped
    fn leave_game(&mut self) {
        if self.view == View::Game {
            tracing::info!(status = ?self.game.status(), "Leaving game view");
        }
        self.game = GameState::NoSession;
        self.pending_answer = None;
        self.option_focus = 0;
    }

    // ========================
    // Profile
    // ========================

    pub fn open_profile(&mut self) -> Option<NetworkCommand> {
        self.leave_game();
        self.view = View::Profile;
        self.load_history()
    }

    pub fn load_history(&mut self) -> Option<NetworkCommand> {
        let token = self.tokens.load();
        self.has_token = token.is_some();
        let Some(token) = token else {
            self.profile = ProfileState::Failed(ApiError::MissingCredential.to_string());
            self.pending_history = None;
            return None;
        };
        let id = self.next_id();
        self.pending_history = Some(id);
        self.profile = ProfileState::Loading;
        Some(NetworkCommand::FetchHistory { id, token })
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match response {
            NetworkResponse::AnswerScored { id, result } => {
                let generation = self.take_pending_answer(id)?;
                self.dispatch(GameEvent::SubmissionSucceeded { generation, result })
            }
            NetworkResponse::AnswerFailed { id, message } => {
                let generation = self.take_pending_answer(id)?;
                self.dispatch(GameEvent::SubmissionFailed { generation, message })
            }
            NetworkResponse::HistoryLoaded { id, entries } => {
                if self.pending_history == Some(id) {
                    self.pending_history = None;
                    self.profile = ProfileState::Loaded {
                        stats: ProfileStats::from_history(&entries),
                        entries,
                    };
                }
                None
            }
            NetworkResponse::HistoryFailed { id, message } => {
                if self.pending_history == Some(id) {
                    self.pending_history = None;
                    self.profile = ProfileState::Failed(format!(
                        "Error loading history from the server. {}",
                        message
                    ));
                }
                None
            }
        }
    }

    fn take_pending_answer(&mut self, id: u64) -> Option<u64> {
        match self.pending_answer {
            Some(p) if p.request_id == id => {
                self.pending_answer = None;
                Some(p.generation)
            }
            _ => {
                tracing::debug!(id, "Discarding answer for a request that is no longer pending");
                None
            }
        }
    }
}

//! Game session progression - state holder and pure reducer
//!
//! `reduce` takes the current state and one event and returns the next
//! state plus at most one effect for the caller to carry out (issue the
//! submission, hand off to the results view, redirect to login). No I/O
//! happens here.

use crate::game::selection::Selection;
use crate::models::{AnswerRequest, AnswerResult, FinalResults, Partida, Question, SessionError};

/// Per-question marker used by the progress dots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Coarse state of the machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NoSession,
    Presenting,
    Submitting,
    Revealed,
    Complete,
}

/// Phase of an active game
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Presenting,
    Submitting { generation: u64 },
    Revealed(AnswerResult),
}

/// Dismissable message shown over the game view
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// An attempt in progress
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveGame {
    partida: Partida,
    partida_id: i64,
    cursor: usize,
    selection: Selection,
    outcomes: Vec<Outcome>,
    phase: Phase,
    generation: u64,
    notice: Option<Notice>,
}

impl ActiveGame {
    pub fn partida(&self) -> &Partida {
        &self.partida
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Questions this attempt can present; the cursor never passes the last one
    pub fn question_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.partida.question(self.cursor)
    }

    /// Result of the last submission, once revealed
    pub fn revealed(&self) -> Option<&AnswerResult> {
        match &self.phase {
            Phase::Revealed(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }
}

/// State holder for one game view
#[derive(Clone, Debug, PartialEq, Default)]
pub enum GameState {
    #[default]
    NoSession,
    Active(Box<ActiveGame>),
    Complete,
}

impl GameState {
    /// Build the initial state from the session handed over by the previous
    /// view. `None` yields `NoSession`.
    pub fn start(partida: Option<Partida>) -> Result<GameState, SessionError> {
        let Some(partida) = partida else {
            return Ok(GameState::NoSession);
        };
        let partida_id = partida.correlation_id()?;
        // totalPreguntas comes from outside; never size beyond the questions we hold
        let count = partida.total_questions.min(partida.questions.len());
        if count != partida.total_questions {
            tracing::warn!(
                total_questions = partida.total_questions,
                questions = partida.questions.len(),
                "Session question count does not match its questions"
            );
        }
        let outcomes = vec![Outcome::Pending; count];
        Ok(GameState::Active(Box::new(ActiveGame {
            partida,
            partida_id,
            cursor: 0,
            selection: Selection::new(),
            outcomes,
            phase: Phase::Presenting,
            generation: 0,
            notice: None,
        })))
    }

    pub fn status(&self) -> GameStatus {
        match self {
            GameState::NoSession => GameStatus::NoSession,
            GameState::Complete => GameStatus::Complete,
            GameState::Active(game) => match game.phase {
                Phase::Presenting => GameStatus::Presenting,
                Phase::Submitting { .. } => GameStatus::Submitting,
                Phase::Revealed(_) => GameStatus::Revealed,
            },
        }
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        match self {
            GameState::Active(game) => Some(game.as_ref()),
            _ => None,
        }
    }
}

/// Inputs to the machine: user actions and the outcome of the one
/// outstanding request
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Toggle(String),
    Submit,
    SubmissionSucceeded { generation: u64, result: AnswerResult },
    SubmissionFailed { generation: u64, message: String },
    Advance,
    DismissNotice,
}

/// Work the caller must perform after a transition
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    RedirectToLogin,
    SubmitAnswer { generation: u64, request: AnswerRequest },
    ShowResults(Box<FinalResults>),
}

/// Apply one event to the game state
pub fn reduce(state: GameState, event: GameEvent) -> (GameState, Option<Effect>) {
    let mut game = match state {
        GameState::NoSession => return (GameState::NoSession, Some(Effect::RedirectToLogin)),
        GameState::Complete => {
            tracing::debug!(?event, "Game already complete, ignoring event");
            return (GameState::Complete, None);
        }
        GameState::Active(game) => game,
    };

    match event {
        GameEvent::Toggle(option) => {
            if game.phase != Phase::Presenting {
                return (GameState::Active(game), None);
            }
            let Some(question) = game.partida.question(game.cursor) else {
                return (GameState::Active(game), None);
            };
            if !question.has_option(&option) {
                tracing::warn!(option = %option, question = question.id, "Toggle for unknown option ignored");
                return (GameState::Active(game), None);
            }
            let kind = question.kind;
            game.selection.toggle(kind, &option);
            (GameState::Active(game), None)
        }

        GameEvent::Submit => {
            if game.phase != Phase::Presenting || game.selection.is_empty() {
                return (GameState::Active(game), None);
            }
            let Some(question_id) = game.current_question().map(|q| q.id) else {
                return (GameState::Active(game), None);
            };
            game.generation += 1;
            let generation = game.generation;
            game.phase = Phase::Submitting { generation };
            game.notice = None;
            let request = AnswerRequest {
                partida_id: game.partida_id,
                pregunta_id: question_id,
                respuestas_usuario: game.selection.to_vec(),
            };
            tracing::info!(generation, partida_id = game.partida_id, question_id, "Submitting answer");
            (
                GameState::Active(game),
                Some(Effect::SubmitAnswer { generation, request }),
            )
        }

        GameEvent::SubmissionSucceeded { generation, result } => {
            if game.phase != (Phase::Submitting { generation }) {
                tracing::debug!(generation, "Discarding stale submission result");
                return (GameState::Active(game), None);
            }
            let cursor = game.cursor;
            if let Some(slot) = game.outcomes.get_mut(cursor) {
                *slot = Outcome::from_correct(result.is_correct);
            }
            tracing::info!(
                cursor,
                correct = result.is_correct,
                points = result.total_points,
                finished = result.finished,
                "Answer scored"
            );
            game.phase = Phase::Revealed(result);
            (GameState::Active(game), None)
        }

        GameEvent::SubmissionFailed { generation, message } => {
            if game.phase != (Phase::Submitting { generation }) {
                tracing::debug!(generation, "Discarding stale submission failure");
                return (GameState::Active(game), None);
            }
            tracing::warn!(generation, error = %message, "Answer submission failed");
            game.phase = Phase::Presenting;
            game.notice = Some(Notice::new(message));
            (GameState::Active(game), None)
        }

        GameEvent::Advance => match std::mem::replace(&mut game.phase, Phase::Presenting) {
            Phase::Revealed(resultado) if resultado.finished => {
                tracing::info!(points = resultado.total_points, "Game complete");
                let results = FinalResults {
                    resultado,
                    partida: game.partida,
                };
                (GameState::Complete, Some(Effect::ShowResults(Box::new(results))))
            }
            Phase::Revealed(resultado) => {
                if game.cursor + 1 >= game.question_count() {
                    // the backend has not closed the game but there is nothing left to show
                    tracing::warn!(cursor = game.cursor, "No further question to present");
                    game.phase = Phase::Revealed(resultado);
                    game.notice = Some(Notice::new(
                        "The server did not close the game but no questions remain.",
                    ));
                    return (GameState::Active(game), None);
                }
                game.cursor += 1;
                game.selection.clear();
                (GameState::Active(game), None)
            }
            other => {
                game.phase = other;
                (GameState::Active(game), None)
            }
        },

        GameEvent::DismissNotice => {
            game.notice = None;
            (GameState::Active(game), None)
        }
    }
}

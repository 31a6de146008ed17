//! Pure projection of the game state into what the game view draws.
//!
//! Returns `None` ("nothing to render") whenever the state does not address
//! a question, never panics.

use crate::game::machine::{GameState, Outcome, Phase};

/// Display status of one answer option
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionStatus {
    Selected,
    Correct,
    Incorrect,
    Neutral,
}

/// Display status of one progress dot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Active,
    Correct,
    Incorrect,
    Pending,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionView {
    /// `A`, `B`, `C`... by position
    pub letter: char,
    pub text: String,
    pub status: OptionStatus,
    /// No toggling accepted
    pub inert: bool,
}

/// Label of the main action button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionLabel {
    Confirm,
    Next,
    SeeResults,
}

impl ActionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionLabel::Confirm => "CONFIRM ANSWER",
            ActionLabel::Next => "NEXT QUESTION →",
            ActionLabel::SeeResults => "SEE RESULTS",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameView {
    pub player_name: String,
    /// Points badge: last known total or `---`
    pub points: String,
    pub category: String,
    pub prompt: String,
    pub is_multiple: bool,
    pub question_number: usize,
    pub question_count: usize,
    pub options: Vec<OptionView>,
    pub action: ActionLabel,
    pub action_enabled: bool,
    pub loading: bool,
    pub steps: Vec<StepStatus>,
    pub notice: Option<String>,
    /// Local time the notice was raised, `HH:MM:SS`
    pub notice_time: Option<String>,
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .filter(u8::is_ascii_uppercase)
        .map(char::from)
        .unwrap_or('?')
}

/// Project the current state, or `None` when there is nothing to render
pub fn project(state: &GameState) -> Option<GameView> {
    let game = state.active()?;
    let question = game.current_question()?;
    let revealed = game.revealed();

    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let selected = game.selection().contains(text);
            let status = match revealed {
                Some(result) if result.is_correct_option(text) => OptionStatus::Correct,
                Some(_) if selected => OptionStatus::Incorrect,
                Some(_) => OptionStatus::Neutral,
                None if selected => OptionStatus::Selected,
                None => OptionStatus::Neutral,
            };
            OptionView {
                letter: option_letter(i),
                text: text.clone(),
                status,
                inert: revealed.is_some(),
            }
        })
        .collect();

    let steps = game
        .outcomes()
        .iter()
        .enumerate()
        .map(|(i, outcome)| {
            if i == game.cursor() {
                StepStatus::Active
            } else {
                match outcome {
                    Outcome::Correct => StepStatus::Correct,
                    Outcome::Incorrect => StepStatus::Incorrect,
                    Outcome::Pending => StepStatus::Pending,
                }
            }
        })
        .collect();

    let (action, action_enabled) = match game.phase() {
        Phase::Presenting => (ActionLabel::Confirm, !game.selection().is_empty()),
        Phase::Submitting { .. } => (ActionLabel::Confirm, false),
        Phase::Revealed(result) if result.finished => (ActionLabel::SeeResults, true),
        Phase::Revealed(_) => (ActionLabel::Next, true),
    };

    Some(GameView {
        player_name: game.partida().player_name.clone(),
        points: revealed
            .map(|r| r.total_points.to_string())
            .unwrap_or_else(|| String::from("---")),
        category: question.category.to_uppercase(),
        prompt: question.prompt.clone(),
        is_multiple: question.kind.is_multiple(),
        question_number: game.cursor() + 1,
        question_count: game.question_count(),
        options,
        action,
        action_enabled,
        loading: game.is_submitting(),
        steps,
        notice: game.notice().map(|n| n.message.clone()),
        notice_time: game.notice().map(|n| {
            n.timestamp
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string()
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::machine::{reduce, GameEvent};
    use crate::models::{AnswerResult, Partida, Question, QuestionKind};

    fn state(kind: QuestionKind) -> GameState {
        let partida = Partida {
            partida_id: Some(1),
            id: None,
            player_name: "Luis".into(),
            category: None,
            total_questions: 3,
            questions: (0..3)
                .map(|i| Question {
                    id: i,
                    category: "geografía".into(),
                    prompt: "Capital?".into(),
                    kind,
                    options: vec!["Lima".into(), "Quito".into(), "Bogotá".into()],
                })
                .collect(),
        };
        GameState::start(Some(partida)).unwrap()
    }

    fn apply(state: GameState, events: Vec<GameEvent>) -> GameState {
        events.into_iter().fold(state, |s, e| reduce(s, e).0)
    }

    fn statuses(view: &GameView) -> Vec<OptionStatus> {
        view.options.iter().map(|o| o.status).collect()
    }

    #[test]
    fn test_nothing_to_render_without_session() {
        assert_eq!(project(&GameState::NoSession), None);
        assert_eq!(project(&GameState::Complete), None);
    }

    #[test]
    fn test_nothing_to_render_when_questions_missing() {
        let partida = Partida {
            partida_id: Some(1),
            id: None,
            player_name: "Luis".into(),
            category: None,
            total_questions: 3,
            questions: vec![],
        };
        let state = GameState::start(Some(partida)).unwrap();
        assert_eq!(project(&state), None);
    }

    #[test]
    fn test_presenting_view() {
        let s = apply(state(QuestionKind::Single), vec![GameEvent::Toggle("Quito".into())]);
        let view = project(&s).unwrap();
        assert_eq!(view.player_name, "Luis");
        assert_eq!(view.points, "---");
        assert_eq!(view.category, "GEOGRAFÍA");
        assert_eq!(
            statuses(&view),
            vec![OptionStatus::Neutral, OptionStatus::Selected, OptionStatus::Neutral]
        );
        assert_eq!(view.options.iter().map(|o| o.letter).collect::<String>(), "ABC");
        assert!(view.options.iter().all(|o| !o.inert));
        assert_eq!(view.action, ActionLabel::Confirm);
        assert!(view.action_enabled);
        assert_eq!(view.steps, vec![StepStatus::Active, StepStatus::Pending, StepStatus::Pending]);
    }

    #[test]
    fn test_confirm_disabled_until_selection_and_while_loading() {
        let s = state(QuestionKind::Single);
        assert!(!project(&s).unwrap().action_enabled);

        let s = apply(s, vec![GameEvent::Toggle("Lima".into()), GameEvent::Submit]);
        let view = project(&s).unwrap();
        assert!(view.loading);
        assert!(!view.action_enabled);
    }

    #[test]
    fn test_revealed_view() {
        let s = apply(
            state(QuestionKind::Multiple),
            vec![
                GameEvent::Toggle("Lima".into()),
                GameEvent::Toggle("Quito".into()),
                GameEvent::Submit,
                GameEvent::SubmissionSucceeded {
                    generation: 1,
                    result: AnswerResult {
                        is_correct: false,
                        correct_answers: vec!["Quito".into(), "Bogotá".into()],
                        total_points: 5,
                        finished: false,
                    },
                },
            ],
        );
        let view = project(&s).unwrap();
        assert_eq!(
            statuses(&view),
            vec![OptionStatus::Incorrect, OptionStatus::Correct, OptionStatus::Correct]
        );
        assert!(view.options.iter().all(|o| o.inert));
        assert_eq!(view.points, "5");
        assert_eq!(view.action, ActionLabel::Next);
        assert!(view.is_multiple);

        let s = apply(s, vec![GameEvent::Advance]);
        let view = project(&s).unwrap();
        assert_eq!(view.steps, vec![StepStatus::Incorrect, StepStatus::Active, StepStatus::Pending]);
        assert_eq!(view.question_number, 2);
    }

    #[test]
    fn test_see_results_label_when_finished() {
        let s = apply(
            state(QuestionKind::Single),
            vec![
                GameEvent::Toggle("Lima".into()),
                GameEvent::Submit,
                GameEvent::SubmissionSucceeded {
                    generation: 1,
                    result: AnswerResult {
                        is_correct: true,
                        correct_answers: vec!["Lima".into()],
                        total_points: 10,
                        finished: true,
                    },
                },
            ],
        );
        assert_eq!(project(&s).unwrap().action, ActionLabel::SeeResults);
    }

    #[test]
    fn test_notice_carries_time() {
        let s = apply(
            state(QuestionKind::Single),
            vec![
                GameEvent::Toggle("Lima".into()),
                GameEvent::Submit,
                GameEvent::SubmissionFailed { generation: 1, message: "timeout".into() },
            ],
        );
        let view = project(&s).unwrap();
        assert_eq!(view.notice.as_deref(), Some("timeout"));
        let time = view.notice_time.unwrap();
        assert!(chrono::NaiveTime::parse_from_str(&time, "%H:%M:%S").is_ok());

        let s = apply(s, vec![GameEvent::DismissNotice]);
        assert_eq!(project(&s).unwrap().notice_time, None);
    }

    #[test]
    fn test_question_count_follows_playable_questions() {
        let partida = Partida {
            partida_id: Some(1),
            id: None,
            player_name: "Luis".into(),
            category: None,
            total_questions: 40,
            questions: vec![Question {
                id: 1,
                category: "historia".into(),
                prompt: "¿Año?".into(),
                kind: QuestionKind::Single,
                options: vec!["1492".into(), "1810".into()],
            }],
        };
        let view = project(&GameState::start(Some(partida)).unwrap()).unwrap();
        assert_eq!(view.question_count, 1);
        assert_eq!(view.steps, vec![StepStatus::Active]);
    }

    #[test]
    fn test_option_letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(25), 'Z');
        assert_eq!(option_letter(26), '?');
    }
}

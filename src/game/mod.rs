//! Game session progression
//!
//! One quiz attempt: step through the questions in order, submit each
//! answer, reveal the backend's verdict and hand off to the results view
//! once the backend reports the game finished.

pub mod machine;
pub mod selection;
pub mod view;

pub use machine::{reduce, ActiveGame, Effect, GameEvent, GameState, GameStatus, Notice, Outcome, Phase};
pub use selection::Selection;
pub use view::{project, ActionLabel, GameView, OptionStatus, OptionView, StepStatus};

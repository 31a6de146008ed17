//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::ProfileState;
use crate::game::GameView;
use crate::messages::ui_events::View;
use crate::models::FinalResults;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub view: View,
    pub show_help: bool,

    // Login
    /// Number of characters typed; the token itself is never echoed
    pub login_input_len: usize,
    pub login_message: Option<String>,
    pub has_token: bool,

    // Game; `None` means nothing to render
    pub game: Option<GameView>,
    pub option_focus: usize,

    // Results
    pub results: Option<FinalResults>,

    // Profile
    pub profile: ProfileState,
}

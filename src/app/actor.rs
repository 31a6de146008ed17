//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    if let Some(cmd) = self.state.handle_response(response) {
                        let _ = self.network_tx.send(cmd);
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let cmd = match event {
            // Login
            UiEvent::LoginChar(c) => {
                self.state.login_char(c);
                None
            }
            UiEvent::LoginBackspace => {
                self.state.login_backspace();
                None
            }
            UiEvent::SubmitLogin => self.state.submit_login(),

            // Game
            UiEvent::FocusPrevOption => {
                self.state.focus_prev_option();
                None
            }
            UiEvent::FocusNextOption => {
                self.state.focus_next_option();
                None
            }
            UiEvent::ToggleFocused => self.state.toggle_focused(),
            UiEvent::ToggleAt(index) => self.state.toggle_at(index),
            UiEvent::Confirm => self.state.confirm(),
            UiEvent::DismissNotice => self.state.dismiss_notice(),

            // Navigation
            UiEvent::OpenProfile => self.state.open_profile(),
            UiEvent::OpenLogin => {
                self.state.open_login();
                None
            }
            UiEvent::ReloadHistory => self.state.load_history(),

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                None
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                None
            }

            // System
            UiEvent::Quit => return true,
        };

        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
        false
    }
}

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
        let startup = self.state.startup_commands();
        self.send(startup);
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
                    let follow_up = self.state.handle_response(response);
                    self.send(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmds: impl IntoIterator<Item = NetworkCommand>) {
        for cmd in cmds {
            if self.network_tx.send(cmd).is_err() {
                tracing::warn!("Network actor is gone, command dropped");
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Tab navigation
            UiEvent::SwitchTab(tab) => {
                let cmds = self.state.switch_tab(tab);
                self.send(cmds);
            }
            UiEvent::GoBack => {
                let cmds = self.state.go_back();
                self.send(cmds);
            }

            // Form fields
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::Submit => {
                let cmd = self.state.submit();
                self.send(cmd);
            }

            // Auth
            UiEvent::OpenSignUp => self.state.open_sign_up(),
            UiEvent::SignOut => {
                let cmds = self.state.sign_out();
                self.send(cmds);
            }

            // Home
            UiEvent::PrevGroup => {
                let cmd = self.state.prev_group();
                self.send(cmd);
            }
            UiEvent::NextGroup => {
                let cmd = self.state.next_group();
                self.send(cmd);
            }
            UiEvent::PrevExercise => self.state.prev_exercise(),
            UiEvent::NextExercise => self.state.next_exercise(),
            UiEvent::OpenExercise => {
                let cmds = self.state.open_exercise();
                self.send(cmds);
            }
            UiEvent::Reload => {
                let cmds = self.state.reload();
                self.send(cmds);
            }

            // Exercise detail
            UiEvent::MarkCompleted => {
                let cmd = self.state.mark_completed();
                self.send(cmd);
            }

            // History
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Avatar
            UiEvent::OpenAvatarInput => self.state.open_avatar_input(),
            UiEvent::AvatarPathChar(c) => self.state.avatar_path_char(c),
            UiEvent::AvatarPathBackspace => self.state.avatar_path_backspace(),
            UiEvent::UploadAvatar => {
                let cmd = self.state.upload_avatar();
                self.send(cmd);
            }
            UiEvent::CancelAvatarInput => self.state.cancel_avatar_input(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

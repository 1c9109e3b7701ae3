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
        // Start on the form list
        let initial = self.state.open_form_list();
        self.send(initial);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        tracing::trace!(?event, "UI event");
        match event {
            // Form list
            UiEvent::NewForm => self.state.new_form(),
            UiEvent::EditSelectedForm => {
                let cmd = self.state.edit_selected_form();
                self.send(cmd);
            }
            UiEvent::PreviewSelectedForm => {
                let cmd = self.state.preview_selected_form();
                self.send(cmd);
            }
            UiEvent::ViewSelectedResponses => {
                let cmd = self.state.view_selected_responses();
                self.send(cmd);
            }
            UiEvent::Reload => {
                let cmd = self.state.reload();
                self.send(cmd);
            }
            UiEvent::Back => {
                let cmd = self.state.back();
                self.send(cmd);
            }

            // Navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::OptionLeft => self.state.option_left(),
            UiEvent::OptionRight => self.state.option_right(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),

            // Builder
            UiEvent::PickUp => self.state.pick_up(),
            UiEvent::DropHere => self.state.drop_here(),
            UiEvent::CancelDrag => self.state.cancel_drag(),
            UiEvent::QuickAdd => self.state.quick_add(),
            UiEvent::MoveFieldUp => self.state.move_field_up(),
            UiEvent::MoveFieldDown => self.state.move_field_down(),
            UiEvent::DeleteField => self.state.delete_field(),
            UiEvent::StartOptionInput => self.state.start_option_input(),
            UiEvent::RemoveLastOption => self.state.remove_last_option(),
            UiEvent::SaveForm => {
                let cmd = self.state.save_form();
                self.send(cmd);
            }

            // Fill
            UiEvent::Choose => self.state.choose(),
            UiEvent::SubmitForm => {
                let cmd = self.state.submit_form();
                self.send(cmd);
            }

            // Responses
            UiEvent::ToggleResponse => self.state.toggle_response(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissAlert => self.state.dismiss_alert(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

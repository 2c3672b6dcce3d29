//! Dashboard state update logic
//!
//! Applies controller events and keyboard input to the dashboard state

use super::state::{DashboardState, MAX_AMOUNT_DIGITS};
use crate::dashboard::{ActionPhase, ActionView, ControllerCommand, ViewState};
use crate::events::{Event as ControllerEvent, EventType, Source};
use crossterm::event::KeyCode;

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Quit,
    Command(ControllerCommand),
    None,
}

impl DashboardState {
    /// Advance one frame: take the latest view and drain queued events.
    pub fn update(&mut self, view: ViewState) {
        self.tick += 1;
        self.view = view;

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    fn process_event(&mut self, event: &ControllerEvent) {
        if event.event_type == EventType::Alert {
            self.last_alert = Some(event.msg.clone());
        }
        // A write ends back in Idle, or fails before it ever left Idle
        if event.source == Source::Transaction
            && (event.event_type == EventType::Error || event.phase == Some(ActionPhase::Idle))
        {
            self.awaiting_write = false;
        }
    }

    /// The controller never got the last command.
    pub fn command_dropped(&mut self) {
        self.awaiting_write = false;
    }

    /// Map a key to an outcome. Only the action currently offered can be
    /// triggered, and nothing is sent while a write is in flight.
    pub fn handle_key(&mut self, code: KeyCode) -> KeyOutcome {
        let action = self.action();
        match code {
            KeyCode::Esc | KeyCode::Char('q') => KeyOutcome::Quit,
            KeyCode::Char('c') if action == ActionView::Connect => {
                KeyOutcome::Command(ControllerCommand::Connect)
            }
            KeyCode::Char('r') if self.view.session.connected && !self.view.busy() => {
                KeyOutcome::Command(ControllerCommand::Refresh)
            }
            KeyCode::Char(digit) if digit.is_ascii_digit() && action == ActionView::Mint => {
                if self.amount_input.len() < MAX_AMOUNT_DIGITS {
                    self.amount_input.push(digit);
                }
                KeyOutcome::None
            }
            KeyCode::Backspace => {
                self.amount_input.pop();
                KeyOutcome::None
            }
            KeyCode::Enter => self.submit(action),
            _ => KeyOutcome::None,
        }
    }

    fn submit(&mut self, action: ActionView) -> KeyOutcome {
        let command = match action {
            ActionView::Connect => return KeyOutcome::Command(ControllerCommand::Connect),
            ActionView::Loading => return KeyOutcome::None,
            ActionView::Withdraw => ControllerCommand::Withdraw,
            ActionView::Claim { .. } => ControllerCommand::Claim,
            ActionView::Mint => match self.pending_amount() {
                Some(amount) => {
                    self.amount_input.clear();
                    ControllerCommand::Mint(amount)
                }
                None => return KeyOutcome::None,
            },
        };
        // Hold further writes until the controller reports back on this one
        self.awaiting_write = true;
        KeyOutcome::Command(command)
    }
}

//! Dashboard state management
//!
//! Holds what the terminal renders: the latest view from the controller, the
//! mint amount being typed, and the activity log.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::dashboard::{ActionView, PendingAmount, ViewState};
use crate::events::Event as ControllerEvent;
use crate::network::Network;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Longest amount accepted from the keyboard, in digits.
pub const MAX_AMOUNT_DIGITS: usize = 9;

#[derive(Debug)]
pub struct DashboardState {
    pub network: Network,
    /// Wallet endpoint the controller talks to.
    pub wallet_url: String,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Latest view published by the controller.
    pub view: ViewState,
    /// Digits typed into the mint amount field.
    pub amount_input: String,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<ControllerEvent>,
    pub activity_logs: VecDeque<ControllerEvent>,
    /// Last alert raised, shown until the next one replaces it.
    pub last_alert: Option<String>,
    /// A write was sent and the controller has not finished it yet.
    pub awaiting_write: bool,
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(
        network: Network,
        wallet_url: String,
        start_time: Instant,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            network,
            wallet_url,
            start_time,
            view: ViewState::default(),
            amount_input: String::new(),
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            last_alert: None,
            awaiting_write: false,
            with_background_color: ui_config.with_background_color,
            tick: 0,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: ControllerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: ControllerEvent) {
        self.pending_events.push_back(event);
    }

    pub fn action(&self) -> ActionView {
        if self.awaiting_write && self.view.session.connected {
            return ActionView::Loading;
        }
        self.view.available_action()
    }

    /// The typed amount, if it is a valid mint amount.
    pub fn pending_amount(&self) -> Option<PendingAmount> {
        self.amount_input.parse().ok()
    }
}

//! Event System
//!
//! Types and implementations for controller events and logging

use crate::dashboard::state::ActionPhase;
use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Source {
    /// Wallet connection and network checks.
    Wallet,
    /// Read-only chain queries that refresh the view.
    Query,
    /// Mint, claim and withdraw transactions.
    Transaction,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    /// Needs the user's attention (wrong network, completed purchase).
    Alert,
    StateChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Optional phase information for state change events
    pub phase: Option<ActionPhase>,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            phase: None,
        }
    }

    pub fn state_change(phase: ActionPhase, msg: String) -> Self {
        Self {
            phase: Some(phase),
            ..Self::new(Source::Transaction, msg, EventType::StateChange, LogLevel::Info)
        }
    }

    pub fn wallet_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Wallet, msg, event_type, log_level)
    }

    pub fn query_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Query, msg, event_type, log_level)
    }

    pub fn transaction_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Transaction, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // StateChange events drive the header, not the log
        if self.event_type == EventType::StateChange {
            return false;
        }
        // Always show success and alert events
        if matches!(self.event_type, EventType::Success | EventType::Alert) {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// Event sending handle held by the dashboard controller
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event. A closed receiver is not an error: nobody is watching.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_wallet_event(&self, message: String, event_type: EventType, level: LogLevel) {
        self.send_event(Event::wallet_with_level(message, event_type, level))
            .await;
    }

    pub async fn send_query_event(&self, message: String, event_type: EventType, level: LogLevel) {
        self.send_event(Event::query_with_level(message, event_type, level))
            .await;
    }

    pub async fn send_transaction_event(
        &self,
        message: String,
        event_type: EventType,
        level: LogLevel,
    ) {
        self.send_event(Event::transaction_with_level(message, event_type, level))
            .await;
    }
}

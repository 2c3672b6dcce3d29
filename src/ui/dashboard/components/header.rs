//! Dashboard header component
//!
//! Renders the title and the transaction progress gauge

use super::super::state::DashboardState;
use crate::dashboard::ActionPhase;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(format!(
        "CRYPTO DEVS ICO v{}",
        env!("CARGO_PKG_VERSION")
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    // Loops every 20 ticks while a transaction is in flight
    let animated = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
    let (progress_text, gauge_color, progress_percent) = match state.view.phase {
        ActionPhase::Submitting => (
            "SUBMITTING - Confirm the transaction in your wallet".to_string(),
            Color::LightYellow,
            animated,
        ),
        ActionPhase::Confirming => (
            "CONFIRMING - Waiting for the transaction to be mined".to_string(),
            Color::LightGreen,
            animated,
        ),
        ActionPhase::Idle if !state.view.session.connected => (
            "DISCONNECTED - Connect your wallet".to_string(),
            Color::DarkGray,
            0,
        ),
        ActionPhase::Idle if state.view.stale => (
            "REFRESHING - Values may be out of date".to_string(),
            Color::LightBlue,
            animated,
        ),
        ActionPhase::Idle => ("READY".to_string(), Color::LightBlue, 100),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}

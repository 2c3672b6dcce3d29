//! Dashboard action panel component
//!
//! Renders the single action currently on offer

use super::super::state::DashboardState;
use crate::dashboard::ActionView;
use crate::units::{format_ether, mint_price};
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn key_hint(key: &str, label: &str, enabled: bool) -> Line<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", key), style),
        Span::styled(label.to_string(), style),
    ])
}

pub fn action_lines(state: &DashboardState) -> Vec<Line<'static>> {
    match state.action() {
        ActionView::Connect => vec![key_hint("C", "Connect your wallet", true)],
        ActionView::Loading => vec![Line::styled(
            "Loading...",
            Style::default().fg(Color::LightBlue),
        )],
        ActionView::Withdraw => vec![key_hint("Enter", "Withdraw Coins", true)],
        ActionView::Claim { tokens } => vec![
            Line::styled(
                format!("{} Tokens can be claimed!", tokens),
                Style::default().fg(Color::LightGreen),
            ),
            key_hint("Enter", "Claim Tokens", true),
        ],
        ActionView::Mint => {
            let amount = state.pending_amount();
            let cost = amount
                .map(|amount| format!("  Cost: {} ETH", format_ether(mint_price(amount.get()))))
                .unwrap_or_default();
            vec![
                Line::from(vec![
                    Span::raw("Amount of Tokens: "),
                    Span::styled(
                        format!("{}_", state.amount_input),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(cost, Style::default().fg(Color::DarkGray)),
                ]),
                key_hint("Enter", "Mint Tokens", amount.is_some()),
            ]
        }
    }
}

pub fn render_action_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut lines = action_lines(state);
    if let Some(alert) = &state.last_alert {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("! {}", alert),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .title("ACTION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

//! Dashboard info panel component
//!
//! Renders wallet and network information

use super::super::state::DashboardState;
use super::super::utils::short_address;
use crate::network::Network;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn line(text: String, color: Color) -> Line<'static> {
    Line::from(vec![Span::styled(text, Style::default().fg(color))])
}

pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let session = &state.view.session;
    let mut info_lines = Vec::new();

    let account_text = match (&session.account, session.connected) {
        (Some(account), true) => format!("Account: {}", short_address(account)),
        _ => "Account: Disconnected".to_string(),
    };
    info_lines.push(line(account_text, Color::LightBlue));

    let network_color = match state.network {
        Network::Local => Color::Yellow,
        _ => Color::Green,
    };
    info_lines.push(line(
        format!(
            "Network: {} ({})",
            state.network,
            state.network.chain_id()
        ),
        network_color,
    ));

    info_lines.push(line(format!("Wallet: {}", state.wallet_url), Color::Cyan));

    if session.is_owner {
        info_lines.push(line("Role: Sale owner".to_string(), Color::LightMagenta));
    }

    let uptime = state.start_time.elapsed().as_secs();
    let uptime_string = if uptime >= 3600 {
        format!(
            "Uptime: {}h {}m {}s",
            uptime / 3600,
            (uptime % 3600) / 60,
            uptime % 60
        )
    } else {
        format!("Uptime: {}m {}s", uptime / 60, uptime % 60)
    };
    info_lines.push(line(uptime_string, Color::LightGreen));

    let info_block = Block::default()
        .title("WALLET")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}

//! Dashboard sale panel component
//!
//! Renders the connected account's balance and overall sale progress

use super::super::state::DashboardState;
use crate::consts::cli_consts::sale::{DECIMALS, MAX_TOTAL_SUPPLY};
use crate::units::format_ether;
use primitive_types::U256;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph};

/// Share of the maximum supply already minted, 0..=100.
pub fn minted_percent(minted: U256) -> u16 {
    let cap = U256::from(MAX_TOTAL_SUPPLY) * U256::exp10(DECIMALS);
    if minted >= cap {
        return 100;
    }
    (minted * U256::from(100u64) / cap).low_u64() as u16
}

pub fn render_sale_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title("SALE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    let view = &state.view;
    let lines = vec![
        Line::styled(
            format!(
                "You have minted {} Crypto Dev Tokens",
                format_ether(view.token_balance)
            ),
            Style::default().fg(Color::LightGreen),
        ),
        Line::styled(
            format!(
                "Overall {}/{} have been minted!!!",
                format_ether(view.minted_supply),
                MAX_TOTAL_SUPPLY
            ),
            Style::default().fg(Color::LightCyan),
        ),
    ];
    f.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .percent(minted_percent(view.minted_supply));
    f.render_widget(gauge, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_percent_is_capped() {
        assert_eq!(minted_percent(U256::zero()), 0);
        assert_eq!(minted_percent(U256::exp10(18) * 2_500), 25);
        assert_eq!(minted_percent(U256::exp10(18) * 20_000), 100);
    }
}

mod fight_panel;
mod inventory_panel;
mod shop_panel;

use crate::build_info;
use crate::view::Snapshot;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the whole screen from a snapshot.
pub fn draw_ui(frame: &mut Frame, snapshot: &Snapshot, selected_shop_row: usize) {
    let size = frame.size();

    // Vertical: header, main content, footer
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header (coin counter)
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer (controls)
        ])
        .split(size);

    draw_header(frame, v_chunks[0], snapshot);

    // Main content: fight panel on the left, shop + inventory on the right
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[1]);

    fight_panel::draw(frame, h_chunks[0], snapshot);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(h_chunks[1]);

    shop_panel::draw(frame, right_chunks[0], snapshot, selected_shop_row);
    inventory_panel::draw(frame, right_chunks[1], snapshot);

    draw_footer(frame, v_chunks[2], snapshot);
}

fn draw_header(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Coins: {}", snapshot.coins),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!(
                "fights: {}  lifetime: {}",
                snapshot.total_fights, snapshot.lifetime_coins
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" Skirmish "));
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let mut hints = vec![Span::raw("[Space] Fight")];
    if snapshot.shop_unlocked {
        hints.push(Span::raw("  [\u{2191}\u{2193}] Select  [Enter] Buy"));
    }
    hints.push(Span::raw("  [P] Listing  [Q] Quit"));
    hints.push(Span::styled(
        format!("   v{} {}", build_info::BUILD_DATE, build_info::BUILD_COMMIT),
        Style::default().fg(Color::DarkGray),
    ));

    let footer = Paragraph::new(Line::from(hints))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

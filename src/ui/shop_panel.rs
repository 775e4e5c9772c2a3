use crate::view::{effect_label, Snapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the shop listing. Before the gate opens this is a teaser line;
/// afterwards, one row per visible item with price and effect.
pub fn draw(frame: &mut Frame, area: Rect, snapshot: &Snapshot, selected_row: usize) {
    let block = Block::default().borders(Borders::ALL).title(" Shop ");

    if !snapshot.shop_unlocked {
        let teaser = Paragraph::new(Line::from(Span::styled(
            "Keep fighting. something will open up...",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(teaser, area);
        return;
    }

    let mut lines = Vec::new();
    for (row, entry) in snapshot.shop.iter().enumerate() {
        let marker = if row == selected_row { "\u{25b8} " } else { "  " };
        let row_style = match (row == selected_row, entry.affordable) {
            (true, true) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::White),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{marker}{:<18} {:>4}c", entry.def.name, entry.def.price),
                row_style,
            ),
            Span::styled(
                format!("  {}", effect_label(entry.def)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing for sale right now.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

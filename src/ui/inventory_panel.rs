use crate::view::Snapshot;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws owned gear and the aggregated effect summary.
pub fn draw(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default().borders(Borders::ALL).title(" Inventory ");

    if !snapshot.inventory_unlocked {
        let teaser = Paragraph::new(Line::from(Span::styled(
            "Buy something and it shows up here.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(teaser, area);
        return;
    }

    let mut lines: Vec<Line> = snapshot
        .inventory
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(entry.def.name, Style::default().fg(Color::Green)),
                Span::styled(
                    format!("  [{}]", entry.def.category.name()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    if !snapshot.effect_summary.is_empty() {
        lines.push(Line::from(""));
        for summary in &snapshot.effect_summary {
            lines.push(Line::from(Span::styled(
                format!("  {summary}"),
                Style::default().fg(Color::Cyan),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

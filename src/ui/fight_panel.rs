use crate::view::Snapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws the fight gauge and the message log.
pub fn draw(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress gauge
            Constraint::Min(0),    // Message log
        ])
        .split(area);

    draw_gauge(frame, chunks[0], snapshot);
    draw_log(frame, chunks[1], snapshot);
}

fn draw_gauge(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default().borders(Borders::ALL).title(" Fight ");

    match snapshot.fight_progress {
        Some(progress) => {
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(Color::Red))
                .ratio(progress.clamp(0.0, 1.0))
                .label(format!("{:.0}%", progress * 100.0));
            frame.render_widget(gauge, area);
        }
        None => {
            let idle = Paragraph::new(Line::from(Span::styled(
                format!(
                    "Press [Space] to fight ({:.1}s)",
                    snapshot.next_fight_duration_ms as f64 / 1000.0
                ),
                Style::default().fg(Color::Gray),
            )))
            .block(block);
            frame.render_widget(idle, area);
        }
    }
}

fn draw_log(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    // Newest entries at the bottom, trimmed to the visible height.
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = snapshot
        .log
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.clone(), style))
        })
        .collect();

    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(log, area);
}

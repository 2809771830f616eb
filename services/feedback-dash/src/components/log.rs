// services/feedback-dash/src/components/log.rs
//
// Activity log panel

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use super::{colors, panel};
use crate::state::{ActivityLog, LogLevel};

pub fn draw_activity_log(frame: &mut Frame, area: Rect, log: &ActivityLog) {
    let rows = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = log
        .entries()
        .iter()
        .rev()
        .take(rows)
        .map(|entry| {
            let (prefix, color) = match entry.level {
                LogLevel::Error => ("[ERR]", colors::RED),
                LogLevel::Warn => ("[WRN]", colors::GOLD),
                LogLevel::Info => ("[INF]", colors::SUCCESS),
            };

            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
                ),
                Span::styled(format!("{} ", prefix), Style::default().fg(color)),
                Span::styled(&entry.message, Style::default().fg(colors::WHITE)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(panel("ACTIVITY LOG", false))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

// services/feedback-dash/src/components/list.rs
//
// Submitted feedback list. Pure function of the records passed in.

use feedback_svckit::types::{FeedbackRecord, Sentiment};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use super::{colors, panel};

pub const EMPTY_PLACEHOLDER: &str = "No feedback submitted yet.";

/// Tag style for a sentiment label. Unknown labels get the plain base style.
pub fn sentiment_style(sentiment: &str) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);

    match Sentiment::parse(sentiment) {
        Some(Sentiment::Positive) => base.fg(colors::BG_DARK).bg(colors::POSITIVE),
        Some(Sentiment::Neutral) => base.fg(colors::BG_DARK).bg(colors::NEUTRAL),
        Some(Sentiment::Negative) => base.fg(colors::WHITE).bg(colors::NEGATIVE),
        None => base,
    }
}

pub fn record_lines(record: &FeedbackRecord) -> Vec<Line<'_>> {
    let mut header = vec![
        Span::styled(&record.product, Style::default().fg(colors::WHITE).bold()),
        Span::styled(" — ", Style::default().fg(colors::SILVER)),
        Span::styled(
            record.language.to_uppercase(),
            Style::default().fg(colors::SILVER),
        ),
    ];
    if let Some(created_at) = record.created_at {
        header.push(Span::styled(
            format!("  {}", created_at.format("%Y-%m-%d %H:%M")),
            Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM),
        ));
    }

    vec![
        Line::from(header),
        Line::from(Span::styled(
            format!(" {} ", record.sentiment.to_uppercase()),
            sentiment_style(&record.sentiment),
        )),
        Line::from(Span::styled(
            format!("“{}”", record.text_original),
            Style::default().fg(colors::WHITE).italic(),
        )),
        Line::from(Span::styled(
            format!("Translated: {}", record.text_translated),
            Style::default().fg(colors::SILVER),
        )),
    ]
}

/// Lines for the whole list, or the placeholder when there is nothing.
pub fn feedback_lines(records: &[FeedbackRecord]) -> Vec<Line<'_>> {
    if records.is_empty() {
        return vec![Line::from(Span::styled(
            EMPTY_PLACEHOLDER,
            Style::default().fg(colors::SILVER),
        ))];
    }

    let mut lines = Vec::with_capacity(records.len() * 5);
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(record_lines(record));
    }
    lines
}

pub fn draw_feedback_list(frame: &mut Frame, area: Rect, records: &[FeedbackRecord], scroll: usize) {
    let title = format!("SUBMITTED FEEDBACK ({})", records.len());
    let visible = records.get(scroll..).unwrap_or(&[]);

    let paragraph = Paragraph::new(feedback_lines(visible))
        .block(panel(&title, false))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

// services/feedback-dash/src/components/form.rs
//
// Feedback submission form

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use super::{button, colors, input_line, panel};
use crate::app::Focus;
use crate::state::{FeedbackForm, SubmitStatus};

pub fn submit_label(form: &FeedbackForm) -> &'static str {
    if form.is_submitting() {
        "Submitting..."
    } else {
        "Submit"
    }
}

pub fn draw_feedback_form(frame: &mut Frame, area: Rect, form: &FeedbackForm, focus: Focus) {
    let focused = matches!(focus, Focus::FeedbackText | Focus::Product);
    let block = panel("SUBMIT FEEDBACK", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),    // Feedback text
            Constraint::Length(1), // Product
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Button + status
        ])
        .split(inner);

    let text = Paragraph::new(input_line(
        "Feedback (any language)",
        &form.text,
        focus == Focus::FeedbackText,
    ))
    .wrap(Wrap { trim: false });
    frame.render_widget(text, chunks[0]);

    frame.render_widget(
        Paragraph::new(input_line("Product", &form.product, focus == Focus::Product)),
        chunks[1],
    );

    let mut footer = vec![button(submit_label(form), form.can_submit())];
    if let Some(status) = form.status() {
        let color = match status {
            SubmitStatus::Submitted => colors::SUCCESS,
            SubmitStatus::Failed => colors::ERROR,
        };
        footer.push(Span::raw("  "));
        footer.push(Span::styled(status.message(), Style::default().fg(color).bold()));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), chunks[3]);
}

// services/feedback-dash/src/components/translate.rs
//
// Ad-hoc translation box

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use super::{button, colors, input_line, panel};
use crate::app::Focus;
use crate::state::{TranslateBox, TranslateOutcome};

pub fn translate_label(tb: &TranslateBox) -> &'static str {
    if tb.is_translating() {
        "Translating..."
    } else {
        "Translate"
    }
}

/// Result area lines. A failure never shows a translation next to it.
pub fn outcome_lines(outcome: &TranslateOutcome) -> Vec<Line<'_>> {
    match outcome {
        TranslateOutcome::Empty => Vec::new(),
        TranslateOutcome::Failed(message) => vec![Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(colors::ERROR),
        ))],
        TranslateOutcome::Translated(result) => vec![
            Line::from(vec![
                Span::styled("Detected Language: ", Style::default().fg(colors::SILVER).bold()),
                Span::styled(result.detected_language.as_str(), Style::default().fg(colors::GOLD)),
            ]),
            Line::from(Span::styled(
                "Translated Text:",
                Style::default().fg(colors::SILVER).bold(),
            )),
            Line::from(Span::styled(
                result.translated_text.as_str(),
                Style::default().fg(colors::WHITE),
            )),
            Line::from(Span::styled(
                "[Ctrl-Y] Copy",
                Style::default().fg(colors::SUCCESS),
            )),
        ],
    }
}

pub fn draw_translate_box(frame: &mut Frame, area: Rect, tb: &TranslateBox, focus: Focus) {
    let focused = matches!(focus, Focus::TranslateText | Focus::TargetLanguage);
    let block = panel("TRANSLATE TEXT", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Source text
            Constraint::Length(1), // Target language
            Constraint::Length(1), // Button
            Constraint::Min(1),    // Result / error
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(input_line("Text", &tb.text, focus == Focus::TranslateText))
            .wrap(Wrap { trim: false }),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(input_line(
            "Target language (e.g. en, fr, ar)",
            &tb.target_language,
            focus == Focus::TargetLanguage,
        )),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Line::from(button(translate_label(tb), tb.can_submit()))),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(outcome_lines(tb.outcome())).wrap(Wrap { trim: false }),
        chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_svckit::types::TranslationResult;
    use feedback_svckit::ApiError;

    fn joined(lines: &[Line]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.as_ref()))
            .collect::<Vec<_>>()
            .join("|")
    }

    #[test]
    fn test_success_then_failure_rendering() {
        let mut tb = TranslateBox::new();
        tb.text = "Bonjour".to_string();
        tb.begin_translate().unwrap();
        assert_eq!(translate_label(&tb), "Translating...");

        tb.finish_translate(Ok(TranslationResult {
            translated_text: "Hello".to_string(),
            detected_language: "fr".to_string(),
            target_language: None,
        }));
        let shown = joined(&outcome_lines(tb.outcome()));
        assert!(shown.contains("Hello"));
        assert!(shown.contains("fr"));

        tb.begin_translate().unwrap();
        tb.finish_translate(Err(ApiError::Status {
            status: 400,
            body: "Text is required".to_string(),
        }));
        let shown = joined(&outcome_lines(tb.outcome()));
        assert_eq!(shown, "Failed to translate. Please check your input.");
        assert!(!shown.contains("Hello"));
    }
}

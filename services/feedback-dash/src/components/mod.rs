// services/feedback-dash/src/components/mod.rs
//
// Panel renderers. Each takes the state it shows and draws into an area.

pub mod form;
pub mod list;
pub mod log;
pub mod stats;
pub mod translate;

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders};

pub use form::draw_feedback_form;
pub use list::draw_feedback_list;
pub use log::draw_activity_log;
pub use stats::draw_stats_chart;
pub use translate::draw_translate_box;

// Color palette: Red, White, Silver, Gold
pub mod colors {
    use ratatui::style::Color;

    pub const RED: Color = Color::Rgb(220, 50, 47);
    pub const DARK_RED: Color = Color::Rgb(139, 0, 0);
    pub const WHITE: Color = Color::Rgb(253, 246, 227);
    pub const SILVER: Color = Color::Rgb(147, 161, 161);
    pub const GOLD: Color = Color::Rgb(255, 193, 37);
    pub const DARK_GOLD: Color = Color::Rgb(184, 134, 11);
    pub const BG_DARK: Color = Color::Rgb(0, 20, 30);
    pub const BG_PANEL: Color = Color::Rgb(7, 30, 41);
    pub const SUCCESS: Color = Color::Rgb(133, 153, 0);
    pub const ERROR: Color = Color::Rgb(220, 50, 47);

    // Sentiment tags
    pub const POSITIVE: Color = Color::Rgb(76, 175, 80);
    pub const NEUTRAL: Color = Color::Rgb(255, 193, 7);
    pub const NEGATIVE: Color = Color::Rgb(244, 67, 54);
}

/// Rounded panel with a gold title, highlighted when it holds input focus.
pub(crate) fn panel(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { colors::GOLD } else { colors::SILVER };

    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(colors::GOLD).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL))
}

/// Single-line input box. The focused one shows a cursor block.
pub(crate) fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(colors::GOLD).bold()
    } else {
        Style::default().fg(colors::SILVER)
    };
    let mut spans = vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(value, Style::default().fg(colors::WHITE)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(colors::GOLD)));
    }
    Line::from(spans)
}

/// Button rendered as a bracketed label, dimmed while disabled.
pub(crate) fn button(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(colors::BG_DARK).bg(colors::GOLD).bold()
    } else {
        Style::default().fg(colors::SILVER).add_modifier(Modifier::DIM)
    };
    Span::styled(format!(" [ {} ] ", label), style)
}

// services/feedback-dash/src/ui.rs
//
// Screen layout: header, stats + form, feedback list, translate box,
// activity log, key help.

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, DataMode};
use crate::components::{
    colors, draw_activity_log, draw_feedback_form, draw_feedback_list, draw_stats_chart,
    draw_translate_box,
};

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background
    frame.render_widget(
        Block::default().style(Style::default().bg(colors::BG_DARK)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(10), // Stats + Form
            Constraint::Min(8),     // Feedback list + Translate/Log
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], app);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    draw_stats_chart(frame, top[0], &app.stats);
    draw_feedback_form(frame, top[1], &app.form, app.focus);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    draw_feedback_list(frame, main[0], app.feedback(), app.list_scroll);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(7)])
        .split(main[1]);
    draw_translate_box(frame, side[0], &app.translate, app.focus);
    draw_activity_log(frame, side[1], &app.log);

    draw_footer(frame, chunks[3]);
}

fn connection_badge(app: &App) -> (&'static str, Color) {
    match (app.mode(), app.connected()) {
        (DataMode::Demo, _) => ("DEMO", colors::GOLD),
        (DataMode::Live { .. }, Some(true)) => ("LIVE", colors::SUCCESS),
        (DataMode::Live { .. }, Some(false)) => ("DISCONNECTED", colors::RED),
        (DataMode::Live { .. }, None) => ("CONNECTING", colors::SILVER),
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let (mode_text, mode_color) = connection_badge(app);

    let mut spans = vec![
        Span::styled(
            " FEEDBACK ANALYZER ",
            Style::default().fg(colors::WHITE).bg(colors::DARK_RED).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            "MULTILINGUAL CUSTOMER FEEDBACK",
            Style::default().fg(colors::GOLD).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", mode_text),
            Style::default().fg(mode_color).bold(),
        ),
    ];

    let filter = app.filter();
    if !filter.is_empty() {
        let mut parts = Vec::new();
        if let Some(language) = &filter.language {
            parts.push(format!("language={}", language));
        }
        if let Some(product) = &filter.product {
            parts.push(format!("product={}", product));
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("filter: {}", parts.join(", ")),
            Style::default().fg(colors::SILVER),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors::DARK_RED))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, bg: Color| {
        Span::styled(k, Style::default().fg(colors::BG_DARK).bg(bg))
    };
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(colors::SILVER));

    let help = Line::from(vec![
        key(" [ESC] ", colors::RED),
        desc(" Quit "),
        Span::raw("  "),
        key(" [TAB] ", colors::GOLD),
        desc(" Next field "),
        Span::raw("  "),
        key(" [ENTER] ", colors::WHITE),
        desc(" Submit "),
        Span::raw("  "),
        key(" [F5] ", colors::DARK_GOLD),
        desc(" Stats "),
        Span::raw("  "),
        key(" [F6] ", colors::DARK_GOLD),
        desc(" Reload list "),
        Span::raw("  "),
        key(" [UP/DOWN] ", colors::SILVER),
        desc(" Scroll "),
    ]);

    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::DARK_RED))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(footer, area);
}

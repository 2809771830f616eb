// services/feedback-dash/src/components/stats.rs
//
// Sentiment distribution panel: a proportional strip standing in for the
// pie chart, a legend with one-decimal labels, and the total.

use feedback_svckit::types::{Sentiment, SentimentStats};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::{button, colors, panel};
use crate::state::{StatsChart, StatsView};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub sentiment: Sentiment,
    pub percent: f64,
}

impl ChartSlice {
    /// Tooltip-style label, e.g. `Positive: 50.0%`.
    pub fn label(&self) -> String {
        format!("{}: {:.1}%", self.sentiment.label(), self.percent)
    }

    pub fn color(&self) -> Color {
        sentiment_color(self.sentiment)
    }
}

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => colors::POSITIVE,
        Sentiment::Neutral => colors::NEUTRAL,
        Sentiment::Negative => colors::NEGATIVE,
    }
}

pub fn chart_slices(stats: &SentimentStats) -> [ChartSlice; 3] {
    Sentiment::ALL.map(|sentiment| ChartSlice {
        sentiment,
        percent: stats.percent(sentiment),
    })
}

pub fn total_label(stats: &SentimentStats) -> String {
    format!("Total Feedback: {}", stats.total)
}

/// Splits `width` cells in proportion to the slices, largest remainder
/// first, so the segments always fill the strip exactly. All zero when
/// there is nothing to show.
pub fn segment_widths(slices: &[ChartSlice; 3], width: u16) -> [u16; 3] {
    let sum: f64 = slices.iter().map(|s| s.percent.max(0.0)).sum();
    if sum <= 0.0 || width == 0 {
        return [0; 3];
    }

    let exact: Vec<f64> = slices
        .iter()
        .map(|s| s.percent.max(0.0) / sum * width as f64)
        .collect();
    let mut widths = [0u16; 3];
    for (w, e) in widths.iter_mut().zip(&exact) {
        *w = e.floor() as u16;
    }

    let mut leftover = width - widths.iter().sum::<u16>();
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });
    for i in order {
        if leftover == 0 {
            break;
        }
        widths[i] += 1;
        leftover -= 1;
    }
    widths
}

pub fn refresh_label(chart: &StatsChart) -> &'static str {
    if chart.is_refreshing() {
        "Refreshing..."
    } else {
        "↻ Refresh [F5]"
    }
}

pub fn draw_stats_chart(frame: &mut Frame, area: Rect, chart: &StatsChart) {
    let block = panel("SENTIMENT STATS", false).title_top(
        Line::from(button(refresh_label(chart), !chart.is_refreshing())).right_aligned(),
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match chart.view() {
        StatsView::Loading => vec![Line::from(Span::styled(
            "Loading stats...",
            Style::default().fg(colors::SILVER),
        ))],
        StatsView::Failed(message) => vec![Line::from(Span::styled(
            format!("⚠ {}", message),
            Style::default().fg(colors::ERROR).bold(),
        ))],
        StatsView::Loaded(stats) => loaded_lines(stats, inner.width),
    };

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn loaded_lines(stats: &SentimentStats, width: u16) -> Vec<Line<'static>> {
    let slices = chart_slices(stats);
    let widths = segment_widths(&slices, width.saturating_sub(2));

    let strip: Vec<Span> = slices
        .iter()
        .zip(widths)
        .filter(|(_, w)| *w > 0)
        .map(|(slice, w)| Span::styled("█".repeat(w as usize), Style::default().fg(slice.color())))
        .collect();

    let mut legend = Vec::new();
    for slice in &slices {
        if !legend.is_empty() {
            legend.push(Span::raw("   "));
        }
        legend.push(Span::styled("■ ", Style::default().fg(slice.color())));
        legend.push(Span::styled(slice.label(), Style::default().fg(colors::WHITE)));
    }

    vec![
        Line::from(strip),
        Line::from(strip_placeholder(&widths)),
        Line::from(legend),
        Line::from(""),
        Line::from(vec![
            Span::styled("Total Feedback: ", Style::default().fg(colors::SILVER)),
            Span::styled(stats.total.to_string(), Style::default().fg(colors::WHITE).bold()),
        ]),
    ]
}

fn strip_placeholder(widths: &[u16; 3]) -> Span<'static> {
    if widths.iter().all(|w| *w == 0) {
        Span::styled("no sentiment data yet", Style::default().fg(colors::SILVER))
    } else {
        Span::raw("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SentimentStats {
        SentimentStats {
            total: 10,
            positive: 5,
            neutral: 3,
            negative: 2,
            percent_positive: 50.0,
            percent_neutral: 30.0,
            percent_negative: 20.0,
        }
    }

    #[test]
    fn test_slices_cover_three_categories() {
        let slices = chart_slices(&sample());
        let sum: f64 = slices.iter().map(|s| s.percent).sum();

        assert_eq!(sum, 100.0);
        assert_eq!(slices[0].label(), "Positive: 50.0%");
        assert_eq!(slices[1].label(), "Neutral: 30.0%");
        assert_eq!(slices[2].label(), "Negative: 20.0%");
        assert_eq!(total_label(&sample()), "Total Feedback: 10");
    }

    #[test]
    fn test_labels_round_to_one_decimal() {
        let slices = chart_slices(&SentimentStats::from_counts(1, 1, 1));
        assert_eq!(slices[0].label(), "Positive: 33.3%");
    }

    #[test]
    fn test_segment_widths_fill_strip() {
        let slices = chart_slices(&sample());
        assert_eq!(segment_widths(&slices, 10), [5, 3, 2]);

        let thirds = chart_slices(&SentimentStats::from_counts(1, 1, 1));
        let widths = segment_widths(&thirds, 20);
        assert_eq!(widths.iter().sum::<u16>(), 20);

        let empty = chart_slices(&SentimentStats::default());
        assert_eq!(segment_widths(&empty, 40), [0, 0, 0]);
    }

    #[test]
    fn test_refresh_label_tracks_flight() {
        let mut chart = StatsChart::new();
        assert_eq!(refresh_label(&chart), "↻ Refresh [F5]");
        chart.begin_fetch();
        assert_eq!(refresh_label(&chart), "Refreshing...");
    }

    #[test]
    fn test_draw_each_view() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut chart = StatsChart::new();

        let contents = |terminal: &Terminal<TestBackend>| {
            terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|c| c.symbol())
                .collect::<String>()
        };

        terminal
            .draw(|f| {
                let area = f.area();
                draw_stats_chart(f, area, &chart)
            })
            .unwrap();
        assert!(contents(&terminal).contains("Loading stats..."));

        chart.begin_fetch();
        chart.finish_fetch(Ok(sample()));
        terminal
            .draw(|f| {
                let area = f.area();
                draw_stats_chart(f, area, &chart)
            })
            .unwrap();
        let text = contents(&terminal);
        assert!(text.contains("Total Feedback: 10"));
        assert!(text.contains("Positive: 50.0%"));

        chart.begin_fetch();
        chart.finish_fetch(Err(feedback_svckit::ApiError::Aborted));
        terminal
            .draw(|f| {
                let area = f.area();
                draw_stats_chart(f, area, &chart)
            })
            .unwrap();
        let text = contents(&terminal);
        assert!(text.contains("Failed to load stats"));
        assert!(!text.contains("Total Feedback"));
    }
}

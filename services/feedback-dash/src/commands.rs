// services/feedback-dash/src/commands.rs
//
// One-shot subcommands. Same clients and renderers as the dashboard,
// printed as plain text.

use anyhow::{bail, Context, Result};
use feedback_svckit::types::{FeedbackFilter, NewFeedback, SentimentStats, TranslateRequest, TranslationResult};
use ratatui::text::Line;
use tracing::info;

use crate::api::Backends;
use crate::cli::Command;
use crate::components::list::feedback_lines;
use crate::components::stats::{chart_slices, total_label};

pub async fn run(command: Command, backends: &Backends, filter: FeedbackFilter) -> Result<()> {
    match command {
        Command::List => {
            let records = backends
                .feedback
                .list(&filter)
                .await
                .context("Failed to fetch feedback")?;
            for line in feedback_lines(&records) {
                println!("{}", plain(&line));
            }
        }
        Command::Submit { text, for_product } => {
            if text.trim().is_empty() || for_product.trim().is_empty() {
                bail!("Feedback text and product are required");
            }
            let created = backends
                .feedback
                .create(&NewFeedback {
                    text,
                    product: for_product,
                })
                .await
                .context("Failed to submit feedback")?;
            info!("Created feedback {}", created.id);
            println!(
                "Feedback submitted successfully! ({} / {} / {})",
                created.id,
                created.language.to_uppercase(),
                created.sentiment
            );
        }
        Command::Stats => {
            let stats = backends.stats.fetch().await.context("Failed to load stats")?;
            print!("{}", stats_report(&stats));
        }
        Command::Translate { text, to } => {
            if text.trim().is_empty() || to.trim().is_empty() {
                bail!("Text and target language are required");
            }
            let request = TranslateRequest {
                text: text.trim().to_string(),
                target_language: to.trim().to_string(),
            };
            let result = backends
                .translate
                .translate(&request)
                .await
                .context("Failed to translate")?;
            print!("{}", translation_report(&result));
        }
    }
    Ok(())
}

fn plain(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

pub fn stats_report(stats: &SentimentStats) -> String {
    let mut out = String::new();
    for slice in chart_slices(stats) {
        out.push_str(&slice.label());
        out.push('\n');
    }
    out.push_str(&total_label(stats));
    out.push('\n');
    out
}

pub fn translation_report(result: &TranslationResult) -> String {
    format!(
        "Detected Language: {}\nTranslated Text: {}\n",
        result.detected_language, result.translated_text
    )
}

// services/feedback-dash/src/cli.rs
//
// Command line arguments

use clap::{Parser, Subcommand};
use feedback_svckit::types::FeedbackFilter;

#[derive(Parser, Debug)]
#[command(name = "feedback-dash")]
#[command(about = "Terminal front-end for the multilingual customer feedback analyzer")]
#[command(version)]
pub struct Args {
    /// Run against an in-memory backend (no analyzer API required)
    #[arg(long, short, global = true)]
    pub demo: bool,

    /// Configuration file (YAML); missing file means defaults
    #[arg(short, long, default_value = "config/feedback-dash.yaml", global = true)]
    pub config: String,

    /// Analyzer API base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// UI refresh tick in milliseconds
    #[arg(long)]
    pub refresh_ms: Option<u64>,

    /// Only list feedback detected in this language
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Only list feedback for this product
    #[arg(long, global = true)]
    pub product: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the feedback collection
    List,

    /// Submit one piece of feedback
    Submit {
        #[arg(long)]
        text: String,

        /// Product name the feedback is about
        #[arg(long = "for")]
        for_product: String,
    },

    /// Print the sentiment distribution
    Stats,

    /// Translate a piece of text
    Translate {
        #[arg(long)]
        text: String,

        /// Target language code
        #[arg(long, default_value = "en")]
        to: String,
    },
}

impl Args {
    pub fn filter(&self) -> FeedbackFilter {
        FeedbackFilter {
            language: self.language.clone(),
            product: self.product.clone(),
        }
    }
}

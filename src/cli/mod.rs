use std::time::Duration;

use clap::Subcommand;

use crate::connector::api::config::parse_seconds;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a completion through the configured provider
    Generate {
        prompt: String,

        /// System prompt sent ahead of the prompt
        #[arg(short, long)]
        system: Option<String>,

        /// Print the model's reasoning before the answer when available
        #[arg(long)]
        show_reasoning: bool,
    },

    /// Submit a generation task and print its id without waiting
    Submit {
        prompt: String,

        #[arg(short, long)]
        system: Option<String>,
    },

    /// Show the current status of a task
    Status { task_id: String },

    /// Wait for a task to finish and print its payload as JSON
    Poll {
        task_id: String,

        /// Seconds between status checks
        #[arg(long, value_parser = parse_duration)]
        interval: Option<Duration>,

        /// Seconds to wait before giving up
        #[arg(long, value_parser = parse_duration)]
        timeout: Option<Duration>,
    },

    /// Ask the provider to cancel a task
    Kill { task_id: String },
}

/// Parse a non-negative, possibly fractional number of seconds.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    parse_seconds("value", value).map_err(|e| e.to_string())
}

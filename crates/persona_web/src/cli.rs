use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use persona_core::{MatchSettings, DEFAULT_DATA_PATH, DEFAULT_SEPARATOR, DEFAULT_THRESHOLD};

pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "persona",
    version,
    about = "Answer questions from a file of question/answer pairs"
)]
pub struct Cli {
    /// Question/answer file, one `question||answer` pair per line.
    #[arg(long, global = true, env = "PERSONA_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Minimum similarity (exclusive) for a stored answer to be returned.
    #[arg(long, global = true, env = "PERSONA_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    #[arg(long, global = true, env = "PERSONA_SEPARATOR", default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the web form and JSON API.
    Serve {
        #[arg(long, env = "PERSONA_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },
    /// Answer a single query and exit.
    Ask {
        query: String,
        #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Print corpus and vocabulary sizes.
    Stats {
        #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

impl Cli {
    pub fn settings(&self) -> MatchSettings {
        MatchSettings::default()
            .with_threshold(self.threshold)
            .with_separator(self.separator.clone())
    }
}

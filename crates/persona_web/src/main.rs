mod cli;
mod output;
mod page;
mod server;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use persona_core::KnowledgeBase;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::server::{start_server, AppState};

fn load_knowledge(cli: &Cli) -> Result<KnowledgeBase> {
    KnowledgeBase::load(&cli.data, cli.settings())
        .with_context(|| format!("load {}", cli.data.display()))
}

fn no_data_warning(kb: &KnowledgeBase) -> String {
    format!(
        "No data found in {}. Please add Q&A data to get started.",
        kb.source().display()
    )
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Serve { bind } => {
            let kb = load_knowledge(&cli)?;
            if kb.is_empty() {
                tracing::warn!("{}", no_data_warning(&kb));
            }
            let (addr, shutdown_tx, handle) = start_server(*bind, AppState::new(kb))
                .await
                .with_context(|| format!("bind {bind}"))?;
            println!("PersonaSynth listening on http://{addr}");

            tokio::signal::ctrl_c()
                .await
                .context("listen for shutdown signal")?;
            info!("shutting down");
            let _ = shutdown_tx.send(());
            handle.await.context("join server task")?;
        }
        Commands::Ask { query, output } => {
            let kb = load_knowledge(&cli)?;
            let Some(matcher) = kb.matcher() else {
                eprintln!("{}", no_data_warning(&kb));
                return Ok(ExitCode::from(2));
            };
            let result = matcher.answer(query);
            output::print_answer(*output, query, &result)?;
        }
        Commands::Stats { output } => {
            let kb = load_knowledge(&cli)?;
            output::print_stats(*output, &kb.status())?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("persona=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

use std::io::{self, Write};

use anyhow::Result;
use persona_core::{Decision, KnowledgeStatus, MatchResult};
use serde::Serialize;

use crate::cli::OutputFormat;

#[derive(Serialize)]
pub struct AnswerReport<'a> {
    pub query: &'a str,
    #[serde(flatten)]
    pub result: &'a MatchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Serialize)]
pub struct Candidate {
    pub index: usize,
    pub score: f32,
}

impl Candidate {
    pub fn from_scored(scored: Vec<(usize, f32)>) -> Vec<Self> {
        scored
            .into_iter()
            .map(|(index, score)| Candidate { index, score })
            .collect()
    }
}

pub fn print_answer(format: OutputFormat, query: &str, result: &MatchResult) -> Result<()> {
    let mut out = io::stdout();
    match format {
        OutputFormat::Text => {
            writeln!(out, "Answer: {}", result.answer)?;
        }
        OutputFormat::Json => {
            let report = AnswerReport {
                query,
                result,
                candidates: None,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}

pub fn print_stats(format: OutputFormat, status: &KnowledgeStatus) -> Result<()> {
    let mut out = io::stdout();
    match format {
        OutputFormat::Text => {
            writeln!(out, "Source:     {}", status.source.display())?;
            writeln!(out, "Entries:    {}", status.entries)?;
            writeln!(out, "Vocabulary: {}", status.vocabulary)?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(status)?)?;
        }
    }
    Ok(())
}

pub fn decision_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Hit => "hit",
        Decision::Miss => "miss",
    }
}

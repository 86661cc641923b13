use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
}

/// Question and answer sequences, aligned by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    questions: Vec<String>,
    answers: Vec<String>,
}

impl Corpus {
    /// Loads a corpus from a delimited text file. A missing file yields an
    /// empty corpus; any other read failure is returned.
    pub fn load(path: &Path, separator: &str) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "data file not found, corpus is empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut corpus = Self::default();
        let mut skipped = 0usize;
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| CoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if !corpus.push_line(&line, separator) {
                trace!(line = lineno + 1, "skipping line without separator");
                skipped += 1;
            }
        }

        debug!(skipped, "lines without separator");
        info!(path = %path.display(), entries = corpus.len(), skipped, "loaded corpus");
        Ok(corpus)
    }

    /// Parses in-memory text with the same rules as [`Corpus::load`].
    pub fn parse(text: &str, separator: &str) -> Self {
        let mut corpus = Self::default();
        for line in text.lines() {
            corpus.push_line(line, separator);
        }
        corpus
    }

    pub fn from_pairs<I, Q, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        let (questions, answers) = pairs
            .into_iter()
            .map(|(q, a)| (q.into(), a.into()))
            .unzip();
        Self { questions, answers }
    }

    // Splits on the first separator only; the rest stays in the answer.
    fn push_line(&mut self, line: &str, separator: &str) -> bool {
        if separator.is_empty() {
            return false;
        }
        match line.split_once(separator) {
            Some((question, answer)) => {
                self.questions.push(question.trim().to_string());
                self.answers.push(answer.trim().to_string());
                true
            }
            None => false,
        }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<QaEntry> {
        Some(QaEntry {
            question: self.questions.get(index)?.clone(),
            answer: self.answers.get(index)?.clone(),
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = QaEntry> + '_ {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| QaEntry {
                question: q.clone(),
                answer: a.clone(),
            })
    }
}

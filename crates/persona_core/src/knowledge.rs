use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::dataset::Corpus;
use crate::error::Result;
use crate::retrieval::Matcher;
use crate::settings::MatchSettings;

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeStatus {
    pub source: PathBuf,
    pub entries: usize,
    pub vocabulary: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Read-only answering state built from one data file. An empty corpus
/// leaves `matcher` unset so callers show a "no data" state instead.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    source: PathBuf,
    settings: MatchSettings,
    matcher: Option<Matcher>,
    loaded_at: DateTime<Utc>,
}

impl KnowledgeBase {
    pub fn load(source: impl AsRef<Path>, settings: MatchSettings) -> Result<Self> {
        settings.validate()?;
        let source = source.as_ref().to_path_buf();
        let corpus = Corpus::load(&source, &settings.separator)?;

        let matcher = if corpus.is_empty() {
            warn!(path = %source.display(), "no question/answer pairs found");
            None
        } else {
            Some(Matcher::new(corpus, settings.clone())?)
        };

        Ok(Self {
            source,
            settings,
            matcher,
            loaded_at: Utc::now(),
        })
    }

    /// Rebuilds from the same source and settings. `self` is left untouched.
    pub fn reload(&self) -> Result<Self> {
        let fresh = Self::load(&self.source, self.settings.clone())?;
        info!(
            path = %self.source.display(),
            before = self.len(),
            after = fresh.len(),
            "reloaded knowledge base"
        );
        Ok(fresh)
    }

    pub fn matcher(&self) -> Option<&Matcher> {
        self.matcher.as_ref()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.matcher.as_ref().map_or(0, Matcher::len)
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }

    pub fn status(&self) -> KnowledgeStatus {
        KnowledgeStatus {
            source: self.source.clone(),
            entries: self.len(),
            vocabulary: self.matcher.as_ref().map_or(0, Matcher::vocabulary_len),
            loaded_at: self.loaded_at,
        }
    }
}

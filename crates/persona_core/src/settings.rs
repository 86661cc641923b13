use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub const DEFAULT_THRESHOLD: f32 = 0.2;
pub const DEFAULT_SEPARATOR: &str = "||";
pub const DEFAULT_DATA_PATH: &str = "persona_data.txt";
pub const FALLBACK_MESSAGE: &str =
    "😔 Sorry, I don't have any data to answer that yet. Try asking something else.";

/// Policy values for loading and matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// A match is returned only when its score is strictly above this value.
    pub threshold: f32,
    pub separator: String,
    pub fallback: String,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            separator: DEFAULT_SEPARATOR.to_string(),
            fallback: FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl MatchSettings {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(CoreError::InvalidThreshold(self.threshold));
        }
        if self.separator.is_empty() {
            return Err(CoreError::InvalidSeparator);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = MatchSettings::default();
        assert_eq!(s.threshold, 0.2);
        assert_eq!(s.separator, "||");
        assert!(s.fallback.starts_with("😔 Sorry"));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let s = MatchSettings::default().with_threshold(1.5);
        assert!(matches!(s.validate(), Err(CoreError::InvalidThreshold(_))));

        let s = MatchSettings::default().with_threshold(f32::NAN);
        assert!(matches!(s.validate(), Err(CoreError::InvalidThreshold(_))));
    }

    #[test]
    fn rejects_empty_separator() {
        let s = MatchSettings::default().with_separator("");
        assert!(matches!(s.validate(), Err(CoreError::InvalidSeparator)));
    }
}

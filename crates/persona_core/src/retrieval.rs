use tracing::debug;

use crate::dataset::Corpus;
use crate::error::{CoreError, Result};
use crate::index::SimilarityIndex;
use crate::model::{Decision, MatchResult};
use crate::settings::MatchSettings;

/// Index of the highest score. Ties resolve to the earliest position.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best
}

/// Threshold-gated answer selection over a fitted index.
#[derive(Debug, Clone)]
pub struct Matcher {
    corpus: Corpus,
    index: SimilarityIndex,
    settings: MatchSettings,
}

impl Matcher {
    pub fn new(corpus: Corpus, settings: MatchSettings) -> Result<Self> {
        settings.validate()?;
        if corpus.is_empty() {
            return Err(CoreError::EmptyCorpus);
        }
        let index = SimilarityIndex::fit(corpus.questions())?;
        Ok(Self {
            corpus,
            index,
            settings,
        })
    }

    pub fn answer(&self, query: &str) -> MatchResult {
        let scores = self.index.scores(&self.index.transform(query));

        let result = match argmax(&scores) {
            Some((i, score)) if score > self.settings.threshold => MatchResult {
                index: Some(i),
                score,
                decision: Decision::Hit,
                answer: self.corpus.answers()[i].clone(),
            },
            Some((i, score)) => MatchResult {
                index: Some(i),
                score,
                decision: Decision::Miss,
                answer: self.settings.fallback.clone(),
            },
            None => MatchResult {
                index: None,
                score: 0.0,
                decision: Decision::Miss,
                answer: self.settings.fallback.clone(),
            },
        };

        debug!(
            score = result.score,
            decision = ?result.decision,
            index = ?result.index,
            "matched query"
        );
        result
    }

    /// The `k` best candidates by descending score, ties in corpus order.
    pub fn top_k(&self, query: &str, k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .index
            .scores(&self.index.transform(query))
            .into_iter()
            .enumerate()
            .collect();

        // Stable sort keeps corpus order among equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(k).collect()
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.index.vocabulary_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FALLBACK_MESSAGE;

    fn persona() -> Matcher {
        let corpus = Corpus::from_pairs([
            ("What is your name?", "Neeti"),
            ("Where do you live?", "Pune"),
            ("What is your favourite programming language?", "Python"),
            ("Do you like music?", "Yes, mostly lo-fi"),
        ]);
        Matcher::new(corpus, MatchSettings::default()).expect("matcher")
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.3, 0.7, 0.7, 0.1]), Some((1, 0.7)));
        assert_eq!(argmax(&[0.0, 0.0]), Some((0, 0.0)));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn exact_question_returns_its_answer() {
        let m = persona();
        let r = m.answer("Where do you live?");

        assert_eq!(r.decision, Decision::Hit);
        assert_eq!(r.index, Some(1));
        assert_eq!(r.answer, "Pune");
        assert!((r.score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn case_and_punctuation_do_not_matter() {
        let m = persona();
        assert_eq!(m.answer("what is your name").answer, "Neeti");
        assert_eq!(m.answer("WHAT IS YOUR NAME!!!").answer, "Neeti");
    }

    #[test]
    fn no_overlap_returns_fallback() {
        let m = persona();
        let r = m.answer("quantum chromodynamics");

        assert_eq!(r.decision, Decision::Miss);
        assert_eq!(r.answer, FALLBACK_MESSAGE);
        assert_eq!(r.score, 0.0);
        assert_eq!(r.index, Some(0));
    }

    #[test]
    fn empty_query_returns_fallback() {
        let r = persona().answer("");
        assert!(!r.is_hit());
        assert_eq!(r.answer, FALLBACK_MESSAGE);
    }

    #[test]
    fn score_equal_to_threshold_is_a_miss() {
        let probe = persona().answer("name please");
        assert_eq!(probe.index, Some(0));
        assert!(probe.score > 0.0 && probe.score < 1.0);

        let corpus = persona().corpus().clone();
        let m = Matcher::new(corpus, MatchSettings::default().with_threshold(probe.score)).unwrap();
        let r = m.answer("name please");

        assert_eq!(r.score, probe.score);
        assert_eq!(r.decision, Decision::Miss);
        assert_eq!(r.index, Some(0));
    }

    #[test]
    fn duplicate_questions_resolve_to_first() {
        let corpus = Corpus::from_pairs([("favourite colour", "blue"), ("favourite colour", "red")]);
        let m = Matcher::new(corpus, MatchSettings::default()).unwrap();
        let r = m.answer("favourite colour");

        assert_eq!(r.index, Some(0));
        assert_eq!(r.answer, "blue");
    }

    #[test]
    fn repeated_queries_are_identical() {
        let m = persona();
        assert_eq!(m.answer("do you like music"), m.answer("do you like music"));
    }

    #[test]
    fn empty_corpus_fails_fast() {
        let err = Matcher::new(Corpus::default(), MatchSettings::default()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCorpus));
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let corpus = Corpus::from_pairs([("q", "a")]);
        let err = Matcher::new(corpus, MatchSettings::default().with_threshold(-0.1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidThreshold(_)));
    }

    #[test]
    fn custom_fallback_is_returned_verbatim() {
        let corpus = Corpus::from_pairs([("alpha", "beta")]);
        let settings = MatchSettings {
            fallback: "no idea".to_string(),
            ..MatchSettings::default()
        };
        let m = Matcher::new(corpus, settings).unwrap();
        assert_eq!(m.answer("gamma").answer, "no idea");
    }

    #[test]
    fn top_k_orders_by_score() {
        let m = persona();
        let top = m.top_k("what is your name", 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, 0);
        assert_eq!(top[1].0, 2);
        assert!(top[0].1 >= top[1].1);
        assert_eq!(m.top_k("anything", 10).len(), 4);
    }

    #[test]
    fn matcher_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
    }
}

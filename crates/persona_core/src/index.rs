use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CoreError, Result};
use crate::tokenize::tokenize;

/// Sparse weight vector, sorted by term id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, f32>, idf: &[f32]) -> Self {
        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(term, tf)| (term, tf * idf[term]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            if ta == tb {
                dot += wa * wb;
                i += 1;
                j += 1;
            } else if ta < tb {
                i += 1;
            } else {
                j += 1;
            }
        }
        dot
    }
}

/// Dot product over the product of magnitudes; 0 when either vector is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let (na, nb) = (a.norm(), b.norm());
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        a.dot(b) / (na * nb)
    }
}

/// TF-IDF weighting fitted over the stored questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityIndex {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
}

impl SimilarityIndex {
    /// Fits the vocabulary and idf weights over `questions` and computes one
    /// L2-normalised vector per question.
    pub fn fit(questions: &[String]) -> Result<Self> {
        if questions.is_empty() {
            return Err(CoreError::EmptyCorpus);
        }

        let docs: Vec<Vec<String>> = questions.iter().map(|q| tokenize(q)).collect();

        let vocabulary: BTreeMap<String, usize> = docs
            .iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(id, term)| (term.clone(), id))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for doc in &docs {
            let unique: BTreeSet<usize> = doc.iter().map(|t| vocabulary[t]).collect();
            for term in unique {
                df[term] += 1;
            }
        }

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1.
        let n = docs.len() as f32;
        let idf: Vec<f32> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        let vectors = docs
            .iter()
            .map(|doc| {
                let mut counts = BTreeMap::new();
                for t in doc {
                    *counts.entry(vocabulary[t]).or_insert(0.0f32) += 1.0;
                }
                SparseVector::from_counts(counts, &idf)
            })
            .collect();

        info!(
            questions = questions.len(),
            vocabulary = vocabulary.len(),
            "built similarity index"
        );

        Ok(Self {
            vocabulary,
            idf,
            vectors,
        })
    }

    /// Projects `text` onto the fitted vocabulary. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&id) = self.vocabulary.get(&token) {
                *counts.entry(id).or_insert(0.0f32) += 1.0;
            }
        }
        SparseVector::from_counts(counts, &self.idf)
    }

    /// Cosine similarity of `query` against every stored question, in corpus order.
    pub fn scores(&self, query: &SparseVector) -> Vec<f32> {
        self.vectors
            .iter()
            .map(|v| cosine_similarity(query, v))
            .collect()
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&id| self.idf[id])
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(qs: &[&str]) -> Vec<String> {
        qs.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn fit_rejects_empty_input() {
        assert!(matches!(
            SimilarityIndex::fit(&[]),
            Err(CoreError::EmptyCorpus)
        ));
    }

    #[test]
    fn idf_is_smoothed_and_favours_rare_terms() {
        let index =
            SimilarityIndex::fit(&questions(&["what is your name", "what is your age"])).unwrap();

        // "what" appears in both documents: ln(3/3) + 1 = 1.
        assert!((index.idf("what").unwrap() - 1.0).abs() < 1e-6);
        // "name" appears in one: ln(3/2) + 1.
        let expected = (3.0f32 / 2.0).ln() + 1.0;
        assert!((index.idf("name").unwrap() - expected).abs() < 1e-6);
        assert!(index.idf("missing").is_none());
        assert_eq!(index.vocabulary_len(), 5);
    }

    #[test]
    fn vectors_are_unit_length() {
        let index = SimilarityIndex::fit(&questions(&[
            "what is your favourite food",
            "where do you work",
        ]))
        .unwrap();

        for v in index.vectors() {
            assert!((v.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn tokenless_question_has_zero_vector() {
        let index = SimilarityIndex::fit(&questions(&["?", "hello there"])).unwrap();
        assert!(index.vectors()[0].is_zero());
        assert_eq!(index.scores(&index.transform("hello"))[0], 0.0);
    }

    #[test]
    fn unseen_terms_contribute_nothing() {
        let index = SimilarityIndex::fit(&questions(&["hello world"])).unwrap();
        assert!(index.transform("completely unrelated").is_zero());

        let partial = index.transform("hello stranger");
        assert_eq!(partial.entries().len(), 1);
    }

    #[test]
    fn self_similarity_is_one() {
        let qs = questions(&["what is your name", "where are you from"]);
        let index = SimilarityIndex::fit(&qs).unwrap();
        let scores = index.scores(&index.transform(&qs[1]));

        assert!((scores[1] - 1.0).abs() < 1e-5);
        assert!(scores[0] < scores[1]);
    }

    #[test]
    fn cosine_handles_zero_vectors() {
        let zero = SparseVector::default();
        let index = SimilarityIndex::fit(&questions(&["alpha beta"])).unwrap();
        let v = index.transform("alpha");

        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
    }

    #[test]
    fn fitting_is_deterministic() {
        let qs = questions(&["tell me a joke", "what do you like", "tell me more"]);
        let a = SimilarityIndex::fit(&qs).unwrap();
        let b = SimilarityIndex::fit(&qs).unwrap();
        assert_eq!(a, b);
    }
}

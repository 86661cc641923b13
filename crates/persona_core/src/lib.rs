pub mod dataset;
pub mod error;
pub mod index;
pub mod knowledge;
pub mod model;
pub mod retrieval;
pub mod settings;
pub mod tokenize;

pub use dataset::{Corpus, QaEntry};
pub use error::{CoreError, Result};
pub use index::{cosine_similarity, SimilarityIndex, SparseVector};
pub use knowledge::{KnowledgeBase, KnowledgeStatus};
pub use model::{Decision, MatchResult};
pub use retrieval::{argmax, Matcher};
pub use settings::{
    MatchSettings, DEFAULT_DATA_PATH, DEFAULT_SEPARATOR, DEFAULT_THRESHOLD, FALLBACK_MESSAGE,
};
pub use tokenize::tokenize;

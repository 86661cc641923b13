use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corpus is empty: no question/answer pairs to index")]
    EmptyCorpus,

    #[error("invalid threshold {0}: must be a finite value in [0, 1]")]
    InvalidThreshold(f32),

    #[error("invalid separator: must not be empty")]
    InvalidSeparator,
}

pub type Result<T> = std::result::Result<T, CoreError>;

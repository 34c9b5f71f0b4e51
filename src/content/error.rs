//! Error types for the content layer

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::DocumentKey;

/// Failure to discover or read documents from a source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("content directory {0:?} does not exist")]
    Missing(PathBuf),

    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no document registered for {0}")]
    Unknown(DocumentKey),
}

/// Failure to turn raw document text into a front-matter/body pair
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document has no front-matter block")]
    MissingFrontMatter,

    #[error("front-matter block is not terminated by ---")]
    Unterminated,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unrecognized date {0:?}")]
    InvalidDate(String),
}

/// A problem recorded while loading the index
///
/// Diagnostics never reach callers as errors; they are logged and kept
/// alongside the loaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The document concerned, or `None` when the whole source failed
    pub key: Option<DocumentKey>,
    pub message: String,
}

impl Diagnostic {
    pub fn source_failure(err: &SourceError) -> Self {
        Self {
            key: None,
            message: err.to_string(),
        }
    }

    pub fn document(key: &DocumentKey, message: impl fmt::Display) -> Self {
        Self {
            key: Some(key.clone()),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}: {}", key, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

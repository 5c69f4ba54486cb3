//! Turning the command-line argument into a local document path.
//!
//! Local paths are used as they are. Anything that looks like a link to a
//! remote document goes to a [`RemoteFetcher`]; none is implemented yet, so
//! that path fails with an explicit error instead of "file not found".

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("fetching remote documents is not implemented (requested: {0})")]
    RemoteFetchUnsupported(String),
}

/// What kind of input argument we were given
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Local(PathBuf),
    Remote(String),
}

impl DocumentSource {
    pub fn classify(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentSource::Remote(arg.to_string())
        } else {
            DocumentSource::Local(PathBuf::from(arg))
        }
    }
}

/// Resolves a remote document identifier to a local copy
pub trait RemoteFetcher {
    fn fetch(&self, identifier: &str) -> Result<PathBuf, SourceError>;
}

/// The only fetcher there is: always refuses
pub struct UnimplementedFetcher;

impl RemoteFetcher for UnimplementedFetcher {
    fn fetch(&self, identifier: &str) -> Result<PathBuf, SourceError> {
        Err(SourceError::RemoteFetchUnsupported(identifier.to_string()))
    }
}

/// Resolve the input argument to an existing local file
pub fn resolve_input(arg: &str, fetcher: &dyn RemoteFetcher) -> Result<PathBuf, SourceError> {
    match DocumentSource::classify(arg) {
        DocumentSource::Remote(identifier) => fetcher.fetch(&identifier),
        DocumentSource::Local(path) => {
            if path.is_file() {
                Ok(path)
            } else {
                Err(SourceError::NotFound(path))
            }
        }
    }
}

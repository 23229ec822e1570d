//! `backend:path` store locators.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while parsing a locator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// No `:` separates the backend from the path.
    #[error("invalid backend:path locator {0:?}")]
    MissingSeparator(String),

    /// The backend half is empty.
    #[error("backend must be non-empty in {0:?}")]
    EmptyBackend(String),

    /// The path half is empty.
    #[error("path must be non-empty in {0:?}")]
    EmptyPath(String),
}

/// Backend name plus the location handed to that backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocator {
    /// Registered backend name.
    pub backend: String,
    /// Backend-specific location.
    pub path: PathBuf,
}

impl StoreLocator {
    /// Parse `backend:path`. Only the first colon separates, so the path may
    /// itself contain colons.
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        let (backend, path) = input
            .split_once(':')
            .ok_or_else(|| LocatorError::MissingSeparator(input.to_string()))?;
        if backend.is_empty() {
            return Err(LocatorError::EmptyBackend(input.to_string()));
        }
        if path.is_empty() {
            return Err(LocatorError::EmptyPath(input.to_string()));
        }
        Ok(Self {
            backend: backend.to_string(),
            path: PathBuf::from(path),
        })
    }
}

impl FromStr for StoreLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StoreLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.backend, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_keeps_later_colons() {
        let locator = StoreLocator::parse("redb:C:/data/kv.redb").unwrap();
        assert_eq!(locator.backend, "redb");
        assert_eq!(locator.path, PathBuf::from("C:/data/kv.redb"));
        assert_eq!(locator.to_string(), "redb:C:/data/kv.redb");
    }
}

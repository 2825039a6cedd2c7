use crate::models::SourceKind;
use std::path::PathBuf;

/// Error type for the bookmarker library
///
/// Only `Configuration` is produced while an engine is being built. Once an
/// [`Engine`](crate::engine::Engine) exists, reading bookmarks can fail only
/// with `Source`, which wraps the `SourceUnavailable`/`DecodeFailed` error of
/// the browser that broke.
#[derive(Debug, thiserror::Error)]
pub enum BookmarkerError {
    /// Profile could not be resolved, home directory unknown, ...
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The bookmark container could not be opened or read
    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container was read but its content is not what the browser writes
    #[error("cannot decode {}: {reason}", path.display())]
    DecodeFailed { path: PathBuf, reason: String },

    /// A source failed during aggregation
    #[error("failed to load bookmarks in {kind}: {source}")]
    Source {
        kind: SourceKind,
        #[source]
        source: Box<BookmarkerError>,
    },

    /// I/O errors outside of source reading (config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),
}

/// Result type alias using BookmarkerError
pub type Result<T> = std::result::Result<T, BookmarkerError>;

impl BookmarkerError {
    pub(crate) fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        BookmarkerError::DecodeFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BookmarkerError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// The browser family a `Source` error was raised for
    pub fn failed_source(&self) -> Option<SourceKind> {
        match self {
            BookmarkerError::Source { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for BookmarkerError {
    fn from(err: serde_yaml::Error) -> Self {
        BookmarkerError::Yaml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_names_the_browser() {
        let inner = BookmarkerError::decode("/tmp/Bookmarks", "expected value at line 1");
        let err = BookmarkerError::Source {
            kind: SourceKind::Chrome,
            source: Box::new(inner),
        };

        assert_eq!(err.failed_source(), Some(SourceKind::Chrome));
        assert_eq!(
            err.to_string(),
            "failed to load bookmarks in chrome: cannot decode /tmp/Bookmarks: expected value at line 1"
        );
    }

    #[test]
    fn test_unavailable_keeps_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = BookmarkerError::unavailable("/nope/places.sqlite", io);

        assert!(err.to_string().starts_with("cannot open /nope/places.sqlite"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.failed_source(), None);
    }
}

pub mod browser;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the main types for convenience
pub use browser::BookmarkSource;
pub use engine::{BuildError, Engine, EngineOption};
pub use error::BookmarkerError;
pub use models::{Bookmark, Bookmarks, SourceKind};

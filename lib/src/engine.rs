//! Aggregation of every enabled browser source into one bookmark list.

use crate::browser::{profile, BookmarkSource, ChromiumSource, FirefoxSource, SafariSource};
use crate::error::{BookmarkerError, Result};
use crate::models::{Bookmarks, SourceKind};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Reads bookmarks from the enabled sources and merges them
#[derive(Default)]
pub struct Engine {
    sources: HashMap<SourceKind, Box<dyn BookmarkSource>>,
    remove_duplicates: bool,
    folder_query: Option<String>,
}

/// One step of engine configuration, applied in order by [`Engine::build`]
#[derive(Debug)]
pub enum EngineOption {
    /// Read the Chrome profile ending with `profile` below `profile_dir`
    /// (platform default when `None`)
    Chrome {
        profile_dir: Option<PathBuf>,
        profile: String,
    },
    Edge {
        profile_dir: Option<PathBuf>,
        profile: String,
    },
    Firefox {
        profile_dir: Option<PathBuf>,
        profile: String,
    },
    /// Read Safari's `Bookmarks.plist`, at `path` if given
    Safari { path: Option<PathBuf> },
    /// Keep only the first bookmark of each URI
    RemoveDuplicates,
    /// Keep only bookmarks whose folder starts with this prefix
    FilterByFolder(String),
    /// Read `kind` from an already constructed source
    Custom(SourceKind, Box<dyn BookmarkSource>),
}

impl EngineOption {
    fn apply(self, engine: &mut Engine) -> Result<()> {
        match self {
            EngineOption::Chrome {
                profile_dir,
                profile,
            } => {
                let path = profile::chrome_bookmark_file(profile_dir.as_deref(), &profile)?;
                engine.register(
                    SourceKind::Chrome,
                    Box::new(ChromiumSource::new(SourceKind::Chrome, path)),
                );
            }
            EngineOption::Edge {
                profile_dir,
                profile,
            } => {
                let path = profile::edge_bookmark_file(profile_dir.as_deref(), &profile)?;
                engine.register(
                    SourceKind::Edge,
                    Box::new(ChromiumSource::new(SourceKind::Edge, path)),
                );
            }
            EngineOption::Firefox {
                profile_dir,
                profile,
            } => {
                let path = profile::firefox_bookmark_file(profile_dir.as_deref(), &profile)?;
                engine.register(SourceKind::Firefox, Box::new(FirefoxSource::new(path)));
            }
            EngineOption::Safari { path } => {
                let path = profile::safari_bookmark_file(path.as_deref())?;
                engine.register(SourceKind::Safari, Box::new(SafariSource::new(path)));
            }
            EngineOption::RemoveDuplicates => engine.remove_duplicates = true,
            EngineOption::FilterByFolder(query) => engine.folder_query = Some(query),
            EngineOption::Custom(kind, source) => engine.register(kind, source),
        }
        Ok(())
    }
}

/// Engine build failure, with the engine as configured up to the failing option
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct BuildError {
    pub engine: Engine,
    #[source]
    pub error: BookmarkerError,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `options` in order, stopping at the first one that fails
    pub fn build<I>(options: I) -> std::result::Result<Self, BuildError>
    where
        I: IntoIterator<Item = EngineOption>,
    {
        let mut engine = Self::new();
        for option in options {
            if let Err(error) = option.apply(&mut engine) {
                return Err(BuildError { engine, error });
            }
        }
        Ok(engine)
    }

    /// Enable `kind`, replacing any source already registered for it
    pub fn register(&mut self, kind: SourceKind, source: Box<dyn BookmarkSource>) {
        log::debug!("{}: reading {}", kind, source.path().display());
        self.sources.insert(kind, source);
    }

    pub fn set_remove_duplicates(&mut self, remove_duplicates: bool) {
        self.remove_duplicates = remove_duplicates;
    }

    pub fn set_folder_query(&mut self, query: Option<String>) {
        self.folder_query = query;
    }

    /// Enabled sources, in the order they are read
    pub fn enabled_sources(&self) -> Vec<SourceKind> {
        SourceKind::PRIORITY
            .into_iter()
            .filter(|kind| self.sources.contains_key(kind))
            .collect()
    }

    /// Read every enabled source and merge the results.
    ///
    /// Sources are read in [`SourceKind::PRIORITY`] order. The first source
    /// that fails aborts the whole read. The folder filter runs before
    /// deduplication, so the surviving duplicate is the first one inside the
    /// filtered folders.
    pub fn bookmarks(&self) -> Result<Bookmarks> {
        let mut bookmarks = Bookmarks::new();

        for kind in SourceKind::PRIORITY {
            let Some(source) = self.sources.get(&kind) else {
                continue;
            };

            let converted = source.convert().map_err(|e| BookmarkerError::Source {
                kind,
                source: Box::new(e),
            })?;
            log::info!("{}: {} bookmark(s)", kind.display_name(), converted.len());
            bookmarks.extend(converted);
        }

        if let Some(query) = self.folder_query.as_deref().filter(|q| !q.is_empty()) {
            bookmarks = bookmarks.filter_by_folder_prefix(query);
            log::debug!("{} bookmark(s) under {:?}", bookmarks.len(), query);
        }

        // after the folder filter, never before
        if self.remove_duplicates {
            bookmarks = bookmarks.uniq_by_uri();
            log::debug!("{} bookmark(s) after removing duplicates", bookmarks.len());
        }

        Ok(bookmarks)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("sources", &self.enabled_sources())
            .field("remove_duplicates", &self.remove_duplicates)
            .field("folder_query", &self.folder_query)
            .finish()
    }
}

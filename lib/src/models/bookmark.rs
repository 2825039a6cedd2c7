use super::SourceKind;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Deref;
use url::Url;

/// One bookmark read from a browser, normalized across browser families
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    source: SourceKind,
    folder: String,
    title: String,
    uri: String,
    domain: String,
}

impl Bookmark {
    /// Create a bookmark, validating `uri`.
    ///
    /// The URI is kept exactly as the browser stored it; the parsed form is
    /// only used to check it and to take the host for [`Bookmark::domain`].
    /// A folder path missing its leading `/` gets one.
    pub fn new(
        source: SourceKind,
        folder: impl Into<String>,
        title: impl Into<String>,
        uri: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        let uri = uri.into();
        let parsed = Url::parse(&uri)?;
        let domain = parsed.host_str().unwrap_or_default().to_string();

        let mut folder = folder.into();
        if !folder.starts_with('/') {
            folder.insert(0, '/');
        }

        Ok(Self {
            source,
            folder,
            title: title.into(),
            uri,
            domain,
        })
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    /// Slash-delimited folder path, `/` for top-level bookmarks
    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Host part of the URI, empty for URIs without one (`mailto:`, `about:`)
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

/// Ordered collection of bookmarks
///
/// Order follows the engine's source priority first, then the depth-first
/// order of each browser's tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bookmarks(Vec<Bookmark>);

impl Bookmarks {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, bookmark: Bookmark) {
        self.0.push(bookmark);
    }

    /// Keep only bookmarks whose folder starts with `prefix`
    pub fn filter_by_folder_prefix(self, prefix: &str) -> Self {
        self.0
            .into_iter()
            .filter(|b| b.folder.starts_with(prefix))
            .collect()
    }

    /// Drop every bookmark whose URI was already seen earlier in the list.
    /// URIs are compared as stored, without normalization.
    pub fn uniq_by_uri(self) -> Self {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0
            .into_iter()
            .filter(|b| seen.insert(b.uri.clone()))
            .collect()
    }

    pub fn into_vec(self) -> Vec<Bookmark> {
        self.0
    }
}

impl Deref for Bookmarks {
    type Target = [Bookmark];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Extend<Bookmark> for Bookmarks {
    fn extend<I: IntoIterator<Item = Bookmark>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Bookmark> for Bookmarks {
    fn from_iter<I: IntoIterator<Item = Bookmark>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Bookmarks {
    type Item = Bookmark;
    type IntoIter = std::vec::IntoIter<Bookmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Bookmarks {
    type Item = &'a Bookmark;
    type IntoIter = std::slice::Iter<'a, Bookmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Bookmark>> for Bookmarks {
    fn from(v: Vec<Bookmark>) -> Self {
        Self(v)
    }
}

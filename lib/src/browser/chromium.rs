use super::{walk_tree, BookmarkSource, NodeKind, TreeNode};
use crate::error::{BookmarkerError, Result};
use crate::models::{Bookmarks, SourceKind};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Chromium bookmark node (JSON)
#[derive(Debug, Deserialize)]
struct ChromiumNode {
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    children: Option<Vec<ChromiumNode>>,
}

#[derive(Debug, Deserialize)]
struct ChromiumBookmarkFile {
    roots: ChromiumRoots,
}

#[derive(Debug, Deserialize)]
struct ChromiumRoots {
    bookmark_bar: Option<ChromiumNode>,
    synced: Option<ChromiumNode>,
    other: Option<ChromiumNode>,
}

impl TreeNode for ChromiumNode {
    fn kind(&self) -> NodeKind<'_> {
        match self.node_type.as_str() {
            "folder" => NodeKind::Folder,
            "url" => NodeKind::Url(&self.url),
            _ => NodeKind::Other,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> Option<&[Self]> {
        self.children.as_deref()
    }
}

/// Chromium-family `Bookmarks` JSON file source (Chrome, Edge)
#[derive(Debug, Clone)]
pub struct ChromiumSource {
    kind: SourceKind,
    path: PathBuf,
}

impl ChromiumSource {
    /// `kind` is the browser the bookmarks are attributed to
    pub fn new(kind: SourceKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    fn load(&self) -> Result<ChromiumBookmarkFile> {
        let mut json_content =
            fs::read(&self.path).map_err(|e| BookmarkerError::unavailable(&self.path, e))?;
        simd_json::serde::from_slice(&mut json_content)
            .map_err(|e| BookmarkerError::decode(&self.path, e))
    }
}

impl BookmarkSource for ChromiumSource {
    fn convert(&self) -> Result<Bookmarks> {
        let file = self.load()?;
        let roots = file.roots;

        let mut bookmarks = Bookmarks::new();
        for root in [&roots.bookmark_bar, &roots.synced, &roots.other]
            .into_iter()
            .flatten()
        {
            walk_tree(root, self.kind, "/", &mut bookmarks);
        }

        Ok(bookmarks)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn convert(content: &str) -> Bookmarks {
        let file = write_json(content);
        ChromiumSource::new(SourceKind::Chrome, file.path())
            .convert()
            .unwrap()
    }

    fn pairs(bookmarks: &Bookmarks) -> Vec<(&str, &str)> {
        bookmarks.iter().map(|b| (b.folder(), b.uri())).collect()
    }

    #[test]
    fn test_chrome_file_parsing() {
        let json_content = r#"{
            "checksum": "e68417696614de65818e666d48227636",
            "roots": {
                "bookmark_bar": {
                    "children": [
                        {
                            "date_added": "13245678900000000",
                            "id": "1",
                            "name": "Google",
                            "type": "url",
                            "url": "https://www.google.com/"
                        },
                        {
                            "children": [
                                {
                                    "date_added": "13245678900000000",
                                    "id": "3",
                                    "name": "Rust",
                                    "type": "url",
                                    "url": "https://www.rust-lang.org/"
                                }
                            ],
                            "date_added": "13245678900000000",
                            "date_modified": "13245678900000000",
                            "id": "2",
                            "name": "Dev",
                            "type": "folder"
                        }
                    ],
                    "date_added": "13245678900000000",
                    "date_modified": "13245678900000000",
                    "id": "1",
                    "name": "Bookmarks Bar",
                    "type": "folder"
                },
                "other": {
                    "children": [
                        {
                            "id": "7",
                            "name": "Docs",
                            "type": "url",
                            "url": "https://docs.rs/"
                        }
                    ],
                    "id": "2",
                    "name": "Other Bookmarks",
                    "type": "folder"
                },
                "synced": {
                    "children": [
                        {
                            "id": "8",
                            "name": "Phone",
                            "type": "url",
                            "url": "https://m.example.com/"
                        }
                    ],
                    "id": "3",
                    "name": "Mobile Bookmarks",
                    "type": "folder"
                }
            },
            "version": 1
        }"#;

        let bookmarks = convert(json_content);

        // bar, synced, other
        assert_eq!(
            pairs(&bookmarks),
            vec![
                ("/Bookmarks Bar", "https://www.google.com/"),
                ("/Bookmarks Bar/Dev", "https://www.rust-lang.org/"),
                ("/Mobile Bookmarks", "https://m.example.com/"),
                ("/Other Bookmarks", "https://docs.rs/"),
            ]
        );

        let google = &bookmarks[0];
        assert_eq!(google.title(), "Google");
        assert_eq!(google.domain(), "www.google.com");
        assert_eq!(google.source(), SourceKind::Chrome);
    }

    #[test]
    fn test_nested_folder_example() {
        let bookmarks = convert(
            r#"{"roots": {"bookmark_bar": {"type": "folder", "name": "", "children": [
                {"type": "folder", "name": "Work", "children": [
                    {"type": "url", "name": "A", "url": "http://a.com"},
                    {"type": "folder", "name": "Sub", "children": [
                        {"type": "url", "name": "B", "url": "http://b.com"}
                    ]}
                ]}
            ]}}}"#,
        );

        assert_eq!(
            pairs(&bookmarks),
            vec![("/Work", "http://a.com"), ("/Work/Sub", "http://b.com")]
        );
    }

    #[test]
    fn test_missing_roots_and_children_yield_nothing() {
        let bookmarks = convert(
            r#"{"roots": {
                "bookmark_bar": {"type": "folder", "name": "Bar"},
                "other": {"type": "folder", "name": "Other", "children": []}
            }}"#,
        );

        assert!(bookmarks.is_empty());
    }

    #[test]
    fn test_malformed_url_does_not_fail_source() {
        let bookmarks = convert(
            r#"{"roots": {"bookmark_bar": {"type": "folder", "name": "", "children": [
                {"type": "url", "name": "broken", "url": "htp//broken"},
                {"type": "url", "name": "no url"},
                {"type": "url", "name": "ok", "url": "https://ok.example/"}
            ]}}}"#,
        );

        assert_eq!(pairs(&bookmarks), vec![("/", "https://ok.example/")]);
    }

    #[test]
    fn test_edge_attribution() {
        let file = write_json(
            r#"{"roots": {"other": {"type": "folder", "name": "", "children": [
                {"type": "url", "name": "x", "url": "https://x.example/"}
            ]}}}"#,
        );

        let bookmarks = ChromiumSource::new(SourceKind::Edge, file.path())
            .convert()
            .unwrap();
        assert_eq!(bookmarks[0].source(), SourceKind::Edge);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = ChromiumSource::new(SourceKind::Chrome, dir.path().join("Bookmarks"));

        let err = source.convert().unwrap_err();
        assert!(matches!(err, BookmarkerError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_garbage_is_decode_failure() {
        let file = write_json("{ this is not json");
        let err = ChromiumSource::new(SourceKind::Chrome, file.path())
            .convert()
            .unwrap_err();
        assert!(matches!(err, BookmarkerError::DecodeFailed { .. }));

        let file = write_json(r#"{"version": 1}"#);
        let err = ChromiumSource::new(SourceKind::Chrome, file.path())
            .convert()
            .unwrap_err();
        assert!(matches!(err, BookmarkerError::DecodeFailed { .. }));
    }
}

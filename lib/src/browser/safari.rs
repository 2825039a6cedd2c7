use super::{walk_tree, BookmarkSource, NodeKind, TreeNode};
use crate::error::{BookmarkerError, Result};
use crate::models::{Bookmarks, SourceKind};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Safari `Bookmarks.plist` node
#[derive(Debug, Deserialize)]
struct SafariNode {
    #[serde(rename = "WebBookmarkType", default)]
    node_type: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "URLString", default)]
    url: String,
    #[serde(rename = "URIDictionary")]
    uri_dictionary: Option<UriDictionary>,
    #[serde(rename = "Children")]
    children: Option<Vec<SafariNode>>,
}

#[derive(Debug, Deserialize)]
struct UriDictionary {
    #[serde(default)]
    title: String,
}

impl TreeNode for SafariNode {
    fn kind(&self) -> NodeKind<'_> {
        match self.node_type.as_str() {
            "WebBookmarkTypeList" => NodeKind::Folder,
            "WebBookmarkTypeLeaf" => NodeKind::Url(&self.url),
            // proxies (History, Reading List entry point) and anything newer
            _ => NodeKind::Other,
        }
    }

    /// Leaves keep their title in `URIDictionary`, folders in `Title`
    fn name(&self) -> &str {
        match &self.uri_dictionary {
            Some(dict) if self.title.is_empty() => &dict.title,
            _ => &self.title,
        }
    }

    fn children(&self) -> Option<&[Self]> {
        self.children.as_deref()
    }
}

/// Safari `Bookmarks.plist` source, binary or XML
#[derive(Debug, Clone)]
pub struct SafariSource {
    path: PathBuf,
}

impl SafariSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<SafariNode> {
        let data = fs::read(&self.path).map_err(|e| BookmarkerError::unavailable(&self.path, e))?;
        plist::from_bytes(&data).map_err(|e| BookmarkerError::decode(&self.path, e))
    }
}

impl BookmarkSource for SafariSource {
    fn convert(&self) -> Result<Bookmarks> {
        let root = self.load()?;

        let mut bookmarks = Bookmarks::new();
        walk_tree(&root, SourceKind::Safari, "/", &mut bookmarks);
        Ok(bookmarks)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

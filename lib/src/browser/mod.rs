//! Per-browser bookmark sources.
//!
//! Each source reads one browser's bookmark container from a path captured at
//! construction and turns it into [`Bookmarks`]. Sources never write to the
//! container.

pub mod chromium;
pub mod firefox;
pub mod profile;
pub mod safari;

use crate::error::Result;
use crate::models::{Bookmark, Bookmarks, SourceKind};
use std::fmt::Debug;
use std::path::Path;

pub use chromium::ChromiumSource;
pub use firefox::FirefoxSource;
pub use safari::SafariSource;

/// Trait for reading bookmarks out of one browser's storage
pub trait BookmarkSource: Debug {
    /// Read the container and convert every valid bookmark in it.
    ///
    /// Fails with `SourceUnavailable` when the container can't be opened and
    /// `DecodeFailed` when it can't be parsed. Bookmarks with an invalid URI
    /// are skipped, they never fail the whole source.
    fn convert(&self) -> Result<Bookmarks>;

    /// Location of the container this source reads
    fn path(&self) -> &Path;
}

/// What a node of a browser bookmark tree holds
pub(crate) enum NodeKind<'a> {
    Folder,
    Url(&'a str),
    Other,
}

/// A node of a hierarchical bookmark tree, as decoded from a browser container
pub(crate) trait TreeNode: Sized {
    fn kind(&self) -> NodeKind<'_>;

    fn name(&self) -> &str;

    /// `None` when the node carries no children container at all
    fn children(&self) -> Option<&[Self]>;
}

/// Append a folder name to a folder path.
///
/// Slashes around `name` are dropped; a name made only of slashes adds no
/// segment.
pub(crate) fn join_folder(parent: &str, name: &str) -> String {
    let name = name.trim_matches('/');
    if name.is_empty() {
        parent.to_string()
    } else if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Depth-first walk of `node`, pushing one bookmark per valid url node
pub(crate) fn walk_tree<N: TreeNode>(
    node: &N,
    source: SourceKind,
    folder: &str,
    out: &mut Bookmarks,
) {
    match node.kind() {
        NodeKind::Folder => {
            // folder never materialized or explicitly empty: nothing below
            let Some(children) = node.children() else {
                return;
            };
            let folder = join_folder(folder, node.name());
            for child in children {
                walk_tree(child, source, &folder, out);
            }
        }
        NodeKind::Url(uri) => match Bookmark::new(source, folder, node.name(), uri) {
            Ok(bookmark) => out.push(bookmark),
            Err(e) => log::debug!("{}: skipping bookmark {:?} ({})", source, uri, e),
        },
        NodeKind::Other => {
            for child in node.children().unwrap_or_default() {
                walk_tree(child, source, folder, out);
            }
        }
    }
}

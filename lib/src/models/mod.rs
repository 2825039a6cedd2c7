pub mod bookmark;
pub mod source;

pub use bookmark::{Bookmark, Bookmarks};
pub use source::SourceKind;

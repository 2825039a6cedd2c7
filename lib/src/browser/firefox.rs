use super::{walk_tree, BookmarkSource, NodeKind, TreeNode};
use crate::error::{BookmarkerError, Result};
use crate::models::{Bookmarks, SourceKind};
use rusqlite::{Connection, ErrorCode, OpenFlags};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const TYPE_BOOKMARK: i64 = 1;
const TYPE_FOLDER: i64 = 2;
const TAGS_ROOT_GUID: &str = "tags________";

/// One `moz_bookmarks` row joined with its `moz_places` url
#[derive(Debug)]
struct PlacesRow {
    id: i64,
    node_type: i64,
    parent: i64,
    title: String,
    url: Option<String>,
    guid: String,
}

/// Bookmark tree rebuilt from `moz_bookmarks` parent links
#[derive(Debug)]
struct PlacesNode {
    node_type: i64,
    title: String,
    url: String,
    children: Option<Vec<PlacesNode>>,
}

impl TreeNode for PlacesNode {
    fn kind(&self) -> NodeKind<'_> {
        match self.node_type {
            TYPE_FOLDER => NodeKind::Folder,
            TYPE_BOOKMARK => NodeKind::Url(&self.url),
            _ => NodeKind::Other,
        }
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn children(&self) -> Option<&[Self]> {
        self.children.as_deref()
    }
}

/// Firefox `places.sqlite` source
#[derive(Debug, Clone)]
pub struct FirefoxSource {
    path: PathBuf,
}

impl FirefoxSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every bookmark row, siblings ordered by position
    fn load(&self) -> Result<Vec<PlacesRow>> {
        // SQLite reports a missing file as a generic open failure, check first
        let metadata =
            fs::metadata(&self.path).map_err(|e| BookmarkerError::unavailable(&self.path, e))?;
        if metadata.is_dir() {
            return Err(BookmarkerError::unavailable(
                &self.path,
                io::Error::other("is a directory"),
            ));
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.sqlite_error(e))?;
        // a running Firefox holds the lock, fail at once instead of waiting
        conn.busy_timeout(Duration::ZERO)
            .map_err(|e| self.sqlite_error(e))?;

        let rows = query_rows(&conn).map_err(|e| self.sqlite_error(e))?;
        Ok(rows)
    }

    /// Lock and open failures mean the database can't be read right now,
    /// anything else means it isn't a places database
    fn sqlite_error(&self, err: rusqlite::Error) -> BookmarkerError {
        if let rusqlite::Error::SqliteFailure(failure, message) = &err {
            let kind = match failure.code {
                ErrorCode::PermissionDenied => Some(io::ErrorKind::PermissionDenied),
                ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::CannotOpen
                | ErrorCode::SystemIoFailure => Some(io::ErrorKind::Other),
                _ => None,
            };
            if let Some(kind) = kind {
                let message = message.clone().unwrap_or_else(|| failure.to_string());
                return BookmarkerError::unavailable(&self.path, io::Error::new(kind, message));
            }
        }
        BookmarkerError::decode(&self.path, err)
    }
}

fn query_rows(conn: &Connection) -> rusqlite::Result<Vec<PlacesRow>> {
    let mut stmt = conn.prepare(
        "SELECT moz_bookmarks.id, moz_bookmarks.type, moz_bookmarks.parent,
                moz_bookmarks.title, moz_places.url, moz_bookmarks.guid
         FROM moz_bookmarks
         LEFT JOIN moz_places ON moz_bookmarks.fk = moz_places.id
         ORDER BY moz_bookmarks.parent, moz_bookmarks.position, moz_bookmarks.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(PlacesRow {
            id: row.get(0)?,
            node_type: row.get(1)?,
            parent: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
            title: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            url: row.get(4)?,
            guid: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        })
    })?;

    rows.collect()
}

/// Rebuild the tree below the places root (the row without a parent)
fn build_tree(rows: Vec<PlacesRow>) -> Option<PlacesNode> {
    let mut root_id = None;
    let mut by_id = HashMap::with_capacity(rows.len());
    let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();

    for row in rows {
        if row.guid == TAGS_ROOT_GUID {
            continue;
        }
        if row.parent == 0 && root_id.is_none() {
            root_id = Some(row.id);
        } else {
            children_of.entry(row.parent).or_default().push(row.id);
        }
        by_id.insert(row.id, row);
    }

    fn build(
        id: i64,
        by_id: &mut HashMap<i64, PlacesRow>,
        children_of: &HashMap<i64, Vec<i64>>,
    ) -> Option<PlacesNode> {
        let row = by_id.remove(&id)?;
        let children = if row.node_type == TYPE_FOLDER {
            let ids = children_of.get(&id).map(Vec::as_slice).unwrap_or_default();
            Some(
                ids.iter()
                    .filter_map(|child| build(*child, by_id, children_of))
                    .collect(),
            )
        } else {
            None
        };

        Some(PlacesNode {
            node_type: row.node_type,
            title: row.title,
            url: row.url.unwrap_or_default(),
            children,
        })
    }

    build(root_id?, &mut by_id, &children_of)
}

impl BookmarkSource for FirefoxSource {
    fn convert(&self) -> Result<Bookmarks> {
        let rows = self.load()?;

        let mut bookmarks = Bookmarks::new();
        match build_tree(rows) {
            Some(root) => walk_tree(&root, SourceKind::Firefox, "/", &mut bookmarks),
            None => log::debug!("{}: no bookmarks root", self.path.display()),
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
    use rusqlite::params;
    use tempfile::TempDir;

    /// Create a places.sqlite with the Firefox roots and the given extra rows
    /// (id, type, parent, position, title, url)
    fn places_db(rows: &[(i64, i64, i64, i64, &str, Option<&str>)]) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.sqlite");
        let conn = Connection::open(&path).unwrap();

        conn.execute_batch(
            "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url LONGVARCHAR, title LONGVARCHAR);
             CREATE TABLE moz_bookmarks (
                id INTEGER PRIMARY KEY, type INTEGER, fk INTEGER DEFAULT NULL,
                parent INTEGER, position INTEGER, title LONGVARCHAR, guid TEXT);
             INSERT INTO moz_bookmarks VALUES (1, 2, NULL, 0, 0, '', 'root________');
             INSERT INTO moz_bookmarks VALUES (2, 2, NULL, 1, 0, 'menu', 'menu________');
             INSERT INTO moz_bookmarks VALUES (3, 2, NULL, 1, 1, 'toolbar', 'toolbar_____');
             INSERT INTO moz_bookmarks VALUES (4, 2, NULL, 1, 2, 'tags', 'tags________');
             INSERT INTO moz_bookmarks VALUES (5, 2, NULL, 1, 3, 'unfiled', 'unfiled_____');
             INSERT INTO moz_bookmarks VALUES (6, 2, NULL, 1, 4, 'mobile', 'mobile______');",
        )
        .unwrap();

        for (id, node_type, parent, position, title, url) in rows {
            let fk = url.map(|u| {
                conn.execute(
                    "INSERT INTO moz_places (url, title) VALUES (?1, ?2)",
                    params![u, title],
                )
                .unwrap();
                conn.last_insert_rowid()
            });
            conn.execute(
                "INSERT INTO moz_bookmarks (id, type, fk, parent, position, title, guid)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![id, node_type, fk, parent, position, title, format!("guid{}", id)],
            )
            .unwrap();
        }

        (dir, path)
    }

    fn pairs(bookmarks: &Bookmarks) -> Vec<(&str, &str)> {
        bookmarks.iter().map(|b| (b.folder(), b.uri())).collect()
    }

    #[test]
    fn test_folders_resolve_to_paths() {
        let (_dir, path) = places_db(&[
            (10, 2, 3, 0, "Work", None),
            (11, 1, 10, 0, "A", Some("http://a.com")),
            (12, 2, 10, 1, "Sub", None),
            (13, 1, 12, 0, "B", Some("http://b.com")),
            (14, 1, 2, 0, "Menu item", Some("https://menu.example/")),
        ]);

        let bookmarks = FirefoxSource::new(&path).convert().unwrap();

        assert_eq!(
            pairs(&bookmarks),
            vec![
                ("/menu", "https://menu.example/"),
                ("/toolbar/Work", "http://a.com"),
                ("/toolbar/Work/Sub", "http://b.com"),
            ]
        );
        assert_eq!(bookmarks[1].title(), "A");
        assert_eq!(bookmarks[1].source(), SourceKind::Firefox);
    }

    #[test]
    fn test_siblings_follow_position_not_id() {
        let (_dir, path) = places_db(&[
            (20, 1, 5, 1, "second", Some("http://second.com")),
            (21, 1, 5, 0, "first", Some("http://first.com")),
        ]);

        let bookmarks = FirefoxSource::new(&path).convert().unwrap();
        assert_eq!(
            pairs(&bookmarks),
            vec![("/unfiled", "http://first.com"), ("/unfiled", "http://second.com")]
        );
    }

    #[test]
    fn test_tags_and_separators_are_not_bookmarks() {
        let (_dir, path) = places_db(&[
            (30, 2, 4, 0, "rust", None),
            (31, 1, 30, 0, "", Some("http://tagged.com")),
            (32, 3, 3, 0, "", None),
            (33, 1, 3, 1, "real", Some("http://tagged.com")),
        ]);

        let bookmarks = FirefoxSource::new(&path).convert().unwrap();
        assert_eq!(pairs(&bookmarks), vec![("/toolbar", "http://tagged.com")]);
    }

    #[test]
    fn test_invalid_place_url_is_skipped() {
        let (_dir, path) = places_db(&[
            (40, 1, 3, 0, "bad", Some("not a url")),
            (41, 1, 3, 1, "no place", None),
            (42, 1, 3, 2, "good", Some("https://good.example/")),
        ]);

        let bookmarks = FirefoxSource::new(&path).convert().unwrap();
        assert_eq!(pairs(&bookmarks), vec![("/toolbar", "https://good.example/")]);
    }

    #[test]
    fn test_empty_profile_has_no_bookmarks() {
        let (_dir, path) = places_db(&[]);
        assert!(FirefoxSource::new(&path).convert().unwrap().is_empty());
    }

    #[test]
    fn test_missing_database_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = FirefoxSource::new(dir.path().join("places.sqlite"))
            .convert()
            .unwrap_err();
        assert!(matches!(err, BookmarkerError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_locked_database_is_unavailable() {
        let (_dir, path) = places_db(&[(10, 1, 3, 0, "A", Some("http://a.com"))]);

        // what a running Firefox does to its profile database
        let lock = Connection::open(&path).unwrap();
        lock.execute_batch("PRAGMA locking_mode=EXCLUSIVE; BEGIN EXCLUSIVE;")
            .unwrap();

        let err = FirefoxSource::new(&path).convert().unwrap_err();
        assert!(matches!(err, BookmarkerError::SourceUnavailable { .. }));

        lock.execute_batch("COMMIT;").unwrap();
        drop(lock);
        assert_eq!(FirefoxSource::new(&path).convert().unwrap().len(), 1);
    }

    #[test]
    fn test_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = FirefoxSource::new(dir.path()).convert().unwrap_err();
        assert!(matches!(err, BookmarkerError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_wrong_schema_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.sqlite");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (x INTEGER);")
            .unwrap();

        let err = FirefoxSource::new(&path).convert().unwrap_err();
        assert!(matches!(err, BookmarkerError::DecodeFailed { .. }));
    }

    #[test]
    fn test_not_a_database_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.sqlite");
        fs::write(&path, b"definitely not sqlite, just some bytes padded out a bit").unwrap();

        let err = FirefoxSource::new(&path).convert().unwrap_err();
        assert!(matches!(err, BookmarkerError::DecodeFailed { .. }));
    }
}

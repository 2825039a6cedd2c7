//! Locate a browser's bookmark container from a profile name.
//!
//! Profiles are directories below a per-browser parent directory whose name
//! ends with the requested profile (`Default`, `Profile 1`,
//! `x1y2z3.default-release`). The parent can be overridden for portable or
//! non-standard installs.

use crate::error::{BookmarkerError, Result};
use crate::utils::home_dir;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the first directory in `parent` (by name) whose name ends with `suffix`
pub fn search_suffix_dir(parent: &Path, suffix: &str) -> Result<String> {
    let entries = fs::read_dir(parent).map_err(|e| {
        BookmarkerError::Configuration(format!("cannot read {}: {}", parent.display(), e))
    })?;

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(suffix))
        .collect();
    names.sort();

    names.into_iter().next().ok_or_else(|| {
        BookmarkerError::Configuration(format!(
            "no profile matching {:?} in {}",
            suffix,
            parent.display()
        ))
    })
}

fn resolve(base: PathBuf, profile: &str, file_name: &str) -> Result<PathBuf> {
    let dir_name = search_suffix_dir(&base, profile)?;
    let path = base.join(dir_name).join(file_name);
    log::debug!("resolved profile {:?} to {}", profile, path.display());
    Ok(path)
}

fn chrome_base() -> Result<PathBuf> {
    let home = home_dir()?;

    #[cfg(target_os = "macos")]
    let chrome_base = home.join("Library/Application Support/Google/Chrome");

    #[cfg(target_os = "windows")]
    let chrome_base = home.join("AppData\\Local\\Google\\Chrome\\User Data");

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let chrome_base = home.join(".config/google-chrome");

    Ok(chrome_base)
}

fn edge_base() -> Result<PathBuf> {
    let home = home_dir()?;

    #[cfg(target_os = "macos")]
    let edge_base = home.join("Library/Application Support/Microsoft Edge");

    #[cfg(target_os = "windows")]
    let edge_base = home.join("AppData\\Local\\Microsoft\\Edge\\User Data");

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let edge_base = home.join(".config/microsoft-edge");

    Ok(edge_base)
}

fn firefox_base() -> Result<PathBuf> {
    let home = home_dir()?;

    #[cfg(target_os = "macos")]
    let firefox_base = home.join("Library/Application Support/Firefox/Profiles");

    #[cfg(target_os = "windows")]
    let firefox_base = home.join("AppData\\Roaming\\Mozilla\\Firefox\\Profiles");

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let firefox_base = home.join(".mozilla/firefox");

    Ok(firefox_base)
}

fn base_or(profile_dir: Option<&Path>, default: fn() -> Result<PathBuf>) -> Result<PathBuf> {
    match profile_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => default(),
    }
}

/// Chrome `Bookmarks` file of `profile`
pub fn chrome_bookmark_file(profile_dir: Option<&Path>, profile: &str) -> Result<PathBuf> {
    resolve(base_or(profile_dir, chrome_base)?, profile, "Bookmarks")
}

/// Edge `Bookmarks` file of `profile` (same layout as Chrome)
pub fn edge_bookmark_file(profile_dir: Option<&Path>, profile: &str) -> Result<PathBuf> {
    resolve(base_or(profile_dir, edge_base)?, profile, "Bookmarks")
}

/// Firefox `places.sqlite` of `profile`
pub fn firefox_bookmark_file(profile_dir: Option<&Path>, profile: &str) -> Result<PathBuf> {
    resolve(base_or(profile_dir, firefox_base)?, profile, "places.sqlite")
}

/// Safari has a single bookmark file per user
pub fn safari_bookmark_file(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(home_dir()?.join("Library/Safari/Bookmarks.plist")),
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser family a bookmark was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

impl SourceKind {
    /// Order in which the engine reads enabled sources.
    pub const PRIORITY: [SourceKind; 4] = [
        SourceKind::Chrome,
        SourceKind::Edge,
        SourceKind::Firefox,
        SourceKind::Safari,
    ];

    /// Get a user-friendly display name for the browser
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::Chrome => "Chrome",
            SourceKind::Edge => "Edge",
            SourceKind::Firefox => "Firefox",
            SourceKind::Safari => "Safari",
        }
    }

    /// Parse source kind from string (case-insensitive)
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chrome" => Some(SourceKind::Chrome),
            "edge" => Some(SourceKind::Edge),
            "firefox" => Some(SourceKind::Firefox),
            "safari" => Some(SourceKind::Safari),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Chrome => "chrome",
            SourceKind::Edge => "edge",
            SourceKind::Firefox => "firefox",
            SourceKind::Safari => "safari",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

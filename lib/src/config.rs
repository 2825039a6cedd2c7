use crate::engine::EngineOption;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a Chromium or Firefox profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Suffix of the profile directory name
    pub profile: String,
    /// Directory holding the profiles, platform default when unset
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,
}

impl ProfileConfig {
    fn disabled(profile: &str) -> Self {
        Self {
            enabled: false,
            profile: profile.to_string(),
            profile_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafariConfig {
    #[serde(default)]
    pub enabled: bool,
    /// `Bookmarks.plist` location, `~/Library/Safari/Bookmarks.plist` when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_chromium")]
    pub chrome: ProfileConfig,

    #[serde(default = "default_chromium")]
    pub edge: ProfileConfig,

    #[serde(default = "default_firefox")]
    pub firefox: ProfileConfig,

    #[serde(default)]
    pub safari: SafariConfig,

    /// Keep only the first bookmark of each URI
    #[serde(default)]
    pub remove_duplicates: bool,

    /// Keep only bookmarks below this folder prefix
    #[serde(default)]
    pub folder: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chrome: default_chromium(),
            edge: default_chromium(),
            firefox: default_firefox(),
            safari: SafariConfig::default(),
            remove_duplicates: false,
            folder: None,
        }
    }
}

fn default_chromium() -> ProfileConfig {
    ProfileConfig::disabled("Default")
}

fn default_firefox() -> ProfileConfig {
    ProfileConfig::disabled("default-release")
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        // an empty or comment-only file is a valid default config
        if contents.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/bookmarker/config.yml)
    /// Falls back to default config if file doesn't exist
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Failed to load config from {:?}: {}, using default configuration",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Engine options for this configuration, sources first
    pub fn options(&self) -> Vec<EngineOption> {
        let mut options = Vec::new();

        if self.chrome.enabled {
            options.push(EngineOption::Chrome {
                profile_dir: self.chrome.profile_dir.clone(),
                profile: self.chrome.profile.clone(),
            });
        }
        if self.edge.enabled {
            options.push(EngineOption::Edge {
                profile_dir: self.edge.profile_dir.clone(),
                profile: self.edge.profile.clone(),
            });
        }
        if self.firefox.enabled {
            options.push(EngineOption::Firefox {
                profile_dir: self.firefox.profile_dir.clone(),
                profile: self.firefox.profile.clone(),
            });
        }
        if self.safari.enabled {
            options.push(EngineOption::Safari {
                path: self.safari.path.clone(),
            });
        }
        if self.remove_duplicates {
            options.push(EngineOption::RemoveDuplicates);
        }
        if let Some(folder) = &self.folder {
            options.push(EngineOption::FilterByFolder(folder.clone()));
        }

        options
    }

    /// Whether any browser is enabled
    pub fn has_sources(&self) -> bool {
        self.chrome.enabled || self.edge.enabled || self.firefox.enabled || self.safari.enabled
    }
}

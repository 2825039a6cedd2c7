use crate::output::colorize::{Colorize, ColorizeBookmark};
use bookmarker::error::Result;
use bookmarker::{Bookmark, Bookmarks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Plain,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Self {
        match format {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            _ => OutputFormat::Plain,
        }
    }

    pub fn render(self, records: &Bookmarks, no_color: bool) -> Result<String> {
        match self {
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(records).map_err(std::io::Error::from)?;
                json.push('\n');
                Ok(json)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(records)?),
            OutputFormat::Plain => Ok(records
                .iter()
                .map(|b| {
                    if no_color {
                        plain_line(b)
                    } else {
                        ColorizeBookmark(b).to_colored()
                    }
                })
                .collect()),
        }
    }
}

/// `folder<TAB>title<TAB>uri`, one bookmark per line
pub fn plain_line(b: &Bookmark) -> String {
    format!("{}\t{}\t{}\n", b.folder(), b.title(), b.uri())
}

use bookmarker::Bookmark;
use owo_colors::OwoColorize;

pub trait Colorize {
    fn to_colored(&self) -> String;
}

pub struct ColorizeBookmark<'a>(pub &'a Bookmark);

impl<'a> Colorize for ColorizeBookmark<'a> {
    fn to_colored(&self) -> String {
        format!(
            "{}\t{}\t{}\n",
            self.0.folder().blue(),
            self.0.title().bold().green(),
            self.0.uri().yellow()
        )
    }
}

//! Importable ReStructuredText snippets kept next to the stylesheet.

use crate::config::Settings;
use crate::error::Result;
use chrono::{Local, NaiveDate};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the date snippet.
pub const TODAY_SNIPPET: &str = "today.rst";

/// Substitution name defined by the date snippet.
pub const TODAY_SUBSTITUTION: &str = "today";

/// Spell a date out, e.g. `Monday, October 19, 2026`.
pub fn date_in_words(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Body of the date snippet: a `|today|` substitution definition.
pub fn today_snippet(date: NaiveDate) -> String {
    format!(
        ".. |{}| replace:: {}\n",
        TODAY_SUBSTITUTION,
        date_in_words(date)
    )
}

/// The `include` directive that imports `path`.
pub fn include_directive(path: &Path) -> String {
    format!(".. include:: {}", path.display())
}

/// Write the date snippet for `date` into the snippet directory.
pub fn write_today_snippet(settings: &Settings, date: NaiveDate) -> Result<PathBuf> {
    let dir = settings.snippet_path();
    fs::create_dir_all(&dir)?;
    let path = dir.join(TODAY_SNIPPET);
    fs::write(&path, today_snippet(date))?;
    info!("wrote snippet {}", path.display());
    Ok(path)
}

/// Today's local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

//! Runtime settings shared by the stylesheet, conversion, and serving steps.

use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the per-user configuration directory under `$HOME`.
pub const CONFIG_DIR_NAME: &str = ".rst2pdf";

/// Default stylesheet filename inside the configuration directory.
pub const DEFAULT_STYLESHEET_FILENAME: &str = "rst2pdf_stylesheet.yml";

/// Default snippet subdirectory inside the configuration directory.
pub const DEFAULT_SNIPPET_DIR: &str = "includes";

/// Suffix of documents the converter accepts.
pub const SOURCE_SUFFIX: &str = "rst";

/// Suffix of documents the converter produces.
pub const OUTPUT_SUFFIX: &str = "pdf";

/// Default converter program.
pub const DEFAULT_CONVERTER: &str = "rst2pdf";

/// Default file server program.
pub const DEFAULT_SERVER: &str = "filesystem_webserver";

/// Default label used to decode interface listing output.
pub const DEFAULT_TERMINAL_ENCODING: &str = "UTF-8";

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the generated stylesheet
    pub stylesheet_dir: PathBuf,

    /// Stylesheet filename inside `stylesheet_dir`
    pub stylesheet_filename: String,

    /// Subdirectory of `stylesheet_dir` holding include snippets
    pub snippet_dir: String,

    /// Converter program name or path
    pub converter: String,

    /// File server program name or path
    pub server: String,

    /// Encoding label for decoding command output
    pub terminal_encoding: String,

    /// A file server exiting sooner than this is treated as a failed bind
    pub min_server_uptime: Duration,
}

impl Settings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stylesheet directory.
    pub fn with_stylesheet_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stylesheet_dir = expand_home(&dir.into());
        self
    }

    /// Set the stylesheet filename.
    pub fn with_stylesheet_filename(mut self, filename: impl Into<String>) -> Self {
        self.stylesheet_filename = filename.into();
        self
    }

    /// Set the converter program.
    pub fn with_converter(mut self, program: impl Into<String>) -> Self {
        self.converter = program.into();
        self
    }

    /// Set the file server program.
    pub fn with_server(mut self, program: impl Into<String>) -> Self {
        self.server = program.into();
        self
    }

    /// Set the terminal encoding label.
    pub fn with_terminal_encoding(mut self, label: impl Into<String>) -> Self {
        self.terminal_encoding = label.into();
        self
    }

    /// Set the minimum uptime expected from the file server.
    pub fn with_min_server_uptime(mut self, uptime: Duration) -> Self {
        self.min_server_uptime = uptime;
        self
    }

    /// Full path of the stylesheet file.
    pub fn stylesheet_path(&self) -> PathBuf {
        self.stylesheet_dir.join(&self.stylesheet_filename)
    }

    /// Full path of the snippet directory.
    pub fn snippet_path(&self) -> PathBuf {
        self.stylesheet_dir.join(&self.snippet_dir)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stylesheet_dir: config_home(),
            stylesheet_filename: DEFAULT_STYLESHEET_FILENAME.to_string(),
            snippet_dir: DEFAULT_SNIPPET_DIR.to_string(),
            converter: DEFAULT_CONVERTER.to_string(),
            server: DEFAULT_SERVER.to_string(),
            terminal_encoding: DEFAULT_TERMINAL_ENCODING.to_string(),
            min_server_uptime: Duration::from_millis(500),
        }
    }
}

/// The per-user configuration home, `~/.rst2pdf`.
pub fn config_home() -> PathBuf {
    home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME))
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Resolve a program name to an executable path.
///
/// Paths with more than one component are used as given. A bare name is
/// looked up in the current directory first, then on `PATH`.
pub fn resolve_program(program: &str) -> Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return Ok(path.to_path_buf());
    }

    let local = env::current_dir()?.join(path);
    if local.is_file() {
        return Ok(local);
    }

    which::which(program).map_err(|_| Error::ToolNotFound(program.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_builder() {
        let settings = Settings::new()
            .with_stylesheet_dir("/tmp/styles")
            .with_stylesheet_filename("custom.yml")
            .with_converter("/opt/bin/rst2pdf")
            .with_min_server_uptime(Duration::from_secs(2));

        assert_eq!(settings.stylesheet_path(), PathBuf::from("/tmp/styles/custom.yml"));
        assert_eq!(settings.snippet_path(), PathBuf::from("/tmp/styles/includes"));
        assert_eq!(settings.converter, "/opt/bin/rst2pdf");
        assert_eq!(settings.min_server_uptime, Duration::from_secs(2));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.stylesheet_filename, "rst2pdf_stylesheet.yml");
        assert_eq!(settings.converter, "rst2pdf");
        assert_eq!(settings.server, "filesystem_webserver");
        assert!(settings.stylesheet_dir.ends_with(".rst2pdf"));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home(Path::new("/etc/x")), PathBuf::from("/etc/x"));
        assert_eq!(expand_home(Path::new("rel/x")), PathBuf::from("rel/x"));
    }

    #[test]
    fn test_resolve_program_keeps_explicit_paths() {
        let resolved = resolve_program("./bin/tool").unwrap();
        assert_eq!(resolved, PathBuf::from("./bin/tool"));
    }

    #[test]
    fn test_resolve_program_missing() {
        let result = resolve_program("definitely-not-a-real-program-xyz");
        assert!(matches!(result, Err(Error::ToolNotFound(_))));
    }
}

//! Document conversion: output naming, input checks, and the converter run.
//!
//! # Example
//!
//! ```no_run
//! use rst2pdf_serve::convert::{JobPlan, Rst2Pdf};
//! use rst2pdf_serve::Settings;
//!
//! fn main() -> rst2pdf_serve::Result<()> {
//!     let settings = Settings::default();
//!     let plan = JobPlan::from_path("report.rst")?;
//!     Rst2Pdf::from_settings(&settings).convert(
//!         &plan,
//!         &settings.stylesheet_dir,
//!         &settings.stylesheet_filename,
//!     )?;
//!     Ok(())
//! }
//! ```

mod rst2pdf;

pub use rst2pdf::Rst2Pdf;

use crate::config::{expand_home, OUTPUT_SUFFIX, SOURCE_SUFFIX};
use crate::error::{Error, Result};
use log::info;
use std::env;
use std::path::{Path, PathBuf};

/// Input and output naming for one conversion, derived from the source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPlan {
    /// Source document path, as given
    pub source: PathBuf,

    /// Directory containing the source document
    pub source_dir: PathBuf,

    /// Source file name
    pub source_filename: String,

    /// Source extension without the dot (empty if none)
    pub suffix: String,

    /// Output document path
    pub output: PathBuf,

    /// Output file name
    pub output_filename: String,
}

impl JobPlan {
    /// Derive the plan for `path`.
    ///
    /// An `.rst` source maps to a `.pdf` output next to it. Any other suffix
    /// is not converted, and the output is the source itself.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = path.as_ref().to_path_buf();
        let suffix = match source.extension() {
            Some(ext) => ext
                .to_str()
                .ok_or_else(|| Error::InvalidSuffix(ext.to_string_lossy().into_owned()))?
                .to_string(),
            None => String::new(),
        };
        let source_filename = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Other(format!("{} has no file name", source.display())))?
            .to_string();
        let source_dir = source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let output = if suffix == SOURCE_SUFFIX {
            source.with_extension(OUTPUT_SUFFIX)
        } else {
            source.clone()
        };
        let output_filename = output
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&source_filename)
            .to_string();

        Ok(Self {
            source,
            source_dir,
            source_filename,
            suffix,
            output,
            output_filename,
        })
    }

    /// Whether this plan runs the converter.
    pub fn needs_conversion(&self) -> bool {
        self.suffix == SOURCE_SUFFIX
    }
}

/// Outcome of a conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// The converter wrote this file
    Converted(PathBuf),
    /// The source is not ReStructuredText; nothing was run
    Skipped,
}

/// Check that `path` exists and return its absolute form.
pub fn check_exists(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let expanded = expand_home(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()?.join(expanded)
    };

    info!("    filepath: {}", path.display());
    info!("        checking: {}", absolute.display());

    if absolute.exists() {
        Ok(absolute)
    } else {
        Err(Error::FileNotFound(absolute))
    }
}

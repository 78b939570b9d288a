//! # rst2pdf-serve
//!
//! Convert ReStructuredText documents to PDF with a generated rst2pdf
//! stylesheet, then optionally serve the result on the local network.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rst2pdf_serve::{Rst2PdfServe, Settings, Stylesheet};
//!
//! fn main() -> rst2pdf_serve::Result<()> {
//!     let stylesheet = Stylesheet::builder()
//!         .font_family("Sans")
//!         .font_size(12)
//!         .margin("2cm")
//!         .build()?;
//!
//!     let conversion = Rst2PdfServe::new(Settings::default())
//!         .with_stylesheet(stylesheet)
//!         .convert("report.rst")?;
//!     println!("wrote {}", conversion.plan.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`stylesheet`]: font/page model, validation, YAML output
//! - [`convert`]: output naming and the rst2pdf run
//! - [`net`]: local address discovery and validation
//! - [`serve`]: temporary staging and the file server run
//! - [`snippet`]: the "today's date" include file

pub mod config;
pub mod convert;
pub mod error;
pub mod net;
#[cfg(feature = "serve")]
pub mod serve;
pub mod snippet;
pub mod stylesheet;

// Re-export commonly used types
pub use config::Settings;
pub use convert::{check_exists, ConvertOutcome, JobPlan, Rst2Pdf};
pub use error::{Error, Result};
pub use net::{is_valid_address, is_valid_any, AddressFamily, AddressLister, Platform};
#[cfg(feature = "serve")]
pub use serve::{ServeOptions, ServeOutcome};
pub use stylesheet::{FontAttr, FontFamily, FontSize, Measurement, Orientation, PageSize, Stylesheet};

use std::path::{Path, PathBuf};

/// Write the stylesheet where `settings` says and return its path.
pub fn write_stylesheet(stylesheet: &Stylesheet, settings: &Settings) -> Result<PathBuf> {
    stylesheet.save(&settings.stylesheet_dir, &settings.stylesheet_filename)
}

/// Builder tying settings and a stylesheet to conversion and serving.
///
/// # Example
///
/// ```no_run
/// use rst2pdf_serve::{net, Rst2PdfServe, Settings};
///
/// let app = Rst2PdfServe::new(Settings::default());
/// let conversion = app.convert("notes.rst")?;
/// let addresses = net::local_addresses("UTF-8")?;
/// app.serve(&conversion, &addresses, 8080)?;
/// # Ok::<(), rst2pdf_serve::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rst2PdfServe {
    settings: Settings,
    stylesheet: Stylesheet,
}

impl Rst2PdfServe {
    /// Create a builder with the default stylesheet.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            stylesheet: Stylesheet::default(),
        }
    }

    /// Use `stylesheet` instead of the default.
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Settings in use.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Stylesheet in use.
    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Write the stylesheet and convert `source`.
    pub fn convert<P: AsRef<Path>>(&self, source: P) -> Result<Conversion> {
        let plan = JobPlan::from_path(source)?;
        check_exists(&plan.source)?;

        let stylesheet_path = write_stylesheet(&self.stylesheet, &self.settings)?;
        let outcome = Rst2Pdf::from_settings(&self.settings).convert(
            &plan,
            &self.settings.stylesheet_dir,
            &self.settings.stylesheet_filename,
        )?;

        Ok(Conversion {
            plan,
            stylesheet_path,
            outcome,
        })
    }

    /// Serve a finished conversion on `port`.
    #[cfg(feature = "serve")]
    pub fn serve<S: AsRef<str>>(
        &self,
        conversion: &Conversion,
        addresses: &[S],
        port: u16,
    ) -> Result<ServeOutcome> {
        let options = ServeOptions::from_settings(&self.settings, port);
        serve::serve(&conversion.plan, addresses, &options)
    }
}

/// Result of [`Rst2PdfServe::convert`].
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Naming for this job
    pub plan: JobPlan,
    /// Where the stylesheet was written
    pub stylesheet_path: PathBuf,
    /// Whether the converter ran
    pub outcome: ConvertOutcome,
}

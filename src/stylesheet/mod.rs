//! rst2pdf stylesheet model.
//!
//! A [`Stylesheet`] holds validated font and page settings. It renders to a
//! [`StylesheetDocument`] matching rst2pdf's YAML stylesheet schema and can
//! be written to disk.
//!
//! # Example
//!
//! ```
//! use rst2pdf_serve::stylesheet::{FontFamily, Stylesheet};
//!
//! let sheet = Stylesheet::builder()
//!     .font_family(FontFamily::Mono)
//!     .font_attrs(["Italic", "Bold"])
//!     .build()
//!     .unwrap();
//! assert_eq!(sheet.font_name(), "fontMonoBoldItalic");
//! ```

mod font;
mod page;
mod schema;

pub use font::{font_identifier, FontAttr, FontFamily, FontSize, FONT_NAME_PREFIX, NORMAL_ATTR};
pub use page::{Measurement, Orientation, PageSetup, PageSize, Unit};
pub use schema::{BaseStyle, PageSetupBlock, StylesheetDocument, Styles};

use crate::error::Result;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Validated stylesheet configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    family: FontFamily,
    size: FontSize,
    attrs: Vec<FontAttr>,
    page: PageSetup,
}

impl Stylesheet {
    /// Start building a stylesheet from raw values.
    pub fn builder() -> StylesheetBuilder {
        StylesheetBuilder::default()
    }

    /// Create a stylesheet from already-typed values.
    pub fn new(family: FontFamily, size: FontSize, attrs: Vec<FontAttr>, page: PageSetup) -> Self {
        Self {
            family,
            size,
            attrs: font::normalize_attrs(attrs),
            page,
        }
    }

    /// Font family.
    pub fn family(&self) -> FontFamily {
        self.family
    }

    /// Font size.
    pub fn size(&self) -> FontSize {
        self.size
    }

    /// Font attributes, sorted by name.
    pub fn attrs(&self) -> &[FontAttr] {
        &self.attrs
    }

    /// Page settings.
    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    /// The rst2pdf font alias, e.g. `fontSerif` or `fontMonoBoldItalic`.
    pub fn font_name(&self) -> String {
        font_identifier(self.family, &self.attrs)
    }

    /// Build the rst2pdf stylesheet mapping.
    pub fn render(&self) -> StylesheetDocument {
        StylesheetDocument {
            page_setup: self.render_page_setup(),
            styles: Styles {
                base: BaseStyle::plain(self.font_name(), self.size.points()),
            },
        }
    }

    fn render_page_setup(&self) -> Option<PageSetupBlock> {
        if self.page.is_empty() {
            return None;
        }

        let margin = self.page.margin.as_ref().map(Measurement::render);
        Some(PageSetupBlock {
            margin_bottom: margin.clone(),
            margin_gutter: self.page.gutter.as_ref().map(Measurement::render),
            margin_left: margin.clone(),
            margin_right: margin.clone(),
            margin_top: margin,
            size: self.page.size_tag(),
            spacing_footer: self.page.footer_spacing.as_ref().map(Measurement::render),
            spacing_header: self.page.header_spacing.as_ref().map(Measurement::render),
        })
    }

    /// Serialize the rendered stylesheet as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.render())?)
    }

    /// Write the stylesheet to `directory/filename`, creating the directory
    /// if needed and replacing any existing file.
    pub fn save(&self, directory: &Path, filename: &str) -> Result<PathBuf> {
        fs::create_dir_all(directory)?;
        let path = directory.join(filename);
        let yaml = self.to_yaml()?;
        fs::write(&path, yaml)?;
        info!("wrote stylesheet {}", path.display());
        debug!("{:?}", self);
        Ok(path)
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new(
            FontFamily::default(),
            FontSize::default(),
            Vec::new(),
            PageSetup::default(),
        )
    }
}

/// Builder that collects raw (string) values and validates them all in
/// [`StylesheetBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct StylesheetBuilder {
    family: Option<String>,
    size: Option<u32>,
    attrs: Vec<String>,
    page_size: Option<String>,
    orientation: Option<String>,
    margin: Option<String>,
    gutter: Option<String>,
    header_spacing: Option<String>,
    footer_spacing: Option<String>,
}

impl StylesheetBuilder {
    /// Set the font family by name.
    pub fn font_family(mut self, family: impl ToString) -> Self {
        self.family = Some(family.to_string());
        self
    }

    /// Set the font size in points.
    pub fn font_size(mut self, points: u32) -> Self {
        self.size = Some(points);
        self
    }

    /// Add font attributes by name.
    pub fn font_attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attrs.extend(attrs.into_iter().map(Into::into));
        self
    }

    /// Set the page size by name.
    pub fn page_size(mut self, size: impl Into<String>) -> Self {
        self.page_size = Some(size.into());
        self
    }

    /// Set the orientation by name.
    pub fn orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    /// Set the margin, e.g. `2cm`.
    pub fn margin(mut self, margin: impl Into<String>) -> Self {
        self.margin = Some(margin.into());
        self
    }

    /// Set the gutter, e.g. `0.5in`.
    pub fn gutter(mut self, gutter: impl Into<String>) -> Self {
        self.gutter = Some(gutter.into());
        self
    }

    /// Set the header spacing.
    pub fn header_spacing(mut self, spacing: impl Into<String>) -> Self {
        self.header_spacing = Some(spacing.into());
        self
    }

    /// Set the footer spacing.
    pub fn footer_spacing(mut self, spacing: impl Into<String>) -> Self {
        self.footer_spacing = Some(spacing.into());
        self
    }

    /// Validate every value and build the stylesheet.
    pub fn build(self) -> Result<Stylesheet> {
        let family = match self.family {
            Some(name) => name.parse()?,
            None => FontFamily::default(),
        };
        let size = match self.size {
            Some(points) => FontSize::new(points)?,
            None => FontSize::default(),
        };
        let attrs = FontAttr::parse_list(&self.attrs)?;

        let page = PageSetup {
            size: self.page_size.as_deref().map(str::parse::<PageSize>).transpose()?,
            orientation: self.orientation.as_deref().map(str::parse::<Orientation>).transpose()?,
            margin: parse_measurement(self.margin)?,
            gutter: parse_measurement(self.gutter)?,
            header_spacing: parse_measurement(self.header_spacing)?,
            footer_spacing: parse_measurement(self.footer_spacing)?,
        };

        Ok(Stylesheet {
            family,
            size,
            attrs,
            page,
        })
    }
}

fn parse_measurement(value: Option<String>) -> Result<Option<Measurement>> {
    value.as_deref().map(Measurement::parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builder_defaults() {
        let sheet = Stylesheet::builder().build().unwrap();
        assert_eq!(sheet, Stylesheet::default());
        assert_eq!(sheet.font_name(), "fontSerif");
        assert_eq!(sheet.size().points(), 12);
        assert!(sheet.page().is_empty());
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        let err = Stylesheet::builder()
            .font_family("Serif")
            .font_attrs(["Bold", "Blink"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFontAttr(ref a) if a == "Blink"));
        assert!(err.is_config_error());

        let err = Stylesheet::builder().margin("1.5pt").build().unwrap_err();
        assert!(matches!(err, Error::InvalidMeasurement(_)));

        let err = Stylesheet::builder().font_family("Fantasy").build().unwrap_err();
        assert!(matches!(err, Error::InvalidFontFamily(_)));
    }

    #[test]
    fn test_normal_attr_is_ignored() {
        let sheet = Stylesheet::builder()
            .font_family("Sans")
            .font_attrs(["Normal"])
            .build()
            .unwrap();
        assert!(sheet.attrs().is_empty());
        assert_eq!(sheet.font_name(), "fontSans");
    }

    #[test]
    fn test_render_base_style() {
        let sheet = Stylesheet::builder()
            .font_family("Mono")
            .font_size(10)
            .font_attrs(["Italic", "Bold"])
            .build()
            .unwrap();
        let doc = sheet.render();

        assert!(doc.page_setup.is_none());
        assert_eq!(doc.styles.base.font_name, "fontMonoBoldItalic");
        assert_eq!(doc.styles.base.font_size, 10);
        assert_eq!(doc.styles.base.leading, 10);
        assert_eq!(doc.styles.base.alignment, "LEFT");
        assert_eq!(doc.styles.base.text_color, "black");
    }

    #[test]
    fn test_render_page_setup() {
        let sheet = Stylesheet::builder()
            .page_size("letter")
            .orientation("LANDSCAPE")
            .margin("2cm")
            .gutter("0.50in")
            .header_spacing("1cm")
            .build()
            .unwrap();
        let page = sheet.render().page_setup.unwrap();

        assert_eq!(page.size.as_deref(), Some("Letter-landscape"));
        assert_eq!(page.margin_top.as_deref(), Some("2cm"));
        assert_eq!(page.margin_bottom.as_deref(), Some("2cm"));
        assert_eq!(page.margin_left.as_deref(), Some("2cm"));
        assert_eq!(page.margin_right.as_deref(), Some("2cm"));
        assert_eq!(page.margin_gutter.as_deref(), Some("0.5in"));
        assert_eq!(page.spacing_header.as_deref(), Some("1cm"));
        assert_eq!(page.spacing_footer, None);
    }

    #[test]
    fn test_yaml_layout() {
        let yaml = Stylesheet::default().to_yaml().unwrap();
        let expected = "\
styles:
  base:
    alignment: LEFT
    allowOrphans: false
    backColor: null
    borderColor: null
    borderPadding: 0
    borderRadius: null
    borderWidth: 0
    commands: []
    firstLineIndent: 0
    fontName: fontSerif
    fontSize: 12
    hyphenation: false
    leading: 12
    leftIndent: 0
    parent: null
    rightIndent: 0
    spaceAfter: 0
    spaceBefore: 0
    strike: false
    textColor: black
    underline: false
    wordwrap: null
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_yaml_page_setup_comes_first() {
        let yaml = Stylesheet::builder()
            .page_size("A5")
            .build()
            .unwrap()
            .to_yaml()
            .unwrap();
        assert!(yaml.starts_with("pageSetup:\n  size: A5\nstyles:\n"));
    }

    #[test]
    fn test_save_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("styles");

        let first = Stylesheet::builder().font_size(14).build().unwrap();
        let path = first.save(&target, "sheet.yml").unwrap();
        assert_eq!(path, target.join("sheet.yml"));

        let second = Stylesheet::builder().font_family("Mono").build().unwrap();
        second.save(&target, "sheet.yml").unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let doc: StylesheetDocument = serde_yaml::from_str(&written).unwrap();
        assert_eq!(doc, second.render());
    }
}

//! Font family, size, and style attributes.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Prefix rst2pdf uses for its internal font aliases.
pub const FONT_NAME_PREFIX: &str = "font";

/// Attribute value accepted on the command line and ignored.
pub const NORMAL_ATTR: &str = "Normal";

/// Font family understood by rst2pdf's base stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// Monospaced
    Mono,
    /// Sans-serif (Helvetica-like)
    Sans,
    /// Serif (Times-like)
    #[default]
    Serif,
}

impl FontFamily {
    /// All supported families, in name order.
    pub const ALL: [FontFamily; 3] = [FontFamily::Mono, FontFamily::Sans, FontFamily::Serif];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Mono => "Mono",
            FontFamily::Sans => "Sans",
            FontFamily::Serif => "Serif",
        }
    }
}

impl FromStr for FontFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FontFamily::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::InvalidFontFamily(s.to_string()))
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font style attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontAttr {
    /// Bold weight
    Bold,
    /// Italic style
    Italic,
    /// Oblique style
    Oblique,
}

impl FontAttr {
    /// All supported attributes, in name order.
    pub const ALL: [FontAttr; 3] = [FontAttr::Bold, FontAttr::Italic, FontAttr::Oblique];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontAttr::Bold => "Bold",
            FontAttr::Italic => "Italic",
            FontAttr::Oblique => "Oblique",
        }
    }

    /// Parse a list of attribute names into a sorted, deduplicated set.
    ///
    /// `Normal` is accepted and dropped. The result is sorted by attribute
    /// name, which is the order rst2pdf expects in its font aliases.
    pub fn parse_list<I, S>(names: I) -> Result<Vec<FontAttr>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut attrs = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name == NORMAL_ATTR {
                continue;
            }
            attrs.push(name.parse::<FontAttr>()?);
        }
        Ok(normalize_attrs(attrs))
    }
}

/// Sort attributes by name and drop duplicates.
pub(crate) fn normalize_attrs(mut attrs: Vec<FontAttr>) -> Vec<FontAttr> {
    attrs.sort_by_key(|a| a.as_str());
    attrs.dedup();
    attrs
}

impl FromStr for FontAttr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FontAttr::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::InvalidFontAttr(s.to_string()))
    }
}

impl fmt::Display for FontAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font size in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(u32);

impl FontSize {
    /// Smallest accepted size.
    pub const MIN: u32 = 6;
    /// Largest accepted size.
    pub const MAX: u32 = 72;

    /// Create a font size, rejecting values outside `MIN..=MAX`.
    pub fn new(points: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&points) {
            Ok(Self(points))
        } else {
            Err(Error::InvalidFontSize(points, Self::MIN, Self::MAX))
        }
    }

    /// Size in points.
    pub fn points(&self) -> u32 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(12)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build the rst2pdf font alias, e.g. `fontMonoBoldItalic`.
///
/// `attrs` must already be sorted by name.
pub fn font_identifier(family: FontFamily, attrs: &[FontAttr]) -> String {
    let mut name = String::from(FONT_NAME_PREFIX);
    name.push_str(family.as_str());
    for attr in attrs {
        name.push_str(attr.as_str());
    }
    name
}

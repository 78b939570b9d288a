//! Page size, orientation, and length measurements.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Paper size known to reportlab, which rst2pdf uses for page setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    /// ISO A3
    A3,
    /// ISO A4
    #[default]
    A4,
    /// ISO A5
    A5,
    /// ISO B4
    B4,
    /// ISO B5
    B5,
    /// US Letter
    Letter,
    /// US Legal
    Legal,
    /// US Tabloid (11x17 in)
    Tabloid,
}

impl PageSize {
    /// All supported page sizes.
    pub const ALL: [PageSize; 8] = [
        PageSize::A3,
        PageSize::A4,
        PageSize::A5,
        PageSize::B4,
        PageSize::B5,
        PageSize::Letter,
        PageSize::Legal,
        PageSize::Tabloid,
    ];

    /// Canonical name as written into the stylesheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::B4 => "B4",
            PageSize::B5 => "B5",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::Tabloid => "Tabloid",
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageSize::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidPageSize(s.to_string()))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Taller than wide
    #[default]
    Portrait,
    /// Wider than tall
    Landscape,
}

impl Orientation {
    /// Lowercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(Error::InvalidOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Centimeters
    Centimeters,
    /// Inches
    Inches,
}

impl Unit {
    /// Abbreviation rst2pdf accepts.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Unit::Centimeters => "cm",
            Unit::Inches => "in",
        }
    }
}

fn measurement_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(\d+(?:\.\d+)?)(cm|in)$").unwrap())
}

/// A length such as `2cm` or `0.75in`.
///
/// The number is kept as canonical decimal text, so any length the grammar
/// accepts renders back exactly, however many digits it has.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    number: String,
    unit: Unit,
}

impl Measurement {
    /// Create a measurement from a non-negative finite value.
    pub fn new(value: f64, unit: Unit) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            // f64 Display never uses exponent notation.
            Ok(Self {
                number: canonical_number(&value.to_string()),
                unit,
            })
        } else {
            Err(Error::InvalidMeasurement(format!("{}{}", value, unit.abbrev())))
        }
    }

    /// Parse `<number>[.<decimal>]<unit>`, unit `cm` or `in` in any case.
    pub fn parse(s: &str) -> Result<Self> {
        let caps = measurement_regex()
            .captures(s)
            .ok_or_else(|| Error::InvalidMeasurement(s.to_string()))?;

        let unit = if caps[2].eq_ignore_ascii_case("cm") {
            Unit::Centimeters
        } else {
            Unit::Inches
        };

        Ok(Self {
            number: canonical_number(&caps[1]),
            unit,
        })
    }

    /// Numeric value. Lengths beyond the `f64` range are infinite.
    pub fn value(&self) -> f64 {
        self.number.parse().unwrap_or(f64::INFINITY)
    }

    /// Unit.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Render as rst2pdf expects, e.g. `2.5cm`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Strip leading zeros of the integer part and trailing zeros of the
/// fraction: `007.500` becomes `7.5`, `2.0` becomes `2`.
fn canonical_number(digits: &str) -> String {
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let int = int.trim_start_matches('0');
    let int = if int.is_empty() { "0" } else { int };
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        int.to_string()
    } else {
        format!("{}.{}", int, frac)
    }
}

impl FromStr for Measurement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.unit.abbrev())
    }
}

/// Page layout settings. Every field is optional; unset fields are left to
/// rst2pdf's defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageSetup {
    /// Paper size
    pub size: Option<PageSize>,

    /// Orientation
    pub orientation: Option<Orientation>,

    /// Margin applied to all four sides
    pub margin: Option<Measurement>,

    /// Extra inner margin for bound documents
    pub gutter: Option<Measurement>,

    /// Space between the header and the body
    pub header_spacing: Option<Measurement>,

    /// Space between the body and the footer
    pub footer_spacing: Option<Measurement>,
}

impl PageSetup {
    /// Whether no page option is set.
    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.orientation.is_none()
            && self.margin.is_none()
            && self.gutter.is_none()
            && self.header_spacing.is_none()
            && self.footer_spacing.is_none()
    }

    /// The `size` value: page size, suffixed with `-landscape` when needed.
    ///
    /// An orientation without a size applies to the default A4 page.
    pub fn size_tag(&self) -> Option<String> {
        match (self.size, self.orientation) {
            (None, None) => None,
            (size, Some(Orientation::Landscape)) => Some(format!(
                "{}-{}",
                size.unwrap_or_default(),
                Orientation::Landscape
            )),
            (size, _) => Some(size.unwrap_or_default().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_parse() {
        let m = Measurement::parse("2cm").unwrap();
        assert_eq!(m.value(), 2.0);
        assert_eq!(m.unit(), Unit::Centimeters);

        let m = Measurement::parse("0.75IN").unwrap();
        assert_eq!(m.value(), 0.75);
        assert_eq!(m.unit(), Unit::Inches);
        assert_eq!(m.render(), "0.75in");
    }

    #[test]
    fn test_measurement_rejects_bad_grammar() {
        for bad in ["", "2", "cm", "2 cm", "2mm", "-1cm", ".5in", "5.in", "1.2.3cm", "2cmx", "1e3cm"] {
            assert!(
                matches!(Measurement::parse(bad), Err(Error::InvalidMeasurement(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_measurement_parse_is_idempotent() {
        for s in ["2cm", "2.50cm", "0.1in", "10In", "007.000cM", "123456789.987654321in"] {
            let first = Measurement::parse(s).unwrap();
            let again = Measurement::parse(&first.render()).unwrap();
            assert_eq!(first, again, "round trip of {:?}", s);
        }
    }

    #[test]
    fn test_measurement_keeps_long_numbers() {
        let digits = "9".repeat(400);
        let m = Measurement::parse(&format!("{}cm", digits)).unwrap();
        assert_eq!(m.render(), format!("{}cm", digits));
        assert!(m.value().is_infinite());

        let m = Measurement::parse("123456789.987654321in").unwrap();
        assert_eq!(m.render(), "123456789.987654321in");
    }

    #[test]
    fn test_measurement_canonical_form() {
        assert_eq!(Measurement::parse("007.000cM").unwrap().render(), "7cm");
        assert_eq!(Measurement::parse("0.50in").unwrap().render(), "0.5in");
        assert_eq!(Measurement::parse("00.25cm").unwrap().render(), "0.25cm");
        assert_eq!(Measurement::parse("2.50cm").unwrap(), Measurement::parse("2.5cm").unwrap());
        assert_eq!(Measurement::new(2.5, Unit::Centimeters).unwrap().render(), "2.5cm");
        assert!(Measurement::new(f64::NAN, Unit::Inches).is_err());
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("a4".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!("LETTER".parse::<PageSize>().unwrap(), PageSize::Letter);
        assert!(matches!("A9".parse::<PageSize>(), Err(Error::InvalidPageSize(_))));
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("Landscape".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert!("sideways".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_size_tag() {
        let mut setup = PageSetup::default();
        assert!(setup.is_empty());
        assert_eq!(setup.size_tag(), None);

        setup.size = Some(PageSize::Letter);
        assert_eq!(setup.size_tag().as_deref(), Some("Letter"));

        setup.orientation = Some(Orientation::Portrait);
        assert_eq!(setup.size_tag().as_deref(), Some("Letter"));

        setup.orientation = Some(Orientation::Landscape);
        assert_eq!(setup.size_tag().as_deref(), Some("Letter-landscape"));

        setup.size = None;
        assert_eq!(setup.size_tag().as_deref(), Some("A4-landscape"));
    }
}

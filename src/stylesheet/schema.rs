//! Serializable rst2pdf stylesheet document.
//!
//! Field order follows the alphabetical key order of the stylesheets the
//! tool has always produced, so regenerated files diff cleanly.

use serde::{Deserialize, Serialize};

/// Top-level stylesheet mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylesheetDocument {
    /// Page layout block, present only when a page option is set
    #[serde(rename = "pageSetup", default, skip_serializing_if = "Option::is_none")]
    pub page_setup: Option<PageSetupBlock>,

    /// Paragraph styles
    pub styles: Styles,
}

/// The `styles` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Styles {
    /// The `base` style every other style inherits from
    pub base: BaseStyle,
}

/// The `styles.base` paragraph style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStyle {
    pub alignment: String,
    pub allow_orphans: bool,
    pub back_color: Option<String>,
    pub border_color: Option<String>,
    pub border_padding: u32,
    pub border_radius: Option<u32>,
    pub border_width: u32,
    pub commands: Vec<String>,
    pub first_line_indent: u32,
    pub font_name: String,
    pub font_size: u32,
    pub hyphenation: bool,
    pub leading: u32,
    pub left_indent: u32,
    pub parent: Option<String>,
    pub right_indent: u32,
    pub space_after: u32,
    pub space_before: u32,
    pub strike: bool,
    pub text_color: String,
    pub underline: bool,
    pub wordwrap: Option<String>,
}

impl BaseStyle {
    /// Left-aligned black text with no borders, indents, or spacing.
    pub fn plain(font_name: String, font_size: u32) -> Self {
        Self {
            alignment: "LEFT".to_string(),
            allow_orphans: false,
            back_color: None,
            border_color: None,
            border_padding: 0,
            border_radius: None,
            border_width: 0,
            commands: Vec::new(),
            first_line_indent: 0,
            font_name,
            font_size,
            hyphenation: false,
            leading: font_size,
            left_indent: 0,
            parent: None,
            right_indent: 0,
            space_after: 0,
            space_before: 0,
            strike: false,
            text_color: "black".to_string(),
            underline: false,
            wordwrap: None,
        }
    }
}

/// The `pageSetup` mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSetupBlock {
    #[serde(rename = "margin-bottom", default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,

    #[serde(rename = "margin-gutter", default, skip_serializing_if = "Option::is_none")]
    pub margin_gutter: Option<String>,

    #[serde(rename = "margin-left", default, skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<String>,

    #[serde(rename = "margin-right", default, skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<String>,

    #[serde(rename = "margin-top", default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(rename = "spacing-footer", default, skip_serializing_if = "Option::is_none")]
    pub spacing_footer: Option<String>,

    #[serde(rename = "spacing-header", default, skip_serializing_if = "Option::is_none")]
    pub spacing_header: Option<String>,
}

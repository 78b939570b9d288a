//! Integration tests for stylesheet files as rst2pdf reads them.

use std::fs;

use rst2pdf_serve::{write_stylesheet, JobPlan, Settings, Stylesheet};
use serde_yaml::Value;

fn load(path: &std::path::Path) -> Value {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_default_report() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new().with_stylesheet_dir(dir.path().join("sheets"));

    let sheet = Stylesheet::builder()
        .font_family("Serif")
        .font_size(12)
        .font_attrs(Vec::<String>::new())
        .build()
        .unwrap();
    let path = write_stylesheet(&sheet, &settings).unwrap();
    assert_eq!(path, settings.stylesheet_path());

    let doc = load(&path);
    let base = &doc["styles"]["base"];
    assert_eq!(base["fontName"].as_str(), Some("fontSerif"));
    assert_eq!(base["fontSize"].as_u64(), Some(12));
    assert!(doc.get("pageSetup").is_none());

    let plan = JobPlan::from_path("report.rst").unwrap();
    assert_eq!(plan.output_filename, "report.pdf");
}

#[test]
fn test_mono_bold_italic_with_page_setup() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new()
        .with_stylesheet_dir(dir.path())
        .with_stylesheet_filename("mono.yml");

    let sheet = Stylesheet::builder()
        .font_family("Mono")
        .font_attrs(["Bold", "Italic"])
        .page_size("letter")
        .orientation("Landscape")
        .margin("0.75in")
        .build()
        .unwrap();
    let doc = load(&write_stylesheet(&sheet, &settings).unwrap());

    assert_eq!(
        doc["styles"]["base"]["fontName"].as_str(),
        Some("fontMonoBoldItalic")
    );
    let page = &doc["pageSetup"];
    assert_eq!(page["size"].as_str(), Some("Letter-landscape"));
    for side in ["margin-top", "margin-bottom", "margin-left", "margin-right"] {
        assert_eq!(page[side].as_str(), Some("0.75in"), "{side}");
    }
}

#[test]
fn test_rewriting_replaces_previous_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new().with_stylesheet_dir(dir.path());

    let first = Stylesheet::builder().margin("2cm").build().unwrap();
    write_stylesheet(&first, &settings).unwrap();
    let second = Stylesheet::builder().font_family("Sans").build().unwrap();
    let path = write_stylesheet(&second, &settings).unwrap();

    let doc = load(&path);
    assert_eq!(doc["styles"]["base"]["fontName"].as_str(), Some("fontSans"));
    assert!(doc.get("pageSetup").is_none());
}

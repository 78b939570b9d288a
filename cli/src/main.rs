//! rst2pdf-serve CLI - render ReStructuredText to PDF and serve it locally

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use semver::{BuildMetadata, Version};

use rst2pdf_serve::config::{self, Settings};
use rst2pdf_serve::serve::{self, ServeOptions, ServeOutcome};
use rst2pdf_serve::{
    check_exists, net, snippet, write_stylesheet, ConvertOutcome, FontFamily, JobPlan, Rst2Pdf,
    Stylesheet,
};

#[derive(Parser)]
#[command(name = "rst2pdf-serve")]
#[command(about = "Render ReStructuredText to PDF with rst2pdf and serve it on the local network", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Source document (.rst is converted, anything else is served as-is)
    #[arg(short = 'f', long, value_name = "FILE", required_unless_present_any = ["today", "version"])]
    start_filepath: Option<PathBuf>,

    /// Start a webserver on this port (0 disables serving)
    #[arg(short = 'w', long, value_name = "PORT", default_value_t = 0)]
    webserver_port: u16,

    /// rst2pdf stylesheet directory [default: ~/.rst2pdf/]
    #[arg(short = 'd', long, value_name = "DIR")]
    stylesheet_directory: Option<PathBuf>,

    /// rst2pdf stylesheet filename
    #[arg(short = 'e', long, value_name = "NAME", default_value = config::DEFAULT_STYLESHEET_FILENAME)]
    stylesheet_filename: String,

    /// Font family
    #[arg(short = 'n', long, value_enum, default_value_t = FontName::Serif)]
    font_name: FontName,

    /// Font size in points (6-72)
    #[arg(short = 's', long, value_name = "PT", default_value_t = 12)]
    font_size: u32,

    /// Font attribute; repeat for several
    #[arg(short = 'a', long, value_enum, value_name = "ATTR")]
    font_attrs: Vec<FontAttrName>,

    /// Page size (A3, A4, A5, B4, B5, Letter, Legal, Tabloid)
    #[arg(long, value_name = "SIZE")]
    page_size: Option<String>,

    /// Page orientation (portrait or landscape)
    #[arg(long, value_name = "ORIENTATION")]
    orientation: Option<String>,

    /// Page margin on all sides (e.g. 2cm, 0.75in)
    #[arg(long, value_name = "LENGTH")]
    margin: Option<String>,

    /// Gutter margin (e.g. 0.5in)
    #[arg(long, value_name = "LENGTH")]
    gutter: Option<String>,

    /// Space between header and body
    #[arg(long, value_name = "LENGTH")]
    header_spacing: Option<String>,

    /// Space between body and footer
    #[arg(long, value_name = "LENGTH")]
    footer_spacing: Option<String>,

    /// Encoding of the terminal, used to read interface listings
    #[arg(short = 't', long, value_name = "LABEL", default_value = config::DEFAULT_TERMINAL_ENCODING)]
    terminal_encoding: String,

    /// Write today's date as an includable snippet and print the include line
    #[arg(long)]
    today: bool,

    /// Converter program
    #[arg(long, value_name = "PROG", env = "RST2PDF", default_value = config::DEFAULT_CONVERTER)]
    converter: String,

    /// File server program
    #[arg(long, value_name = "PROG", default_value = config::DEFAULT_SERVER)]
    server_binary: String,

    /// Print version and exit
    #[arg(short = 'V', long)]
    version: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FontName {
    /// Monospaced
    #[value(name = "Mono")]
    Mono,
    /// Sans-serif
    #[value(name = "Sans")]
    Sans,
    /// Serif
    #[value(name = "Serif")]
    Serif,
}

impl From<FontName> for FontFamily {
    fn from(name: FontName) -> Self {
        match name {
            FontName::Mono => FontFamily::Mono,
            FontName::Sans => FontFamily::Sans,
            FontName::Serif => FontFamily::Serif,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FontAttrName {
    #[value(name = "Bold")]
    Bold,
    #[value(name = "Italic")]
    Italic,
    #[value(name = "Oblique")]
    Oblique,
    /// No attribute (ignored)
    #[value(name = "Normal")]
    Normal,
}

impl FontAttrName {
    fn as_str(&self) -> &'static str {
        match self {
            FontAttrName::Bold => "Bold",
            FontAttrName::Italic => "Italic",
            FontAttrName::Oblique => "Oblique",
            FontAttrName::Normal => "Normal",
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.version {
        cmd_version();
        return Ok(());
    }

    let settings = build_settings(&cli);
    let stylesheet = build_stylesheet(&cli)?;

    if cli.today {
        cmd_today(&settings)?;
    }

    match cli.start_filepath {
        Some(ref input) => cmd_convert(input, &settings, &stylesheet, cli.webserver_port),
        None => Ok(()),
    }
}

fn build_settings(cli: &Cli) -> Settings {
    let mut settings = Settings::new()
        .with_stylesheet_filename(cli.stylesheet_filename.clone())
        .with_converter(cli.converter.clone())
        .with_server(cli.server_binary.clone())
        .with_terminal_encoding(cli.terminal_encoding.clone());
    if let Some(ref dir) = cli.stylesheet_directory {
        settings = settings.with_stylesheet_dir(dir.clone());
    }
    settings
}

fn build_stylesheet(cli: &Cli) -> rst2pdf_serve::Result<Stylesheet> {
    let mut builder = Stylesheet::builder()
        .font_family(FontFamily::from(cli.font_name))
        .font_size(cli.font_size)
        .font_attrs(cli.font_attrs.iter().map(|a| a.as_str()));

    if let Some(ref size) = cli.page_size {
        builder = builder.page_size(size.as_str());
    }
    if let Some(ref orientation) = cli.orientation {
        builder = builder.orientation(orientation.as_str());
    }
    if let Some(ref margin) = cli.margin {
        builder = builder.margin(margin.as_str());
    }
    if let Some(ref gutter) = cli.gutter {
        builder = builder.gutter(gutter.as_str());
    }
    if let Some(ref spacing) = cli.header_spacing {
        builder = builder.header_spacing(spacing.as_str());
    }
    if let Some(ref spacing) = cli.footer_spacing {
        builder = builder.footer_spacing(spacing.as_str());
    }

    builder.build()
}

fn cmd_convert(
    input: &Path,
    settings: &Settings,
    stylesheet: &Stylesheet,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let plan = JobPlan::from_path(input)?;
    check_exists(&plan.source)?;

    let stylesheet_path = write_stylesheet(stylesheet, settings)?;
    println!(
        "{} {} ({})",
        "Stylesheet".green(),
        stylesheet_path.display(),
        stylesheet.font_name().dimmed()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Converting {}...", plan.source_filename));

    let outcome = Rst2Pdf::from_settings(settings).convert(
        &plan,
        &settings.stylesheet_dir,
        &settings.stylesheet_filename,
    );
    pb.finish_and_clear();

    match outcome? {
        ConvertOutcome::Converted(path) => {
            println!("{} {}", "Saved to".green(), path.display());
        }
        ConvertOutcome::Skipped => {
            println!(
                "{} '{}' is not a .rst file; serving it unchanged",
                "Note:".yellow().bold(),
                plan.source_filename
            );
        }
    }

    if port > 0 {
        cmd_serve(&plan, settings, port)?;
    }

    Ok(())
}

fn cmd_serve(plan: &JobPlan, settings: &Settings, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addresses = net::local_addresses(&settings.terminal_encoding)?;
    let options = ServeOptions::from_settings(settings, port);

    match serve::serve(plan, &addresses, &options)? {
        ServeOutcome::Exited => println!("{}", "Webserver stopped.".dimmed()),
        ServeOutcome::Interrupted => println!("{}", "Webserver stopped by user.".dimmed()),
    }

    Ok(())
}

fn cmd_today(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let path = snippet::write_today_snippet(settings, snippet::today())?;
    println!("{}", snippet::include_directive(&path));
    Ok(())
}

/// Version of this build: the package version, with `debug` build
/// metadata on unoptimized builds.
fn computed_version() -> Version {
    let mut version = Version::new(
        env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
        env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
        env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
    );
    if cfg!(debug_assertions) {
        version.build = BuildMetadata::new("debug").unwrap_or(BuildMetadata::EMPTY);
    }
    version
}

fn cmd_version() {
    println!("{} {}", "rst2pdf-serve".cyan().bold(), computed_version());
}

//! rst2pdf process runner.

use crate::config::{resolve_program, Settings};
use crate::error::{Error, Result};
use log::{debug, error, info, warn};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use super::{check_exists, ConvertOutcome, JobPlan};

/// Runs the external `rst2pdf` converter.
#[derive(Debug, Clone)]
pub struct Rst2Pdf {
    program: String,
}

impl Rst2Pdf {
    /// Create a runner for the given program name or path.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Create a runner for the converter named in `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.converter.clone())
    }

    /// Program name or path.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the converter for `plan`.
    pub fn args(&self, plan: &JobPlan, stylesheet_dir: &Path, stylesheet_file: &str) -> Vec<OsString> {
        let mut stylesheet_path = OsString::from("--stylesheet-path=");
        stylesheet_path.push(stylesheet_dir);

        vec![
            stylesheet_path,
            OsString::from(format!("--stylesheets={}", stylesheet_file)),
            plan.source.clone().into_os_string(),
            OsString::from("-o"),
            plan.output.clone().into_os_string(),
        ]
    }

    /// Convert the plan's source to PDF.
    ///
    /// The source document and the stylesheet must exist before the
    /// converter is started. Any nonzero exit is a failure, and so is a
    /// successful exit that leaves no output file behind.
    pub fn convert(
        &self,
        plan: &JobPlan,
        stylesheet_dir: &Path,
        stylesheet_file: &str,
    ) -> Result<ConvertOutcome> {
        if !plan.needs_conversion() {
            warn!(
                "The start filename suffix is not 'rst'. No conversion is implemented for '{}'.",
                plan.suffix
            );
            return Ok(ConvertOutcome::Skipped);
        }

        check_exists(&plan.source)?;
        check_exists(stylesheet_dir.join(stylesheet_file))?;

        let program = resolve_program(&self.program)?;

        // A PDF left by an earlier run must not pass for fresh output.
        match fs::remove_file(&plan.output) {
            Ok(()) => debug!("removed previous {}", plan.output.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let args = self.args(plan, stylesheet_dir, stylesheet_file);
        info!(
            "{} {}",
            program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            error!("rst2pdf {}: {}", output.status, stderr);
            return Err(Error::ConverterFailed {
                status: output.status.to_string(),
                stderr,
            });
        }
        debug!(
            "rst2pdf {}: stdout={:?} stderr={:?}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            stderr
        );

        match check_exists(&plan.output) {
            Ok(path) => Ok(ConvertOutcome::Converted(path)),
            Err(Error::FileNotFound(path)) => Err(Error::MissingOutput(path)),
            Err(e) => Err(e),
        }
    }
}

impl Default for Rst2Pdf {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_args() {
        let plan = JobPlan::from_path("docs/report.rst").unwrap();
        let args = Rst2Pdf::default().args(&plan, Path::new("/home/me/.rst2pdf"), "sheet.yml");
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(
            args,
            vec![
                "--stylesheet-path=/home/me/.rst2pdf",
                "--stylesheets=sheet.yml",
                "docs/report.rst",
                "-o",
                "docs/report.pdf",
            ]
        );
    }

    #[test]
    fn test_skip_non_rst() {
        let plan = JobPlan::from_path("notes.txt").unwrap();
        let outcome = Rst2Pdf::new("never-run")
            .convert(&plan, &PathBuf::from("/nonexistent"), "x.yml")
            .unwrap();
        assert_eq!(outcome, ConvertOutcome::Skipped);
    }

    #[test]
    fn test_missing_source_reported_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let plan = JobPlan::from_path(dir.path().join("missing.rst")).unwrap();

        let err = Rst2Pdf::new("never-run")
            .convert(&plan, dir.path(), "x.yml")
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound(ref p) if p.ends_with("missing.rst")));
    }

    #[test]
    fn test_missing_stylesheet_reported_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.rst");
        std::fs::write(&source, "Hello\n").unwrap();
        let plan = JobPlan::from_path(&source).unwrap();

        let err = Rst2Pdf::new("never-run")
            .convert(&plan, dir.path(), "absent.yml")
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound(ref p) if p.ends_with("absent.yml")));
    }
}

//! Local file server launcher.
//!
//! Stages the source and converted documents in a temporary directory,
//! prints the URLs they can be reached at, and runs the external file server
//! on that directory until it exits or the user presses Ctrl-C. The
//! temporary directory is removed on every path out of [`serve`].

use crate::config::{resolve_program, Settings};
use crate::convert::{check_exists, JobPlan};
use crate::error::{Error, Result};
use crate::net::{is_loopback, validate_addresses};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fs;
use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long to wait for our own SIGINT after the server died of one.
const INTERRUPT_GRACE: Duration = Duration::from_millis(250);

/// Options for the file server.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// TCP port to serve on (must be nonzero)
    pub port: u16,

    /// File server program name or path
    pub server: String,

    /// A server exiting sooner than this failed to bind
    pub min_uptime: Duration,
}

impl ServeOptions {
    /// Options for `port` with the default server program.
    pub fn new(port: u16) -> Self {
        Self::from_settings(&Settings::default(), port)
    }

    /// Options for `port` taking the server program from `settings`.
    pub fn from_settings(settings: &Settings, port: u16) -> Self {
        Self {
            port,
            server: settings.server.clone(),
            min_uptime: settings.min_server_uptime,
        }
    }

    /// Set the server program.
    pub fn with_server(mut self, program: impl Into<String>) -> Self {
        self.server = program.into();
        self
    }

    /// Set the minimum uptime.
    pub fn with_min_uptime(mut self, uptime: Duration) -> Self {
        self.min_uptime = uptime;
        self
    }
}

/// How a serving session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// The server exited on its own with status 0
    Exited,
    /// The user pressed Ctrl-C and the server was stopped
    Interrupted,
}

/// URLs for every non-loopback address.
pub fn access_urls<S: AsRef<str>>(addresses: &[S], port: u16) -> Vec<String> {
    addresses
        .iter()
        .map(AsRef::as_ref)
        .filter(|addr| !is_loopback(addr))
        .map(|addr| {
            if addr.contains(':') {
                format!("http://[{}]:{}/", addr, port)
            } else {
                format!("http://{}:{}/", addr, port)
            }
        })
        .collect()
}

/// Write the access URLs, one `Local URL ...` line each.
pub fn write_access_urls<W: Write, S: AsRef<str>>(
    out: &mut W,
    addresses: &[S],
    port: u16,
) -> io::Result<()> {
    writeln!(out)?;
    for url in access_urls(addresses, port) {
        writeln!(out, "Local URL {}", url)?;
    }
    out.flush()
}

/// Arguments for the file server.
pub fn server_args(port: u16, directory: &Path) -> Vec<OsString> {
    vec![
        OsString::from("--webserverPort"),
        OsString::from(port.to_string()),
        OsString::from("--webserverDirectory"),
        directory.as_os_str().to_os_string(),
    ]
}

/// Copy the plan's source and output documents into `directory`.
pub fn stage_files(plan: &JobPlan, directory: &Path) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(2);

    let source = check_exists(&plan.source)?;
    let target = directory.join(&plan.source_filename);
    debug!("copy {} {}", source.display(), target.display());
    fs::copy(&source, &target)?;
    staged.push(target);

    if plan.output != plan.source {
        let output = check_exists(&plan.output)?;
        let target = directory.join(&plan.output_filename);
        debug!("copy {} {}", output.display(), target.display());
        fs::copy(&output, &target)?;
        staged.push(target);
    }

    Ok(staged)
}

/// Serve the plan's files, printing URLs to stdout.
pub fn serve<S: AsRef<str>>(
    plan: &JobPlan,
    addresses: &[S],
    options: &ServeOptions,
) -> Result<ServeOutcome> {
    serve_to(&mut io::stdout(), plan, addresses, options)
}

/// Serve the plan's files, printing URLs to `out`.
pub fn serve_to<W: Write, S: AsRef<str>>(
    out: &mut W,
    plan: &JobPlan,
    addresses: &[S],
    options: &ServeOptions,
) -> Result<ServeOutcome> {
    if options.port == 0 {
        return Err(Error::InvalidPort);
    }
    validate_addresses(addresses)?;
    let program = resolve_program(&options.server)?;

    let staging = tempfile::Builder::new()
        .prefix("rst2pdf-serve-")
        .tempdir()?;
    info!("staging files in {}", staging.path().display());

    stage_files(plan, staging.path())?;
    write_access_urls(out, addresses, options.port)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(supervise(
        &program,
        server_args(options.port, staging.path()),
        options.min_uptime,
    ));

    if let Ok(ServeOutcome::Interrupted) = outcome {
        writeln!(out, "    Webserver interrupted by KeyboardInterrupt.")?;
    }

    let staged_path = staging.path().to_path_buf();
    if let Err(e) = staging.close() {
        warn!("failed to remove {}: {}", staged_path.display(), e);
    }

    outcome
}

/// Run the server and wait for it to exit or for Ctrl-C.
async fn supervise(program: &Path, args: Vec<OsString>, min_uptime: Duration) -> Result<ServeOutcome> {
    let interrupt = interrupt_listener()?;
    tokio::pin!(interrupt);

    info!(
        "{} {}",
        program.display(),
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );
    let started = Instant::now();
    let mut child = tokio::process::Command::new(program)
        .args(&args)
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Error::Spawn {
            program: program.display().to_string(),
            source,
        })?;

    // Ctrl-C in a terminal reaches the child too, so both branches can be
    // ready at once. The interrupt wins.
    let waited = tokio::select! {
        biased;
        _ = &mut interrupt => None,
        status = child.wait() => Some(status),
    };

    let status = match waited {
        Some(status) => status?,
        None => {
            info!("interrupted; stopping file server");
            if let Err(e) = child.kill().await {
                debug!("file server already gone: {}", e);
            }
            return Ok(ServeOutcome::Interrupted);
        }
    };
    if killed_by_interrupt(&status) {
        // Our own SIGINT may still be in flight; consume it here.
        let _ = tokio::time::timeout(INTERRUPT_GRACE, interrupt.as_mut()).await;
        info!("interrupted; file server ended with {}", status);
        return Ok(ServeOutcome::Interrupted);
    }
    if interrupt_pending(&mut interrupt).await {
        info!("interrupted; file server ended with {}", status);
        return Ok(ServeOutcome::Interrupted);
    }

    let elapsed = started.elapsed();
    if !status.success() {
        return Err(Error::ServerFailed(status.to_string()));
    }
    if elapsed < min_uptime {
        return Err(Error::ServerExitedEarly(elapsed));
    }
    info!("file server exited after {:?}", elapsed);
    Ok(ServeOutcome::Exited)
}

/// Whether the interrupt has already fired, without waiting for it.
async fn interrupt_pending<F: Future<Output = ()>>(interrupt: &mut std::pin::Pin<&mut F>) -> bool {
    tokio::select! {
        biased;
        _ = interrupt.as_mut() => true,
        _ = std::future::ready(()) => false,
    }
}

#[cfg(unix)]
fn killed_by_interrupt(status: &std::process::ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    // SIGINT
    status.signal() == Some(2)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: &std::process::ExitStatus) -> bool {
    false
}

// SIGINT must be handled before the child is spawned.
#[cfg(unix)]
fn interrupt_listener() -> io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    Ok(async move {
        sigint.recv().await;
    })
}

#[cfg(not(unix))]
fn interrupt_listener() -> io::Result<impl Future<Output = ()>> {
    Ok(async {
        let _ = tokio::signal::ctrl_c().await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_urls_skip_loopback() {
        let urls = access_urls(&["127.0.0.1", "10.0.0.5"], 8080);
        assert_eq!(urls, vec!["http://10.0.0.5:8080/"]);
    }

    #[test]
    fn test_access_urls_bracket_ipv6() {
        let urls = access_urls(&["::1", "fe80::1", "192.168.1.20"], 9000);
        assert_eq!(urls, vec!["http://[fe80::1]:9000/", "http://192.168.1.20:9000/"]);
    }

    #[test]
    fn test_write_access_urls() {
        let mut out: Vec<u8> = Vec::new();
        write_access_urls(&mut out, &["127.0.0.1", "10.0.0.5"], 8080).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\nLocal URL http://10.0.0.5:8080/\n");
        assert_eq!(text.matches("http://").count(), 1);
    }

    #[test]
    fn test_server_args() {
        let args = server_args(8080, Path::new("/tmp/stage"));
        assert_eq!(
            args,
            vec!["--webserverPort", "8080", "--webserverDirectory", "/tmp/stage"]
        );
    }

    #[test]
    fn test_zero_port_rejected() {
        let plan = JobPlan::from_path("report.rst").unwrap();
        let err = serve_to(&mut Vec::<u8>::new(), &plan, &["10.0.0.5"], &ServeOptions::new(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidPort));
    }

    #[test]
    fn test_invalid_address_rejected() {
        let plan = JobPlan::from_path("report.rst").unwrap();
        let err = serve_to(
            &mut Vec::<u8>::new(),
            &plan,
            &["10.0.0.5", "nope"],
            &ServeOptions::new(8080),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(ref a) if a == "nope"));
    }

    #[test]
    fn test_stage_files() {
        let src_dir = tempfile::tempdir().unwrap();
        let stage = tempfile::tempdir().unwrap();
        let source = src_dir.path().join("report.rst");
        fs::write(&source, "Report\n======\n").unwrap();
        fs::write(src_dir.path().join("report.pdf"), b"%PDF-1.4\n").unwrap();

        let plan = JobPlan::from_path(&source).unwrap();
        let staged = stage_files(&plan, stage.path()).unwrap();

        assert_eq!(
            staged,
            vec![stage.path().join("report.rst"), stage.path().join("report.pdf")]
        );
        assert_eq!(fs::read(&staged[1]).unwrap(), b"%PDF-1.4\n");
    }

    #[test]
    fn test_stage_files_for_unconverted_source() {
        let src_dir = tempfile::tempdir().unwrap();
        let stage = tempfile::tempdir().unwrap();
        let source = src_dir.path().join("notes.txt");
        fs::write(&source, "plain").unwrap();

        let plan = JobPlan::from_path(&source).unwrap();
        let staged = stage_files(&plan, stage.path()).unwrap();
        assert_eq!(staged, vec![stage.path().join("notes.txt")]);
    }
}

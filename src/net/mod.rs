//! Local network addresses: validation and discovery.
//!
//! Discovery runs a platform tool and scrapes its output. Each supported
//! platform gets an [`AddressLister`]; [`lister_for`] picks one at startup
//! so callers never branch on the OS themselves.

mod ifconfig;

pub use ifconfig::IfconfigLister;

use crate::error::{Error, Result};
use encoding_rs::Encoding;
use log::debug;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::process::Command;

/// IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

/// Whether `addr` is a valid address of the given family.
pub fn is_valid_address(addr: &str, family: AddressFamily) -> bool {
    match family {
        AddressFamily::V4 => addr.parse::<Ipv4Addr>().is_ok(),
        AddressFamily::V6 => addr.parse::<Ipv6Addr>().is_ok(),
    }
}

/// Whether `addr` is valid under either family.
pub fn is_valid_any(addr: &str) -> bool {
    is_valid_address(addr, AddressFamily::V4) || is_valid_address(addr, AddressFamily::V6)
}

/// Whether `addr` is a loopback address (`127.0.0.0/8` or `::1`).
pub fn is_loopback(addr: &str) -> bool {
    addr.parse::<IpAddr>().map(|ip| ip.is_loopback()).unwrap_or(false)
}

/// Check that `addrs` is non-empty and every entry is a valid address.
pub fn validate_addresses<S: AsRef<str>>(addrs: &[S]) -> Result<()> {
    if addrs.is_empty() {
        return Err(Error::NoAddresses);
    }
    match addrs.iter().find(|a| !is_valid_any(a.as_ref())) {
        Some(bad) => Err(Error::InvalidAddress(bad.as_ref().to_string())),
        None => Ok(()),
    }
}

/// Platform adapter that lists local interface addresses.
pub trait AddressLister {
    /// Program to run.
    fn program(&self) -> &str;

    /// Arguments for the program.
    fn args(&self) -> &[&str];

    /// Extract addresses from the program's decoded output.
    fn parse(&self, output: &str) -> Vec<String>;
}

/// Operating system family, as far as address discovery cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Linux
    Linux,
    /// macOS
    MacOs,
    /// FreeBSD
    FreeBsd,
    /// Cygwin on Windows
    Cygwin,
    /// Anything else, by its OS name
    Unsupported(String),
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            "freebsd" => Platform::FreeBsd,
            "cygwin" => Platform::Cygwin,
            other => Platform::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => f.write_str("linux"),
            Platform::MacOs => f.write_str("macos"),
            Platform::FreeBsd => f.write_str("freebsd"),
            Platform::Cygwin => f.write_str("cygwin"),
            Platform::Unsupported(os) => f.write_str(os),
        }
    }
}

/// Select the address lister for `platform`.
pub fn lister_for(platform: &Platform) -> Result<Box<dyn AddressLister>> {
    match platform {
        Platform::Linux | Platform::MacOs | Platform::FreeBsd | Platform::Cygwin => {
            Ok(Box::new(IfconfigLister::new()))
        }
        Platform::Unsupported(os) => Err(Error::UnsupportedPlatform(os.clone())),
    }
}

/// Decode command output using an encoding label such as `UTF-8` or `latin1`.
pub fn decode_output(bytes: &[u8], encoding: &str) -> Result<String> {
    let encoding = Encoding::for_label(encoding.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(encoding.to_string()))?;
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!("replaced undecodable bytes in command output ({})", encoding.name());
    }
    Ok(text.into_owned())
}

/// Run `lister` and return the addresses it reports.
///
/// Fails with [`Error::NoAddresses`] when nothing is found.
pub fn list_local_addresses(lister: &dyn AddressLister, encoding: &str) -> Result<Vec<String>> {
    let output = Command::new(lister.program())
        .args(lister.args())
        .output()
        .map_err(|source| Error::Spawn {
            program: lister.program().to_string(),
            source,
        })?;
    debug!("{} {:?}: {}", lister.program(), lister.args(), output.status);

    let text = decode_output(&output.stdout, encoding)?;
    let addrs = lister.parse(&text);
    if addrs.is_empty() {
        return Err(Error::NoAddresses);
    }
    Ok(addrs)
}

/// Discover local addresses with the lister for the current platform.
pub fn local_addresses(encoding: &str) -> Result<Vec<String>> {
    let lister = lister_for(&Platform::current())?;
    list_local_addresses(lister.as_ref(), encoding)
}

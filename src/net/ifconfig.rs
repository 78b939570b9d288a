//! `ifconfig -a` adapter for Linux, macOS, the BSDs, and Cygwin.

use super::AddressLister;
use regex::Regex;

/// Lists addresses by scraping `ifconfig -a`.
///
/// Handles both the BSD/modern layout (`inet 10.0.0.5 netmask ...`,
/// `inet6 fe80::1%lo0 prefixlen 64`) and the older net-tools layout
/// (`inet addr:10.0.0.5`, `inet6 addr: fe80::1/64 Scope:Link`).
#[derive(Debug)]
pub struct IfconfigLister {
    line_regex: Regex,
}

impl IfconfigLister {
    /// Create the lister.
    pub fn new() -> Self {
        Self {
            line_regex: Regex::new(r"\b(inet6?)\s+(?:addr:\s*)?(\S+)").unwrap(),
        }
    }
}

impl Default for IfconfigLister {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressLister for IfconfigLister {
    fn program(&self) -> &str {
        "ifconfig"
    }

    fn args(&self) -> &[&str] {
        &["-a"]
    }

    fn parse(&self, output: &str) -> Vec<String> {
        output
            .lines()
            .filter_map(|line| self.line_regex.captures(line))
            .map(|caps| normalize_token(&caps[2]))
            .filter(|addr| !addr.is_empty())
            .collect()
    }
}

/// Strip a zone index (`%lo0`) and a prefix length (`/64`).
fn normalize_token(token: &str) -> String {
    let end = token.find(|c: char| c == '%' || c == '/').unwrap_or(token.len());
    token[..end].to_string()
}

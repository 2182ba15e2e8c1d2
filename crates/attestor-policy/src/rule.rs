//! Whitelist configuration schema and matching rules.
//!
//! A `WhitelistConfig` is deserialized from TOML. Each execution context has
//! its own section; a missing section means an empty whitelist, which denies
//! everything in that context.
//!
//! Example:
//! ```toml
//! [desktop]
//! allowed_apps = ["notepad.exe", "calc"]
//!
//! [web]
//! allowed_domains = ["example.com", "*.wikipedia.org"]
//!
//! [file]
//! allowed_paths = ["/tmp/attestor/*", "/home/demo/notes.txt"]
//! ```

use serde::{Deserialize, Serialize};

/// Desktop whitelist: application names permitted for launch and close.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesktopRules {
    /// Application names, compared case-insensitively with the `.exe`
    /// suffix stripped on both sides.
    #[serde(default)]
    pub allowed_apps: Vec<String>,
}

/// Web whitelist: domains permitted for navigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebRules {
    /// Domain entries. A bare domain matches the host exactly; a
    /// `*.domain` entry matches the domain and any subdomain.
    #[serde(default)]
    pub allowed_domains: Vec<String>,
}

/// File whitelist: paths permitted for open and write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRules {
    /// Path patterns. `*` matches any run of characters, including
    /// separators.
    #[serde(default)]
    pub allowed_paths: Vec<String>,
}

/// The top-level structure deserialized from a TOML whitelist file.
///
/// Every section is optional and defaults to empty, so a blank file is a
/// valid configuration that denies every action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhitelistConfig {
    #[serde(default)]
    pub desktop: DesktopRules,
    #[serde(default)]
    pub web: WebRules,
    #[serde(default)]
    pub file: FileRules,
}

impl WhitelistConfig {
    /// An empty configuration that denies every action in every context.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Is the application name whitelisted for the desktop context?
    pub fn app_allowed(&self, app: &str) -> bool {
        let wanted = normalize_app(app);
        self.desktop
            .allowed_apps
            .iter()
            .any(|entry| normalize_app(entry) == wanted)
    }

    /// Is the URL's host whitelisted for the web context?
    ///
    /// The host is extracted from `url` (scheme, path, and port stripped)
    /// and compared case-insensitively.
    pub fn domain_allowed(&self, url: &str) -> bool {
        let host = extract_host(url);
        if host.is_empty() {
            return false;
        }
        self.web.allowed_domains.iter().any(|entry| {
            let entry = entry.to_ascii_lowercase();
            if let Some(base) = entry.strip_prefix("*.") {
                host == base || host.ends_with(&format!(".{base}"))
            } else {
                host == entry
            }
        })
    }

    /// Is the path whitelisted for the file context?
    pub fn path_allowed(&self, path: &str) -> bool {
        self.file
            .allowed_paths
            .iter()
            .any(|pattern| glob_match(pattern, path))
    }
}

/// Lowercase and strip a trailing `.exe`, so "Notepad.EXE" and "notepad"
/// compare equal.
fn normalize_app(app: &str) -> String {
    let lower = app.trim().to_ascii_lowercase();
    lower
        .strip_suffix(".exe")
        .map(str::to_string)
        .unwrap_or(lower)
}

/// Extract the lowercase host from a URL-ish string.
///
/// Accepts full URLs ("https://example.com/page"), scheme-less hosts
/// ("example.com:8080"), and bare domains.
fn extract_host(url: &str) -> String {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host = host.split('@').next_back().unwrap_or(host);
    let host = host.split(':').next().unwrap_or(host);
    host.trim().to_ascii_lowercase()
}

/// Match `text` against `pattern` where `*` matches any run of characters.
///
/// No other metacharacters are supported; everything else is literal.
fn glob_match(pattern: &str, text: &str) -> bool {
    fn inner(pattern: &[u8], text: &[u8]) -> bool {
        match pattern.split_first() {
            None => text.is_empty(),
            Some((b'*', rest)) => {
                (0..=text.len()).any(|skip| inner(rest, &text[skip..]))
            }
            Some((&c, rest)) => text
                .split_first()
                .is_some_and(|(&t, text_rest)| t == c && inner(rest, text_rest)),
        }
    }
    inner(pattern.as_bytes(), text.as_bytes())
}

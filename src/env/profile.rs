//! Shell startup file handling for platforms without a persistent
//! user-environment API.

use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};

use super::Platform;

/// Profile candidates in preference order: `(primary, fallback)`.
pub fn profile_candidates(platform: Platform) -> (&'static str, &'static str) {
    match platform {
        Platform::MacOs => (".zshrc", ".bash_profile"),
        Platform::Windows | Platform::Unix => (".bashrc", ".profile"),
    }
}

/// Pick the profile file to edit: the primary candidate if it exists,
/// otherwise the fallback (which is created on first write).
pub fn select_profile(home: &Path, platform: Platform, exists: impl Fn(&Path) -> bool) -> PathBuf {
    let (primary, fallback) = profile_candidates(platform);
    let primary = home.join(primary);
    if exists(&primary) {
        primary
    } else {
        home.join(fallback)
    }
}

/// The `export NAME="value"` line for a variable.
pub fn export_line(name: &str, value: &str) -> String {
    format!("export {}=\"{}\"", name, quote_value(value))
}

/// Replace the first `export NAME=...` line in `content`, or append one.
pub fn upsert_export(content: &str, name: &str, value: &str) -> String {
    let line = export_line(name, value);
    let pattern = format!(r"(?m)^export {}=.*$", regex::escape(name));
    match Regex::new(&pattern) {
        Ok(re) if re.is_match(content) => re.replacen(content, 1, NoExpand(&line)).into_owned(),
        _ => format!("{content}\n{line}\n"),
    }
}

/// Escape characters that are special inside double quotes in POSIX shells.
fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

//! Persisting API keys as user environment variables.
//!
//! Windows stores the variable in the user environment via `setx`; other
//! platforms get an `export` line in the user's shell startup file. In both
//! cases the running process sees the new value immediately.

pub mod profile;

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use parking_lot::Mutex;
use thiserror::Error;

/// Serializes reads and writes of the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }
}

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("No place to persist environment variables: {0}")]
    Unavailable(String),

    #[error("Invalid environment variable name '{0}'")]
    InvalidName(String),

    #[error("Value for '{0}' must be a single line")]
    MultilineValue(String),

    #[error("Failed to update shell profile '{path}': {source}")]
    ProfileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("setx failed: {0}")]
    CommandFailed(String),
}

/// Where a variable ended up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvWriteOutcome {
    /// Shell profile that was edited, when the write was file based.
    pub profile_path: Option<PathBuf>,
}

/// Writes user environment variables for the current platform.
#[derive(Debug, Clone)]
pub struct EnvWriter {
    home: PathBuf,
    platform: Platform,
}

impl EnvWriter {
    /// Writer for the current user and platform.
    pub fn from_env() -> Result<Self, EnvError> {
        let home = dirs::home_dir()
            .ok_or_else(|| EnvError::Unavailable("home directory not found".to_string()))?;
        Ok(Self::new(home, Platform::current()))
    }

    pub fn new(home: PathBuf, platform: Platform) -> Self {
        Self { home, platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Persist `name=value` for future sessions and apply it to this process.
    pub fn set_variable(&self, name: &str, value: &str) -> Result<EnvWriteOutcome, EnvError> {
        if value.contains(['\n', '\r']) {
            return Err(EnvError::MultilineValue(name.to_string()));
        }

        let outcome = match self.platform {
            Platform::Windows => {
                if !is_valid_windows_name(name) {
                    return Err(EnvError::InvalidName(name.to_string()));
                }
                run_setx(name, value)?;
                EnvWriteOutcome::default()
            }
            Platform::MacOs | Platform::Unix => {
                check_shell_name(name)?;
                let path = self.write_profile(name, value)?;
                EnvWriteOutcome {
                    profile_path: Some(path),
                }
            }
        };

        {
            let _guard = ENV_LOCK.lock();
            std::env::set_var(name, value);
        }
        tracing::info!(
            target: "env",
            name,
            profile = ?outcome.profile_path,
            "environment variable persisted"
        );
        Ok(outcome)
    }

    fn write_profile(&self, name: &str, value: &str) -> Result<PathBuf, EnvError> {
        let path = profile::select_profile(&self.home, self.platform, |p| p.exists());
        let content = if path.exists() {
            fs::read_to_string(&path).map_err(|e| EnvError::ProfileError {
                path: path.clone(),
                source: e,
            })?
        } else {
            String::new()
        };

        let updated = profile::upsert_export(&content, name, value);
        fs::write(&path, updated).map_err(|e| EnvError::ProfileError {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}

/// Current value of `name` in this process, or an empty string.
pub fn get_variable(name: &str) -> String {
    let _guard = ENV_LOCK.lock();
    std::env::var(name).unwrap_or_default()
}

/// Portable variable names: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Names `setx` accepts: non-empty, no `=`, no control characters.
pub fn is_valid_windows_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('=') && !name.chars().any(char::is_control)
}

/// Shell profiles can only `export` portable identifiers.
fn check_shell_name(name: &str) -> Result<(), EnvError> {
    if is_valid_name(name) {
        return Ok(());
    }
    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        return Err(EnvError::Unavailable(format!(
            "'{}' starts with a digit and cannot be exported from a shell profile; \
             rename the provider so its name starts with a letter",
            name
        )));
    }
    Err(EnvError::InvalidName(name.to_string()))
}

fn run_setx(name: &str, value: &str) -> Result<(), EnvError> {
    let output = Command::new("setx")
        .arg(name)
        .arg(value)
        .output()
        .map_err(|e| EnvError::CommandFailed(e.to_string()))?;
    if output.status.success() {
        Ok(())
    } else {
        Err(EnvError::CommandFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn valid_names() {
        assert!(is_valid_name("MY_PROVIDER_API_KEY"));
        assert!(is_valid_name("_API_KEY"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1ABC"));
        assert!(!is_valid_name("A B"));
        assert!(!is_valid_name("A;rm"));
    }

    #[test]
    fn set_variable_writes_fallback_profile_and_process_env() {
        let home = TempDir::new().unwrap();
        let writer = EnvWriter::new(home.path().to_path_buf(), Platform::Unix);

        let outcome = writer
            .set_variable("OCM_TEST_FALLBACK_API_KEY", "sk-1")
            .unwrap();
        let path = outcome.profile_path.unwrap();
        assert_eq!(path, home.path().join(".profile"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("export OCM_TEST_FALLBACK_API_KEY=\"sk-1\""));
        assert_eq!(get_variable("OCM_TEST_FALLBACK_API_KEY"), "sk-1");
    }

    #[test]
    fn set_variable_updates_existing_primary_profile() {
        let home = TempDir::new().unwrap();
        let bashrc = home.path().join(".bashrc");
        fs::write(&bashrc, "export OCM_TEST_PRIMARY_API_KEY=\"old\"\n").unwrap();
        let writer = EnvWriter::new(home.path().to_path_buf(), Platform::Unix);

        let outcome = writer
            .set_variable("OCM_TEST_PRIMARY_API_KEY", "new")
            .unwrap();
        assert_eq!(outcome.profile_path.as_deref(), Some(bashrc.as_path()));
        assert_eq!(
            fs::read_to_string(&bashrc).unwrap(),
            "export OCM_TEST_PRIMARY_API_KEY=\"new\"\n"
        );
    }

    #[test]
    fn set_variable_rejects_bad_name() {
        let home = TempDir::new().unwrap();
        let writer = EnvWriter::new(home.path().to_path_buf(), Platform::Unix);
        assert!(matches!(
            writer.set_variable("BAD NAME", "x"),
            Err(EnvError::InvalidName(_))
        ));
        assert!(!home.path().join(".profile").exists());
    }

    #[test]
    fn windows_names_only_need_setx_rules() {
        assert!(is_valid_windows_name("302_AI_API_KEY"));
        assert!(is_valid_windows_name("MY_PROVIDER_API_KEY"));
        assert!(!is_valid_windows_name(""));
        assert!(!is_valid_windows_name("A=B"));
        assert!(!is_valid_windows_name("A\nB"));
    }

    #[test]
    fn windows_rejects_only_unusable_names() {
        let home = TempDir::new().unwrap();
        let writer = EnvWriter::new(home.path().to_path_buf(), Platform::Windows);
        assert!(matches!(
            writer.set_variable("BAD=NAME", "x"),
            Err(EnvError::InvalidName(_))
        ));
    }

    #[cfg(not(windows))]
    #[test]
    fn windows_accepts_leading_digit_names() {
        let home = TempDir::new().unwrap();
        let writer = EnvWriter::new(home.path().to_path_buf(), Platform::Windows);
        // No setx binary here, so the write gets as far as running it.
        assert!(matches!(
            writer.set_variable("302_AI_API_KEY", "sk"),
            Err(EnvError::CommandFailed(_))
        ));
    }

    #[test]
    fn leading_digit_is_unavailable_in_shell_profile() {
        let home = TempDir::new().unwrap();
        let writer = EnvWriter::new(home.path().to_path_buf(), Platform::Unix);

        let err = writer.set_variable("302_AI_API_KEY", "sk").unwrap_err();
        assert!(matches!(err, EnvError::Unavailable(_)));
        assert!(err.to_string().contains("302_AI_API_KEY"));
        assert!(!home.path().join(".profile").exists());
    }

    #[test]
    fn multiline_value_is_rejected_before_writing() {
        let home = TempDir::new().unwrap();
        let writer = EnvWriter::new(home.path().to_path_buf(), Platform::MacOs);

        for value in ["line1\nline2", "sk\r"] {
            assert!(matches!(
                writer.set_variable("OCM_TEST_MULTILINE_API_KEY", value),
                Err(EnvError::MultilineValue(_))
            ));
        }
        assert!(!home.path().join(".bash_profile").exists());
        assert_eq!(get_variable("OCM_TEST_MULTILINE_API_KEY"), "");
    }

    #[test]
    fn get_variable_unset_is_empty() {
        assert_eq!(get_variable("OCM_TEST_SURELY_UNSET_VARIABLE"), "");
    }
}

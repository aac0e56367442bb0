//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level studentbook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentbookConfig {
    /// Backing file. `${VAR}` references are expanded.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Format used when a command gets no `--format`.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_data_file() -> String {
    "StudentMarks.txt".to_string()
}
fn default_format() -> String {
    "table".to_string()
}

impl Default for StudentbookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_format: default_format(),
        }
    }
}

impl StudentbookConfig {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }
}

/// Expand `${VAR}` references. Substituted values are not expanded again,
/// and an unterminated `${` is kept as written.
fn resolve_env_vars(s: &str) -> String {
    let mut resolved = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        let name = &rest[start + 2..start + 2 + len];
        resolved.push_str(&rest[..start]);
        resolved.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    resolved.push_str(rest);
    resolved
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `studentbook.toml` in the current directory
/// 2. `~/.config/studentbook/config.toml`
///
/// `STUDENTBOOK_DATA_FILE` overrides `data_file` from any source.
pub fn load_config_from(path: Option<&Path>) -> Result<StudentbookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studentbook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("reading config {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StudentbookConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudentbookConfig::default(),
    };

    if let Ok(file) = std::env::var("STUDENTBOOK_DATA_FILE") {
        if !file.trim().is_empty() {
            config.data_file = file;
        }
    }
    config.data_file = resolve_env_vars(&config.data_file);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studentbook"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_STUDENTBOOK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_STUDENTBOOK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_STUDENTBOOK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars here"), "no vars here");
        std::env::remove_var("_STUDENTBOOK_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_STUDENTBOOK_SELF_REF", "${_STUDENTBOOK_SELF_REF}/x");
        assert_eq!(
            resolve_env_vars("${_STUDENTBOOK_SELF_REF}"),
            "${_STUDENTBOOK_SELF_REF}/x"
        );
        std::env::remove_var("_STUDENTBOOK_SELF_REF");

        assert_eq!(resolve_env_vars("marks_${unterminated"), "marks_${unterminated");
        assert_eq!(resolve_env_vars("${_STUDENTBOOK_UNSET_VAR}/m.txt"), "/m.txt");
    }

    #[test]
    fn default_config() {
        let config = StudentbookConfig::default();
        assert_eq!(config.data_file, "StudentMarks.txt");
        assert_eq!(config.default_format, "table");
        assert_eq!(config.data_path(), PathBuf::from("StudentMarks.txt"));
    }

    #[test]
    fn parse_partial_config() {
        let config: StudentbookConfig = toml::from_str("data_file = \"class/marks.txt\"\n").unwrap();
        assert_eq!(config.data_file, "class/marks.txt");
        assert_eq!(config.default_format, "table");
    }

    #[test]
    fn explicit_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studentbook.toml");
        std::fs::write(&path, "default_format = \"json\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_format, "json");

        let missing = dir.path().join("absent.toml");
        let err = load_config_from(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.license-text/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP settings for the source fetcher.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Extra override labels keyed by `name@version`. A label of
    /// `"public domain"` (any case) resolves to the literal text.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Per-request timeout in seconds; `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("license-text/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<input_dir>/.license-text/config.toml`
/// 3. `~/.config/license-text/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(input_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = input_dir.join(".license-text").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-text")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.fetch.timeout_secs, 30);
        assert!(cfg.fetch.user_agent.starts_with("license-text/"));
        assert!(cfg.overrides.is_empty());
    }

    #[test]
    fn test_explicit_config_file() {
        let toml = r#"
[fetch]
timeout_secs = 5

[overrides]
"left-pad@1.3.0" = "WTFPL"
"jsonify@0.0.0" = "Public domain"
"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", toml).unwrap();
        let cfg = load_config(Path::new("/nonexistent"), Some(f.path())).unwrap();
        assert_eq!(cfg.fetch.timeout_secs, 5);
        assert_eq!(cfg.fetch.user_agent, default_user_agent());
        assert_eq!(cfg.overrides.get("left-pad@1.3.0").unwrap(), "WTFPL");
        assert_eq!(cfg.overrides.len(), 2);
    }

    #[test]
    fn test_project_config_is_found() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".license-text")).unwrap();
        std::fs::write(
            dir.path().join(".license-text").join("config.toml"),
            "[overrides]\n\"a@1.0.0\" = \"MIT\"\n",
        )
        .unwrap();
        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.overrides.get("a@1.0.0").unwrap(), "MIT");
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[fetch]\nretries = 3\n").unwrap();
        assert!(load_config(Path::new("."), Some(f.path())).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = load_config(Path::new("."), Some(Path::new("/no/such/config.toml")));
        assert!(err.is_err());
    }
}

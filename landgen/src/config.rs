//! landgen configuration types and loading

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main landgen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Input and output file locations
    pub paths: PathsConfig,

    /// Characters of the generated page echoed to the console after saving
    #[serde(rename = "preview-chars")]
    pub preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            paths: PathsConfig::default(),
            preview_chars: 500,
        }
    }
}

impl Config {
    /// Resolve the run configuration
    ///
    /// An explicit `--config` file must load. Without one, `./.landgen.yml`
    /// and then `~/.config/landgen/landgen.yml` are tried; a broken file there
    /// is logged and skipped, and built-in defaults apply when none loads.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).wrap_err_with(|| format!("cannot use config {}", path.display()));
        }
        Ok(Self::first_loadable(&Self::search_paths()))
    }

    /// Implicit config locations, most specific first
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".landgen.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("landgen").join("landgen.yml"));
        }
        paths
    }

    fn first_loadable(candidates: &[PathBuf]) -> Self {
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path.display(), "skipping config: {:#}", e),
            }
        }
        tracing::info!("no landgen config found; using built-in defaults");
        Self::default()
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).wrap_err("config file is unreadable")?;
        let config: Self = serde_yaml::from_str(&content).wrap_err("config file is not valid landgen YAML")?;

        tracing::info!(path = %path.display(), model = %config.llm.model, "config loaded");
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "gemini" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_tokens: 8192,
            timeout_ms: 300_000,
        }
    }
}

/// File locations, relative paths resolve against the working directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// JSON command file
    pub command: PathBuf,

    /// Generated HTML document, overwritten on every successful run
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("protocol").join("command.json"),
            output: PathBuf::from("index.html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.paths.command, PathBuf::from("protocol/command.json"));
        assert_eq!(config.paths.output, PathBuf::from("index.html"));
        assert_eq!(config.preview_chars, 500);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: gemini
  model: gemini-1.5-pro
  api-key-env: MY_API_KEY
  base-url: http://localhost:9000
  max-tokens: 4096
  timeout-ms: 60000

paths:
  command: cmd/landing.json
  output: site/landing.html

preview-chars: 120
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gemini-1.5-pro");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.base_url, "http://localhost:9000");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.llm.timeout_ms, 60000);
        assert_eq!(config.paths.command, PathBuf::from("cmd/landing.json"));
        assert_eq!(config.paths.output, PathBuf::from("site/landing.html"));
        assert_eq!(config.preview_chars, 120);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gemini-2.0-flash
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.llm.model, "gemini-2.0-flash");

        // Defaults for unspecified
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.paths.output, PathBuf::from("index.html"));
        assert_eq!(config.preview_chars, 500);
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("landgen.yml");
        fs::write(&path, "paths:\n  output: out.html\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.paths.output, PathBuf::from("out.html"));
    }

    #[test]
    fn test_load_explicit_path_missing_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nope.yml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.yml"));
    }

    #[test]
    fn test_broken_implicit_config_falls_through() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let broken = temp_dir.path().join("broken.yml");
        let user = temp_dir.path().join("user.yml");
        fs::write(&broken, "llm: [unclosed").unwrap();
        fs::write(&user, "llm:\n  model: gemini-2.0-flash\n").unwrap();

        let config = Config::first_loadable(&[temp_dir.path().join("absent.yml"), broken, user]);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_no_implicit_config_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let config = Config::first_loadable(&[temp_dir.path().join(".landgen.yml")]);
        assert_eq!(config.llm.model, Config::default().llm.model);
        assert_eq!(config.paths.output, PathBuf::from("index.html"));
    }

    #[test]
    fn test_load_explicit_path_invalid_yaml_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("landgen.yml");
        fs::write(&path, "llm: [unclosed").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}

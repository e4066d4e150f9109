use crate::cli::parser::CliOptions;
use crate::github::tracker::DEFAULT_LABEL_COLOR;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Repository,
    File,
    LabelColor,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Repository => "repository",
            ConfigKey::File => "file",
            ConfigKey::LabelColor => "labelColor",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::Repository, ConfigKey::File, ConfigKey::LabelColor]
    }
}

/// Filename for the project-specific configuration within the .chincol directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".chincol";
/// CSV file used when neither the command line nor the config file names one.
pub const DEFAULT_CSV_FILE: &str = "./issues.csv";
/// Environment variable `gh` itself reads for the target repository.
pub const REPOSITORY_ENV: &str = "GH_REPO";

/// Settings for one run, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    /// Target repository as `<owner>/<name>`.
    pub repository: String,
    /// Absolute path of the issues CSV file.
    pub csv_path: PathBuf,
    /// Hex color without a leading `#`, used for labels created on demand.
    pub label_color: String,
}

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns an empty HashMap if the input `content` is empty or contains only whitespace.
/// - Unknown keys are skipped.
/// - Returns an `Err` if the JSON parsing fails or the document is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    let mut config_map = HashMap::new();

    if let Value::Object(map) = &value {
        for key in ConfigKey::all() {
            if let Some(val) = map.get(key.as_str()) {
                config_map.insert(*key, val.clone());
            }
        }
        return Ok(config_map);
    }

    Err(anyhow::anyhow!("Config must be a JSON object"))
}

/// Merges `updates` into `base_config` and returns a new configuration map.
///
/// If a key exists in both, the value from `updates` wins.
pub fn update_config(
    base_config: &HashMap<ConfigKey, Value>,
    updates: &HashMap<ConfigKey, Value>,
) -> HashMap<ConfigKey, Value> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

/// Loads `.chincol/config.json` under `dir`. A missing file yields an empty map.
pub fn load_project_config(dir: &Path) -> Result<HashMap<ConfigKey, Value>> {
    let path = dir.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME);
    match std::fs::read(&path) {
        Ok(content) => parse_config(&content)
            .with_context(|| format!("Invalid config file {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Turns the flags given on the command line into config entries.
pub fn cli_overrides(options: &CliOptions) -> HashMap<ConfigKey, Value> {
    let mut overrides = HashMap::new();
    if let Some(repo) = &options.repo {
        overrides.insert(ConfigKey::Repository, Value::from(repo.as_str()));
    }
    if let Some(file) = &options.file {
        overrides.insert(ConfigKey::File, Value::from(file.to_string_lossy().into_owned()));
    }
    if let Some(color) = &options.label_color {
        overrides.insert(ConfigKey::LabelColor, Value::from(color.as_str()));
    }
    overrides
}

/// Builds the run configuration from merged config entries.
///
/// The repository falls back to `env_repository` when no entry names one.
/// Relative CSV paths are resolved against `cwd`.
pub fn resolve_run_configuration(
    config: &HashMap<ConfigKey, Value>,
    env_repository: Option<String>,
    cwd: &Path,
) -> Result<RunConfiguration> {
    let repository = string_value(config, ConfigKey::Repository)?
        .or(env_repository.filter(|repo| !repo.trim().is_empty()))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing repository. Use --repo <owner>/<repo>, set \"repository\" in {}/{}, or set {}.",
                PROJECT_CONFIG_DIR,
                PROJECT_CONFIG_FILENAME,
                REPOSITORY_ENV
            )
        })?;
    validate_repository(&repository)?;

    let file = string_value(config, ConfigKey::File)?
        .unwrap_or_else(|| DEFAULT_CSV_FILE.to_string());
    let csv_path = cwd.join(file);

    let label_color = match string_value(config, ConfigKey::LabelColor)? {
        Some(color) => normalize_label_color(&color)?,
        None => DEFAULT_LABEL_COLOR.to_string(),
    };

    Ok(RunConfiguration {
        repository,
        csv_path,
        label_color,
    })
}

fn string_value(config: &HashMap<ConfigKey, Value>, key: ConfigKey) -> Result<Option<String>> {
    match config.get(&key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(anyhow::anyhow!(
            "Config value \"{}\" must be a string, got {}",
            key.as_str(),
            other
        )),
    }
}

/// Checks that `repo` has the form `<owner>/<repo>`.
pub fn validate_repository(repo: &str) -> Result<()> {
    let parts: Vec<&str> = repo.split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Invalid repository format \"{repo}\". Please use <owner>/<repo>."
        ))
    }
}

/// Accepts `RRGGBB` or `#RRGGBB` and returns the bare hex digits.
pub fn normalize_label_color(color: &str) -> Result<String> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(hex.to_string())
    } else {
        Err(anyhow::anyhow!(
            "Invalid label color \"{color}\". Expected six hex digits, e.g. 0000FF."
        ))
    }
}

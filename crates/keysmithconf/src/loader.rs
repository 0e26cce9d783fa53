//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, KeysmithConfig};
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// System and user files are returned only when they exist. A CLI path is
/// always returned (so a typo surfaces as a read error) and replaces the
/// local `./keysmith.toml`.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/keysmith/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("keysmith/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    let local = PathBuf::from("keysmith.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read a TOML file and overlay the keys it sets onto `config`.
pub fn load_into(config: &mut KeysmithConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_toml(config, &contents, path)
}

fn invalid(path: &Path, key: &str, expected: &str) -> ConfigError {
    ConfigError::Parse {
        path: path.to_path_buf(),
        message: format!("{} must be {}", key, expected),
    }
}

fn as_count(value: &toml::Value, path: &Path, key: &str) -> Result<usize, ConfigError> {
    value
        .as_integer()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid(path, key, "a non-negative integer"))
}

/// Overlay only the keys present in `contents`, so earlier files keep
/// whatever later files leave unset.
fn parse_toml(config: &mut KeysmithConfig, contents: &str, path: &Path) -> Result<(), ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(cache) = table.get("cache").and_then(|v| v.as_table()) {
        if let Some(v) = cache.get("capacity") {
            config.cache.capacity = as_count(v, path, "cache.capacity")?;
        }
    }

    if let Some(suggestions) = table.get("suggestions").and_then(|v| v.as_table()) {
        if let Some(v) = suggestions.get("sort_order") {
            config.suggestions.sort_order = v
                .as_str()
                .ok_or_else(|| invalid(path, "suggestions.sort_order", "a string"))?
                .to_string();
        }
        if let Some(v) = suggestions.get("max_results") {
            config.suggestions.max_results = as_count(v, path, "suggestions.max_results")?;
        }
        if let Some(v) = suggestions.get("standard_keys_only") {
            config.suggestions.standard_keys_only = v
                .as_bool()
                .ok_or_else(|| invalid(path, "suggestions.standard_keys_only", "a boolean"))?;
        }
        if let Some(v) = suggestions.get("detailed") {
            config.suggestions.detailed = v
                .as_bool()
                .ok_or_else(|| invalid(path, "suggestions.detailed", "a boolean"))?;
        }
    }

    if let Some(logging) = table.get("logging").and_then(|v| v.as_table()) {
        if let Some(v) = logging.get("log_level") {
            config.logging.log_level = v
                .as_str()
                .ok_or_else(|| invalid(path, "logging.log_level", "a string"))?
                .to_string();
        }
    }

    Ok(())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to config.
///
/// `lookup` is `std::env::var` in production; tests pass a map. Values that
/// fail to parse are ignored.
pub fn apply_env_overrides<F>(config: &mut KeysmithConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("KEYSMITH_CACHE_CAPACITY") {
        if let Ok(capacity) = v.trim().parse() {
            config.cache.capacity = capacity;
            sources.env_overrides.push("KEYSMITH_CACHE_CAPACITY".to_string());
        }
    }
    if let Some(v) = lookup("KEYSMITH_MAX_RESULTS") {
        if let Ok(max) = v.trim().parse() {
            config.suggestions.max_results = max;
            sources.env_overrides.push("KEYSMITH_MAX_RESULTS".to_string());
        }
    }
    if let Some(v) = lookup("KEYSMITH_SORT_ORDER") {
        config.suggestions.sort_order = v;
        sources.env_overrides.push("KEYSMITH_SORT_ORDER".to_string());
    }
    if let Some(v) = lookup("KEYSMITH_STANDARD_KEYS_ONLY") {
        if let Some(flag) = parse_flag(&v) {
            config.suggestions.standard_keys_only = flag;
            sources.env_overrides.push("KEYSMITH_STANDARD_KEYS_ONLY".to_string());
        }
    }
    if let Some(v) = lookup("KEYSMITH_LOG_LEVEL") {
        config.logging.log_level = v;
        sources.env_overrides.push("KEYSMITH_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Some(v) = lookup("RUST_LOG") {
        config.logging.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn parse(contents: &str) -> Result<KeysmithConfig, ConfigError> {
        let mut config = KeysmithConfig::default();
        parse_toml(&mut config, contents, Path::new("test.toml"))?;
        Ok(config)
    }

    #[test]
    fn test_discover_config_files() {
        // Just verify it doesn't panic
        let _files = discover_config_files();
    }

    #[test]
    fn test_cli_path_is_always_listed() {
        let files = discover_config_files_with_override(Some(Path::new("/nonexistent/k.toml")));
        assert_eq!(files.last(), Some(&PathBuf::from("/nonexistent/k.toml")));
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = parse("[cache]\ncapacity = 10\n").unwrap();
        assert_eq!(config.cache.capacity, 10);
        assert_eq!(config.suggestions.max_results, 12);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
[cache]
capacity = 50

[suggestions]
sort_order = "mode"
max_results = 5
standard_keys_only = true
detailed = true

[logging]
log_level = "debug"
"#;
        let config = parse(toml).unwrap();
        assert_eq!(config.cache.capacity, 50);
        assert_eq!(config.suggestions.sort_order, "mode");
        assert_eq!(config.suggestions.max_results, 5);
        assert!(config.suggestions.standard_keys_only);
        assert!(config.suggestions.detailed);
        assert_eq!(config.logging.log_level, "debug");
    }

    #[test]
    fn test_later_file_overlays_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[cache]\ncapacity = 5\n[logging]\nlog_level = \"info\"\n").unwrap();
        std::fs::write(&second, "[cache]\ncapacity = 9\n").unwrap();

        let mut config = KeysmithConfig::default();
        load_into(&mut config, &first).unwrap();
        load_into(&mut config, &second).unwrap();
        assert_eq!(config.cache.capacity, 9);
        assert_eq!(config.logging.log_level, "info");
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let err = parse("[cache]\ncapacity = \"lots\"\n").unwrap_err();
        assert!(err.to_string().contains("cache.capacity"));

        let err = parse("[suggestions]\nmax_results = -1\n").unwrap_err();
        assert!(err.to_string().contains("suggestions.max_results"));

        assert!(parse("[suggestions]\ndetailed = \"yes\"\n").is_err());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let mut config = KeysmithConfig::default();
        let err = load_into(&mut config, Path::new("/nonexistent/keysmith.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("KEYSMITH_CACHE_CAPACITY", "42"),
            ("KEYSMITH_MAX_RESULTS", "not a number"),
            ("KEYSMITH_SORT_ORDER", "name"),
            ("KEYSMITH_STANDARD_KEYS_ONLY", "yes"),
            ("RUST_LOG", "keysmith=debug"),
        ]);
        let mut config = KeysmithConfig::default();
        let mut sources = ConfigSources::default();
        apply_env_overrides(&mut config, &mut sources, |name| {
            env.get(name).map(|v| v.to_string())
        });

        assert_eq!(config.cache.capacity, 42);
        assert_eq!(config.suggestions.max_results, 12);
        assert_eq!(config.suggestions.sort_order, "name");
        assert!(config.suggestions.standard_keys_only);
        assert_eq!(config.logging.log_level, "keysmith=debug");
        assert_eq!(
            sources.env_overrides,
            [
                "KEYSMITH_CACHE_CAPACITY",
                "KEYSMITH_SORT_ORDER",
                "KEYSMITH_STANDARD_KEYS_ONLY",
                "RUST_LOG"
            ]
        );
    }

    #[test]
    fn test_rust_log_wins_over_keysmith_log_level() {
        let env = HashMap::from([("KEYSMITH_LOG_LEVEL", "info"), ("RUST_LOG", "trace")]);
        let mut config = KeysmithConfig::default();
        let mut sources = ConfigSources::default();
        apply_env_overrides(&mut config, &mut sources, |name| {
            env.get(name).map(|v| v.to_string())
        });
        assert_eq!(config.logging.log_level, "trace");
    }
}

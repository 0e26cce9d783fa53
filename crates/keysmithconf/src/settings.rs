//! Config sections: cache sizing, suggestion display, logging.

use serde::{Deserialize, Serialize};

/// Memoization cache sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entries kept per map (diatonic tables, suggestion lists).
    /// Default: 100
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: usize,
}

impl CacheConfig {
    fn default_capacity() -> usize {
        100
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
        }
    }
}

/// How suggestion lists are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// "score", "name" or "mode".
    /// Default: score
    #[serde(default = "SuggestionConfig::default_sort_order")]
    pub sort_order: String,

    /// Default: 12
    #[serde(default = "SuggestionConfig::default_max_results")]
    pub max_results: usize,

    /// Only show keys on C, G, D, A, E, B or F.
    #[serde(default)]
    pub standard_keys_only: bool,

    /// Append confidence and score to each reason.
    #[serde(default)]
    pub detailed: bool,
}

impl SuggestionConfig {
    fn default_sort_order() -> String {
        "score".to_string()
    }

    fn default_max_results() -> usize {
        12
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            sort_order: Self::default_sort_order(),
            max_results: Self::default_max_results(),
            standard_keys_only: false,
            detailed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as "warn" or "keysmith=debug".
    /// Default: warn
    #[serde(default = "LoggingConfig::default_log_level")]
    pub log_level: String,
}

impl LoggingConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

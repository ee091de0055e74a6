use serde::Deserialize;

/// ChatForge CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Maximum chunk length in characters
    pub max_chunk_length: usize,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_chunk_length: 4096,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            max_chunk_length: std::env::var("CHATFORGE_MAX_LENGTH")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(4096),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_chat_limit() {
        let config = Config::default();
        assert_eq!(config.max_chunk_length, 4096);
        assert_eq!(config.log_level, "info");
    }
}

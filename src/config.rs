use std::num::ParseIntError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    DEFAULT_COMMENTS_URL, DEFAULT_COMMENT_PREVIEW_LIMIT, DEFAULT_LOAD_DELAY_MS,
    DEFAULT_POSTS_PER_PAGE, DEFAULT_POSTS_URL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Endpoints
    pub posts_url: String,
    pub comments_url: String,

    // Loading
    pub load_delay: Duration,

    // View
    pub comment_preview_limit: usize,
    pub posts_per_page: usize,

    // Output
    pub output_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable output for development
    Pretty,
    /// One JSON object per line
    Json,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset or empty values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Endpoints
            posts_url: env_or_default("POSTS_URL", DEFAULT_POSTS_URL),
            comments_url: env_or_default("COMMENTS_URL", DEFAULT_COMMENTS_URL),

            // Loading
            load_delay: Duration::from_millis(parse_env_int(
                "LOAD_DELAY_MS",
                DEFAULT_LOAD_DELAY_MS,
            )?),

            // View
            comment_preview_limit: parse_env_int(
                "COMMENT_PREVIEW_LIMIT",
                DEFAULT_COMMENT_PREVIEW_LIMIT,
            )?,
            posts_per_page: parse_env_int("POSTS_PER_PAGE", DEFAULT_POSTS_PER_PAGE)?,

            // Output
            output_path: optional_env("OUTPUT_PATH").map(PathBuf::from),
            log_format: parse_log_format(&env_or_default("LOG_FORMAT", "pretty")),
        })
    }

    /// Configuration with default endpoints and no artificial delay.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            posts_url: DEFAULT_POSTS_URL.to_string(),
            comments_url: DEFAULT_COMMENTS_URL.to_string(),
            load_delay: Duration::ZERO,
            comment_preview_limit: DEFAULT_COMMENT_PREVIEW_LIMIT,
            posts_per_page: DEFAULT_POSTS_PER_PAGE,
            output_path: None,
            log_format: LogFormat::Pretty,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("POSTS_URL", &self.posts_url)?;
        validate_url("COMMENTS_URL", &self.comments_url)?;
        if self.comment_preview_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "COMMENT_PREVIEW_LIMIT".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.posts_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                name: "POSTS_PER_PAGE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_url(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "cannot be empty".to_string(),
        });
    }
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        }),
        Err(e) => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Value of `name`, treating an empty variable as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    optional_env(name).unwrap_or_else(|| default.to_string())
}

fn parse_env_int<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = ParseIntError>,
{
    optional_env(name).map_or(Ok(default), |raw| {
        raw.trim().parse().map_err(|source| ConfigError::ParseInt {
            name: name.to_string(),
            source,
        })
    })
}

fn parse_log_format(value: &str) -> LogFormat {
    match value.to_lowercase().as_str() {
        "json" | "structured" => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: &[&str] = &[
        "POSTS_URL",
        "COMMENTS_URL",
        "LOAD_DELAY_MS",
        "COMMENT_PREVIEW_LIMIT",
        "POSTS_PER_PAGE",
        "OUTPUT_PATH",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.posts_url, DEFAULT_POSTS_URL);
        assert_eq!(config.comments_url, DEFAULT_COMMENTS_URL);
        assert_eq!(config.load_delay, Duration::from_millis(2000));
        assert_eq!(config.comment_preview_limit, 3);
        assert_eq!(config.posts_per_page, 10);
        assert!(config.output_path.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_overrides_from_env() {
        clear_env();
        std::env::set_var("POSTS_URL", "http://localhost:9000/posts");
        std::env::set_var("LOAD_DELAY_MS", "0");
        std::env::set_var("POSTS_PER_PAGE", "25");
        std::env::set_var("OUTPUT_PATH", "/tmp/feed.html");
        std::env::set_var("LOG_FORMAT", "JSON");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.posts_url, "http://localhost:9000/posts");
        assert_eq!(config.load_delay, Duration::ZERO);
        assert_eq!(config.posts_per_page, 25);
        assert_eq!(config.output_path, Some(PathBuf::from("/tmp/feed.html")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    #[serial]
    fn test_invalid_number_is_rejected() {
        clear_env();
        std::env::set_var("LOAD_DELAY_MS", "soon");
        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::ParseInt { name, .. }) if name == "LOAD_DELAY_MS"));
    }

    #[test]
    #[serial]
    fn test_empty_and_padded_numbers() {
        clear_env();
        std::env::set_var("COMMENT_PREVIEW_LIMIT", " 5 ");
        std::env::set_var("POSTS_PER_PAGE", "");
        std::env::set_var("LOAD_DELAY_MS", "-1");
        let result = Config::from_env();

        std::env::set_var("LOAD_DELAY_MS", "250");
        let config = Config::from_env().unwrap();
        clear_env();

        assert!(matches!(result, Err(ConfigError::ParseInt { name, .. }) if name == "LOAD_DELAY_MS"));
        assert_eq!(config.comment_preview_limit, 5);
        assert_eq!(config.posts_per_page, DEFAULT_POSTS_PER_PAGE);
        assert_eq!(config.load_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            posts_url: "ftp://example.com/posts".to_string(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            comments_url: String::new(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            comment_preview_limit: 0,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());

        let config = Config {
            posts_per_page: 0,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }
}

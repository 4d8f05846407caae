use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// WebSocket endpoint of the live session server.
    pub server_url: String,
    pub log_level: Level,
    /// When set, each displayed frame's JPEG bytes are written to this path.
    pub frame_out: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let server_url =
            std::env::var("SERVER_URL").unwrap_or_else(|_| "ws://127.0.0.1:3000/ws".to_string());
        if !server_url.starts_with("ws://") && !server_url.starts_with("wss://") {
            return Err(ConfigError::InvalidValue(
                "SERVER_URL".to_string(),
                format!("'{}' is not a ws:// or wss:// URL", server_url),
            ));
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let frame_out = std::env::var("FRAME_OUT").map(PathBuf::from).ok();

        Ok(Self {
            server_url,
            log_level,
            frame_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::Level;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("SERVER_URL");
            env::remove_var("RUST_LOG");
            env::remove_var("FRAME_OUT");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.server_url, "ws://127.0.0.1:3000/ws");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.frame_out, None);
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("SERVER_URL", "wss://stream.example.com/live");
            env::set_var("RUST_LOG", "debug");
            env::set_var("FRAME_OUT", "/tmp/current_frame.jpg");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.server_url, "wss://stream.example.com/live");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.frame_out, Some(PathBuf::from("/tmp/current_frame.jpg")));
    }

    #[test]
    #[serial]
    fn test_config_invalid_server_url() {
        clear_env_vars();
        unsafe {
            env::set_var("SERVER_URL", "http://stream.example.com/live");
        }

        let ConfigError::InvalidValue(var, _) = Config::from_env().unwrap_err();
        assert_eq!(var, "SERVER_URL");
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let ConfigError::InvalidValue(var, _) = Config::from_env().unwrap_err();
        assert_eq!(var, "RUST_LOG");
    }
}

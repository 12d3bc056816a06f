use std::env;
use std::fmt;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 5000;
const DEFAULT_COMPLETION_BASE_URL: &str = "https://models.github.ai/inference";
const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MONGO_DATABASE: &str = "travel_planner";

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    Invalid { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVariable(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid { name, value } => {
                write!(f, "{} has an invalid value: {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

/// Process-wide settings, read once at startup and handed to the handlers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub completion: CompletionConfig,
    /// `None` disables persistence.
    pub mongo_uri: Option<String>,
    pub mongo_database: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_blank("GITHUB_TOKEN")
            .ok_or_else(|| ConfigError::MissingVariable("GITHUB_TOKEN".to_string()))?;

        let temperature = match non_blank("COMPLETION_TEMPERATURE") {
            Some(raw) => raw.parse::<f32>().map_err(|_| ConfigError::Invalid {
                name: "COMPLETION_TEMPERATURE".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let port = match non_blank("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                log::warn!("PORT has an invalid value ({}), falling back to {}", raw, PORT);
                PORT
            }),
            None => PORT,
        };

        Ok(Self {
            host: non_blank("HOST").unwrap_or_else(|| HOST.to_string()),
            port,
            completion: CompletionConfig {
                api_key,
                base_url: non_blank("COMPLETION_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string()),
                model: non_blank("COMPLETION_MODEL")
                    .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
                temperature,
            },
            mongo_uri: non_blank("MONGO_URI"),
            mongo_database: non_blank("MONGO_DATABASE")
                .unwrap_or_else(|| DEFAULT_MONGO_DATABASE.to_string()),
        })
    }

    pub fn persistence_enabled(&self) -> bool {
        self.mongo_uri.is_some()
    }

    /// Logs which settings were picked up, never their values.
    pub fn log_summary(&self) {
        log::info!("--- CONFIGURATION CHECK ---");
        log::info!("GITHUB_TOKEN: loaded");
        if self.persistence_enabled() {
            log::info!("MONGO_URI: loaded (database {})", self.mongo_database);
        } else {
            log::warn!("MONGO_URI: missing, saving trips is disabled");
        }
        log::info!(
            "Completion model {} at {} (temperature {})",
            self.completion.model,
            self.completion.base_url,
            self.completion.temperature
        );
    }
}

fn non_blank(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "GITHUB_TOKEN",
        "MONGO_URI",
        "MONGO_DATABASE",
        "HOST",
        "PORT",
        "COMPLETION_BASE_URL",
        "COMPLETION_MODEL",
        "COMPLETION_TEMPERATURE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_missing_token_is_fatal() {
        clear_env();
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingVariable(ref name) if name == "GITHUB_TOKEN"));

        env::set_var("GITHUB_TOKEN", "   ");
        assert!(AppConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        env::set_var("GITHUB_TOKEN", "token");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.completion.base_url, "https://models.github.ai/inference");
        assert!((config.completion.temperature - 0.7).abs() < f32::EPSILON);
        assert!(!config.persistence_enabled());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_and_bad_port_fallback() {
        clear_env();
        env::set_var("GITHUB_TOKEN", "token");
        env::set_var("MONGO_URI", "mongodb://localhost:27017");
        env::set_var("PORT", "not-a-port");
        env::set_var("COMPLETION_TEMPERATURE", "0.2");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 5000);
        assert!(config.persistence_enabled());
        assert!((config.completion.temperature - 0.2).abs() < f32::EPSILON);

        env::set_var("PORT", "8081");
        assert_eq!(AppConfig::from_env().unwrap().port, 8081);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_temperature() {
        clear_env();
        env::set_var("GITHUB_TOKEN", "token");
        env::set_var("COMPLETION_TEMPERATURE", "warm");

        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Invalid { .. })
        ));
        clear_env();
    }
}

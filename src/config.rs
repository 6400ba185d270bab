use crate::shared::i18n::Language;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub language: Language,
    pub end_confirmation_seconds: u32,
    pub call_link_confirm_ms: u64,
    pub event_bus_capacity: usize,
    pub console_query: Option<String>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::Zh,
            end_confirmation_seconds: 60,
            call_link_confirm_ms: 500,
            event_bus_capacity: 1000,
            console_query: None,
            log_filter: "devpilot_console=debug".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let language = match env::var("CONSOLE_LANGUAGE") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidLanguage(value))?,
            Err(_) => defaults.language,
        };

        let end_confirmation_seconds = match env::var("END_CONFIRMATION_SECONDS") {
            Ok(value) => value
                .parse::<u32>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidCountdown(value))?,
            Err(_) => defaults.end_confirmation_seconds,
        };

        let call_link_confirm_ms = match env::var("CALL_LINK_CONFIRM_MS") {
            Ok(value) => parse_link_confirm_ms(&value)?,
            Err(_) => defaults.call_link_confirm_ms,
        };

        let event_bus_capacity = env::var("EVENT_BUS_CAPACITY")
            .unwrap_or_else(|_| defaults.event_bus_capacity.to_string())
            .parse::<usize>()
            .ok()
            .filter(|c| *c > 0)
            .ok_or(ConfigError::InvalidCapacity)?;

        let console_query = env::var("CONSOLE_QUERY").ok().filter(|q| !q.is_empty());

        Ok(Config {
            language,
            end_confirmation_seconds,
            call_link_confirm_ms,
            event_bus_capacity,
            console_query,
            log_filter: defaults.log_filter,
        })
    }
}

fn parse_link_confirm_ms(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidLinkDelay(value.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported console language: {0}")]
    InvalidLanguage(String),

    #[error("END_CONFIRMATION_SECONDS must be a positive integer, got {0:?}")]
    InvalidCountdown(String),

    #[error("CALL_LINK_CONFIRM_MS must be a whole number of milliseconds, got {0:?}")]
    InvalidLinkDelay(String),

    #[error("Invalid event bus capacity")]
    InvalidCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_confirm_delay_parsing() {
        assert_eq!(parse_link_confirm_ms("750").unwrap(), 750);
        assert_eq!(parse_link_confirm_ms("0").unwrap(), 0);
        assert!(matches!(
            parse_link_confirm_ms("half a second"),
            Err(ConfigError::InvalidLinkDelay(v)) if v == "half a second"
        ));
        assert!(parse_link_confirm_ms("-5").is_err());
    }
}

//! Runtime configuration read from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `127.0.0.1` |
//! | `PORT` | `8080` |
//! | `LOG_LEVEL` | `info` |
//! | `AI_API_KEY` / `OPENAI_API_KEY` | unset (AI disabled) |
//! | `AI_BASE_URL` | `https://api.openai.com/v1` |
//! | `AI_MODEL` | `gpt-4o-mini` |
//! | `AI_TEMPERATURE` | `0.7` |
//! | `AI_MAX_TOKENS` | `500` |
//! | `AI_TIMEOUT_SECS` | `30` |

use std::str::FromStr;
use tracing::{warn, Level};

/// Completion service settings
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output length cap in tokens
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Settings with defaults for everything but the key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 30,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: Level,
    /// None when no API key is configured
    pub ai: Option<AiConfig>,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", get("PORT"), 8080);
        let log_level = parse_or("LOG_LEVEL", get("LOG_LEVEL"), Level::INFO);

        let ai = get("AI_API_KEY").or_else(|| get("OPENAI_API_KEY")).map(|key| {
            let defaults = AiConfig::with_api_key(key);
            AiConfig {
                base_url: get("AI_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.base_url.clone()),
                model: get("AI_MODEL").unwrap_or(defaults.model.clone()),
                temperature: parse_or("AI_TEMPERATURE", get("AI_TEMPERATURE"), defaults.temperature),
                max_tokens: parse_or("AI_MAX_TOKENS", get("AI_MAX_TOKENS"), defaults.max_tokens),
                timeout_secs: parse_or(
                    "AI_TIMEOUT_SECS",
                    get("AI_TIMEOUT_SECS"),
                    defaults.timeout_secs,
                ),
                ..defaults
            }
        });

        Self {
            host,
            port,
            log_level,
            ai,
        }
    }

    /// Socket address to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid value {:?} for {}, using default", raw, key);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.ai.is_none());
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_ai_enabled_by_key() {
        let config = config_from(&[("AI_API_KEY", "sk-test")]);
        let ai = config.ai.unwrap();
        assert_eq!(ai.api_key, "sk-test");
        assert_eq!(ai.model, "gpt-4o-mini");
        assert_eq!(ai.max_tokens, 500);
        assert_eq!(ai.timeout_secs, 30);
        assert!((ai.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_openai_key_fallback() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-openai")]);
        assert_eq!(config.ai.unwrap().api_key, "sk-openai");
    }

    #[test]
    fn test_blank_key_disables_ai() {
        let config = config_from(&[("AI_API_KEY", "   ")]);
        assert!(config.ai.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("LOG_LEVEL", "debug"),
            ("AI_API_KEY", "sk-test"),
            ("AI_BASE_URL", "http://localhost:11434/v1/"),
            ("AI_MODEL", "llama3"),
            ("AI_MAX_TOKENS", "256"),
        ]);
        assert_eq!(config.addr(), "0.0.0.0:9000");
        assert_eq!(config.log_level, Level::DEBUG);
        let ai = config.ai.unwrap();
        assert_eq!(ai.base_url, "http://localhost:11434/v1");
        assert_eq!(ai.model, "llama3");
        assert_eq!(ai.max_tokens, 256);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("PORT", "eighty"),
            ("AI_API_KEY", "sk-test"),
            ("AI_TEMPERATURE", "warm"),
        ]);
        assert_eq!(config.port, 8080);
        assert!((config.ai.unwrap().temperature - 0.7).abs() < f32::EPSILON);
    }
}

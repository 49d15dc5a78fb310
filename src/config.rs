//! # Unified Application Configuration
//!
//! This module provides a centralized configuration system loaded from
//! environment variables. Each section carries its own defaults and
//! validation so misconfiguration is reported at startup rather than
//! surfacing as runtime transport errors.

use crate::errors::{BotError, BotResult};
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Bot-specific configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> BotResult<()> {
        if self.token.trim().is_empty() {
            return Err(BotError::Config("Bot token cannot be empty".to_string()));
        }

        // Basic bot token format validation
        let parts: Vec<&str> = self.token.split(':').collect();
        if parts.len() != 2 {
            return Err(BotError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        // Validate bot ID is numeric
        if parts[0].parse::<u64>().is_err() {
            return Err(BotError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        // Validate bot token length
        if parts[1].len() < 20 {
            return Err(BotError::Config(
                "Bot token appears to be too short. Please verify it's a valid token".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(BotError::Config("HTTP timeout cannot be 0".to_string()));
        }

        if self.http_timeout_secs > 300 {
            return Err(BotError::Config(
                "HTTP timeout cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Long-polling configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Pause between long-poll cycles in milliseconds
    pub interval_ms: u64,
    /// Per-request wait timeout handed to the platform in seconds
    pub request_timeout_secs: u32,
    /// Delay before restarting the fetch loop after a fatal error
    pub restart_delay_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            request_timeout_secs: 10,
            restart_delay_secs: 5,
        }
    }
}

impl PollingConfig {
    /// Validate polling configuration
    pub fn validate(&self) -> BotResult<()> {
        if self.interval_ms == 0 {
            return Err(BotError::Config("Poll interval cannot be 0".to_string()));
        }

        if self.interval_ms > 60_000 {
            return Err(BotError::Config(
                "Poll interval cannot be greater than 60000 ms".to_string(),
            ));
        }

        if self.request_timeout_secs > 50 {
            return Err(BotError::Config(
                "Poll request timeout cannot be greater than 50 seconds".to_string(),
            ));
        }

        if self.restart_delay_secs == 0 {
            return Err(BotError::Config("Restart delay cannot be 0".to_string()));
        }

        Ok(())
    }
}

/// Webhook ingress server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Webhook listen port
    pub port: u16,
    /// Whether to allow privileged ports (< 1024)
    pub allow_privileged_ports: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            allow_privileged_ports: false,
        }
    }
}

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> BotResult<()> {
        if !self.allow_privileged_ports && self.port < 1024 {
            return Err(BotError::Config(format!(
                "Port {} is privileged. Set allow_privileged_ports=true or use port >= 1024",
                self.port
            )));
        }

        Ok(())
    }
}

/// Unified application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bot configuration
    pub bot: BotConfig,
    /// Long-polling configuration
    pub polling: PollingConfig,
    /// Webhook server configuration
    pub server: ServerConfig,
    /// Public URL of the embedded mini-app
    pub webapp_url: Url,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> BotResult<Self> {
        let mut config = Self::default();

        // Load bot configuration
        config.bot.token = env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
            BotError::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
        })?;
        config.bot.http_timeout_secs = env::var("HTTP_CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| {
                BotError::Config("HTTP_CLIENT_TIMEOUT_SECS must be a valid number".to_string())
            })?;

        // Load web-app URL
        let webapp_url = env::var("WEBAPP_URL").map_err(|_| {
            BotError::Config("WEBAPP_URL environment variable is required".to_string())
        })?;
        config.webapp_url = Url::parse(&webapp_url)
            .map_err(|e| BotError::Config(format!("WEBAPP_URL is not a valid URL: {}", e)))?;

        // Load polling configuration
        config.polling.interval_ms = env::var("POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "2000".to_string())
            .parse()
            .map_err(|_| {
                BotError::Config("POLL_INTERVAL_MS must be a valid number".to_string())
            })?;
        config.polling.request_timeout_secs = env::var("POLL_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| {
                BotError::Config("POLL_REQUEST_TIMEOUT_SECS must be a valid number".to_string())
            })?;
        config.polling.restart_delay_secs = env::var("RESTART_DELAY_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| {
                BotError::Config("RESTART_DELAY_SECS must be a valid number".to_string())
            })?;

        // Load server configuration
        config.server.port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| BotError::Config("PORT must be a valid port number".to_string()))?;
        config.server.allow_privileged_ports = env::var("ALLOW_PRIVILEGED_PORTS")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> BotResult<()> {
        self.bot.validate()?;
        self.polling.validate()?;
        self.server.validate()?;

        if self.webapp_url.scheme() != "https" {
            return Err(BotError::Config(
                "WEBAPP_URL must use https (Telegram rejects plain-http web apps)".to_string(),
            ));
        }

        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: bot_token=[REDACTED], webapp_url={}, port={}, poll_interval_ms={}, poll_timeout_secs={}, restart_delay_secs={}",
            self.webapp_url,
            self.server.port,
            self.polling.interval_ms,
            self.polling.request_timeout_secs,
            self.polling.restart_delay_secs
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            polling: PollingConfig::default(),
            server: ServerConfig::default(),
            // Placeholder until from_env overrides it; validate() enforces https
            webapp_url: Url::parse("https://example.invalid").expect("static URL"),
        }
    }
}

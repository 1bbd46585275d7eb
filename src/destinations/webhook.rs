//! Chat webhook notifier destination

use super::config::{
    min_level_from, DestinationConfig, WEBHOOK_MIN_LEVEL_ENV, WEBHOOK_URL_ENV,
};
use super::http::build_client;
use crate::core::{Destination, DeliveryHandle, FormattedRecord, LogLevel, LoggerError, Result};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct WebhookMessage {
    text: String,
}

/// Destination posting a short text summary to a chat webhook.
///
/// Meant for high-severity notifications, so the default minimum level is
/// `WARN`. Inactive unless the webhook URL is configured.
pub struct ChatWebhookDestination {
    client: Client,
    url: Option<String>,
    config: DestinationConfig,
}

impl ChatWebhookDestination {
    /// Build from the process environment (`LOG_WEBHOOK_*` keys).
    ///
    /// # Errors
    ///
    /// Fails on an invalid minimum-level string. A missing URL makes the
    /// destination inactive, not an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(super::config::env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(WEBHOOK_URL_ENV);
        let min_level =
            min_level_from("ChatWebhook", WEBHOOK_MIN_LEVEL_ENV, LogLevel::Warn, lookup)?;

        let active = url.is_some();
        Ok(Self {
            client: build_client("ChatWebhook")?,
            url,
            config: DestinationConfig::new("chat-webhook", active, min_level),
        })
    }

    /// Build with an explicit webhook URL.
    pub fn new(url: impl Into<String>, min_level: LogLevel) -> Result<Self> {
        Ok(Self {
            client: build_client("ChatWebhook")?,
            url: Some(url.into()),
            config: DestinationConfig::new("chat-webhook", true, min_level),
        })
    }

    /// One-line chat summary of a record.
    fn summarize(record: &FormattedRecord, level: LogLevel) -> String {
        let mut text = format!("*{}* {}", level.to_str(), record.message);
        if let Some(ref application) = record.application {
            text.push_str(&format!(" [{}]", application));
        }
        if let Some(ref exception) = record.exception {
            text.push_str(&format!(" :: {}", exception.render()));
        }
        text
    }
}

impl Destination for ChatWebhookDestination {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn is_active(&self) -> bool {
        self.config.active
    }

    fn min_level(&self) -> LogLevel {
        self.config.min_level
    }

    fn log(&self, record: &FormattedRecord, level: LogLevel) -> DeliveryHandle {
        let name = self.config.name.clone();

        if !level.is_permitted(self.config.min_level) {
            return DeliveryHandle::settled(name);
        }
        let Some(url) = self.url.clone() else {
            return DeliveryHandle::settled(name);
        };

        let message = WebhookMessage {
            text: Self::summarize(record, level),
        };
        let client = self.client.clone();
        let destination = name.clone();

        DeliveryHandle::spawn(name, async move {
            let response = client
                .post(&url)
                .json(&message)
                .send()
                .await
                .map_err(|e| LoggerError::delivery(&destination, e.to_string()))?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(LoggerError::delivery(
                    &destination,
                    format!("webhook responded with status {}", response.status()),
                ))
            }
        })
    }
}

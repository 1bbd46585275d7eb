//! HTTP log collector destination

use super::config::{
    min_level_from, DestinationConfig, COLLECTOR_API_KEY_ENV, COLLECTOR_MIN_LEVEL_ENV,
    COLLECTOR_URL_ENV,
};
use crate::core::{
    CallSite, Destination, DeliveryHandle, ExceptionDetail, FormattedRecord, LogLevel,
    LoggerError, Result, DELIVERY_TIMEOUT,
};
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;

/// Wire payload for the collector, derived purely from the record.
#[derive(Debug, Clone, Serialize)]
struct CollectorPayload {
    timestamp: String,
    level: &'static str,
    message: String,
    template: String,
    properties: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<ExceptionDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<String>,
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    context_id: Option<String>,
    #[serde(rename = "callSite", skip_serializing_if = "Option::is_none")]
    call_site: Option<CallSite>,
}

/// Destination POSTing each record as JSON to a log collector endpoint.
///
/// Inactive unless both the endpoint URL and the API key are configured.
/// Each delivery runs as a spawned task bounded by [`DELIVERY_TIMEOUT`];
/// failures are absorbed and never reach the logging caller.
pub struct HttpCollectorDestination {
    client: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
    config: DestinationConfig,
}

impl HttpCollectorDestination {
    /// Build from the process environment (`LOG_COLLECTOR_*` keys).
    ///
    /// # Errors
    ///
    /// Fails on an invalid minimum-level string or an unbuildable HTTP
    /// client. A missing endpoint or key is not an error; it makes the
    /// destination inactive.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(super::config::env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = lookup(COLLECTOR_URL_ENV);
        let api_key = lookup(COLLECTOR_API_KEY_ENV);
        let min_level =
            min_level_from("HttpCollector", COLLECTOR_MIN_LEVEL_ENV, LogLevel::Info, lookup)?;

        let active = endpoint.is_some() && api_key.is_some();
        Ok(Self {
            client: build_client("HttpCollector")?,
            endpoint,
            api_key,
            config: DestinationConfig::new("http-collector", active, min_level),
        })
    }

    /// Build with explicit endpoint and credentials.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        min_level: LogLevel,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client("HttpCollector")?,
            endpoint: Some(endpoint.into()),
            api_key: Some(api_key.into()),
            config: DestinationConfig::new("http-collector", true, min_level),
        })
    }

    fn map_record(&self, record: &FormattedRecord, level: LogLevel) -> CollectorPayload {
        CollectorPayload {
            timestamp: record.timestamp.to_rfc3339(),
            level: level.to_str(),
            message: record.message.clone(),
            template: record.template.clone(),
            properties: record.properties.clone(),
            exception: record.exception.clone(),
            application: record.application.clone(),
            version: record.version.clone(),
            environment: record.environment.clone(),
            context_id: record.context_id.clone(),
            call_site: record.call_site.clone(),
        }
    }
}

pub(crate) fn build_client(component: &str) -> Result<Client> {
    Client::builder()
        .timeout(DELIVERY_TIMEOUT)
        .build()
        .map_err(|e| LoggerError::config(component, e.to_string()))
}

impl Destination for HttpCollectorDestination {
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
        let Some(endpoint) = self.endpoint.clone() else {
            return DeliveryHandle::settled(name);
        };

        let payload = self.map_record(record, level);
        let client = self.client.clone();
        let api_key = self.api_key.clone();
        let destination = name.clone();

        DeliveryHandle::spawn(name, async move {
            let mut request = client.post(&endpoint).json(&payload);
            if let Some(key) = api_key {
                request = request.header("x-api-key", key);
            }

            let response = request
                .send()
                .await
                .map_err(|e| LoggerError::delivery(&destination, e.to_string()))?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(LoggerError::delivery(
                    &destination,
                    format!("collector responded with status {}", response.status()),
                ))
            }
        })
    }
}

pub mod structs;
#[cfg(test)]
pub mod fake;

use log::{debug, error, info};
use reqwest::header::{self, HeaderMap, HeaderValue};
use thiserror::Error;

use crate::config::HubConfig;
pub use structs::{HaEntity, NotificationPayload};

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Token is not usable as header value")]
    InvalidToken(#[from] header::InvalidHeaderValue),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Hub answered with HTTP {0}")]
    Status(u16),
}

/// The two calls made against the hub
#[allow(async_fn_in_trait)]
pub trait HubClient {
    async fn fetch_states(&self) -> Result<Vec<HaEntity>, HubError>;
    async fn send_notification(&self, channel: &str, payload: &NotificationPayload) -> Result<(), HubError>;
}

/// Home Assistant REST API client using a long-lived access token
#[derive(Debug, Clone)]
pub struct HaHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HaHttpClient {
    pub fn new(config: &HubConfig) -> Result<Self, HubError> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", config.token))?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        return Ok(HaHttpClient {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        });
    }
}

impl HubClient for HaHttpClient {
    async fn fetch_states(&self) -> Result<Vec<HaEntity>, HubError> {
        let url = format!("{}/api/states", self.base_url);
        debug!("Fetching states from {url}");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(HubError::Status(response.status().as_u16()));
        }
        let entities = response.json::<Vec<HaEntity>>().await?;
        return Ok(entities);
    }

    async fn send_notification(&self, channel: &str, payload: &NotificationPayload) -> Result<(), HubError> {
        let url = format!("{}/api/services/notify/{}", self.base_url, channel);
        debug!("Calling {url}");

        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(HubError::Status(response.status().as_u16()));
        }
        return Ok(());
    }
}

/// Reads all entity states. Errors are logged and yield an empty list, the
/// caller treats that as "nothing to do".
pub async fn get_all_entities<C: HubClient>(client: &C) -> Vec<HaEntity> {
    match client.fetch_states().await {
        Ok(entities) => {
            info!("Fetched {} entities from the hub", entities.len());
            entities
        }
        Err(e) => {
            error!("Error fetching entities: {e}");
            Vec::new()
        }
    }
}

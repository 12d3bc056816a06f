use reqwest::Client;

use super::ClientError;
use crate::models::itinerary::Itinerary;
use crate::models::trip::{GenerateTripRequest, SaveTripRequest, SaveTripResponse};

#[derive(Clone)]
pub struct ItineraryClient {
    client: Client,
    base_url: String,
}

impl ItineraryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn generate(&self, request: &GenerateTripRequest) -> Result<Itinerary, ClientError> {
        self.post_json("/api/generate-trip", request).await
    }

    /// Ask the backend to store a generated trip; returns the stored id.
    pub async fn save(&self, request: &SaveTripRequest) -> Result<String, ClientError> {
        let resp: SaveTripResponse = self.post_json("/api/save-trip", request).await?;
        if resp.success && !resp.id.is_empty() {
            Ok(resp.id)
        } else {
            Err(ClientError::Connectivity)
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Request to {} failed: {}", path, e);
                ClientError::Connectivity
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            log::warn!("{} returned {}: {}", path, status, text);
            return Err(ClientError::Connectivity);
        }

        resp.json::<T>().await.map_err(|e| {
            log::warn!("Could not decode response from {}: {}", path, e);
            ClientError::Connectivity
        })
    }
}

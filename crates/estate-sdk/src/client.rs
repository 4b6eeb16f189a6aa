//! Estate SDK client.

use estate_core::models::{DronePlan, Estate, EstateStats, NewEstate, NewTree, StoredPlan};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(err) => err.status(),
            Self::Api { status, .. } => Some(*status),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for connecting to the estate server.
#[derive(Clone)]
pub struct EstateClient {
    base_url: String,
    client: reqwest::Client,
}

impl EstateClient {
    /// Create a new client for `base_url` (e.g. "http://localhost:3000").
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an estate and return its id.
    pub async fn create_estate(&self, width: i64, length: i64) -> ClientResult<String> {
        let url = format!("{}/estate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&NewEstate { width, length })
            .send()
            .await?;
        let body: IdResponse = decode(response).await?;
        tracing::debug!(estate_id = %body.id, "Created estate");
        Ok(body.id)
    }

    pub async fn get_estate(&self, estate_id: &str) -> ClientResult<Estate> {
        let url = format!("{}/estate/{}", self.base_url, estate_id);
        decode(self.client.get(&url).send().await?).await
    }

    /// Plant a tree and return its id.
    pub async fn plant_tree(
        &self,
        estate_id: &str,
        x: i64,
        y: i64,
        height: i64,
    ) -> ClientResult<String> {
        let url = format!("{}/estate/{}/tree", self.base_url, estate_id);
        let response = self
            .client
            .post(&url)
            .json(&NewTree { x, y, height })
            .send()
            .await?;
        let body: IdResponse = decode(response).await?;
        Ok(body.id)
    }

    pub async fn stats(&self, estate_id: &str) -> ClientResult<EstateStats> {
        let url = format!("{}/estate/{}/stats", self.base_url, estate_id);
        decode(self.client.get(&url).send().await?).await
    }

    /// Survey distance, optionally limited by a distance budget.
    pub async fn drone_plan(
        &self,
        estate_id: &str,
        max_distance: Option<u64>,
    ) -> ClientResult<DronePlan> {
        let url = format!("{}/estate/{}/drone-plan", self.base_url, estate_id);
        let mut request = self.client.get(&url);
        if let Some(max_distance) = max_distance {
            request = request.query(&[("max_distance", max_distance)]);
        }
        decode(request.send().await?).await
    }

    /// Ask the server to recompute and store the survey distance.
    pub async fn refresh_drone_plan(&self, estate_id: &str) -> ClientResult<StoredPlan> {
        let url = format!("{}/estate/{}/drone-plan", self.base_url, estate_id);
        decode(self.client.post(&url).send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = EstateClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn api_error_exposes_status() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "estate not found: x".into(),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("404"));
    }
}

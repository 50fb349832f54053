//! # trivia-client — Typed client for the trivia retrieval API
//!
//! The playback screen's path to its data. Wraps:
//!
//! - `GET /api/trivia`: filtered, shuffled items for a selection
//! - `GET /api/countries`: countries offered on the selection screen
//! - `GET /api/periods`: periods offered on the selection screen
//!
//! Every failure (transport, non-2xx, undecodable body) is a typed
//! [`ClientError`]; callers decide how to surface it. An empty item list
//! is a successful response.

pub mod error;

pub use error::ClientError;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use trivia_core::{SessionSelection, TriviaItem};
use url::Url;

/// Connection settings for [`TriviaClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the trivia API, e.g. `http://127.0.0.1:8080/`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Parse `base_url`, normalising it to end in `/` so relative endpoint
    /// paths join beneath it.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            timeout_secs: 10,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    items: Vec<TriviaItem>,
}

#[derive(Debug, Deserialize)]
struct CountriesResponse {
    countries: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PeriodsResponse {
    periods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for the trivia API.
#[derive(Debug, Clone)]
pub struct TriviaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TriviaClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the items for a selection, capped to its question count.
    ///
    /// Calls `GET {base_url}api/trivia?country=..&period=..&count=..`.
    pub async fn fetch(&self, selection: &SessionSelection) -> Result<Vec<TriviaItem>, ClientError> {
        let mut url = self.endpoint_url("api/trivia")?;
        url.set_query(Some(&selection.to_query_string()));
        let resp: ItemsResponse = self.get_json("GET /api/trivia", url).await?;
        tracing::debug!(count = resp.items.len(), "fetched trivia items");
        Ok(resp.items)
    }

    /// Fetch items matching any of several countries.
    ///
    /// Calls `GET {base_url}api/trivia?countries=a,b&period=..`.
    pub async fn fetch_countries(
        &self,
        countries: &[&str],
        period: Option<&str>,
    ) -> Result<Vec<TriviaItem>, ClientError> {
        let mut url = self.endpoint_url("api/trivia")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("countries", &countries.join(","));
            if let Some(period) = period {
                pairs.append_pair("period", period);
            }
        }
        let resp: ItemsResponse = self.get_json("GET /api/trivia", url).await?;
        Ok(resp.items)
    }

    /// Calls `GET {base_url}api/countries`.
    pub async fn countries(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint_url("api/countries")?;
        let resp: CountriesResponse = self.get_json("GET /api/countries", url).await?;
        Ok(resp.countries)
    }

    /// Calls `GET {base_url}api/periods[?country=..]`.
    pub async fn periods(&self, country: Option<&str>) -> Result<Vec<String>, ClientError> {
        let mut url = self.endpoint_url("api/periods")?;
        if let Some(country) = country {
            url.query_pairs_mut().append_pair("country", country);
        }
        let resp: PeriodsResponse = self.get_json("GET /api/periods", url).await?;
        Ok(resp.periods)
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: Url) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ClientError::Api {
                endpoint: endpoint.into(),
                status,
                message,
            });
        }

        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_appends_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8080/trivia").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/trivia/");
        let joined = config.base_url.join("api/trivia").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:8080/trivia/api/trivia");
    }

    #[test]
    fn config_rejects_garbage() {
        let err = ClientConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }
}

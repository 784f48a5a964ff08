//! HTTP client for the ComplyForm backend
//!
//! [`ApiClient`] wraps a `reqwest::Client` and knows how to build endpoint
//! URLs, attach query parameters and turn non-2xx responses into
//! [`ClientError::Api`]. Resource methods live in [`crate::endpoints`].

use crate::config::Settings;
use crate::error::{ClientError, ClientResult};
use complyform_domain::QueryParams;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

// ============================================================================
// API Client
// ============================================================================

/// Type-safe HTTP client for the backend REST API
///
/// Cloning is cheap; clones share the connection pool.
///
/// # Example
///
/// ```rust,ignore
/// let client = ApiClient::from_settings(&Settings::load()?)?;
/// let rules = client.list_compliance_rules().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    /// Address plus version prefix, without a trailing slash
    base_url: String,
}

impl ApiClient {
    /// Create a client from settings
    pub fn from_settings(settings: &Settings) -> ClientResult<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Self::with_client(client, settings.api_base())
    }

    /// Create a client for a base URL with default options
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    fn with_client(client: Client, base_url: impl Into<String>) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Base URL of every endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for an endpoint path and query
    pub fn url(&self, path: &str, query: &QueryParams) -> ClientResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    // ========================================================================
    // Generic request helpers
    // ========================================================================

    fn request(&self, method: Method, path: &str, query: &QueryParams) -> ClientResult<RequestBuilder> {
        let url = self.url(path, query)?;
        tracing::debug!(%method, path, params = query.pairs().len(), "API request");
        Ok(self.client.request(method, url))
    }

    /// Send a GET request and deserialise the response
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get_query(path, &QueryParams::new()).await
    }

    /// Send a GET request with query parameters
    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> ClientResult<T> {
        let response = self.request(Method::GET, path, query)?.send().await?;
        handle_response(response).await
    }

    /// Send a POST request with a JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.post_query(path, &QueryParams::new(), body).await
    }

    /// Send a POST request with query parameters and a JSON body
    pub(crate) async fn post_query<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &QueryParams,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .request(Method::POST, path, query)?
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Send a PUT request with a JSON body
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .request(Method::PUT, path, &QueryParams::new())?
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Send a DELETE request; the response body is ignored
    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self
            .request(Method::DELETE, path, &QueryParams::new())?
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_body(status.as_u16(), &body))
        }
    }
}

/// Check for errors and deserialise on success
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
    } else {
        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_body(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %err, "API returned an error");
        Err(err)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("http://127.0.0.1:8000/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/api/v1");

        let query = QueryParams::new().text("jurisdiction", "MD").number("min_value", "100000");
        let url = client.url("/opportunities/search", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/api/v1/opportunities/search?jurisdiction=MD&min_value=100000"
        );

        let url = client.url("/bids/", &QueryParams::new()).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/bids/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_from_settings() {
        let client = ApiClient::from_settings(&Settings::default()).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/api/v1");
    }
}

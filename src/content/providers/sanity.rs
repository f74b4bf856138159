//! Remote query API provider.
//!
//! Issues `GET https://<project>.api[cdn].sanity.io/v<version>/data/query/<dataset>`
//! with the GROQ text in `query` and each parameter as `$name=<json>`.
//! The response envelope is `{ "result": … }`. Stateless; cheap to clone
//! because `reqwest::Client` is an `Arc` internally.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::content::{ContentError, Query};

#[derive(Debug, Clone)]
pub struct SanityProvider {
    client: Client,
    endpoint: Url,
}

impl SanityProvider {
    pub fn new(
        project_id: &str,
        dataset: &str,
        api_version: &str,
        use_cdn: bool,
        timeout_seconds: u64,
    ) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ContentError::Request(format!("failed to build HTTP client: {e}")))?;
        let endpoint = query_endpoint(project_id, dataset, api_version, use_cdn)?;
        Ok(Self { client, endpoint })
    }

    /// Send queries to another endpoint (a local stub in tests).
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for `query`, parameters included.
    pub fn request_url(&self, query: &Query) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.groq());
            for (name, value) in query.params() {
                pairs.append_pair(&format!("${name}"), &value.to_string());
            }
        }
        url
    }

    pub async fn query(&self, query: &Query) -> Result<Value, ContentError> {
        let url = self.request_url(query);
        debug!(query = query.name(), "sending content query");

        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            error!(query = query.name(), error = %e, "content request failed (transport)");
            ContentError::Request(e.to_string())
        })?;

        let response = check_status(response).await?;

        let envelope = response
            .json::<QueryResponse>()
            .await
            .map_err(|e| ContentError::Decode(format!("failed to parse response body: {}", e.without_url())))?;

        debug!(query = query.name(), ms = ?envelope.ms, "content query answered");
        Ok(envelope.result)
    }
}

fn query_endpoint(
    project_id: &str,
    dataset: &str,
    api_version: &str,
    use_cdn: bool,
) -> Result<Url, ContentError> {
    let host = if use_cdn { "apicdn" } else { "api" };
    let version = api_version.trim_start_matches('v');
    Url::parse(&format!(
        "https://{project_id}.{host}.sanity.io/v{version}/data/query/{dataset}"
    ))
    .map_err(|e| ContentError::Request(format!("invalid content endpoint: {e}")))
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    description: Option<String>,
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ContentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let body = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope { error: ErrorBody { description: Some(description) } }) => description,
        _ => body,
    };

    error!(%status, %body, "content store returned HTTP error");
    Err(ContentError::Status { status: status.as_u16(), body })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(use_cdn: bool) -> SanityProvider {
        SanityProvider::new("0r5zwpua", "fellows", "2024-01-01", use_cdn, 5).unwrap()
    }

    #[test]
    fn cdn_and_live_hosts() {
        assert_eq!(
            provider(true).endpoint().as_str(),
            "https://0r5zwpua.apicdn.sanity.io/v2024-01-01/data/query/fellows"
        );
        assert_eq!(provider(false).endpoint().host_str(), Some("0r5zwpua.api.sanity.io"));
    }

    #[test]
    fn version_prefix_is_not_doubled() {
        let p = SanityProvider::new("p", "d", "v2021-10-21", false, 5).unwrap();
        assert!(p.endpoint().path().starts_with("/v2021-10-21/"));
    }

    #[test]
    fn params_are_json_encoded() {
        let url = provider(true).request_url(&Query::PersonBySlug { slug: "ada-lovelace".into() });
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.iter().any(|(k, _)| k == "query"));
        assert!(pairs.contains(&("$slug".to_string(), "\"ada-lovelace\"".to_string())));
    }

    #[test]
    fn unparameterised_query_sends_only_text() {
        let url = provider(true).request_url(&Query::AllPeople);
        assert_eq!(url.query_pairs().count(), 1);
    }

    #[tokio::test]
    async fn unreachable_store_is_request_error() {
        let mut p = provider(false);
        p.endpoint = Url::parse("http://127.0.0.1:9/v1/data/query/x").unwrap();
        let err = p.query(&Query::AllPeople).await.unwrap_err();
        assert!(matches!(err, ContentError::Request(_)));
    }

    #[tokio::test]
    async fn transport_error_omits_request_url() {
        let p = provider(false).with_endpoint(Url::parse("http://127.0.0.1:9/v1/data/query/x").unwrap());
        let err = p.query(&Query::PersonBySlug { slug: "ada-lovelace".into() }).await.unwrap_err();
        let text = err.to_string();
        assert!(!text.contains("127.0.0.1:9"), "{text}");
        assert!(!text.contains("ada-lovelace"), "{text}");
    }
}

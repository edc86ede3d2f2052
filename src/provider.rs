use crate::config::FetchConfig;
use crate::query::Query;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

/// The two remote calls a fetch makes.
pub trait DataSource {
    async fn query(self: &Self, query: &Query) -> Result<Value>;

    async fn fetch_image(self: &Self, url: &str) -> Result<Vec<u8>>;
}

pub struct SageClient {
    client: Client,
    endpoint: Url,
    retries: u32,
}

impl SageClient {
    pub fn new(client: Client, endpoint: Url, retries: u32) -> Self {
        Self {
            client,
            endpoint,
            retries,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Unable to build HTTP client")?;
        Ok(Self::new(client, endpoint, config.retries))
    }

    /// Sends the request, re-issuing it up to `self.retries` more times on a
    /// network error or non-success status.
    async fn send(self: &Self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let mut attempt = 0;
        loop {
            let req = request
                .try_clone()
                .context("Unable to clone request")?;
            let result = self
                .client
                .execute(req)
                .await
                .and_then(|r| r.error_for_status());
            match result {
                Ok(response) => return Ok(response),
                Err(err) if attempt < self.retries => {
                    attempt += 1;
                    log::warn!("Request failed ({err}), retry {attempt} of {}", self.retries);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl DataSource for SageClient {
    async fn query(self: &Self, query: &Query) -> Result<Value> {
        log::debug!("POST {} {:?}", self.endpoint, query);
        let request = self.client.post(self.endpoint.clone()).json(query);
        let response = self
            .send(request)
            .await
            .with_context(|| format!("Query to {} failed", self.endpoint))?;
        let data: Value = response
            .json()
            .await
            .context("Query response is not valid JSON")?;
        Ok(data)
    }

    async fn fetch_image(self: &Self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);
        let request = self.client.get(url);
        let response = self
            .send(request)
            .await
            .with_context(|| format!("Image download from {} failed", url))?;
        let bytes = response.bytes().await?.to_vec();
        log::info!("Downloaded {} bytes", bytes.len());
        Ok(bytes)
    }
}

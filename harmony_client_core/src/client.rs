//! HTTP implementation of [`HarmonyApi`]
//!
//! A thin `reqwest` wrapper: one request per call, no retries and no caching.
//! Timeouts and TLS are left to `reqwest`.

use crate::api::HarmonyApi;
use crate::error::{Error, Result, UpstreamError, ValidationError};
use crate::models::{Container, EnabledUpdate, Envelope, Machine, NewContainer};
use async_trait::async_trait;
use log::{debug, trace, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Harmony client configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    /// Base address of the maestro, e.g. `https://maestro.example.com`
    pub api_host: String,
    /// API version path segment
    pub api_version: String,
    /// Verify the server's TLS certificate
    pub verify_ssl: bool,
    /// Whole-request timeout
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_host: format!("http://{}", crate::DEFAULT_API_HOST),
            api_version: crate::DEFAULT_API_VERSION.to_string(),
            verify_ssl: true,
            timeout_seconds: 30,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a specific host, everything else default
    pub fn for_host(api_host: &str) -> Self {
        Self {
            api_host: api_host.to_string(),
            ..Self::default()
        }
    }

    /// Resolve `api_host` + `api_version` into the base URL for every call.
    ///
    /// A bare `host:port` is treated as plain http.
    pub fn base_url(&self) -> Result<Url> {
        let host = self.api_host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ValidationError::invalid_configuration("harmony API host is empty").into());
        }

        let with_scheme = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };

        let url = Url::parse(&format!(
            "{with_scheme}/{}/",
            self.api_version.trim_matches('/')
        ))
        .map_err(|e| {
            ValidationError::invalid_configuration(&format!(
                "Failed connecting to the maestro: invalid API host '{}': {e}",
                self.api_host
            ))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ValidationError::invalid_configuration(&format!(
                "Failed connecting to the maestro: unsupported scheme '{other}'"
            ))
            .into()),
        }
    }
}

/// REST client for the Harmony API
#[derive(Debug, Clone)]
pub struct HarmonyClient {
    http: Client,
    base_url: Url,
}

impl HarmonyClient {
    /// Build a client. No request is sent until the first operation.
    pub fn new(config: ClientConfig) -> Result<Self> {
        debug!("Creating Harmony client with config: {config:?}");
        let base_url = config.base_url()?;

        if !config.verify_ssl {
            warn!("TLS certificate verification is disabled for {base_url}");
        }

        let http = Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("baton/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ValidationError::invalid_configuration(&format!(
                    "Failed connecting to the maestro: {e}"
                ))
            })?;

        Ok(Self { http, base_url })
    }

    /// The resolved base URL (host + version)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ValidationError::invalid_configuration(&format!(
                    "'{}' cannot be used as a base URL",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{method} {url}");
        Ok(self.http.request(method, url))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("Request to the maestro failed: {e}");
            UpstreamError::transport(e.to_string())
        })?;
        trace!("Response status: {}", response.status());
        Ok(response)
    }

    async fn fail(response: Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.trim().to_string()
        };
        UpstreamError::server_error(status, &message).into()
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::decode(e.to_string()))?;
        Ok(envelope.data)
    }

    /// GET returning a required payload
    async fn get_required<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.send(self.request(Method::GET, segments)?).await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Self::decode(response)
            .await?
            .ok_or_else(|| UpstreamError::decode("response carried no data").into())
    }

    /// GET where a 404 (or empty data) means "no such entity"
    async fn get_optional<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Option<T>> {
        // An empty id would address the collection itself
        if segments.last().is_some_and(|id| id.is_empty()) {
            debug!("Empty id for {}, nothing to look up", segments.join("/"));
            return Ok(None);
        }

        let response = self.send(self.request(Method::GET, segments)?).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("{} not found", segments.join("/"));
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Self::decode(response).await
    }

    /// GET on a collection filtered by name, first match wins
    async fn find_by_name<T: DeserializeOwned>(
        &self,
        collection: &str,
        name: &str,
    ) -> Result<Option<T>> {
        let request = self
            .request(Method::GET, &[collection])?
            .query(&[("name", name)]);
        let response = self.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        let matches: Vec<T> = Self::decode(response).await?.unwrap_or_default();
        Ok(matches.into_iter().next())
    }
}

#[async_trait]
impl HarmonyApi for HarmonyClient {
    async fn containers_add(&self, container: &NewContainer) -> Result<Container> {
        let request = self.request(Method::POST, &["containers"])?.json(container);
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Self::decode(response)
            .await?
            .ok_or_else(|| UpstreamError::decode("created container missing from response").into())
    }

    async fn containers(&self) -> Result<Vec<Container>> {
        self.get_required(&["containers"]).await
    }

    async fn container(&self, id: &str) -> Result<Option<Container>> {
        self.get_optional(&["containers", id]).await
    }

    async fn container_by_name(&self, name: &str) -> Result<Option<Container>> {
        self.find_by_name("containers", name).await
    }

    async fn containers_enabled_update(&self, id: &str, enabled: bool) -> Result<()> {
        let request = self
            .request(Method::PUT, &["containers", id, "enabled"])?
            .json(&EnabledUpdate { enabled });
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Ok(())
    }

    async fn machines(&self) -> Result<Vec<Machine>> {
        self.get_required(&["machines"]).await
    }

    async fn machine(&self, id: &str) -> Result<Option<Machine>> {
        self.get_optional(&["machines", id]).await
    }

    async fn machine_by_name(&self, name: &str) -> Result<Option<Machine>> {
        self.find_by_name("machines", name).await
    }
}

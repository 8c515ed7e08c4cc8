//! HTTP client for the Nexus docker registry API.
//!
//! Nexus exposes the Docker Registry v2 API of each docker repository under
//! `{host}/repository/{name}/v2/`. This client covers the handful of
//! endpoints the CLI needs: catalog, tag list, manifest fetch and manifest
//! deletion.

use crate::auth::Credentials;
use crate::error::{NexusError, Result};
use crate::manifest::{DOCKER_MANIFEST_V2, ManifestDescriptor};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

#[cfg(test)]
mod tests;

/// Response from the catalog API endpoint.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    repositories: Vec<String>,
}

/// Response from the tags list API endpoint.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    name: String,
    /// Registries answer `null` for a repository without tags
    tags: Option<Vec<String>>,
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libnexus::client::ClientConfig;
///
/// let config = ClientConfig::new().with_timeout(60);
/// assert_eq!(config.timeout_seconds, 60);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Maximum idle connections per host (default: 10)
    pub max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }
}

/// HTTP client bound to one Nexus docker repository.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: ReqwestClient,
    /// Repository base URL, e.g. `http://nexus:8081/repository/docker`
    base_url: String,
    credentials: Credentials,
    timeout_seconds: u64,
}

impl Client {
    /// Creates an anonymous client with default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::client::Client;
    ///
    /// let client = Client::new("nexus:8081/repository/docker/").unwrap();
    /// assert_eq!(client.base_url(), "http://nexus:8081/repository/docker");
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Creates an anonymous client with custom configuration.
    pub fn with_config(base_url: &str, config: ClientConfig) -> Result<Self> {
        let base_url = Self::normalize_url(base_url)?;

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| NexusError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            base_url,
            credentials: Credentials::Anonymous,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Sends `credentials` with every subsequent request.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Ensures the URL has a scheme and no trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        if url.is_empty() {
            return Err(NexusError::validation("Registry URL cannot be empty"));
        }

        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };

        Ok(url.trim_end_matches('/').to_string())
    }

    /// Returns the repository base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Lists every image in the repository, following pagination links.
    pub async fn fetch_catalog(&self) -> Result<Vec<String>> {
        let mut images = Vec::new();
        let mut url = format!("{}/v2/_catalog", self.base_url);

        loop {
            let response = self.send(self.http_client.get(&url), &url).await?;
            let next = self.next_page_url(response.headers());
            let response = Self::check_response_status(response).await?;

            let catalog: CatalogResponse = response.json().await.map_err(|e| {
                NexusError::validation_with_source("Failed to parse catalog response", e)
            })?;
            images.extend(catalog.repositories);

            match next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(images)
    }

    /// Lists every tag of `image`, following pagination links.
    pub async fn fetch_tags(&self, image: &str) -> Result<Vec<String>> {
        let mut tags = Vec::new();
        let mut url = format!("{}/v2/{}/tags/list", self.base_url, image);

        loop {
            let response = self.send(self.http_client.get(&url), &url).await?;
            let next = self.next_page_url(response.headers());
            let response = Self::check_response_status(response).await?;

            let page: TagsResponse = response.json().await.map_err(|e| {
                NexusError::validation_with_source("Failed to parse tags response", e)
            })?;

            if page.name != image {
                return Err(NexusError::validation(format!(
                    "Registry returned tags for '{}' but expected '{}'",
                    page.name, image
                )));
            }
            tags.extend(page.tags.unwrap_or_default());

            match next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(tags)
    }

    /// Fetches and parses the schema 2 manifest of `image:reference`.
    pub async fn fetch_manifest(&self, image: &str, reference: &str) -> Result<ManifestDescriptor> {
        let url = self.manifest_url(image, reference);
        let request = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, DOCKER_MANIFEST_V2);

        let response = self.send(request, &url).await?;
        let response = Self::check_response_status(response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| NexusError::network_with_source("Failed to read manifest response", e))?;

        ManifestDescriptor::from_bytes(&bytes)
    }

    /// Resolves `image:reference` to its manifest digest with a HEAD request.
    pub async fn fetch_manifest_digest(&self, image: &str, reference: &str) -> Result<String> {
        let url = self.manifest_url(image, reference);
        let request = self
            .http_client
            .head(&url)
            .header(reqwest::header::ACCEPT, DOCKER_MANIFEST_V2);

        let response = self.send(request, &url).await?;
        let response = Self::check_response_status(response).await?;

        response
            .headers()
            .get("Docker-Content-Digest")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .ok_or_else(|| NexusError::validation("Response missing Docker-Content-Digest header"))
    }

    /// Deletes the manifest `digest` of `image`.
    pub async fn delete_manifest(&self, image: &str, digest: &str) -> Result<()> {
        let url = self.manifest_url(image, digest);
        let response = self.send(self.http_client.delete(&url), &url).await?;
        Self::check_response_status(response).await?;
        Ok(())
    }

    fn manifest_url(&self, image: &str, reference: &str) -> String {
        format!("{}/v2/{}/manifests/{}", self.base_url, image, reference)
    }

    /// Adds authentication and sends the request.
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        let request = match self.credentials.to_header_value() {
            Some(header) => request.header(reqwest::header::AUTHORIZATION, header),
            None => request,
        };

        tracing::debug!(url, "registry request");
        request
            .send()
            .await
            .map_err(|e| self.translate_reqwest_error(e))
    }

    /// Resolves the `rel="next"` entry of a Link header against the base URL.
    fn next_page_url(&self, headers: &reqwest::header::HeaderMap) -> Option<String> {
        let path = Self::extract_next_link(headers)?;

        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path);
        }
        if path.starts_with("/v2/") {
            return Some(format!("{}{}", self.base_url, path));
        }

        // absolute path on the Nexus host, e.g. /repository/docker/v2/...
        let base = Url::parse(&self.base_url).ok()?;
        base.join(&path).ok().map(|url| url.to_string())
    }

    /// Extracts the next page target from the Link header.
    ///
    /// Format: `</v2/_catalog?n=100&last=repo99>; rel="next"`
    fn extract_next_link(headers: &reqwest::header::HeaderMap) -> Option<String> {
        let link_str = headers.get(reqwest::header::LINK)?.to_str().ok()?;

        for link_part in link_str.split(',') {
            let link_part = link_part.trim();

            if link_part.contains("rel=\"next\"") || link_part.contains("rel='next'") {
                if let Some(start) = link_part.find('<')
                    && let Some(end) = link_part.find('>')
                {
                    return Some(link_part[start + 1..end].to_string());
                }
            }
        }

        None
    }

    /// Translates a reqwest error into a NexusError.
    fn translate_reqwest_error(&self, error: reqwest::Error) -> NexusError {
        if error.is_timeout() {
            NexusError::network(format!(
                "Request to {} timed out after {} seconds",
                self.base_url, self.timeout_seconds
            ))
        } else if error.is_connect() {
            NexusError::network_with_source(
                format!("Failed to connect to registry at {}", self.base_url),
                error,
            )
        } else {
            NexusError::network_with_source(
                format!("Network error communicating with {}", self.base_url),
                error,
            )
        }
    }

    /// Checks the HTTP response status and translates errors to NexusError.
    async fn check_response_status(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("(unable to read response body)"));

        match status {
            StatusCode::UNAUTHORIZED => Err(NexusError::authentication(
                format!("Authentication required for {}: {}", url, error_body),
                Some(401),
            )),
            StatusCode::FORBIDDEN => Err(NexusError::authentication(
                format!("Access forbidden for {}: {}", url, error_body),
                Some(403),
            )),
            StatusCode::NOT_FOUND => Err(NexusError::not_found("endpoint", url.as_str())),
            status if status.is_server_error() => Err(NexusError::server(
                format!("Server error from {}: {}", url, error_body),
                status.as_u16(),
            )),
            _ => Err(NexusError::network(format!(
                "HTTP {} from {}: {}",
                status.as_u16(),
                url,
                error_body
            ))),
        }
    }
}

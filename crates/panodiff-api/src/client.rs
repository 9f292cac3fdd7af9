// Hand-crafted async HTTP client for the Panorama XML API.
//
// Endpoint: GET https://{host}/api
// Auth: X-PAN-KEY header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Which configuration snapshot to request from the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// The pending, not-yet-committed configuration.
    Candidate,
    /// The currently active, committed configuration.
    Running,
}

impl ConfigKind {
    /// The operational command string for this snapshot.
    pub fn cmd(self) -> &'static str {
        match self {
            Self::Candidate => "<show><config><candidate/></config></show>",
            Self::Running => "<show><config><running/></config></show>",
        }
    }

    /// Short label used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Running => "running",
        }
    }
}

/// Async client for the Panorama XML API.
///
/// Uses API-key authentication; every request carries the `X-PAN-KEY`
/// header injected at construction time.
pub struct PanoramaClient {
    http: reqwest::Client,
    api_url: Url,
}

impl PanoramaClient {
    /// Build from a host (or full base URL), API key, and transport config.
    ///
    /// A bare host like `panorama.example.com` is normalized to
    /// `https://panorama.example.com`; a full URL is used as given, which
    /// keeps plain-HTTP test servers reachable.
    pub fn from_api_key(
        host: &str,
        api_key: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| Error::InvalidApiKey)?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("X-PAN-KEY", key_value);

        let http = transport.build_client(headers)?;
        let api_url = Self::normalize_api_url(host)?;

        Ok(Self { http, api_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(host: &str, http: reqwest::Client) -> Result<Self, Error> {
        let api_url = Self::normalize_api_url(host)?;
        Ok(Self { http, api_url })
    }

    /// The resolved `/api` endpoint URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Build the `{base}/api` endpoint URL from a host or base URL.
    fn normalize_api_url(raw: &str) -> Result<Url, Error> {
        let base = if raw.contains("://") {
            raw.to_owned()
        } else {
            format!("https://{raw}")
        };
        let mut url = Url::parse(&base)?;

        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/api"));

        Ok(url)
    }

    /// Fetch one configuration snapshot as raw XML text.
    ///
    /// Issues `GET {base}/api?type=op&cmd=…`. Non-2xx responses map to
    /// [`Error::InvalidApiKey`] (401/403) or [`Error::Api`]; connection
    /// failures and the request timeout surface as [`Error::Transport`].
    pub async fn show_config(&self, kind: ConfigKind) -> Result<String, Error> {
        let params = [("type", "op"), ("cmd", kind.cmd())];
        info!(config = kind.label(), cmd = kind.cmd(), "fetching configuration");

        let resp = self
            .http
            .get(self.api_url.clone())
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::InvalidApiKey);
        }

        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let preview: String = body.chars().take(100).collect();
        debug!(status = status.as_u16(), "response body: {preview}...");

        Ok(body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https_scheme() {
        let url = PanoramaClient::normalize_api_url("panorama.example.com").unwrap();
        assert_eq!(url.as_str(), "https://panorama.example.com/api");
    }

    #[test]
    fn full_url_is_kept() {
        let url = PanoramaClient::normalize_api_url("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api");
    }

    #[test]
    fn trailing_slash_does_not_double_path() {
        let url = PanoramaClient::normalize_api_url("https://pano.local/").unwrap();
        assert_eq!(url.as_str(), "https://pano.local/api");
    }

    #[test]
    fn cmd_strings_match_panorama_op_syntax() {
        assert_eq!(
            ConfigKind::Candidate.cmd(),
            "<show><config><candidate/></config></show>"
        );
        assert_eq!(
            ConfigKind::Running.cmd(),
            "<show><config><running/></config></show>"
        );
    }
}

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::error::Result;

pub const TOKEN_HEADER: &str = "X-Figma-Token";
pub const SUCCESS_STATUS: u16 = 200;

/// Status and body of a completed versions request.
///
/// The body is only read for rejections; a 200 carries an empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionsResponse {
    pub status: u16,
    pub body: String,
}

/// Issues the authenticated `GET /v1/files/{file_id}/versions` call.
///
/// Returning `Ok` means a status line came back, whatever the status; `Err` is
/// reserved for transport failures.
#[async_trait]
pub trait VersionsTransport: Send + Sync {
    async fn get_versions(&self, token: &str, file_id: &str) -> Result<VersionsResponse>;
}

pub struct FigmaClient {
    client: Client,
    api_url: String,
}

impl FigmaClient {
    pub fn new(api_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn versions_url(&self, file_id: &str) -> String {
        format!("{}/v1/files/{}/versions", self.api_url, file_id)
    }
}

#[async_trait]
impl VersionsTransport for FigmaClient {
    async fn get_versions(&self, token: &str, file_id: &str) -> Result<VersionsResponse> {
        let url = self.versions_url(file_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, token)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status == SUCCESS_STATUS {
            debug!("Received {}", status);
            return Ok(VersionsResponse { status, body: String::new() });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        debug!("Received {} ({} bytes)", status, body.len());

        Ok(VersionsResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_url_interpolates_file_id() {
        let client = FigmaClient::new("https://api.figma.com").unwrap();
        assert_eq!(
            client.versions_url("abc123"),
            "https://api.figma.com/v1/files/abc123/versions"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        let client = FigmaClient::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(
            client.versions_url("f"),
            "http://127.0.0.1:8080/v1/files/f/versions"
        );
    }
}

//! Figma API credential probe.
//!
//! Resolves an access token and file id (direct arguments first, then the
//! settings file), issues one `GET /v1/files/{file_id}/versions` request and
//! reports the result on stdout.

pub mod client;
pub mod config;
pub mod env_file;
pub mod error;

use std::fmt;
use tracing::{info, warn};

use client::{FigmaClient, VersionsTransport, SUCCESS_STATUS};
use config::{Credentials, ProbeConfig};
use env_file::{load_settings, EnvFileLocator};
use error::{ProbeError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    /// Settings file absent, or token/file id still empty after the lookup.
    ConfigurationMissing(String),
    ConfigurationUnreadable(String),
    TransportFailure(String),
    /// The request completed with a non-200 status. `body` is the response
    /// rendered for display.
    RemoteRejection { status: u16, body: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success => write!(f, "✓ API access succeeded"),
            ProbeOutcome::ConfigurationMissing(reason) => write!(f, "✗ {reason}"),
            ProbeOutcome::ConfigurationUnreadable(reason) => {
                write!(f, "✗ Failed to read settings file: {reason}")
            }
            ProbeOutcome::TransportFailure(reason) => write!(f, "✗ Request failed: {reason}"),
            ProbeOutcome::RemoteRejection { status, body } => {
                write!(f, "✗ API error ({status}): {body}")
            }
        }
    }
}

impl From<ProbeError> for ProbeOutcome {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::SettingsMissing(path) => ProbeOutcome::ConfigurationMissing(format!(
                "Settings file not found: {}",
                path.display()
            )),
            ProbeError::CredentialsMissing => {
                ProbeOutcome::ConfigurationMissing("Access token or file id missing".to_string())
            }
            err @ (ProbeError::SettingsUnreadable { .. } | ProbeError::CurrentDir(_)) => {
                ProbeOutcome::ConfigurationUnreadable(err.to_string())
            }
            ProbeError::Request(e) => ProbeOutcome::TransportFailure(e.to_string()),
            ProbeError::Transport(reason) => ProbeOutcome::TransportFailure(reason),
        }
    }
}

/// Pretty JSON when the body parses, the raw text otherwise.
pub fn render_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

pub struct CredentialProbe<T = FigmaClient> {
    transport: T,
    env_file: EnvFileLocator,
}

impl CredentialProbe<FigmaClient> {
    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let transport = FigmaClient::new(&config.api_url)?;
        Ok(Self::new(transport, config.env_file.clone()))
    }
}

impl<T: VersionsTransport> CredentialProbe<T> {
    pub fn new(transport: T, env_file: EnvFileLocator) -> Self {
        Self { transport, env_file }
    }

    pub async fn probe(&self, token: Option<&str>, file_id: Option<&str>) -> bool {
        self.probe_with_outcome(token, file_id).await.is_success()
    }

    /// Run one probe and print a status line at each decision point.
    pub async fn probe_with_outcome(&self, token: Option<&str>, file_id: Option<&str>) -> ProbeOutcome {
        let outcome = self.run(Credentials::new(token, file_id)).await;

        match &outcome {
            ProbeOutcome::Success => info!("Figma API probe succeeded"),
            other => warn!("Figma API probe failed: {:?}", other),
        }
        println!("{outcome}");

        outcome
    }

    async fn run(&self, credentials: Credentials) -> ProbeOutcome {
        let credentials = match self.resolve_credentials(credentials) {
            Ok(credentials) => credentials,
            Err(e) => return e.into(),
        };
        let Some((token, file_id)) = credentials.resolved() else {
            return ProbeError::CredentialsMissing.into();
        };

        println!("Testing API access... (file id: {file_id})");

        match self.transport.get_versions(token, file_id).await {
            Ok(response) if response.status == SUCCESS_STATUS => ProbeOutcome::Success,
            Ok(response) => ProbeOutcome::RemoteRejection {
                status: response.status,
                body: render_body(&response.body),
            },
            Err(e) => e.into(),
        }
    }

    /// Direct values win; the settings file is only consulted when one is missing.
    pub fn resolve_credentials(&self, mut credentials: Credentials) -> Result<Credentials> {
        if credentials.is_incomplete() {
            let path = self.env_file.resolve()?;
            credentials.merge_missing(load_settings(&path)?);
        }

        if credentials.is_incomplete() {
            return Err(ProbeError::CredentialsMissing);
        }

        Ok(credentials)
    }
}

/// Probe the live Figma API using the default settings location.
pub async fn probe(token: Option<&str>, file_id: Option<&str>) -> bool {
    match CredentialProbe::from_config(&ProbeConfig::default()) {
        Ok(probe) => probe.probe(token, file_id).await,
        Err(e) => {
            let outcome = ProbeOutcome::from(e);
            println!("{outcome}");
            false
        }
    }
}

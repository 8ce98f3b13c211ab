use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("settings file not found: {}", .0.display())]
    SettingsMissing(PathBuf),

    #[error("failed to read settings file {}: {source}", path.display())]
    SettingsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("access token or file id missing")]
    CredentialsMissing,

    #[error("could not resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failure raised by a `VersionsTransport` other than the reqwest client.
    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, ProbeError>;

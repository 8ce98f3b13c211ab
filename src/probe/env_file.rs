use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::config::Credentials;
use super::error::{ProbeError, Result};

pub const TOKEN_KEY: &str = "FIGMA_ACCESS_TOKEN";
pub const FILE_ID_KEY: &str = "FIGMA_FILE_ID";
pub const SETTINGS_FILE_NAME: &str = ".env";

/// Where the settings file is looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvFileLocator {
    /// `.env` in the parent of the current working directory.
    #[default]
    ParentOfCwd,
    Fixed(PathBuf),
}

impl EnvFileLocator {
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            EnvFileLocator::ParentOfCwd => {
                let cwd = std::env::current_dir().map_err(ProbeError::CurrentDir)?;
                // At the filesystem root there is no parent; fall back to cwd itself.
                let base = cwd.parent().unwrap_or(&cwd);
                Ok(base.join(SETTINGS_FILE_NAME))
            }
            EnvFileLocator::Fixed(path) => Ok(path.clone()),
        }
    }
}

/// Extract the token and file id from `KEY=VALUE` lines.
///
/// A line counts only when it starts with the exact `KEY=` prefix; the value is
/// everything after the first `=`, trimmed. Later lines override earlier ones.
pub fn parse_settings(content: &str) -> Credentials {
    let mut credentials = Credentials::default();

    for line in content.lines() {
        if let Some(value) = value_for(line, TOKEN_KEY) {
            credentials.token = Some(value);
        } else if let Some(value) = value_for(line, FILE_ID_KEY) {
            credentials.file_id = Some(value);
        }
    }

    credentials
}

fn value_for(line: &str, key: &str) -> Option<String> {
    line.strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .map(|value| value.trim().to_string())
}

pub fn load_settings(path: &Path) -> Result<Credentials> {
    if !path.exists() {
        return Err(ProbeError::SettingsMissing(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ProbeError::SettingsUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let credentials = parse_settings(&content);
    debug!(
        "Loaded settings from {} (token: {}, file id: {})",
        path.display(),
        credentials.token.is_some(),
        credentials.file_id.is_some()
    );

    Ok(credentials)
}

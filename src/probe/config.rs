use std::fmt;

use super::env_file::EnvFileLocator;

pub const DEFAULT_API_URL: &str = "https://api.figma.com";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub file_id: Option<String>,
}

impl Credentials {
    pub fn new(token: Option<&str>, file_id: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
            file_id: file_id.map(str::to_string),
        }
    }

    /// True when either value is absent or empty.
    pub fn is_incomplete(&self) -> bool {
        self.resolved().is_none()
    }

    /// Fill absent or empty fields from `other`. Present values are never replaced.
    pub fn merge_missing(&mut self, other: Credentials) {
        if is_blank(&self.token) {
            self.token = other.token;
        }
        if is_blank(&self.file_id) {
            self.file_id = other.file_id;
        }
    }

    /// Token and file id, only if both are non-empty.
    pub fn resolved(&self) -> Option<(&str, &str)> {
        match (self.token.as_deref(), self.file_id.as_deref()) {
            (Some(token), Some(file_id)) if !token.is_empty() && !file_id.is_empty() => {
                Some((token, file_id))
            }
            _ => None,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("file_id", &self.file_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub api_url: String,
    pub env_file: EnvFileLocator,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            env_file: EnvFileLocator::default(),
        }
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings for the Posthog client.
//!
//! Each field resolves with the precedence explicit argument > environment
//! variable > YAML settings file > default.

use crate::domain::{FeatureGateError, Result};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Default API base used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "https://app.posthog.com";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the API base.
pub const ENV_API_BASE: &str = "POSTHOG_API_BASE";
/// Environment variable holding the personal API key.
pub const ENV_API_KEY: &str = "POSTHOG_API_KEY";
/// Environment variable holding the project identifier.
pub const ENV_PROJECT_ID: &str = "POSTHOG_PROJECT_ID";
/// Environment variable holding the timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "POSTHOG_TIMEOUT_SECS";

/// Name of the settings file looked up by `with_default_location`.
#[cfg(feature = "yaml")]
const SETTINGS_FILE_NAME: &str = "posthog.yaml";

/// Resolved settings for one Posthog project.
///
/// # Examples
///
/// ```rust
/// use feature_gate::adapters::posthog::PosthogSettings;
///
/// # fn main() -> feature_gate::domain::Result<()> {
/// let settings = PosthogSettings::builder()
///     .api_key("phx_secret")
///     .project_id("1234")
///     .build_with_env(|_| None)?;
///
/// assert_eq!(settings.api_base(), "https://app.posthog.com");
/// assert_eq!(settings.project_id(), "1234");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PosthogSettings {
    api_base: String,
    api_key: String,
    project_id: String,
    timeout: Duration,
}

impl PosthogSettings {
    /// Creates a new settings builder.
    pub fn builder() -> PosthogSettingsBuilder {
        PosthogSettingsBuilder::default()
    }

    /// Resolves settings from the process environment only.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    /// Returns the API base without a trailing slash.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the personal API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the project identifier.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the transport timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for PosthogSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosthogSettings")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Values read from a settings file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_base: Option<String>,
    api_key: Option<String>,
    project_id: Option<ProjectId>,
    timeout_secs: Option<u64>,
}

/// Project ids are numeric in Posthog, but users quote them just as often.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum ProjectId {
    Text(String),
    Number(u64),
}

impl ProjectId {
    fn into_string(self) -> String {
        match self {
            ProjectId::Text(s) => s,
            ProjectId::Number(n) => n.to_string(),
        }
    }
}

/// Builder for [`PosthogSettings`].
#[derive(Clone, Debug, Default)]
pub struct PosthogSettingsBuilder {
    api_base: Option<String>,
    api_key: Option<String>,
    project_id: Option<String>,
    timeout: Option<Duration>,
    file: FileSettings,
}

impl PosthogSettingsBuilder {
    /// Sets the API base explicitly.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Sets the API key explicitly.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the project identifier explicitly.
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Sets the transport timeout explicitly.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads fallback values from a YAML settings file.
    ///
    /// Recognized keys are `api_base`, `api_key`, `project_id` and `timeout_secs`.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(mut self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        self.file = serde_yaml::from_str(&content).map_err(|e| FeatureGateError::ConfigError {
            message: format!("Failed to parse settings file {}: {}", path.display(), e),
            source: Some(Box::new(e)),
        })?;
        tracing::debug!(path = %path.display(), "loaded posthog settings file");
        Ok(self)
    }

    /// Reads fallback values from `posthog.yaml` in the OS configuration directory.
    ///
    /// A missing file is not an error.
    #[cfg(feature = "yaml")]
    pub fn with_default_location(self, app_name: &str, qualifier: &str) -> Result<Self> {
        let dirs = directories::ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            FeatureGateError::config("Could not determine configuration directory")
        })?;
        let path = dirs.config_dir().join(SETTINGS_FILE_NAME);
        if path.exists() {
            self.with_yaml_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no posthog settings file found");
            Ok(self)
        }
    }

    /// Resolves the settings against the process environment.
    pub fn build(self) -> Result<PosthogSettings> {
        self.build_with_env(|name| std::env::var(name).ok())
    }

    /// Resolves the settings against the given environment lookup.
    ///
    /// Empty environment values count as unset.
    pub fn build_with_env<F>(self, lookup: F) -> Result<PosthogSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_base = self
            .api_base
            .or_else(|| env(ENV_API_BASE))
            .or(self.file.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let api_key = self
            .api_key
            .or_else(|| env(ENV_API_KEY))
            .or(self.file.api_key)
            .ok_or_else(|| FeatureGateError::config(format!("{ENV_API_KEY} is not set")))?;

        let project_id = self
            .project_id
            .or_else(|| env(ENV_PROJECT_ID))
            .or(self.file.project_id.map(ProjectId::into_string))
            .ok_or_else(|| FeatureGateError::config(format!("{ENV_PROJECT_ID} is not set")))?;

        let timeout = match self.timeout {
            Some(timeout) => timeout,
            None => match env(ENV_TIMEOUT_SECS) {
                Some(raw) => {
                    let secs = raw.trim().parse::<u64>().map_err(|e| {
                        FeatureGateError::ConfigError {
                            message: format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"),
                            source: Some(Box::new(e)),
                        }
                    })?;
                    Duration::from_secs(secs)
                }
                None => self
                    .file
                    .timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_TIMEOUT),
            },
        };

        if timeout.is_zero() {
            return Err(FeatureGateError::config("timeout must be greater than zero"));
        }

        Ok(PosthogSettings {
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            project_id,
            timeout,
        })
    }
}

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_RETRY_DELAY_SECS, DEFAULT_WORKER_COUNT};

/// Credentials for the remote storage account, passed through opaquely to the
/// storage connector.
///
/// The refresh token may be rotated by the remote client while the pipeline
/// runs; the rotated value is read back out at shutdown and persisted via
/// [`UploaderConfig::set_refresh_token`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RemoteCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant: String,
    pub redirect_url: String,
    pub refresh_token: String,
}

/// Tuning knobs for the upload pipeline.
///
/// Hosts whose storage client cannot handle concurrent uploads should set
/// `worker_count` to 1; correctness does not depend on the pool size.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadSettings {
    /// Number of concurrent upload workers
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Fixed delay between retries after a transient failure, in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl UploadSettings {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            worker_count: DEFAULT_WORKER_COUNT,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
        }
    }
}

fn default_worker_count() -> usize {
    DEFAULT_WORKER_COUNT
}

fn default_retry_delay_secs() -> u64 {
    DEFAULT_RETRY_DELAY_SECS
}

/// Uploader configuration as stored in the host's YAML config file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploaderConfig {
    /// Remote storage account credentials
    pub onedrive: RemoteCredentials,
    /// Pipeline tuning, optional in the file
    #[serde(default)]
    pub uploads: UploadSettings,
}

impl UploaderConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: UploaderConfig =
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml).context(format!("Failed to write config to {}", path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Replace the stored refresh token with the rotated value returned by
    /// the pipeline at shutdown.
    pub fn set_refresh_token(&mut self, token: impl Into<String>) {
        self.onedrive.refresh_token = token.into();
    }
}

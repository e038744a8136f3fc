use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use tokio::time::sleep;

use crate::cloud::client::{RemoteStorage, RemoteStorageConnector};
use crate::config::RemoteCredentials;
use crate::constants::{PRIVATE_FOLDER_NAME, PUBLIC_FOLDER_NAME};
use crate::models::{ConnectionState, DestinationFolders};

/// Establishes the remote storage connection and provisions the destination
/// folders.
///
/// Transient connectivity failures are retried indefinitely with a fixed
/// delay: the booth often boots before its network does, and an operator is
/// rarely around to restart anything. Non-transient failures (revoked or
/// mistyped credentials) propagate as fatal instead of looping forever.
pub struct ConnectionSupervisor {
    connector: Arc<dyn RemoteStorageConnector>,
    credentials: RemoteCredentials,
    retry_delay: Duration,
    state: ConnectionState,
}

impl ConnectionSupervisor {
    pub fn new(
        connector: Arc<dyn RemoteStorageConnector>,
        credentials: RemoteCredentials,
        retry_delay: Duration,
    ) -> Self {
        ConnectionSupervisor {
            connector,
            credentials,
            retry_delay,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Connect to the remote storage account, retrying transient failures
    /// until it succeeds, then provision the two destination folders.
    ///
    /// Folder provisioning happens after the connection is up, so a failure
    /// there points at a configuration problem rather than connectivity; it
    /// is fatal to startup and not retried.
    pub async fn connect(&mut self) -> Result<(Arc<dyn RemoteStorage>, DestinationFolders)> {
        self.state = ConnectionState::Connecting;

        loop {
            match self.connector.connect(&self.credentials).await {
                Ok(client) => {
                    let folders = self
                        .provision_folders(client.as_ref())
                        .await
                        .context("Failed to provision destination folders")?;

                    self.state = ConnectionState::Connected;
                    info!("Remote storage connection established");
                    return Ok((client, folders));
                }
                Err(err) if err.is_transient() => {
                    info!(
                        "Connection could not be established, next try in {}s: {}",
                        self.retry_delay.as_secs(),
                        err
                    );
                    sleep(self.retry_delay).await;
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err)
                        .context("Remote storage rejected the configured credentials"));
                }
            }
        }
    }

    async fn provision_folders(&self, client: &dyn RemoteStorage) -> Result<DestinationFolders> {
        let public_folder_id = client
            .create_folder(PUBLIC_FOLDER_NAME)
            .await
            .with_context(|| format!("Failed to create folder '{}'", PUBLIC_FOLDER_NAME))?;

        let private_folder_id = client
            .create_folder(PRIVATE_FOLDER_NAME)
            .await
            .with_context(|| format!("Failed to create folder '{}'", PRIVATE_FOLDER_NAME))?;

        Ok(DestinationFolders {
            public_folder_id,
            private_folder_id,
        })
    }
}

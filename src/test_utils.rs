//! Shared helpers for unit tests.

use crate::config::RemoteCredentials;
use crate::models::DestinationFolders;

/// Credentials that look plausible but reach no real account.
pub fn test_credentials() -> RemoteCredentials {
    RemoteCredentials {
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
        tenant: "common".to_string(),
        redirect_url: "http://localhost:8080".to_string(),
        refresh_token: "initial-token".to_string(),
    }
}

/// A pair of provisioned folder IDs.
pub fn test_folders() -> DestinationFolders {
    DestinationFolders {
        public_folder_id: "pub-1".to_string(),
        private_folder_id: "priv-1".to_string(),
    }
}

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::cloud::error::StorageError;
use crate::config::RemoteCredentials;

/// A connected remote storage account.
///
/// Implementations wrap the vendor SDK (Microsoft Graph in the original
/// deployment) and are shared by every upload worker through a single `Arc`.
/// `upload_file` must therefore tolerate concurrent calls; hosts whose SDK
/// cannot should run the pipeline with `worker_count = 1` instead of relying
/// on internal locking here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Create (or locate) a folder by name and return its opaque ID.
    ///
    /// Must be idempotent: creating an already-existing folder returns the
    /// existing ID rather than erroring. SDKs without that guarantee have to
    /// look the folder up before creating it.
    async fn create_folder(&self, name: &str) -> Result<String, StorageError>;

    /// Upload a local file into the folder identified by `folder_id`, stored
    /// remotely under `file_name`.
    async fn upload_file(
        &self,
        file_path: &Path,
        file_name: &str,
        folder_id: &str,
    ) -> Result<(), StorageError>;

    /// The current refresh token, possibly rotated since connection.
    fn refresh_token(&self) -> String;
}

/// Builds a connected [`RemoteStorage`] client from host credentials.
///
/// Connecting performs the vendor authentication handshake, so it can fail
/// transiently (no network yet, booth still booting) or fatally (revoked or
/// mistyped credentials). The [supervisor](crate::cloud::supervisor) decides
/// which failures to retry based on the returned [`StorageError`] class.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStorageConnector: Send + Sync {
    async fn connect(
        &self,
        credentials: &RemoteCredentials,
    ) -> Result<Arc<dyn RemoteStorage>, StorageError>;
}

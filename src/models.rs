use std::fmt;
use std::path::PathBuf;

/// Which of the two well-known destination folders a capture belongs to.
///
/// Guests can ask the booth to keep a picture out of the shared gallery;
/// those land in the private folder, everything else in the public one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Public,
    Private,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Public => write!(f, "public"),
            Destination::Private => write!(f, "private"),
        }
    }
}

/// A single unit of upload work.
///
/// Tasks are immutable once created and carry no dedup key: enqueueing the
/// same file twice uploads it twice. A task holds a [`Destination`] selector
/// rather than a raw folder ID because the concrete folder IDs do not exist
/// until the connection supervisor has provisioned them; a worker binds the
/// selector to the real ID at processing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub file_path: PathBuf,
    pub destination: Destination,
}

impl UploadTask {
    pub fn new(file_path: impl Into<PathBuf>, destination: Destination) -> Self {
        UploadTask {
            file_path: file_path.into(),
            destination,
        }
    }

    /// Display name used for the remote file, derived from the local path.
    pub fn display_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// The two destination folder IDs provisioned by the connection supervisor.
///
/// Established once per connection lifetime and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationFolders {
    pub public_folder_id: String,
    pub private_folder_id: String,
}

impl DestinationFolders {
    /// Resolve a task's destination selector to the provisioned folder ID.
    pub fn id_for(&self, destination: Destination) -> &str {
        match destination {
            Destination::Public => &self.public_folder_id,
            Destination::Private => &self.private_folder_id,
        }
    }
}

/// Lifecycle of the remote storage connection, owned by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

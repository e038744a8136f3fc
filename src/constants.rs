//! Global constants for the upload pipeline.
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make configuration changes easier.

// Destination folder constants
/// Remote folder receiving publicly shared captures
pub const PUBLIC_FOLDER_NAME: &str = "FotoBox";

/// Remote folder receiving captures guests asked to keep private
pub const PRIVATE_FOLDER_NAME: &str = "FotoBox (private)";

// Worker pool constants
/// Default number of concurrent upload workers
pub const DEFAULT_WORKER_COUNT: usize = 3;

// Timeout and retry constants
/// Default delay between retries after a transient failure (10s)
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 10;

// Thread names
/// Name of the background thread hosting the upload runtime
pub const PIPELINE_THREAD_NAME: &str = "upload-pipeline";

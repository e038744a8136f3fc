//! Background upload pipeline for cloud storage.
//!
//! This module provides the machinery that moves captured pictures from the
//! booth to the remote storage account: an unbounded FIFO queue, a fixed-size
//! pool of cooperative upload workers, and a connection supervisor that keeps
//! retrying until the account is reachable. The remote API itself stays
//! behind the traits in [`client`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐ enqueue ┌──────────────┐ dequeue ┌──────────────┐
//! │  Host hooks  │────────▶│ UploadQueue  │────────▶│ Worker pool  │
//! └──────────────┘         └──────▲───────┘         └──────┬───────┘
//!                                 │ re-enqueue on          │ upload
//!                                 │ transient failure      │
//!                                 └────────────────────────┤
//!                                                  ┌───────▼────────┐
//!                          ConnectionSupervisor ──▶│ RemoteStorage  │
//!                          (bootstrap + folders)   └────────────────┘
//! ```
//!
//! Everything below the host hooks runs on one dedicated background thread
//! hosting a current-thread async runtime; the queue is the only cross-thread
//! handoff point.

/// Remote storage collaborator traits
pub mod client;

/// Error taxonomy for storage operations
pub mod error;

/// Pipeline orchestration and host-facing API
pub mod pipeline;

/// Unbounded FIFO upload queue with acknowledgement tracking
pub mod queue;

/// Connection bootstrap and destination folder provisioning
pub mod supervisor;

/// Upload workers draining the shared queue
pub mod worker;

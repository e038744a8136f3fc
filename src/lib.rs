//! # fotobox-uploader
//!
//! A background upload pipeline that pushes photo booth captures to a remote
//! cloud-storage account without ever blocking the booth itself.
//!
//! ## Overview
//!
//! The host application (the booth software) produces pictures from its
//! lifecycle hooks; this crate queues them and uploads them asynchronously on
//! a dedicated background thread. The remote storage API (folder creation,
//! file upload, token refresh) stays behind a trait so the pipeline never
//! depends on a concrete vendor SDK.
//!
//! ## Features
//!
//! - **Fire-and-forget enqueueing**: hook call sites never wait on the network
//! - **At-least-once delivery**: transiently failed uploads are re-queued, not dropped
//! - **Connection bootstrap**: indefinite retry with a fixed delay until the
//!   remote account is reachable, then one-time provisioning of the public
//!   and private destination folders
//! - **Graceful lifecycle**: explicit `start`, cooperative `shutdown`, and an
//!   optional `drain` for hosts that want an empty queue before exiting
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use fotobox_uploader::cloud::client::RemoteStorageConnector;
//! use fotobox_uploader::cloud::pipeline::UploadPipeline;
//! use fotobox_uploader::config::UploaderConfig;
//!
//! # fn graph_connector() -> Arc<dyn RemoteStorageConnector> { unimplemented!() }
//! # fn main() -> anyhow::Result<()> {
//! let mut config = UploaderConfig::from_yaml_file(Path::new("uploader.yaml"))?;
//!
//! let pipeline = UploadPipeline::new(
//!     graph_connector(),
//!     config.onedrive.clone(),
//!     config.uploads.clone(),
//! );
//!
//! // Host startup hook.
//! pipeline.start()?;
//!
//! // Host content-ready hooks.
//! pipeline.enqueue_public("/var/lib/fotobox/photo-0001.jpg");
//! pipeline.enqueue_private("/var/lib/fotobox/photo-0002.jpg");
//!
//! // Host cleanup hook: persist the possibly-rotated refresh token.
//! if let Some(token) = pipeline.shutdown() {
//!     config.set_refresh_token(token);
//!     config.save_to_yaml_file(Path::new("uploader.yaml"))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cloud`]: the upload pipeline itself (queue, workers, supervisor, traits)
//! - [`config`]: credential and tuning configuration, YAML load/save
//! - [`models`]: core data models shared across the pipeline
//! - [`logging`]: terminal logger setup for hosts without their own
//! - [`constants`]: application-wide defaults

/// Upload pipeline: queue, worker pool, connection supervisor, storage traits
pub mod cloud;

/// Configuration management: credentials and pipeline tuning
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging initialization for hosts without their own setup
pub mod logging;

/// Core data models shared across the pipeline
pub mod models;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;

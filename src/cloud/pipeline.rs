use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use log::{error, info, warn};
use tokio::runtime;
use tokio_util::sync::CancellationToken;

use crate::cloud::client::{RemoteStorage, RemoteStorageConnector};
use crate::cloud::queue::UploadQueue;
use crate::cloud::supervisor::ConnectionSupervisor;
use crate::cloud::worker::{self, UploadWorker};
use crate::config::{RemoteCredentials, UploadSettings};
use crate::constants::PIPELINE_THREAD_NAME;
use crate::models::{Destination, UploadTask};

/// Host-facing orchestrator owning the queue, the supervisor and the worker
/// pool.
///
/// The lifecycle is two-phase: construction is cheap and has no side effects,
/// [`start`](UploadPipeline::start) spawns the background thread that
/// connects and then drains the queue until
/// [`shutdown`](UploadPipeline::shutdown). All methods are safe to call from
/// any host thread.
pub struct UploadPipeline {
    shared: Arc<PipelineShared>,
    thread: Mutex<Option<thread::JoinHandle<()>>>,
    started: AtomicBool,
}

struct PipelineShared {
    queue: Arc<UploadQueue>,
    connector: Arc<dyn RemoteStorageConnector>,
    credentials: RemoteCredentials,
    settings: UploadSettings,
    client: Mutex<Option<Arc<dyn RemoteStorage>>>,
    startup_error: Mutex<Option<String>>,
    cancel: CancellationToken,
}

impl UploadPipeline {
    /// Create a pipeline. Performs no I/O and spawns nothing; call
    /// [`start`](UploadPipeline::start) to bring it to life.
    pub fn new(
        connector: Arc<dyn RemoteStorageConnector>,
        credentials: RemoteCredentials,
        settings: UploadSettings,
    ) -> Self {
        UploadPipeline {
            shared: Arc::new(PipelineShared {
                queue: Arc::new(UploadQueue::new()),
                connector,
                credentials,
                settings,
                client: Mutex::new(None),
                startup_error: Mutex::new(None),
                cancel: CancellationToken::new(),
            }),
            thread: Mutex::new(None),
            started: AtomicBool::new(false),
        }
    }

    /// Spawn the background thread that connects to remote storage and runs
    /// the worker pool. Returns immediately.
    ///
    /// Idempotent: a second call logs a warning and is otherwise a no-op.
    pub fn start(&self) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("Upload pipeline already started, ignoring start request");
            return Ok(());
        }

        let rt = runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create upload pipeline runtime")?;

        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(PIPELINE_THREAD_NAME.to_string())
            .spawn(move || rt.block_on(run(shared)))
            .context("Failed to spawn upload pipeline thread")?;

        *self.thread.lock().expect("pipeline thread slot poisoned") = Some(handle);
        info!("Upload pipeline started");
        Ok(())
    }

    /// Queue a capture for the shared gallery folder.
    pub fn enqueue_public(&self, file_path: impl Into<std::path::PathBuf>) {
        self.enqueue(UploadTask::new(file_path, Destination::Public));
    }

    /// Queue a capture for the private folder.
    pub fn enqueue_private(&self, file_path: impl Into<std::path::PathBuf>) {
        self.enqueue(UploadTask::new(file_path, Destination::Private));
    }

    fn enqueue(&self, task: UploadTask) {
        info!(
            "Queued {} for {} upload",
            task.file_path.display(),
            task.destination
        );
        self.shared.queue.enqueue(task);
    }

    /// Number of tasks enqueued but not yet fully uploaded.
    pub fn pending_uploads(&self) -> usize {
        self.shared.queue.pending()
    }

    /// The fatal startup error, if the background context aborted.
    ///
    /// `start` itself returns immediately, so a rejected credential or a
    /// failed folder provisioning surfaces here (and in the log) instead.
    pub fn startup_error(&self) -> Option<String> {
        self.shared
            .startup_error
            .lock()
            .expect("startup error slot poisoned")
            .clone()
    }

    /// Block the calling thread until every queued task has been uploaded
    /// and acknowledged.
    ///
    /// Only meaningful while the pipeline is healthy: if startup failed (see
    /// [`startup_error`](UploadPipeline::startup_error)) or every worker has
    /// died, outstanding tasks are never acknowledged and this call does not
    /// return.
    pub fn drain(&self) {
        self.shared.queue.join();
    }

    /// Stop the background context and retrieve the refresh token for the
    /// host to persist.
    ///
    /// Cooperative and best-effort: workers finish their current upload
    /// attempt, but the queue is not necessarily empty afterwards (call
    /// [`drain`](UploadPipeline::drain) first for that). Returns `None`,
    /// with a warning, when no client was ever successfully constructed:
    /// there is no token to persist in that case.
    pub fn shutdown(&self) -> Option<String> {
        self.shared.cancel.cancel();

        if let Some(handle) = self
            .thread
            .lock()
            .expect("pipeline thread slot poisoned")
            .take()
        {
            if handle.join().is_err() {
                error!("Upload pipeline thread panicked during shutdown");
            }
        }

        let client = self.shared.client.lock().expect("client slot poisoned");
        match client.as_ref() {
            Some(client) => {
                info!("Upload pipeline stopped");
                Some(client.refresh_token())
            }
            None => {
                warn!("Remote storage client was never initialized, skipping token retrieval");
                None
            }
        }
    }
}

/// Background context: connect once, then run the pool until cancelled.
async fn run(shared: Arc<PipelineShared>) {
    let mut supervisor = ConnectionSupervisor::new(
        Arc::clone(&shared.connector),
        shared.credentials.clone(),
        shared.settings.retry_delay(),
    );

    let connected = tokio::select! {
        _ = shared.cancel.cancelled() => return,
        result = supervisor.connect() => result,
    };

    let (client, folders) = match connected {
        Ok(connected) => connected,
        Err(err) => {
            error!("Upload pipeline startup failed: {:#}", err);
            *shared
                .startup_error
                .lock()
                .expect("startup error slot poisoned") = Some(format!("{:#}", err));
            return;
        }
    };

    *shared.client.lock().expect("client slot poisoned") = Some(Arc::clone(&client));

    let workers = (0..shared.settings.worker_count)
        .map(|id| {
            UploadWorker::new(
                id,
                Arc::clone(&shared.queue),
                Arc::clone(&client),
                folders.clone(),
                shared.settings.retry_delay(),
            )
        })
        .collect();

    worker::run_pool(workers, shared.cancel.clone()).await;
}

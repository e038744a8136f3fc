use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, error, info};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::cloud::client::RemoteStorage;
use crate::cloud::error::StorageError;
use crate::cloud::queue::UploadQueue;
use crate::models::{DestinationFolders, UploadTask};

/// One upload worker draining the shared queue.
///
/// Workers are symmetric and stateless apart from the index used in log
/// lines; any worker can process any task. Retries are worker-local: after a
/// transient failure the worker re-enqueues the task and sleeps on its own,
/// so concurrent retry storms are bounded by the pool size.
pub struct UploadWorker {
    id: usize,
    queue: Arc<UploadQueue>,
    client: Arc<dyn RemoteStorage>,
    folders: DestinationFolders,
    retry_delay: Duration,
}

impl UploadWorker {
    pub fn new(
        id: usize,
        queue: Arc<UploadQueue>,
        client: Arc<dyn RemoteStorage>,
        folders: DestinationFolders,
        retry_delay: Duration,
    ) -> Self {
        UploadWorker {
            id,
            queue,
            client,
            folders,
            retry_delay,
        }
    }

    /// Pull and process tasks until cancelled.
    ///
    /// Cancellation is only observed between tasks, so an upload attempt
    /// already in flight runs to completion. An unclassified storage error
    /// ends the loop and is returned to the pool.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), StorageError> {
        loop {
            let task = tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                task = self.queue.dequeue() => task,
            };
            self.process(task).await?;
        }
    }

    async fn process(&self, task: UploadTask) -> Result<(), StorageError> {
        let file_name = task.display_name();
        let folder_id = self.folders.id_for(task.destination);
        debug!(
            "Worker {} uploading {} to folder {}",
            self.id, file_name, folder_id
        );

        match self
            .client
            .upload_file(&task.file_path, &file_name, folder_id)
            .await
        {
            Ok(()) => {
                info!(
                    "Worker {} uploaded {} to folder {}",
                    self.id, file_name, folder_id
                );
                self.queue.task_done();
                Ok(())
            }
            Err(err) if err.is_transient() => {
                error!(
                    "Worker {} failed to upload {}, retrying in {}s: {}",
                    self.id,
                    file_name,
                    self.retry_delay.as_secs(),
                    err
                );
                // Not acknowledged: the task goes back to the tail verbatim.
                self.queue.requeue(task);
                sleep(self.retry_delay).await;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// Run a pool of workers to completion.
///
/// There is no automatic respawn: a worker killed by an unclassified error
/// stays dead, and once the last one is gone the queue stalls until the host
/// restarts the pipeline. The drained pool is logged as an error.
pub async fn run_pool(workers: Vec<UploadWorker>, cancel: CancellationToken) {
    let alive = Arc::new(AtomicUsize::new(workers.len()));

    let tasks = workers.into_iter().map(|worker| {
        let cancel = cancel.clone();
        let alive = Arc::clone(&alive);
        async move {
            let worker_id = worker.id;
            if let Err(err) = worker.run(cancel).await {
                error!(
                    "Worker {} terminated on unclassified error: {}",
                    worker_id, err
                );
                if alive.fetch_sub(1, Ordering::SeqCst) == 1 {
                    error!("Upload worker pool drained to zero workers, queued uploads are stalled");
                }
            }
        }
    });

    join_all(tasks).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use anyhow::anyhow;

    use crate::cloud::client::MockRemoteStorage;
    use crate::models::Destination;
    use crate::test_utils::test_folders;

    fn worker_with(storage: MockRemoteStorage, queue: Arc<UploadQueue>) -> UploadWorker {
        UploadWorker::new(
            0,
            queue,
            Arc::new(storage),
            test_folders(),
            Duration::from_millis(1),
        )
    }

    #[tokio::test]
    async fn test_successful_upload_acknowledges_the_task() {
        let queue = Arc::new(UploadQueue::new());
        queue.enqueue(UploadTask::new("/tmp/a.jpg", Destination::Public));

        let mut storage = MockRemoteStorage::new();
        storage
            .expect_upload_file()
            .withf(|path, name, folder| {
                path == PathBuf::from("/tmp/a.jpg") && name == "a.jpg" && folder == "pub-1"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let worker = worker_with(storage, Arc::clone(&queue));
        let task = queue.dequeue().await;
        worker.process(task).await.unwrap();

        assert_eq!(queue.pending(), 0);
    }

    #[tokio::test]
    async fn test_private_tasks_go_to_the_private_folder() {
        let queue = Arc::new(UploadQueue::new());
        queue.enqueue(UploadTask::new("/tmp/b.jpg", Destination::Private));

        let mut storage = MockRemoteStorage::new();
        storage
            .expect_upload_file()
            .withf(|_, _, folder| folder == "priv-1")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let worker = worker_with(storage, Arc::clone(&queue));
        let task = queue.dequeue().await;
        worker.process(task).await.unwrap();
    }

    #[tokio::test]
    async fn test_transient_failure_requeues_without_acknowledging() {
        let queue = Arc::new(UploadQueue::new());
        queue.enqueue(UploadTask::new("/tmp/a.jpg", Destination::Public));

        let mut storage = MockRemoteStorage::new();
        storage
            .expect_upload_file()
            .times(1)
            .returning(|_, _, _| Err(StorageError::transient("connection reset")));

        let worker = worker_with(storage, Arc::clone(&queue));
        let task = queue.dequeue().await;
        worker.process(task).await.unwrap();

        // Still outstanding and back in the queue, identical to the original.
        assert_eq!(queue.pending(), 1);
        let requeued = queue.dequeue().await;
        assert_eq!(requeued, UploadTask::new("/tmp/a.jpg", Destination::Public));
    }

    #[tokio::test]
    async fn test_unclassified_error_terminates_the_worker() {
        let queue = Arc::new(UploadQueue::new());
        queue.enqueue(UploadTask::new("/tmp/a.jpg", Destination::Public));

        let mut storage = MockRemoteStorage::new();
        storage
            .expect_upload_file()
            .times(1)
            .returning(|_, _, _| Err(StorageError::Other(anyhow!("quota exceeded"))));

        let worker = worker_with(storage, Arc::clone(&queue));
        let cancel = CancellationToken::new();
        let result = worker.run(cancel).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_exits_cleanly_when_cancelled() {
        let queue = Arc::new(UploadQueue::new());
        let storage = MockRemoteStorage::new();
        let worker = worker_with(storage, queue);

        let cancel = CancellationToken::new();
        cancel.cancel();
        worker.run(cancel).await.unwrap();
    }
}

use std::sync::{Condvar, Mutex};

use tokio::sync::mpsc;
use tokio::sync::Mutex as AsyncMutex;

use crate::models::UploadTask;

/// Unbounded FIFO queue of upload work with acknowledgement tracking.
///
/// Producers (host hooks) and consumers (upload workers) live on different
/// threads; the queue is the single handoff point between them. Enqueueing
/// never blocks and never fails. A task handed to a worker stays counted as
/// outstanding until [`task_done`](UploadQueue::task_done) acknowledges it,
/// so a transiently failed task that was [re-enqueued](UploadQueue::requeue)
/// keeps [`join`](UploadQueue::join) waiting. There is no capacity bound:
/// the booth produces pictures far slower than the uplink drains them.
pub struct UploadQueue {
    sender: mpsc::UnboundedSender<UploadTask>,
    receiver: AsyncMutex<mpsc::UnboundedReceiver<UploadTask>>,
    outstanding: Mutex<usize>,
    idle: Condvar,
}

impl UploadQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        UploadQueue {
            sender,
            receiver: AsyncMutex::new(receiver),
            outstanding: Mutex::new(0),
            idle: Condvar::new(),
        }
    }

    /// Append a fresh task to the tail. Never blocks, never fails.
    pub fn enqueue(&self, task: UploadTask) {
        {
            let mut outstanding = self.outstanding.lock().expect("queue counter poisoned");
            *outstanding += 1;
        }
        self.sender
            .send(task)
            .expect("upload queue receiver dropped");
    }

    /// Return a transiently failed task to the tail.
    ///
    /// The task was already counted when first enqueued and has not been
    /// acknowledged, so the outstanding count is left untouched. Tail
    /// placement means retried tasks never starve fresh ones, but also get
    /// no priority.
    pub fn requeue(&self, task: UploadTask) {
        self.sender
            .send(task)
            .expect("upload queue receiver dropped");
    }

    /// Take the next task, suspending until one is available.
    ///
    /// FIFO across all enqueues. Safe to call from several workers at once;
    /// whichever worker holds the receiver gets the next item.
    pub async fn dequeue(&self) -> UploadTask {
        let mut receiver = self.receiver.lock().await;
        // The queue owns a sender half, so the channel can never close.
        receiver.recv().await.expect("upload queue channel closed")
    }

    /// Acknowledge one task as fully uploaded.
    pub fn task_done(&self) {
        let mut outstanding = self.outstanding.lock().expect("queue counter poisoned");
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.idle.notify_all();
        }
    }

    /// Number of tasks enqueued but not yet acknowledged, including any
    /// currently in flight.
    pub fn pending(&self) -> usize {
        *self.outstanding.lock().expect("queue counter poisoned")
    }

    /// Block the calling thread until every enqueued task has been
    /// acknowledged. Returns immediately if nothing is outstanding.
    pub fn join(&self) {
        let mut outstanding = self.outstanding.lock().expect("queue counter poisoned");
        while *outstanding > 0 {
            outstanding = self
                .idle
                .wait(outstanding)
                .expect("queue counter poisoned");
        }
    }
}

impl Default for UploadQueue {
    fn default() -> Self {
        Self::new()
    }
}

//! The datagram hand-off queue.
//!
//! Owns the outbound pending-send sequence and the inbound receive
//! buffer, and wakes the packetizer through an injected callback. No
//! lock is held across a suspension point or across the wake callback.

use crate::config::DatagramConfig;
use crate::error::{CloseReason, DatagramError, Result};
use crate::frame::Datagram;
use crate::metrics::{DatagramMetrics, DatagramStats};

use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, Mutex as AsyncMutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Callback that tells the packetizer outbound datagrams are waiting.
///
/// Invoked once per accepted [`DatagramQueue::send`], never with internal
/// locks held. Must not block; typical implementations wake a task.
pub type WakeFn = Arc<dyn Fn() + Send + Sync>;

/// A queued outbound datagram plus the completion channel its submitter
/// is suspended on.
struct PendingSend {
    datagram: Datagram,
    done: oneshot::Sender<Result<()>>,
}

/// Outbound sequence and close reason, guarded together so a close racing
/// a fresh send is always observed by one side or the other.
#[derive(Default)]
struct SendState {
    queue: VecDeque<PendingSend>,
    close_reason: Option<CloseReason>,
}

/// Hand-off queue between the application's datagram calls and the
/// packetizer.
///
/// Outbound: [`send`](Self::send) appends and suspends the caller until
/// the packetizer takes the datagram via [`dequeue`](Self::dequeue).
/// Inbound: [`deliver`](Self::deliver) buffers received payloads (bounded,
/// drop on overflow) for [`recv`](Self::recv). [`close`](Self::close)
/// releases every current and future waiter on both flows with the
/// recorded reason.
///
/// All methods take `&self`; share the queue between the engine and the
/// application behind an [`Arc`].
pub struct DatagramQueue {
    send: Mutex<SendState>,
    recv_tx: mpsc::Sender<Bytes>,
    recv_rx: AsyncMutex<mpsc::Receiver<Bytes>>,
    shutdown: CancellationToken,
    wake: WakeFn,
    metrics: DatagramMetrics,
}

impl DatagramQueue {
    /// Creates a queue with the given config and wake callback.
    pub fn new(config: DatagramConfig, wake: WakeFn) -> Result<Self> {
        config.validate()?;
        let (recv_tx, recv_rx) = mpsc::channel(config.recv_queue_len);
        Ok(Self {
            send: Mutex::new(SendState::default()),
            recv_tx,
            recv_rx: AsyncMutex::new(recv_rx),
            shutdown: CancellationToken::new(),
            wake,
            metrics: DatagramMetrics::default(),
        })
    }

    // ── Application side ────────────────────────────────────────────────

    /// Queues a datagram and waits until the packetizer has taken it.
    ///
    /// Returns `Ok(())` once the datagram has been dequeued for packing
    /// (not when it reaches the peer; delivery is unreliable), or the
    /// stored close reason if the connection closes first. Dropping the
    /// returned future does not remove an already queued datagram; it may
    /// still be sent. Compose timeouts externally with
    /// `tokio::time::timeout`.
    pub async fn send(&self, datagram: Datagram) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        {
            let mut state = self.lock_send();
            if let Some(reason) = &state.close_reason {
                return Err(DatagramError::closed(reason.clone()));
            }
            state.queue.push_back(PendingSend {
                datagram,
                done: done_tx,
            });
        }
        self.metrics.record_queued();
        (self.wake)();

        match done_rx.await {
            Ok(result) => result,
            // Every queued entry is fired by dequeue or close.
            Err(_) => Err(self.closed_error()),
        }
    }

    /// Waits for the next received datagram payload, oldest first.
    ///
    /// Once the connection is closed this returns the stored reason, even
    /// if undelivered payloads remain buffered.
    pub async fn recv(&self) -> Result<Bytes> {
        let mut rx = self.recv_rx.lock().await;
        tokio::select! {
            biased;

            _ = self.shutdown.cancelled() => Err(self.closed_error()),
            item = rx.recv() => item.ok_or_else(|| self.closed_error()),
        }
    }

    // ── Engine side ─────────────────────────────────────────────────────

    /// Removes the next datagram for packing and releases its sender.
    ///
    /// Non-suspending. Returns `None` when nothing is queued or the
    /// connection is closed. Intended for the packetizer loop in response
    /// to the wake callback; safe to call concurrently with `send`.
    pub fn dequeue(&self) -> Option<Datagram> {
        let entry = {
            let mut state = self.lock_send();
            if state.close_reason.is_some() {
                return None;
            }
            state.queue.pop_front()?
        };
        let PendingSend { datagram, done } = entry;
        // The sender may have abandoned its future; the datagram still goes out.
        let _ = done.send(Ok(()));
        self.metrics.record_sent(datagram.len());
        Some(datagram)
    }

    /// Hands a received datagram payload to the application side.
    ///
    /// Copies the bytes, so the caller's frame buffer is free for reuse
    /// on return. Never suspends and never fails: when the receive buffer
    /// is full, or the connection is closed, the payload is discarded.
    /// Drops are counted and logged at debug level.
    pub fn deliver(&self, payload: &[u8]) {
        if self.shutdown.is_cancelled() {
            return;
        }
        let data = Bytes::copy_from_slice(payload);
        match self.recv_tx.try_send(data) {
            Ok(()) => self.metrics.record_received(payload.len()),
            Err(TrySendError::Full(_)) => {
                self.metrics.record_dropped();
                debug!(
                    len = payload.len(),
                    "Discarding DATAGRAM frame, receive queue full"
                );
            }
            // The receiver half lives beside the sender and is never dropped first.
            Err(TrySendError::Closed(_)) => {}
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Closes the queue, recording `reason` and releasing every waiter.
    ///
    /// Suspended `send` calls (including entries never dequeued) and
    /// `recv` calls return the reason, as does every later call. Only the
    /// first close takes effect; repeats are ignored.
    pub fn close(&self, reason: CloseReason) {
        let drained = {
            let mut state = self.lock_send();
            if state.close_reason.is_some() {
                debug!(%reason, "Ignoring close, queue already closed");
                return;
            }
            state.close_reason = Some(reason.clone());
            std::mem::take(&mut state.queue)
        };
        self.shutdown.cancel();

        let released = drained.len();
        for entry in drained {
            let _ = entry.done.send(Err(DatagramError::closed(reason.clone())));
        }
        info!(%reason, released, "Datagram queue closed");
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Completes once the queue is closed.
    ///
    /// Lets a packetizer loop select between new-work wakeups and
    /// teardown instead of polling [`is_closed`](Self::is_closed).
    pub async fn closed(&self) {
        self.shutdown.cancelled().await;
    }

    /// Current counter snapshot.
    pub fn stats(&self) -> DatagramStats {
        self.metrics.snapshot()
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn lock_send(&self) -> MutexGuard<'_, SendState> {
        // Critical sections never panic, so a poisoned guard is still consistent.
        self.send.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Error carrying the recorded close reason.
    fn closed_error(&self) -> DatagramError {
        // close() records the reason before firing the shutdown token.
        let reason = self
            .lock_send()
            .close_reason
            .clone()
            .unwrap_or(CloseReason::Closed);
        DatagramError::closed(reason)
    }
}

impl std::fmt::Debug for DatagramQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatagramQueue")
            .field("closed", &self.is_closed())
            .field("stats", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}

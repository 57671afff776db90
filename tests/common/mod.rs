//! Shared test helpers for datagram queue integration tests

use dgram_tokio::{DatagramConfig, DatagramQueue, WakeFn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Upper bound for any single await in these tests; hitting it means a
/// waiter was never released.
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Queue whose wake callback stores a permit in the returned [`Notify`],
/// the way a packetizer loop would consume it.
pub fn notified_queue(config: DatagramConfig) -> (Arc<DatagramQueue>, Arc<Notify>) {
    let pending = Arc::new(Notify::new());
    let wake: WakeFn = {
        let pending = pending.clone();
        Arc::new(move || pending.notify_one())
    };
    let queue = DatagramQueue::new(config, wake).expect("valid test config");
    (Arc::new(queue), pending)
}

/// Queue with a no-op wake callback, for tests that drive `dequeue`
/// directly.
pub fn quiet_queue(config: DatagramConfig) -> Arc<DatagramQueue> {
    let queue = DatagramQueue::new(config, Arc::new(|| {})).expect("valid test config");
    Arc::new(queue)
}

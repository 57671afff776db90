//! Queue metrics and monitoring.
//!
//! One [`DatagramMetrics`] lives inside each queue; both the application
//! and the engine side bump it, so everything is atomic counters read
//! with [`DatagramMetrics::snapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for one datagram queue.
#[derive(Debug, Default)]
pub struct DatagramMetrics {
    /// Datagrams accepted into the outbound queue.
    pub datagrams_queued: AtomicU64,
    /// Datagrams handed to the packetizer.
    pub datagrams_sent: AtomicU64,
    /// Datagrams delivered into the inbound buffer.
    pub datagrams_received: AtomicU64,
    /// Inbound datagrams discarded because the buffer was full.
    pub datagrams_dropped: AtomicU64,
    /// Payload bytes handed to the packetizer.
    pub bytes_sent: AtomicU64,
    /// Payload bytes delivered into the inbound buffer.
    pub bytes_received: AtomicU64,
}

impl DatagramMetrics {
    pub(crate) fn record_queued(&self) {
        self.datagrams_queued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sent(&self, len: usize) {
        self.datagrams_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(len as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_received(&self, len: usize) {
        self.datagrams_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(len as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.datagrams_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current counter values.
    pub fn snapshot(&self) -> DatagramStats {
        DatagramStats {
            datagrams_queued: self.datagrams_queued.load(Ordering::Relaxed),
            datagrams_sent: self.datagrams_sent.load(Ordering::Relaxed),
            datagrams_received: self.datagrams_received.load(Ordering::Relaxed),
            datagrams_dropped: self.datagrams_dropped.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
        }
    }
}

/// Counter values at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatagramStats {
    pub datagrams_queued: u64,
    pub datagrams_sent: u64,
    pub datagrams_received: u64,
    pub datagrams_dropped: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

impl DatagramStats {
    /// Fraction of arriving inbound datagrams discarded on overflow.
    pub fn drop_rate(&self) -> f64 {
        let arrived = self.datagrams_received + self.datagrams_dropped;
        if arrived == 0 {
            0.0
        } else {
            self.datagrams_dropped as f64 / arrived as f64
        }
    }
}

/// Format stats for human-readable display.
pub fn format_stats(stats: &DatagramStats) -> String {
    format!(
        "Datagram queue:\n\
         Outbound: {} queued, {} sent ({} bytes)\n\
         Inbound: {} received ({} bytes), {} dropped (drop rate: {:.2}%)",
        stats.datagrams_queued,
        stats.datagrams_sent,
        stats.bytes_sent,
        stats.datagrams_received,
        stats.bytes_received,
        stats.datagrams_dropped,
        stats.drop_rate() * 100.0,
    )
}

//! Configuration for the datagram queue.
//!
//! [`DatagramConfig`] carries the tunables fixed at queue construction.
//! Today that is the inbound buffer capacity; the outbound queue is
//! unbounded by design (backpressure comes from suspending the sender).

use crate::error::{DatagramError, Result};

/// Default inbound buffer capacity, in datagrams.
pub const DEFAULT_RECV_QUEUE_LEN: usize = 128;

// ── DatagramConfig ──────────────────────────────────────────────────────

/// Queue configuration, builder style.
#[derive(Debug, Clone)]
pub struct DatagramConfig {
    /// Capacity of the inbound buffer. Frames arriving while the buffer
    /// holds this many undelivered payloads are dropped.
    pub recv_queue_len: usize,
}

impl Default for DatagramConfig {
    fn default() -> Self {
        Self {
            recv_queue_len: DEFAULT_RECV_QUEUE_LEN,
        }
    }
}

// ── Builder methods ─────────────────────────────────────────────────────

impl DatagramConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recv_queue_len(mut self, len: usize) -> Self {
        self.recv_queue_len = len;
        self
    }

    // -- Validation --

    pub fn validate(&self) -> Result<()> {
        if self.recv_queue_len == 0 {
            return Err(DatagramError::config(
                "Receive queue capacity must be greater than 0",
            ));
        }
        Ok(())
    }
}

// ── Presets ─────────────────────────────────────────────────────────────

impl DatagramConfig {
    /// Small buffer for tests that exercise overflow behavior.
    pub fn testing() -> Self {
        Self::default().recv_queue_len(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DatagramConfig::default();
        assert_eq!(config.recv_queue_len, DEFAULT_RECV_QUEUE_LEN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = DatagramConfig::new().recv_queue_len(0);
        assert!(config.validate().is_err());
    }
}

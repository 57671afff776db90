//! # dgram-tokio
//!
//! The unreliable-datagram hand-off layer of a QUIC-style transport,
//! built on Tokio. It sits between the application's datagram calls and
//! the protocol engine's packetizer: senders suspend until their datagram
//! is taken for packing, received payloads wait in a bounded buffer, and
//! a single close releases every waiter with the recorded reason.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  application                                │
//! │    send(datagram)          recv()           │
//! ├─────────────────────────────────────────────┤
//! │  dgram-tokio  (this crate)                  │
//! │                                             │
//! │  outbound queue  ← FIFO, suspends sender    │
//! │  inbound buffer  ← bounded, drops on full   │
//! │  lifecycle       ← write-once close reason  │
//! ├─────────────────────────────────────────────┤
//! │  protocol engine                            │
//! │    dequeue()    deliver(payload)   close()  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Frame encoding, packet scheduling, and size negotiation stay with the
//! engine; this crate only owns the hand-off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dgram_tokio::{CloseReason, Datagram, DatagramConfig, DatagramQueue, WakeFn};
//! use std::sync::Arc;
//! use tokio::sync::Notify;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pending = Arc::new(Notify::new());
//!     let wake: WakeFn = {
//!         let pending = pending.clone();
//!         Arc::new(move || pending.notify_one())
//!     };
//!     let queue = Arc::new(DatagramQueue::new(DatagramConfig::default(), wake)?);
//!
//!     // Packetizer side: pull queued datagrams whenever woken.
//!     let packer = queue.clone();
//!     tokio::spawn(async move {
//!         loop {
//!             pending.notified().await;
//!             while let Some(datagram) = packer.dequeue() {
//!                 // encode into a DATAGRAM frame and pack it
//!                 let _ = datagram;
//!             }
//!         }
//!     });
//!
//!     queue.send(Datagram::from(b"hello".to_vec())).await?;
//!     queue.close(CloseReason::local(0, "done"));
//!     Ok(())
//! }
//! ```

// ── Layer 1: Value types ────────────────────────────────────────────────

pub mod frame;
pub use frame::Datagram;

// ── Layer 2: Configuration & errors ─────────────────────────────────────

pub mod config;
pub mod error;
pub use config::{DatagramConfig, DEFAULT_RECV_QUEUE_LEN};
pub use error::{CloseReason, DatagramError, Result};

// ── Layer 3: Observability ──────────────────────────────────────────────

pub mod metrics;
pub use metrics::{DatagramMetrics, DatagramStats};

// ── Layer 4: The hand-off queue ─────────────────────────────────────────

pub mod queue;
pub use queue::{DatagramQueue, WakeFn};

// ── Version info ────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

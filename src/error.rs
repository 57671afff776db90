//! Error types for the datagram queue.
//!
//! Intentionally minimal: the queue operations only ever fail with
//! [`DatagramError::ConnectionClosed`], and construction only with
//! [`DatagramError::Config`].

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatagramError>;

// ── Error types ─────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum DatagramError {
    #[error("Connection closed: {reason}")]
    ConnectionClosed { reason: CloseReason },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Terminal reason recorded by `close` and handed to every released waiter.
///
/// The queue never inspects the reason; it stores the first one it is given
/// and clones it to each caller. Constructed by whoever tears the
/// connection down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Closed without further detail.
    Closed,
    /// Orderly close initiated by the local application.
    LocalClose { code: u64, message: String },
    /// Close initiated by the peer.
    PeerClose { code: u64, message: String },
    /// The connection sat idle past its timeout.
    IdleTimeout,
    /// The transport underneath failed.
    TransportError { message: String },
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "connection closed"),
            Self::LocalClose { code, message } => {
                write!(f, "closed by local application (code {code}): {message}")
            }
            Self::PeerClose { code, message } => {
                write!(f, "closed by peer (code {code}): {message}")
            }
            Self::IdleTimeout => write!(f, "idle timeout"),
            Self::TransportError { message } => write!(f, "transport error: {message}"),
        }
    }
}

// ── Constructors ────────────────────────────────────────────────────────

impl DatagramError {
    pub fn closed(reason: CloseReason) -> Self {
        Self::ConnectionClosed { reason }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

impl CloseReason {
    pub fn local(code: u64, message: impl Into<String>) -> Self {
        Self::LocalClose { code, message: message.into() }
    }

    pub fn peer(code: u64, message: impl Into<String>) -> Self {
        Self::PeerClose { code, message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError { message: message.into() }
    }
}

// ── Predicates ──────────────────────────────────────────────────────────

impl DatagramError {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ConnectionClosed { .. })
    }

    /// The stored close reason, if this is a closed-connection error.
    pub fn close_reason(&self) -> Option<&CloseReason> {
        match self {
            Self::ConnectionClosed { reason } => Some(reason),
            _ => None,
        }
    }
}

//! Datagram payload type.
//!
//! A [`Datagram`] is the unit the application hands to the queue: the
//! opaque payload plus the frame metadata the packetizer needs to encode
//! it. Encoding itself lives with the packetizer, not here.

use bytes::Bytes;

/// An unreliable application datagram queued for transmission.
///
/// Immutable once submitted. The payload is reference counted, so cloning
/// a `Datagram` never copies the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    /// The application payload.
    pub payload: Bytes,
    /// Whether the frame is encoded with an explicit length field.
    /// Required whenever the frame is not the last one in its packet.
    pub length_prefixed: bool,
}

impl Datagram {
    /// Wraps a payload in a datagram with an explicit length field.
    pub fn new(payload: Bytes) -> Self {
        Self {
            payload,
            length_prefixed: true,
        }
    }

    /// Copies `payload` into a fresh datagram, leaving the caller's
    /// buffer free for reuse.
    pub fn copy_from_slice(payload: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(payload))
    }

    pub fn length_prefixed(mut self, enabled: bool) -> Self {
        self.length_prefixed = enabled;
        self
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl From<Bytes> for Datagram {
    fn from(payload: Bytes) -> Self {
        Self::new(payload)
    }
}

impl From<Vec<u8>> for Datagram {
    fn from(payload: Vec<u8>) -> Self {
        Self::new(Bytes::from(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let dg = Datagram::new(Bytes::from_static(b"ping"));
        assert_eq!(dg.len(), 4);
        assert!(!dg.is_empty());
        assert!(dg.length_prefixed);

        let dg = Datagram::from(vec![1, 2, 3]).length_prefixed(false);
        assert!(!dg.length_prefixed);
    }

    #[test]
    fn test_copy_from_slice_detaches() {
        let mut scratch = vec![0xAAu8; 8];
        let dg = Datagram::copy_from_slice(&scratch);
        scratch.fill(0x55);
        assert_eq!(&dg.payload[..], &[0xAAu8; 8]);
    }
}

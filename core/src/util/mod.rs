mod preview;
mod ring_bytes;

pub use preview::audit_preview;
pub use ring_bytes::RingBytes;

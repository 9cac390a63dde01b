#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plugcon_core::ConsoleSink;

/// Sink that trickles every write out in small pieces, yielding between
/// them, so a missing lock in the aggregator would show up as interleaving.
#[derive(Clone, Default)]
pub struct TricklingSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl TricklingSink {
    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

#[async_trait]
impl ConsoleSink for TricklingSink {
    fn name(&self) -> &str {
        "trickling"
    }

    async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        for piece in buf.chunks(7) {
            self.buf.lock().unwrap().extend_from_slice(piece);
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    async fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Sink that rejects any write containing `poison`.
#[derive(Clone)]
pub struct PoisonedSink {
    poison: &'static str,
    buf: Arc<Mutex<Vec<u8>>>,
}

impl PoisonedSink {
    pub fn new(poison: &'static str) -> Self {
        Self {
            poison,
            buf: Arc::default(),
        }
    }

    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

#[async_trait]
impl ConsoleSink for PoisonedSink {
    fn name(&self) -> &str {
        "poisoned"
    }

    async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        if String::from_utf8_lossy(buf).contains(self.poison) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "sink refused payload",
            ));
        }
        self.buf.lock().unwrap().extend_from_slice(buf);
        Ok(())
    }

    async fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Splits a tagged line `"[<name> Plugin] : <rest>"` into `(name, rest)`.
pub fn split_tag(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix('[')?;
    let (name, rest) = body.split_once(" Plugin] : ")?;
    Some((name, rest))
}

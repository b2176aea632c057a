//! Response sinks: the byte destination behind one encoder.

use std::borrow::Cow;

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, warn};

use crate::compression::{Compressor, ContentCoding};

/// What the encoder needs from the host's response type.
pub trait ResponseSink {
    fn set_status(&mut self, status: u16);
    fn set_header(&mut self, name: &str, value: &str);
    /// Write one chunk. `false` means the sink is gone or refused the bytes.
    fn write(&mut self, chunk: &[u8]) -> bool;
}

impl<S: ResponseSink + ?Sized> ResponseSink for Box<S> {
    fn set_status(&mut self, status: u16) {
        (**self).set_status(status)
    }
    fn set_header(&mut self, name: &str, value: &str) {
        (**self).set_header(name, value)
    }
    fn write(&mut self, chunk: &[u8]) -> bool {
        (**self).write(chunk)
    }
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn set_status(&mut self, status: u16) {
        (**self).set_status(status)
    }
    fn set_header(&mut self, name: &str, value: &str) {
        (**self).set_header(name, value)
    }
    fn write(&mut self, chunk: &[u8]) -> bool {
        (**self).write(chunk)
    }
}

// ================= Memory =================

/// In-memory response: records status, headers and body.
/// Once closed, every write fails.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    status: Option<u16>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    closed: bool,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Drain the body written so far.
    pub fn take_body(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.body)
    }

    /// Simulate the peer going away.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ResponseSink for BufferSink {
    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(entry) => entry.1 = value.to_owned(),
            None => self.headers.push((name.to_owned(), value.to_owned())),
        }
    }

    fn write(&mut self, chunk: &[u8]) -> bool {
        if self.closed {
            return false;
        }
        self.body.extend_from_slice(chunk);
        true
    }
}

// ================= Channel =================

/// Messages produced by a [`ChannelSink`]: the head once, then body chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Head { status: u16, headers: Vec<(String, String)> },
    Chunk(Vec<u8>),
}

/// Sink that forwards to a channel drained by the host's I/O loop.
/// Writes fail once the receiver is dropped.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<SinkEvent>,
    status: u16,
    headers: Vec<(String, String)>,
    head_sent: bool,
}

impl ChannelSink {
    pub fn new(tx: Sender<SinkEvent>) -> Self {
        Self { tx, status: 0, headers: Vec::new(), head_sent: false }
    }

    /// Unbounded sink/receiver pair.
    pub fn pair() -> (Self, Receiver<SinkEvent>) {
        let (tx, rx) = channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl ResponseSink for ChannelSink {
    fn set_status(&mut self, status: u16) {
        if self.head_sent {
            debug!(status, "status set after head was sent; ignored");
            return;
        }
        self.status = status;
    }

    fn set_header(&mut self, name: &str, value: &str) {
        if self.head_sent {
            debug!(header = name, "header set after head was sent; ignored");
            return;
        }
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    fn write(&mut self, chunk: &[u8]) -> bool {
        if !self.head_sent {
            let head = SinkEvent::Head {
                status: self.status,
                headers: std::mem::take(&mut self.headers),
            };
            if self.tx.send(head).is_err() {
                return false;
            }
            self.head_sent = true;
        }
        self.tx.send(SinkEvent::Chunk(chunk.to_vec())).is_ok()
    }
}

// ================= Compression =================

/// Sink wrapper that compresses every chunk before forwarding it.
pub struct CompressedSink<S> {
    inner: S,
    compressor: Box<dyn Compressor>,
    scratch: Vec<u8>,
    bytes_out: u64,
}

impl<S: ResponseSink> CompressedSink<S> {
    pub fn new(inner: S, compressor: Box<dyn Compressor>) -> Self {
        Self { inner, compressor, scratch: Vec::new(), bytes_out: 0 }
    }

    pub fn coding(&self) -> ContentCoding {
        self.compressor.coding()
    }

    /// Compressed bytes accepted by the inner sink.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Write the stream trailer and hand back the inner sink.
    pub fn finish(mut self) -> S {
        self.scratch.clear();
        match self.compressor.finish(&mut self.scratch) {
            Ok(()) => {
                if !self.scratch.is_empty() && !self.inner.write(&self.scratch) {
                    debug!(coding = %self.compressor.coding(), "trailer dropped by closed sink");
                }
            }
            Err(e) => warn!(error = %e, "compression trailer failed"),
        }
        self.inner
    }
}

impl<S: ResponseSink> ResponseSink for CompressedSink<S> {
    fn set_status(&mut self, status: u16) {
        self.inner.set_status(status)
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.inner.set_header(name, value)
    }

    fn write(&mut self, chunk: &[u8]) -> bool {
        self.scratch.clear();
        if let Err(e) = self.compressor.compress_chunk(chunk, &mut self.scratch) {
            warn!(error = %e, "compression failed; treating sink as closed");
            return false;
        }
        if self.scratch.is_empty() {
            return true;
        }
        let ok = self.inner.write(&self.scratch);
        if ok {
            self.bytes_out += self.scratch.len() as u64;
        }
        ok
    }
}

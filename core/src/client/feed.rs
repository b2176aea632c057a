//! Host-driven standard connection.
//!
//! [`FeedSourceFactory`] is an [`EventSourceFactory`] for hosts that own the
//! HTTP response themselves: the host pushes raw body bytes into the
//! [`FeedSource`] it was handed, and the source decodes them and dispatches
//! events to the listeners a transport attached.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::client::connection::{ConnectionEvent, Listener};
use crate::client::platform::{EventSourceFactory, EventSourceHandle};
use crate::compression::{create_decompressor, CompressionError, ContentCoding, Decompressor};
use crate::framing::{Dialect, EventStreamDecoder};

struct FeedState {
    url: String,
    with_credentials: bool,
    listeners: Vec<(String, Listener)>,
    decoder: EventStreamDecoder,
    decompressor: Option<Box<dyn Decompressor>>,
    closed: bool,
}

/// Shared handle to one feed connection. Clones refer to the same stream.
#[derive(Clone)]
pub struct FeedSource {
    state: Arc<Mutex<FeedState>>,
}

impl FeedSource {
    fn new(url: &str, with_credentials: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedState {
                url: url.to_owned(),
                with_credentials,
                listeners: Vec::new(),
                decoder: EventStreamDecoder::new(Dialect::Standard),
                decompressor: None,
                closed: false,
            })),
        }
    }

    pub fn url(&self) -> String {
        self.lock().url.clone()
    }

    pub fn with_credentials(&self) -> bool {
        self.lock().with_credentials
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.lock().listeners.iter().filter(|(name, _)| name == event).count()
    }

    /// Set the response's `Content-Encoding` before the first push.
    pub fn set_content_coding(&self, coding: ContentCoding) {
        let mut state = self.lock();
        state.decompressor = (!coding.is_identity()).then(|| create_decompressor(coding));
    }

    /// Response headers arrived.
    pub fn connected(&self) {
        self.dispatch(ConnectionEvent::open());
    }

    /// Feed a chunk of response body. Returns the number of events dispatched;
    /// chunks pushed after `close` are ignored. A chunk that fails to
    /// decompress is also reported on the `error` event.
    pub fn push(&self, chunk: &[u8]) -> Result<usize, CompressionError> {
        let decoded = {
            let mut state = self.lock();
            if state.closed {
                return Ok(0);
            }
            let FeedState { decoder, decompressor, .. } = &mut *state;
            match decompressor {
                Some(codec) => {
                    let mut plain = Vec::new();
                    codec.decompress_chunk(chunk, &mut plain).map(|()| decoder.feed(&plain))
                }
                None => Ok(decoder.feed(chunk)),
            }
        };
        let events = match decoded {
            Ok(events) => events,
            Err(err) => {
                warn!(error = %err, "feed: decompress failed");
                self.dispatch(ConnectionEvent::error(Some(err.to_string())));
                return Err(err);
            }
        };
        let count = events.len();
        for ev in events {
            let mut event = ConnectionEvent::message(ev.event, ev.data);
            if !ev.last_event_id.is_empty() {
                event = event.with_last_event_id(ev.last_event_id);
            }
            self.dispatch(event);
        }
        Ok(count)
    }

    /// The underlying transport reported a failure.
    pub fn fail(&self, reason: impl Into<String>) {
        self.dispatch(ConnectionEvent::error(Some(reason.into())));
    }

    /// The response body ended.
    pub fn finish(&self) {
        {
            let mut state = self.lock();
            if state.closed {
                return;
            }
            state.decoder.finish();
        }
        self.dispatch(ConnectionEvent::close());
    }

    fn dispatch(&self, event: ConnectionEvent) {
        let targets: Vec<Listener> = {
            let state = self.lock();
            if state.closed {
                return;
            }
            state
                .listeners
                .iter()
                .filter(|(name, _)| *name == event.kind)
                .map(|(_, l)| l.clone())
                .collect()
        };
        for listener in targets {
            listener.call(&event);
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSourceHandle for FeedSource {
    fn add_listener(&mut self, event: &str, listener: Listener) {
        self.lock().listeners.push((event.to_owned(), listener));
    }

    fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.lock().listeners.retain(|(name, l)| !(name == event && l.same(listener)));
    }

    fn close(&mut self) {
        let mut state = self.lock();
        if !state.closed {
            state.closed = true;
            debug!(url = %state.url, "feed: closed");
        }
    }
}

impl fmt::Debug for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("FeedSource")
            .field("url", &state.url)
            .field("listeners", &state.listeners.len())
            .field("closed", &state.closed)
            .finish()
    }
}

/// Factory handing out [`FeedSource`]s and remembering them for the host.
#[derive(Default)]
pub struct FeedSourceFactory {
    opened: Mutex<Vec<FeedSource>>,
}

impl FeedSourceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources opened since the last call, oldest first. Sources already
    /// closed when a newer one was opened are not retained.
    pub fn take_opened(&self) -> Vec<FeedSource> {
        std::mem::take(&mut *self.lock())
    }

    /// Most recently opened source still held by the factory.
    pub fn latest(&self) -> Option<FeedSource> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FeedSource>> {
        self.opened.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSourceFactory for FeedSourceFactory {
    fn open(&self, url: &str, with_credentials: bool) -> Box<dyn EventSourceHandle> {
        debug!(url, with_credentials, "feed: open");
        let source = FeedSource::new(url, with_credentials);
        let mut opened = self.lock();
        opened.retain(|s| !s.is_closed());
        opened.push(source.clone());
        Box::new(source)
    }
}

impl fmt::Debug for FeedSourceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedSourceFactory").field("opened", &self.lock().len()).finish()
    }
}

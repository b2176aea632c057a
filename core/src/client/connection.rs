//! The two connection strategies behind one listener surface.

use std::fmt;
use std::sync::Arc;

use crate::client::legacy::{LegacyMarker, SRC_ATTRIBUTE};
use crate::client::platform::{EventSourceFactory, EventSourceHandle, LegacyDocument, LegacyElement};
use crate::client::transport::TransportError;
use crate::constants::events;
use crate::framing::Dialect;

/// Event raised by a connection handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEvent {
    /// Event name the handle dispatched under (`message`, `sse`, `open`, ...).
    pub kind: String,
    /// Payload field of message events, passed through untouched.
    pub data: Option<String>,
    pub last_event_id: Option<String>,
    /// Whatever the underlying transport reported for `error` events.
    pub error: Option<String>,
}

impl ConnectionEvent {
    pub fn message(kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self { kind: kind.into(), data: Some(data.into()), last_event_id: None, error: None }
    }

    pub fn with_last_event_id(mut self, id: impl Into<String>) -> Self {
        self.last_event_id = Some(id.into());
        self
    }

    pub fn open() -> Self {
        Self::signal(events::OPEN)
    }

    pub fn close() -> Self {
        Self::signal(events::CLOSE)
    }

    pub fn error(reason: Option<String>) -> Self {
        Self { error: reason, ..Self::signal(events::ERROR) }
    }

    fn signal(kind: &str) -> Self {
        Self { kind: kind.to_owned(), data: None, last_event_id: None, error: None }
    }
}

/// Callback bound to a connection handle. Identity is by allocation, so
/// the same `Listener` value can be detached after being attached.
#[derive(Clone)]
pub struct Listener(Arc<dyn Fn(&ConnectionEvent) + Send + Sync>);

impl Listener {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ConnectionEvent) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, event: &ConnectionEvent) {
        (self.0)(event)
    }

    pub fn same(&self, other: &Listener) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.0).cast::<()>(), Arc::as_ptr(&other.0).cast::<()>())
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// Capability every connection strategy exposes to the transport.
pub trait Connection: Send {
    fn add_listener(&mut self, event: &str, listener: Listener);
    fn remove_listener(&mut self, event: &str, listener: &Listener);
    fn close(&mut self);
    fn dialect(&self) -> Dialect;
}

/// Standard strategy: the host's native streaming primitive.
pub struct StandardConnection {
    handle: Box<dyn EventSourceHandle>,
    url: String,
}

impl StandardConnection {
    /// Connect with cross-origin credentials enabled.
    pub fn open(factory: &dyn EventSourceFactory, url: &str) -> Self {
        Self { handle: factory.open(url, true), url: url.to_owned() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Connection for StandardConnection {
    fn add_listener(&mut self, event: &str, listener: Listener) {
        self.handle.add_listener(event, listener)
    }

    fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.handle.remove_listener(event, listener)
    }

    fn close(&mut self) {
        self.handle.close()
    }

    fn dialect(&self) -> Dialect {
        Dialect::Standard
    }
}

/// Legacy strategy: an event-source element mounted into the document.
/// The element lives exactly as long as this connection.
pub struct LegacyConnection {
    element: Box<dyn LegacyElement>,
    marker: LegacyMarker,
    url: String,
}

impl LegacyConnection {
    /// Mint a marker, mount the element for the marked URL and look it back up.
    pub fn mount(document: &dyn LegacyDocument, url: &str) -> Result<Self, TransportError> {
        let marker = LegacyMarker::mint();
        let url = marker.apply(url);
        document.mount(&marker.markup(&url));
        let element = document
            .element_by_id(&marker.element_id())
            .ok_or_else(|| TransportError::LegacyMountFailed(marker.element_id()))?;
        Ok(Self { element, marker, url })
    }

    pub fn marker(&self) -> LegacyMarker {
        self.marker
    }

    /// URL including the legacy query marker.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Connection for LegacyConnection {
    fn add_listener(&mut self, event: &str, listener: Listener) {
        self.element.add_listener(event, listener)
    }

    fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.element.remove_listener(event, listener)
    }

    fn close(&mut self) {
        self.element.remove_event_source();
        self.element.remove_attribute(SRC_ATTRIBUTE);
    }

    fn dialect(&self) -> Dialect {
        Dialect::Legacy
    }
}

/// The live connection of a transport: one of the two strategies.
pub enum ActiveConnection {
    Standard(StandardConnection),
    Legacy(LegacyConnection),
}

impl ActiveConnection {
    /// Event name payloads arrive under for this strategy.
    pub fn data_event(&self) -> &'static str {
        match self {
            ActiveConnection::Standard(_) => events::MESSAGE,
            ActiveConnection::Legacy(_) => events::LEGACY,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ActiveConnection::Standard(c) => c.url(),
            ActiveConnection::Legacy(c) => c.url(),
        }
    }

    fn inner(&mut self) -> &mut dyn Connection {
        match self {
            ActiveConnection::Standard(c) => c,
            ActiveConnection::Legacy(c) => c,
        }
    }
}

impl Connection for ActiveConnection {
    fn add_listener(&mut self, event: &str, listener: Listener) {
        self.inner().add_listener(event, listener)
    }

    fn remove_listener(&mut self, event: &str, listener: &Listener) {
        self.inner().remove_listener(event, listener)
    }

    fn close(&mut self) {
        self.inner().close()
    }

    fn dialect(&self) -> Dialect {
        match self {
            ActiveConnection::Standard(c) => c.dialect(),
            ActiveConnection::Legacy(c) => c.dialect(),
        }
    }
}

impl fmt::Debug for ActiveConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveConnection")
            .field("dialect", &self.dialect())
            .field("url", &self.url())
            .finish()
    }
}

//! Host primitives the transport connects through, and the capability check over them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::connection::Listener;
use crate::framing::Dialect;

/// Standard persistent streaming primitive (an `EventSource` constructor).
pub trait EventSourceFactory: Send + Sync {
    /// Start a connection to `url`.
    fn open(&self, url: &str, with_credentials: bool) -> Box<dyn EventSourceHandle>;

    /// Whether credentialed cross-origin connections are honoured.
    fn supports_credentials(&self) -> bool {
        true
    }
}

/// A live standard connection.
pub trait EventSourceHandle: Send {
    fn add_listener(&mut self, event: &str, listener: Listener);
    fn remove_listener(&mut self, event: &str, listener: &Listener);
    fn close(&mut self);
}

/// Document able to host legacy event-source elements.
pub trait LegacyDocument: Send + Sync {
    /// Attach a container holding `markup` to the document body.
    fn mount(&self, markup: &str);
    /// Look a mounted element up by id.
    fn element_by_id(&self, id: &str) -> Option<Box<dyn LegacyElement>>;
}

/// A mounted legacy event-source element.
pub trait LegacyElement: Send {
    fn add_listener(&mut self, event: &str, listener: Listener);
    fn remove_listener(&mut self, event: &str, listener: &Listener);
    /// Stop the element's stream.
    fn remove_event_source(&mut self);
    fn remove_attribute(&mut self, name: &str);
}

/// Capability flags, detected once per platform and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// The legacy event-source primitive exists.
    pub legacy: bool,
    /// Some delivery mechanism exists.
    pub supported: bool,
    /// The standard primitive accepts credentialed cross-origin connections.
    pub cross_domain: bool,
}

impl Capabilities {
    pub fn detect(
        standard: Option<&dyn EventSourceFactory>,
        legacy: Option<&dyn LegacyDocument>,
    ) -> Self {
        let legacy = legacy.is_some();
        Self {
            legacy,
            supported: legacy || standard.is_some(),
            cross_domain: standard.is_some_and(|f| f.supports_credentials()),
        }
    }

    /// Delivery dialect every transport on this platform uses.
    pub fn dialect(&self) -> Dialect {
        if self.legacy {
            Dialect::Legacy
        } else {
            Dialect::Standard
        }
    }
}

/// Process-wide connection context: the host primitives plus the
/// capabilities detected from them. Build it once and share it.
#[derive(Clone)]
pub struct Platform {
    standard: Option<Arc<dyn EventSourceFactory>>,
    legacy: Option<Arc<dyn LegacyDocument>>,
    capabilities: Capabilities,
}

impl Platform {
    pub fn new(
        standard: Option<Arc<dyn EventSourceFactory>>,
        legacy: Option<Arc<dyn LegacyDocument>>,
    ) -> Self {
        let capabilities = Capabilities::detect(standard.as_deref(), legacy.as_deref());
        Self { standard, legacy, capabilities }
    }

    pub fn standard(factory: Arc<dyn EventSourceFactory>) -> Self {
        Self::new(Some(factory), None)
    }

    pub fn legacy(document: Arc<dyn LegacyDocument>) -> Self {
        Self::new(None, Some(document))
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn dialect(&self) -> Dialect {
        self.capabilities.dialect()
    }

    pub(crate) fn event_source(&self) -> Option<&Arc<dyn EventSourceFactory>> {
        self.standard.as_ref()
    }

    pub(crate) fn document(&self) -> Option<&Arc<dyn LegacyDocument>> {
        self.legacy.as_ref()
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

//! Client transport: one connection, four normalized channels.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::client::connection::{
    ActiveConnection, Connection, ConnectionEvent, LegacyConnection, Listener, StandardConnection,
};
use crate::client::emitter::{Channel, Emitter, SubscriptionId, TransportEvent};
use crate::client::platform::Platform;
use crate::config::TransportConfig;
use crate::constants::events;
use crate::framing::Dialect;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no URL to open")]
    MissingUrl,
    #[error("no event stream mechanism available on this platform")]
    Unsupported,
    #[error("legacy event source `{0}` not found after mounting")]
    LegacyMountFailed(String),
    #[error("transport has been destroyed")]
    Destroyed,
}

/// The four listeners bound to every connection, kept so the exact same
/// values can be detached again.
struct ListenerSet {
    data: Listener,
    error: Listener,
    close: Listener,
    open: Listener,
}

impl ListenerSet {
    fn bind(emitter: &Arc<Emitter>) -> Self {
        let forward = |make: fn(&ConnectionEvent) -> TransportEvent| {
            let emitter = Arc::clone(emitter);
            Listener::new(move |event| emitter.emit(&make(event)))
        };
        Self {
            data: forward(|e| TransportEvent::Data(e.data.clone().unwrap_or_default())),
            error: forward(|e| TransportEvent::Error(e.error.clone())),
            close: forward(|_| TransportEvent::Close),
            open: forward(|_| TransportEvent::Open),
        }
    }

    fn attach(&self, connection: &mut ActiveConnection) {
        let data_event = connection.data_event();
        connection.add_listener(data_event, self.data.clone());
        connection.add_listener(events::ERROR, self.error.clone());
        connection.add_listener(events::CLOSE, self.close.clone());
        connection.add_listener(events::OPEN, self.open.clone());
    }

    fn detach(&self, connection: &mut ActiveConnection) {
        // The data listener is removed under both names; only one was bound.
        connection.remove_listener(events::MESSAGE, &self.data);
        connection.remove_listener(events::LEGACY, &self.data);
        connection.remove_listener(events::ERROR, &self.error);
        connection.remove_listener(events::CLOSE, &self.close);
        connection.remove_listener(events::OPEN, &self.open);
    }
}

/// Client endpoint of an event stream.
///
/// The delivery mechanism is chosen from the [`Platform`] capabilities on
/// every `open`: the legacy element when the platform has one, otherwise the
/// standard primitive. Whichever is used, subscribers see the same
/// [`TransportEvent`]s on the same [`Channel`]s.
///
/// At most one connection is live at a time; `open` on a connected
/// transport ends the previous connection first. After [`destroy`](Self::destroy)
/// `open` fails and `end` does nothing.
pub struct Transport {
    url: Option<String>,
    platform: Arc<Platform>,
    connection: Option<ActiveConnection>,
    listeners: Option<ListenerSet>,
    emitter: Arc<Emitter>,
    noreconnect: bool,
}

impl Transport {
    /// Build a transport and, unless `config.manual`, open it.
    pub fn new(
        url: impl Into<String>,
        config: TransportConfig,
        platform: Arc<Platform>,
    ) -> Result<Self, TransportError> {
        Self::build(url.into(), config, platform, None)
    }

    /// Like [`new`](Self::new), subscribing `on_data` to the data channel first.
    pub fn with_data_handler<F>(
        url: impl Into<String>,
        config: TransportConfig,
        platform: Arc<Platform>,
        on_data: F,
    ) -> Result<Self, TransportError>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self::build(url.into(), config, platform, Some(Box::new(on_data)))
    }

    fn build(
        url: String,
        config: TransportConfig,
        platform: Arc<Platform>,
        on_data: Option<Box<dyn Fn(&str) + Send + Sync>>,
    ) -> Result<Self, TransportError> {
        let emitter = Arc::new(Emitter::new());
        let listeners = ListenerSet::bind(&emitter);
        let mut transport = Self {
            url: Some(url),
            platform,
            connection: None,
            listeners: Some(listeners),
            emitter,
            noreconnect: !config.reconnect,
        };
        if let Some(handler) = on_data {
            transport.on(Channel::Data, move |event| {
                if let TransportEvent::Data(payload) = event {
                    handler(payload);
                }
            });
        }
        if !config.manual {
            transport.open(None)?;
        }
        Ok(transport)
    }

    /// Connect, optionally switching to a new URL first.
    pub fn open(&mut self, url: Option<&str>) -> Result<(), TransportError> {
        if self.listeners.is_none() {
            return Err(TransportError::Destroyed);
        }
        if self.connection.is_some() {
            self.end();
        }
        if let Some(url) = url {
            self.url = Some(url.to_owned());
        }
        let url = self.url.clone().ok_or(TransportError::MissingUrl)?;

        let capabilities = self.platform.capabilities();
        if !capabilities.supported {
            warn!(url = %url, "transport: no delivery mechanism");
            return Err(TransportError::Unsupported);
        }
        let mut connection = match capabilities.dialect() {
            Dialect::Standard => {
                let factory = self.platform.event_source().ok_or(TransportError::Unsupported)?;
                ActiveConnection::Standard(StandardConnection::open(factory.as_ref(), &url))
            }
            Dialect::Legacy => {
                let document = self.platform.document().ok_or(TransportError::Unsupported)?;
                ActiveConnection::Legacy(LegacyConnection::mount(document.as_ref(), &url)?)
            }
        };
        if let Some(listeners) = &self.listeners {
            listeners.attach(&mut connection);
        }
        debug!(url = %connection.url(), dialect = %connection.dialect(), "transport: open");
        self.connection = Some(connection);
        Ok(())
    }

    /// Close the connection and detach its listeners. No-op when not connected.
    pub fn end(&mut self) {
        let Some(mut connection) = self.connection.take() else {
            return;
        };
        connection.close();
        if let Some(listeners) = &self.listeners {
            listeners.detach(&mut connection);
        }
        debug!(url = %connection.url(), "transport: end");
    }

    /// End, then drop the listener set, the URL and every subscription.
    pub fn destroy(&mut self) {
        self.end();
        debug!(url = ?self.url, "transport: destroy");
        self.listeners = None;
        self.url = None;
        self.emitter.clear();
    }

    pub fn on<F>(&self, channel: Channel, handler: F) -> SubscriptionId
    where
        F: Fn(&TransportEvent) + Send + Sync + 'static,
    {
        self.emitter.on(channel, handler)
    }

    pub fn off(&self, id: SubscriptionId) -> bool {
        self.emitter.off(id)
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn connection(&self) -> Option<&ActiveConnection> {
        self.connection.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.listeners.is_none()
    }

    /// Stored from the config; the transport never reconnects on its own.
    pub fn noreconnect(&self) -> bool {
        self.noreconnect
    }

    pub fn dialect(&self) -> Dialect {
        self.platform.dialect()
    }

    pub fn platform(&self) -> &Arc<Platform> {
        &self.platform
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.end();
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("url", &self.url)
            .field("connection", &self.connection)
            .field("destroyed", &self.is_destroyed())
            .field("subscribers", &self.emitter)
            .finish()
    }
}

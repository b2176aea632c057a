//! Client side of the protocol.
//!
//! A [`Transport`] picks the standard or the legacy delivery mechanism from
//! the [`Platform`] it is given and surfaces both through the same four
//! channels: `data`, `open`, `error`, `close`.

pub mod platform;
pub mod connection;
pub mod emitter;
pub mod legacy;
pub mod feed;
pub mod transport;

pub use platform::{
    Capabilities, EventSourceFactory, EventSourceHandle, LegacyDocument, LegacyElement, Platform,
};
pub use connection::{ActiveConnection, Connection, ConnectionEvent, LegacyConnection, Listener, StandardConnection};
pub use emitter::{Channel, Emitter, SubscriptionId, TransportEvent};
pub use legacy::LegacyMarker;
pub use feed::{FeedSource, FeedSourceFactory};
pub use transport::{Transport, TransportError};

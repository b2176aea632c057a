//! Named-channel fan-out for transport events.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// The four channels a transport exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Data,
    Open,
    Error,
    Close,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Data, Channel::Open, Channel::Error, Channel::Close];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Data => "data",
            Channel::Open => "open",
            Channel::Error => "error",
            Channel::Close => "close",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized event surfaced to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Raw payload string, not parsed further.
    Data(String),
    Open,
    /// Whatever the underlying transport reported.
    Error(Option<String>),
    Close,
}

impl TransportEvent {
    pub fn channel(&self) -> Channel {
        match self {
            TransportEvent::Data(_) => Channel::Data,
            TransportEvent::Open => Channel::Open,
            TransportEvent::Error(_) => Channel::Error,
            TransportEvent::Close => Channel::Close,
        }
    }
}

/// Handle returned by [`Emitter::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&TransportEvent) + Send + Sync>;

#[derive(Default)]
pub struct Emitter {
    handlers: Mutex<Vec<(SubscriptionId, Channel, Handler)>>,
    next_id: AtomicU64,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, channel: Channel, handler: F) -> SubscriptionId
    where
        F: Fn(&TransportEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, channel, Arc::new(handler)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.lock();
        let before = handlers.len();
        handlers.retain(|(sub, _, _)| *sub != id);
        handlers.len() != before
    }

    /// Deliver `event` to every subscriber of its channel, in subscription order.
    pub fn emit(&self, event: &TransportEvent) {
        let channel = event.channel();
        // Handlers may subscribe or emit again; call them unlocked.
        let targets: Vec<Handler> = self
            .lock()
            .iter()
            .filter(|(_, ch, _)| *ch == channel)
            .map(|(_, _, h)| Arc::clone(h))
            .collect();
        for handler in targets {
            handler(event);
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        self.lock().iter().filter(|(_, ch, _)| *ch == channel).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Channel, Handler)>> {
        self.handlers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts = f.debug_map();
        for channel in Channel::ALL {
            counts.entry(&channel.as_str(), &self.listener_count(channel));
        }
        counts.finish()
    }
}

//! Server side of the protocol: one [`StreamEncoder`] per accepted response.
//!
//! The HTTP server itself is external; it is reached only through the
//! [`Request`] and [`ResponseSink`] seams.

pub mod request;
pub mod sink;
pub mod dialect;
pub mod resume;
pub mod message;
pub mod encoder;

pub use request::{IncomingRequest, Request};
pub use sink::{BufferSink, ChannelSink, CompressedSink, ResponseSink, SinkEvent};
pub use dialect::{detect_dialect, is_early_opera};
pub use resume::{parse_last_event_id, LastEventId};
pub use message::Message;
pub use encoder::StreamEncoder;

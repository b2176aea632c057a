//! Stream encoder: frames, numbers and compresses messages for one connection.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::compression::{create_compressor, negotiate, ContentCoding};
use crate::config::EncoderConfig;
use crate::constants::{headers, CONTENT_TYPE_LEGACY, CONTENT_TYPE_STANDARD, STATUS_OK};
use crate::framing::{
    format_frame, terminate, write_frame, Dialect, KEY_DATA, KEY_ID, KEY_LEGACY_EVENT, KEY_RETRY,
    LEGACY_EVENT_NAME,
};
use crate::recovery::{ReplaySource, SequenceStore};
use crate::server::dialect::detect_dialect;
use crate::server::message::Message;
use crate::server::request::Request;
use crate::server::resume::{parse_last_event_id, LastEventId};
use crate::server::sink::{CompressedSink, ResponseSink};
use crate::telemetry::{StreamCounters, StreamSnapshot};

/// The sink as the encoder holds it: raw for identity, wrapped otherwise.
enum SinkSlot<S> {
    Plain(S),
    Compressed(CompressedSink<S>),
}

impl<S: ResponseSink> SinkSlot<S> {
    fn sink(&mut self) -> &mut dyn ResponseSink {
        match self {
            SinkSlot::Plain(s) => s,
            SinkSlot::Compressed(s) => s,
        }
    }

    fn get_ref(&self) -> &S {
        match self {
            SinkSlot::Plain(s) => s,
            SinkSlot::Compressed(s) => s.get_ref(),
        }
    }

    fn bytes_wire(&self, framed: u64) -> u64 {
        match self {
            SinkSlot::Plain(_) => framed,
            SinkSlot::Compressed(s) => s.bytes_out(),
        }
    }

    fn into_inner(self) -> S {
        match self {
            SinkSlot::Plain(s) => s,
            SinkSlot::Compressed(s) => s.finish(),
        }
    }
}

/// One outbound event stream.
///
/// Dialect and content coding are fixed at construction. Every write is
/// serialized through this value; there is no queueing, so a slow peer is
/// absorbed only by the sink's own buffering.
pub struct StreamEncoder<S: ResponseSink> {
    sink: Option<SinkSlot<S>>,
    dialect: Dialect,
    coding: ContentCoding,
    config: EncoderConfig,
    sequence: u64,
    last_event_id: Option<LastEventId>,
    store: Option<Arc<dyn SequenceStore>>,
    counters: StreamCounters,
    accepted: bool,
    started: Instant,
}

impl<S: ResponseSink> StreamEncoder<S> {
    /// Wrap an accepted request/response pair. Unless `config.manual` is set
    /// the response head is written immediately.
    pub fn new<R: Request + ?Sized>(request: &R, sink: S, config: EncoderConfig) -> Self {
        let requested = if config.compression {
            negotiate(request.header(headers::ACCEPT_ENCODING), &config.codings)
        } else {
            ContentCoding::Identity
        };

        let (coding, slot) = if requested.is_identity() {
            (ContentCoding::Identity, SinkSlot::Plain(sink))
        } else {
            match create_compressor(requested, Some(config.compression_level)) {
                Ok(compressor) => (requested, SinkSlot::Compressed(CompressedSink::new(sink, compressor))),
                Err(e) => {
                    warn!(error = %e, "falling back to identity coding");
                    (ContentCoding::Identity, SinkSlot::Plain(sink))
                }
            }
        };

        let dialect = detect_dialect(request);
        debug!(%dialect, %coding, numbering = config.numbering, "stream encoder created");

        let manual = config.manual;
        let mut encoder = Self {
            sink: Some(slot),
            dialect,
            coding,
            config,
            sequence: 0,
            last_event_id: None,
            store: None,
            counters: StreamCounters::default(),
            accepted: false,
            started: Instant::now(),
        };
        if !manual {
            encoder.accept(request);
        }
        encoder
    }

    /// Attach the replay store that receives every numbered payload.
    pub fn with_store(mut self, store: Arc<dyn SequenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn set_store(&mut self, store: Arc<dyn SequenceStore>) {
        self.store = Some(store);
    }

    /// Write the response head and record the peer's resume id.
    pub fn accept<R: Request + ?Sized>(&mut self, request: &R) {
        self.last_event_id = request.header(headers::LAST_EVENT_ID).map(parse_last_event_id);

        let content_type = match self.dialect {
            Dialect::Legacy => CONTENT_TYPE_LEGACY,
            Dialect::Standard => CONTENT_TYPE_STANDARD,
        };
        let coding = self.coding;

        let Some(slot) = self.sink.as_mut() else {
            warn!("accept called without an attached sink");
            return;
        };
        let sink = slot.sink();
        sink.set_status(STATUS_OK);
        sink.set_header(headers::TRANSFER_ENCODING, "chunked");
        sink.set_header(headers::CACHE_CONTROL, "no-cache");
        sink.set_header(headers::CONNECTION, "keep-alive");
        sink.set_header(headers::CONTENT_TYPE, content_type);
        if !coding.is_identity() {
            sink.set_header(headers::CONTENT_ENCODING, coding.token());
            sink.set_header(headers::VARY, headers::CONTENT_ENCODING);
        }
        self.accepted = true;

        debug!(
            content_type,
            last_event_id = ?self.last_event_id,
            "stream accepted"
        );
    }

    /// Announce the client reconnection interval.
    pub fn retry(&mut self, interval_ms: u64) -> bool {
        let frame = format_frame(self.dialect, KEY_RETRY, interval_ms);
        self.counters.add_retry();
        self.flush(frame)
    }

    /// Send one message: a single value or an ordered sequence of values,
    /// each framed as its own `data` line.
    ///
    /// Legacy connections always receive the fixed `Event: sse` frame instead;
    /// their payload reaches the client through the legacy element itself.
    pub fn write<M: Message + ?Sized>(&mut self, message: &M) -> bool {
        let dialect = self.dialect;
        let mut frames = String::new();
        let mut count = 0usize;
        message.for_each_value(&mut |value| {
            write_frame(&mut frames, dialect, KEY_DATA, value);
            count += 1;
        });

        if dialect.is_legacy() {
            self.counters.add_legacy();
            return self.flush(format_frame(dialect, KEY_LEGACY_EVENT, LEGACY_EVENT_NAME));
        }
        self.counters.add_data(count);

        if self.config.numbering {
            if let Some(store) = &self.store {
                if let Err(e) = store.set(self.sequence, &frames) {
                    warn!(error = %e, sequence = self.sequence, "sequence store rejected payload");
                }
            }
            let mut numbered = format_frame(dialect, KEY_ID, self.sequence);
            numbered.push_str(&frames);
            frames = numbered;
            self.counters.add_id();
            self.sequence += 1;
        }

        self.flush(frames)
    }

    /// Re-send stored frames newer than the peer's resume id, with their
    /// original ids. Applies only to numbered standard streams with a valid
    /// resume id; never advances `sequence`.
    pub fn replay<Src: ReplaySource + ?Sized>(&mut self, source: &Src) -> bool {
        if self.dialect.is_legacy() || !self.config.numbering {
            return true;
        }
        let Some(last) = self.last_event_id.as_ref().and_then(LastEventId::sequence) else {
            return true;
        };

        let entries = source.entries_after(last);
        debug!(after = last, count = entries.len(), "replaying stored frames");
        for entry in entries {
            let mut frames = format_frame(self.dialect, KEY_ID, entry.sequence);
            frames.push_str(&entry.payload);
            self.counters.add_id();
            if !self.flush(frames) {
                return false;
            }
        }
        true
    }

    /// Terminate the frame group and hand it to the sink in one write.
    fn flush(&mut self, mut payload: String) -> bool {
        terminate(&mut payload);
        let Some(slot) = self.sink.as_mut() else {
            self.counters.record_write(false, payload.len());
            return false;
        };
        let ok = slot.sink().write(payload.as_bytes());
        if !ok {
            warn!(sequence = self.sequence, "stream write failed; connection is gone");
        }
        self.counters.record_write(ok, payload.len());
        ok
    }

    /// Finish the compression stream and release the raw sink.
    /// Every later write returns `false`.
    pub fn detach(&mut self) -> Option<S> {
        self.sink.take().map(SinkSlot::into_inner)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn coding(&self) -> ContentCoding {
        self.coding
    }

    /// Next sequence number to be assigned.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn last_event_id(&self) -> Option<&LastEventId> {
        self.last_event_id.as_ref()
    }

    pub fn numbering(&self) -> bool {
        self.config.numbering
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// The raw sink, underneath any compression.
    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref().map(SinkSlot::get_ref)
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> StreamSnapshot {
        let wire = self
            .sink
            .as_ref()
            .map_or(self.counters.bytes_framed, |s| s.bytes_wire(self.counters.bytes_framed));
        StreamSnapshot::new(
            self.dialect,
            self.coding,
            self.sequence,
            &self.counters,
            wire,
            self.started.elapsed(),
        )
    }
}

impl<S: ResponseSink> fmt::Debug for StreamEncoder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamEncoder")
            .field("dialect", &self.dialect)
            .field("coding", &self.coding)
            .field("sequence", &self.sequence)
            .field("last_event_id", &self.last_event_id)
            .field("attached", &self.sink.is_some())
            .finish()
    }
}

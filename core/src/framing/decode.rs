use crate::constants::events;
use crate::framing::types::{
    DecodedEvent, Dialect, KEY_DATA, KEY_EVENT, KEY_ID, KEY_LEGACY_EVENT, KEY_RETRY,
};

const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Incremental decoder for the event stream wire format.
///
/// Accepts arbitrary chunk boundaries, including a `\r\n` pair split across
/// two calls. One optional space after `:` is stripped, so frames written in
/// either dialect decode to the same values.
#[derive(Debug, Clone)]
pub struct EventStreamDecoder {
    dialect: Dialect,
    line: Vec<u8>,
    pending_cr: bool,
    at_stream_start: bool,
    event: Option<String>,
    data: String,
    last_event_id: String,
    retry: Option<u64>,
}

impl EventStreamDecoder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            line: Vec::new(),
            pending_cr: false,
            at_stream_start: true,
            event: None,
            data: String::new(),
            last_event_id: String::new(),
            retry: None,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Last `id` seen on the stream (empty when none).
    pub fn last_event_id(&self) -> &str {
        &self.last_event_id
    }

    /// Reconnection interval announced by the most recent valid `retry` frame.
    pub fn retry(&self) -> Option<u64> {
        self.retry
    }

    /// Consume a chunk and return every event completed by it, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<DecodedEvent> {
        let mut out = Vec::new();
        for &b in chunk {
            if self.pending_cr {
                self.pending_cr = false;
                if b == b'\n' {
                    continue;
                }
            }
            match b {
                b'\n' => self.end_line(&mut out),
                b'\r' => {
                    self.end_line(&mut out);
                    self.pending_cr = true;
                }
                _ => self.line.push(b),
            }
        }
        out
    }

    /// End of stream: an unterminated event block is discarded.
    pub fn finish(&mut self) {
        self.line.clear();
        self.pending_cr = false;
        self.event = None;
        self.data.clear();
    }

    fn end_line(&mut self, out: &mut Vec<DecodedEvent>) {
        let raw = std::mem::take(&mut self.line);
        let mut bytes: &[u8] = &raw;
        if self.at_stream_start {
            self.at_stream_start = false;
            if let Some(rest) = bytes.strip_prefix(&BOM) {
                bytes = rest;
            }
        }

        let text = String::from_utf8_lossy(bytes);
        if text.is_empty() {
            self.dispatch(out);
            return;
        }
        if text.starts_with(':') {
            // comment / keep-alive
            return;
        }

        match text.find(':') {
            Some(i) => {
                let value = &text[i + 1..];
                self.process_field(&text[..i], value.strip_prefix(' ').unwrap_or(value));
            }
            None => self.process_field(&text, ""),
        }
    }

    fn process_field(&mut self, field: &str, value: &str) {
        match field {
            KEY_DATA => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            KEY_EVENT | KEY_LEGACY_EVENT => self.event = Some(value.to_owned()),
            KEY_ID => {
                if !value.contains('\0') {
                    self.last_event_id = value.to_owned();
                }
            }
            KEY_RETRY => {
                if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(ms) = value.parse() {
                        self.retry = Some(ms);
                    }
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, out: &mut Vec<DecodedEvent>) {
        let event = self.event.take().filter(|name| !name.is_empty());

        if self.data.is_empty() {
            // Legacy payloads travel out-of-band; the named block itself is the signal.
            if self.dialect.is_legacy() {
                if let Some(name) = event {
                    out.push(DecodedEvent {
                        event: name,
                        data: String::new(),
                        last_event_id: self.last_event_id.clone(),
                    });
                }
            }
            return;
        }

        let mut data = std::mem::take(&mut self.data);
        data.pop();

        out.push(DecodedEvent {
            event: event.unwrap_or_else(|| events::MESSAGE.to_owned()),
            data,
            last_event_id: self.last_event_id.clone(),
        });
    }
}

impl Default for EventStreamDecoder {
    fn default() -> Self {
        Self::new(Dialect::Standard)
    }
}

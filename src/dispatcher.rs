//! Dispatcher: device-tag filtering and handler invocation
//!
//! Owns one port, one line buffer, one command table. Poll-driven from a
//! single thread; nothing here blocks except a reply's flush.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::String;
use log::{trace, warn};

use crate::bus_tx::BusTx;
use crate::line_buffer::{LineBuffer, LineStatus, LINE_SIZE};
use crate::table::{CommandTable, Handler};
use crate::tokens::Tokenizer;
use crate::transport::Transport;

/// Maximum device identity length in bytes.
pub const DEVICE_ID_SIZE: usize = 32;

/// Maximum delimiter-set length in bytes.
pub const DELIMITER_SET_SIZE: usize = 8;

/// What a handler is allowed to do: pull the remaining tokens of its own
/// line and send replies. Nothing else of the dispatcher is reachable.
pub struct Context<'a> {
    name: &'a str,
    tokens: Tokenizer<'a>,
    sink: &'a mut dyn ReplySink,
}

impl<'a> Context<'a> {
    /// The command name this handler was invoked for. For a fallback
    /// handler this is the unmatched first token as typed.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Next argument token of the line, or `None` when exhausted.
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next_token()
    }

    /// Send a reply over the bus, terminator appended, direction-control
    /// sequenced around the write.
    pub fn reply(&mut self, message: &str) {
        self.sink.send_line(message);
    }
}

/// Command receiver/dispatcher for one half-duplex port.
///
/// Lines look like `COMMAND DEVICE [args...]`. A line is acted on only
/// when its second token equals this node's device identity; everything
/// else on the shared bus is ignored. An empty identity disables the node:
/// every line is filtered out.
pub struct Dispatcher<T, P, D, const BUF: usize = LINE_SIZE, const CMDS: usize = 16>
where
    T: Transport,
    P: OutputPin,
    D: DelayNs,
{
    port: T,
    tx: BusTx<P, D>,
    line: LineBuffer<BUF>,
    table: CommandTable<CMDS>,
    device_id: String<DEVICE_ID_SIZE>,
    delimiters: String<DELIMITER_SET_SIZE>,
}

impl<T, P, D, const BUF: usize, const CMDS: usize> Dispatcher<T, P, D, BUF, CMDS>
where
    T: Transport,
    P: OutputPin,
    D: DelayNs,
{
    /// Create a dispatcher for `port`, replying through `tx`, answering to
    /// `device_id`. Terminator defaults to `\n`, delimiters to a single
    /// space.
    pub fn new(port: T, tx: BusTx<P, D>, device_id: &str) -> Self {
        Self {
            port,
            tx,
            line: LineBuffer::new(),
            table: CommandTable::new(),
            device_id: bounded(device_id, "device identity"),
            delimiters: bounded(Tokenizer::DEFAULT_DELIMITERS, "delimiters"),
        }
    }

    /// Register a named command. Past table capacity this is a no-op with
    /// a diagnostic.
    pub fn register(&mut self, name: &'static str, handler: Handler) {
        self.table.register(name, handler);
    }

    /// Install the fallback handler for unmatched command names.
    pub fn set_fallback(&mut self, handler: Handler) {
        self.table.set_fallback(handler);
    }

    /// Change the line terminator, used both for input line detection and
    /// appended after each outbound reply.
    pub fn set_terminator(&mut self, term: u8) {
        self.line.set_terminator(term);
    }

    /// Change the token delimiter set.
    pub fn set_delimiters(&mut self, delimiters: &str) {
        self.delimiters = bounded(delimiters, "delimiters");
    }

    /// Ingest whatever bytes are available right now, dispatching each
    /// completed line. Never blocks waiting for input; an incomplete line
    /// simply stays buffered until a later poll terminates it.
    pub fn poll(&mut self) {
        while self.port.available() > 0 {
            let Some(byte) = self.port.read() else {
                break;
            };
            match self.line.ingest(byte) {
                LineStatus::Complete => self.process_line(),
                // Overflow already cleared the buffer and logged.
                LineStatus::Pending | LineStatus::Overflowed => {}
            }
        }
    }

    /// Load `text` as a complete line and dispatch it immediately,
    /// bypassing the transport. For scripted/injected commands.
    pub fn run_line(&mut self, text: &str) {
        self.line.set(text);
        self.process_line();
    }

    /// Send an unsolicited message over the bus with the configured
    /// terminator, direction-control sequenced around the write.
    pub fn send(&mut self, message: &str) {
        let term = self.line.terminator();
        self.tx.send(&mut self.port, message, term);
    }

    /// Dispatch the completed line sitting in the buffer, then clear it.
    ///
    /// First token names the command, second is the device tag. A missing
    /// tag means the line cannot be addressed to anyone and is dropped; so
    /// is a tag that names some other node.
    fn process_line(&mut self) {
        let term = self.line.terminator();
        let Self {
            port,
            tx,
            line,
            table,
            device_id,
            delimiters,
        } = self;

        let mut tokens = Tokenizer::new(line.as_str(), delimiters.as_str());
        let name = tokens.next_token();
        let tag = tokens.next_token();

        if let (Some(name), Some(tag)) = (name, tag) {
            if !device_id.is_empty() && tag == device_id.as_str() {
                let resolved = table.resolve(name);
                if let Some(handler) = resolved.handler {
                    let mut sink = BusReply {
                        port,
                        tx,
                        terminator: term,
                    };
                    let mut ctx = Context {
                        name: resolved.name,
                        tokens,
                        sink: &mut sink,
                    };
                    handler(&mut ctx);
                } else {
                    trace!("no handler for '{}', dropping line", name);
                }
            } else {
                trace!("line for '{}' not addressed to this node", tag);
            }
        } else {
            trace!("short line without device tag, dropping");
        }

        self.line.clear();
    }
}

/// Reply capability handed to handlers, object-safe so [`Context`] stays
/// free of the dispatcher's type parameters.
trait ReplySink {
    fn send_line(&mut self, message: &str);
}

/// Borrows the port and transmitter for the duration of one handler call.
struct BusReply<'a, T, P, D>
where
    T: Transport,
    P: OutputPin,
    D: DelayNs,
{
    port: &'a mut T,
    tx: &'a mut BusTx<P, D>,
    terminator: u8,
}

impl<T, P, D> ReplySink for BusReply<'_, T, P, D>
where
    T: Transport,
    P: OutputPin,
    D: DelayNs,
{
    fn send_line(&mut self, message: &str) {
        self.tx.send(self.port, message, self.terminator);
    }
}

/// Copy `text` into a bounded string, truncating on a char boundary with a
/// diagnostic if it does not fit.
fn bounded<const N: usize>(text: &str, what: &str) -> String<N> {
    let mut out = String::new();
    if out.push_str(text).is_ok() {
        return out;
    }

    warn!("{} longer than {} bytes, truncating", what, N);
    let mut end = N.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let _ = out.push_str(&text[..end]);
    out
}

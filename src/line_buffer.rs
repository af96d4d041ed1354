//! Bounded line buffer for incoming command bytes
//!
//! Static allocation, no heap. Accumulates printable bytes until the
//! terminator is seen; everything else is filtered at the door.

use log::warn;

/// Default line capacity in bytes.
pub const LINE_SIZE: usize = 64;

/// Result of feeding one byte into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// More bytes needed before the line is complete.
    Pending,
    /// Terminator seen; the buffer holds a full line (terminator excluded).
    Complete,
    /// Capacity exceeded; the partial line was discarded.
    Overflowed,
}

/// Line input buffer with a fixed capacity and configurable terminator.
pub struct LineBuffer<const N: usize = LINE_SIZE> {
    buf: [u8; N],
    len: usize,
    term: u8,
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty buffer with the default `\n` terminator.
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
            term: b'\n',
        }
    }

    /// Create an empty buffer with a custom terminator byte.
    pub const fn with_terminator(term: u8) -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
            term,
        }
    }

    /// Change the terminator byte.
    pub fn set_terminator(&mut self, term: u8) {
        self.term = term;
    }

    /// The terminator byte this buffer watches for.
    pub fn terminator(&self) -> u8 {
        self.term
    }

    /// Feed one byte from the stream.
    ///
    /// The terminator itself is never stored; non-printable bytes are
    /// dropped silently. Overflow discards the whole partial line so the
    /// next line starts clean, and is reported rather than propagated.
    pub fn ingest(&mut self, byte: u8) -> LineStatus {
        if byte == self.term {
            return LineStatus::Complete;
        }

        if !is_printable(byte) {
            return LineStatus::Pending;
        }

        if self.len < N {
            self.buf[self.len] = byte;
            self.len += 1;
            LineStatus::Pending
        } else {
            self.len = 0;
            warn!("line buffer full ({} bytes), discarding partial line", N);
            LineStatus::Overflowed
        }
    }

    /// Load a complete line from a string instead of streaming bytes.
    ///
    /// Stops at the first terminator. Applies the same printable filter as
    /// [`ingest`](Self::ingest), but on overflow the partial line is KEPT
    /// (truncated), not discarded: a loaded line is still worth
    /// dispatching even if its tail was cut.
    pub fn set(&mut self, text: &str) {
        self.clear();
        for &byte in text.as_bytes() {
            if byte == self.term {
                return;
            }
            if !is_printable(byte) {
                continue;
            }
            if self.len == N {
                warn!("line buffer full ({} bytes), truncating loaded line", N);
                return;
            }
            self.buf[self.len] = byte;
            self.len += 1;
        }
    }

    /// Reset to empty. Idempotent.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Buffer contents as a string slice.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Current length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed capacity in bytes.
    pub fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Printable ASCII: space through tilde, matching C `isprint`.
const fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E)
}

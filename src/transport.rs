//! Byte transport contract
//!
//! The bus itself is external: UART driver, USB CDC, a test double. The
//! dispatcher only needs non-blocking reads and a flush that waits for the
//! wire, so that is all the trait asks for.

/// Raw byte source/sink for one half-duplex port.
///
/// Single-owner, single-writer by construction; implementations do not
/// need to be thread safe.
pub trait Transport {
    /// Number of bytes ready to read right now. Never blocks.
    fn available(&self) -> usize;

    /// Read one byte. Returns `None` when nothing is buffered.
    fn read(&mut self) -> Option<u8>;

    /// Queue bytes for transmission.
    fn write(&mut self, bytes: &[u8]);

    /// Block until every queued byte has physically left the wire.
    ///
    /// This is the only blocking operation the core ever invokes.
    fn flush(&mut self);
}

//! Half-duplex transmit sequencing
//!
//! On a shared pair the transceiver must be switched to transmit before
//! the first byte and back to receive only after the last byte has left
//! the wire. The guard interval covers the transceiver's direction
//! turnaround on both edges.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::debug;

use crate::transport::Transport;

/// Default bus turnaround guard interval in microseconds.
pub const DEFAULT_GUARD_US: u32 = 500;

/// Sequences the direction-control pin and guard delays around a write.
///
/// Single writer per bus by construction; `send` is never re-entered.
pub struct BusTx<P: OutputPin, D: DelayNs> {
    dir_pin: P,
    delay: D,
    guard_us: u32,
}

impl<P: OutputPin, D: DelayNs> BusTx<P, D> {
    /// Create a transmitter with the default guard interval.
    pub fn new(dir_pin: P, delay: D) -> Self {
        Self {
            dir_pin,
            delay,
            guard_us: DEFAULT_GUARD_US,
        }
    }

    /// Override the guard interval (microseconds).
    pub fn set_guard_us(&mut self, guard_us: u32) {
        self.guard_us = guard_us;
    }

    /// Current guard interval in microseconds.
    pub fn guard_us(&self) -> u32 {
        self.guard_us
    }

    /// Send one message followed by `terminator`, strictly sequenced:
    /// direction high, guard delay, write, flush to the wire, guard delay,
    /// direction low. The pin is back low when this returns, so the node
    /// is listening again.
    pub fn send<T: Transport>(&mut self, port: &mut T, message: &str, terminator: u8) {
        let _ = self.dir_pin.set_high();
        self.delay.delay_us(self.guard_us);

        port.write(message.as_bytes());
        port.write(&[terminator]);
        port.flush();

        self.delay.delay_us(self.guard_us);
        let _ = self.dir_pin.set_low();

        debug!("tx: {}", message);
    }
}

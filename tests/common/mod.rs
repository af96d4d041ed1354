//! Shared test doubles: transport, direction pin, delay provider.
//!
//! All three record into one shared trace so tests can assert the exact
//! interleaving of pin edges, delays, and wire traffic.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use multidrop::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DirHigh,
    DirLow,
    DelayUs(u32),
    Write(Vec<u8>),
    Flush,
}

pub type Trace = Rc<RefCell<Vec<Event>>>;

pub fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// Transport double with shared interior so a clone can stay outside the
/// dispatcher for injection and inspection.
#[derive(Clone)]
pub struct MockPort {
    rx: Rc<RefCell<VecDeque<u8>>>,
    written: Rc<RefCell<Vec<u8>>>,
    trace: Trace,
}

impl MockPort {
    pub fn new(trace: Trace) -> Self {
        Self {
            rx: Rc::new(RefCell::new(VecDeque::new())),
            written: Rc::new(RefCell::new(Vec::new())),
            trace,
        }
    }

    pub fn push_input(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }

    pub fn written_str(&self) -> String {
        String::from_utf8(self.written.borrow().clone()).unwrap()
    }

}

impl Transport for MockPort {
    fn available(&self) -> usize {
        self.rx.borrow().len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.borrow_mut().pop_front()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.written.borrow_mut().extend_from_slice(bytes);
        self.trace.borrow_mut().push(Event::Write(bytes.to_vec()));
    }

    fn flush(&mut self) {
        self.trace.borrow_mut().push(Event::Flush);
    }
}

pub struct MockDirPin {
    trace: Trace,
}

impl MockDirPin {
    pub fn new(trace: Trace) -> Self {
        Self { trace }
    }
}

impl ErrorType for MockDirPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockDirPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push(Event::DirLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push(Event::DirHigh);
        Ok(())
    }
}

pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    pub fn new(trace: Trace) -> Self {
        Self { trace }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.borrow_mut().push(Event::DelayUs(ns / 1_000));
    }
}

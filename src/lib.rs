//! # multidrop
//!
//! Line-oriented command dispatcher for half-duplex multi-drop serial buses
//! (RS-485 style, many nodes on one pair).
//!
//! ## Architecture
//!
//! ```text
//! bytes ──▶ LineBuffer ──▶ Tokenizer ──▶ Dispatcher ──▶ handler
//!           (bounded)      (borrowed     (device-tag      │
//!                           views)        filter,         ▼
//!                                         table lookup)  BusTx ──▶ wire
//! ```
//!
//! Every line is `COMMAND DEVICE [args...]`: the second token addresses a
//! node, the first names a handler. Lines not addressed to this node are
//! dropped without side effects. Replies go out through [`BusTx`], which
//! sequences the direction-control pin around the write so the transceiver
//! never releases the bus while bytes are still draining.
//!
//! The whole crate is poll-driven and single-threaded: the owning thread
//! calls [`Dispatcher::poll`] whenever it likes, ingestion never blocks,
//! and handlers run to completion on the polling thread.

#![cfg_attr(not(test), no_std)]

pub mod bus_tx;
pub mod dispatcher;
pub mod line_buffer;
pub mod table;
pub mod tokens;
pub mod transport;

pub use bus_tx::BusTx;
pub use dispatcher::{Context, Dispatcher};
pub use line_buffer::{LineBuffer, LineStatus};
pub use table::{CommandEntry, CommandTable, Handler, ResolvedCommand};
pub use tokens::Tokenizer;
pub use transport::Transport;

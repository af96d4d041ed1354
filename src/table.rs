//! Command table: named handlers plus one fallback slot

use heapless::Vec;
use log::{trace, warn};

use crate::dispatcher::Context;

/// Command handler. Pulls arguments and sends replies through the
/// [`Context`]; it sees nothing else of the dispatcher.
pub type Handler = fn(&mut Context<'_>);

/// One registered command.
#[derive(Clone, Copy)]
pub struct CommandEntry {
    /// Exact-match command name (case-sensitive).
    pub name: &'static str,
    /// Handler invoked when the first token equals `name`.
    pub handler: Handler,
}

/// Outcome of resolving a line's command name against the table.
///
/// Produced once per line and consumed by a single invocation. The name is
/// carried even on a table miss so a fallback handler can inspect what was
/// actually typed.
pub struct ResolvedCommand<'a> {
    /// The first token of the line, matched or not.
    pub name: &'a str,
    /// Matched entry's handler, or the fallback, or `None`.
    pub handler: Option<Handler>,
}

/// Fixed-capacity ordered command table with an optional fallback.
///
/// Lookup is a linear exact-string scan, first match wins. Duplicate names
/// are allowed and simply unreachable past the first.
pub struct CommandTable<const N: usize = 16> {
    entries: Vec<CommandEntry, N>,
    fallback: Option<Handler>,
}

impl<const N: usize> CommandTable<N> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: None,
        }
    }

    /// Append a command. Registration past capacity is rejected with a
    /// diagnostic; it is never a runtime fault.
    pub fn register(&mut self, name: &'static str, handler: Handler) {
        trace!("registering command ({}): {}", self.entries.len(), name);
        if self
            .entries
            .push(CommandEntry { name, handler })
            .is_err()
        {
            warn!("command table full ({} entries), dropping '{}'", N, name);
        }
    }

    /// Install the fallback handler for unmatched names. Last writer wins.
    pub fn set_fallback(&mut self, handler: Handler) {
        self.fallback = Some(handler);
    }

    /// Resolve a command name to a handler.
    pub fn resolve<'a>(&self, name: &'a str) -> ResolvedCommand<'a> {
        let handler = self
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.handler)
            .or(self.fallback);

        ResolvedCommand { name, handler }
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered command names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}

impl<const N: usize> Default for CommandTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

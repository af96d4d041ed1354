//! Sequential tokenizer over a completed line
//!
//! Tokens are borrowed slices of the line, so the borrow checker enforces
//! what a `strtok`-style splitter leaves to discipline: no token can
//! outlive the line it points into.

/// Splits a line into delimiter-separated tokens, one call at a time.
///
/// One scan per line; build a fresh tokenizer for the next line.
pub struct Tokenizer<'a> {
    rest: &'a str,
    delimiters: &'a str,
}

impl<'a> Tokenizer<'a> {
    /// Default delimiter set: a single space.
    pub const DEFAULT_DELIMITERS: &'static str = " ";

    /// Create a tokenizer over `line` using the given delimiter set.
    pub fn new(line: &'a str, delimiters: &'a str) -> Self {
        Self {
            rest: line,
            delimiters,
        }
    }

    /// Return the next token, or `None` once the line is exhausted.
    ///
    /// Leading delimiters are skipped, so runs of delimiters never produce
    /// empty tokens.
    pub fn next_token(&mut self) -> Option<&'a str> {
        let line = self.rest;
        let start = line
            .find(|c| !self.is_delimiter(c))
            .unwrap_or(line.len());
        let rest = &line[start..];

        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        match rest.find(|c| self.is_delimiter(c)) {
            Some(end) => {
                // Step over the delimiter itself (ASCII in practice, but
                // stay correct for any char).
                let step = rest[end..].chars().next().map_or(1, char::len_utf8);
                self.rest = &rest[end + step..];
                Some(&rest[..end])
            }
            None => {
                self.rest = "";
                Some(rest)
            }
        }
    }

    /// The unscanned remainder of the line, delimiters included.
    pub fn remainder(&self) -> &'a str {
        self.rest
    }

    fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(c)
    }
}

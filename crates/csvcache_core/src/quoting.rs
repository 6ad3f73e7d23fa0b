//! Strict quote checking for loaded documents.
//!
//! The `csv` reader accepts stray and unterminated quotes without
//! complaint. [`QuoteValidator`] sits between the byte source and the
//! reader, tracks RFC 4180 quoting state and cuts the stream short at the
//! first violation so the load can report it.

use crate::error::{CacheError, SyntaxError};
use std::io::{self, Read};
use thiserror::Error;

/// A quoting rule broken by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// A quote appears inside a field that did not start with a quote.
    #[error("bare \" in non-quoted field")]
    BareQuote,

    /// A closing quote is followed by something other than a separator.
    #[error("extraneous or missing \" in quoted field")]
    ExtraneousQuote,

    /// A quoted field is still open at end of input.
    #[error("quoted field is never closed")]
    UnterminatedQuote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteSeen,
}

/// Where and how quoting went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuoteViolation {
    pub(crate) line: u64,
    pub(crate) error: QuoteError,
}

impl QuoteViolation {
    pub(crate) fn into_error(self) -> CacheError {
        CacheError::MalformedCsv {
            line: Some(self.line),
            source: SyntaxError::Quote(self.error),
        }
    }
}

/// Pass-through reader that checks quoting as bytes flow by.
///
/// After a violation every read reports end of input.
pub(crate) struct QuoteValidator<R> {
    inner: R,
    enabled: bool,
    state: State,
    line: u64,
    quote_line: u64,
    violation: Option<QuoteViolation>,
}

impl<R: Read> QuoteValidator<R> {
    /// Wraps `inner`. A disabled validator only forwards bytes.
    pub(crate) fn new(inner: R, enabled: bool) -> Self {
        Self {
            inner,
            enabled,
            state: State::FieldStart,
            line: 1,
            quote_line: 1,
            violation: None,
        }
    }

    /// Returns the first violation seen so far.
    pub(crate) fn violation(&self) -> Option<QuoteViolation> {
        self.violation
    }

    fn step(&mut self, byte: u8) -> Result<(), QuoteError> {
        let next = match self.state {
            State::FieldStart => match byte {
                b'"' => {
                    self.quote_line = self.line;
                    State::Quoted
                }
                b',' | b'\r' | b'\n' => State::FieldStart,
                _ => State::Unquoted,
            },
            State::Unquoted => match byte {
                b'"' => return Err(QuoteError::BareQuote),
                b',' | b'\r' | b'\n' => State::FieldStart,
                _ => State::Unquoted,
            },
            State::Quoted => match byte {
                b'"' => State::QuoteSeen,
                _ => State::Quoted,
            },
            State::QuoteSeen => match byte {
                b'"' => State::Quoted,
                b',' | b'\r' | b'\n' => State::FieldStart,
                _ => return Err(QuoteError::ExtraneousQuote),
            },
        };
        if byte == b'\n' {
            self.line += 1;
        }
        self.state = next;
        Ok(())
    }
}

impl<R: Read> Read for QuoteValidator<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.violation.is_some() {
            return Ok(0);
        }

        let n = self.inner.read(buf)?;
        if !self.enabled {
            return Ok(n);
        }

        if n == 0 {
            if self.state == State::Quoted {
                self.violation = Some(QuoteViolation {
                    line: self.quote_line,
                    error: QuoteError::UnterminatedQuote,
                });
            }
            return Ok(0);
        }

        for (i, &byte) in buf[..n].iter().enumerate() {
            if let Err(error) = self.step(byte) {
                self.violation = Some(QuoteViolation {
                    line: self.line,
                    error,
                });
                return Ok(i);
            }
        }
        Ok(n)
    }
}

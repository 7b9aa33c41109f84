//! The public scanner: one buffer, one source, typed readers and the
//! format-driven dispatcher.

use std::io::{self, Read, Stdin};

use bstr::BString;
use tracing::{debug, warn};

use crate::{
    buffer::InputBuffer,
    error::FormatError,
    format::{Directive, directives},
    numbers::{self, Parsed, ScanInt},
    options::ScannerOptions,
    outcome::Outcome,
    slot::Slot,
    source::{ByteSource, IoSource},
    text,
};

/// A buffered, format-driven token scanner over a [`ByteSource`].
///
/// The scanner owns its buffer and the source. All reads go through the
/// buffer, so mixing [`scan`](Self::scan) with the direct `read_*` methods on
/// the same scanner is fine.
///
/// # Examples
///
/// ```rust
/// use bufscan::{BString, Outcome, Scanner, SliceSource, scan};
///
/// let mut scanner = Scanner::new(SliceSource::new(b"42 3.5e2 hello"));
/// let (mut n, mut x, mut word) = (0i32, 0f64, BString::default());
/// let outcome = scan!(scanner, "%d %lf %s", n, x, word);
/// assert_eq!(outcome, Outcome::Converted(3));
/// assert_eq!((n, x, word.as_slice()), (42, 350.0, &b"hello"[..]));
/// ```
#[derive(Debug)]
pub struct Scanner<S> {
    input: InputBuffer<S>,
    options: ScannerOptions,
}

impl<R: Read> Scanner<IoSource<R>> {
    /// Scans any [`Read`] implementation with default options.
    pub fn from_reader(reader: R) -> Self {
        Self::new(IoSource::new(reader))
    }
}

impl Scanner<IoSource<Stdin>> {
    /// Scans standard input with default options.
    pub fn stdin() -> Self {
        Self::from_reader(io::stdin())
    }
}

impl<S: ByteSource> Scanner<S> {
    /// Creates a scanner with default options.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ScannerOptions::default())
    }

    /// Creates a scanner with the given options.
    pub fn with_options(source: S, options: ScannerOptions) -> Self {
        Self {
            input: InputBuffer::new(source, options.capacity),
            options,
        }
    }

    /// The options this scanner was built with.
    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// Actual buffer size in bytes.
    pub fn capacity(&self) -> usize {
        self.input.capacity()
    }

    /// How many times the source has been read, including the read that
    /// reported end of input.
    pub fn refills(&self) -> usize {
        self.input.refills()
    }

    /// Whether the source has reported end of input. Buffered bytes may
    /// remain only if this is `false`.
    pub fn is_exhausted(&self) -> bool {
        self.input.is_exhausted()
    }

    /// Whether no input remains. May read from the source.
    pub fn at_end(&mut self) -> bool {
        self.input.at_end()
    }

    /// Looks at the next byte without consuming it.
    pub fn peek(&mut self) -> Option<u8> {
        self.input.peek()
    }

    /// Consumes any whitespace at the cursor.
    pub fn skip_whitespace(&mut self) {
        self.input.skip_whitespace();
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        self.input.source()
    }

    /// The underlying source, mutably (for example to call
    /// [`IoSource::take_error`]).
    pub fn source_mut(&mut self) -> &mut S {
        self.input.source_mut()
    }

    /// Gives back the source. Buffered, unconsumed bytes are dropped.
    pub fn into_source(self) -> S {
        self.input.into_source()
    }

    /// Cursor position, window end and capacity, for invariant checks.
    #[cfg(feature = "fuzzing")]
    pub fn cursor(&self) -> (usize, usize, usize) {
        self.input.cursor()
    }

    /// Reads an integer of any supported width.
    pub fn read_int<T: ScanInt>(&mut self) -> Parsed<T> {
        numbers::read_int(&mut self.input)
    }

    /// Reads a signed 32-bit integer (`%d`).
    pub fn read_i32(&mut self) -> Parsed<i32> {
        self.read_int()
    }

    /// Reads an unsigned 32-bit integer (`%u`). Signs are not accepted.
    pub fn read_u32(&mut self) -> Parsed<u32> {
        self.read_int()
    }

    /// Reads a signed 64-bit integer (`%lld`).
    pub fn read_i64(&mut self) -> Parsed<i64> {
        self.read_int()
    }

    /// Reads an unsigned 64-bit integer (`%llu`). Signs are not accepted.
    pub fn read_u64(&mut self) -> Parsed<u64> {
        self.read_int()
    }

    /// Reads a double, including an optional `e`/`E` exponent (`%lf`).
    pub fn read_f64(&mut self) -> Parsed<f64> {
        numbers::read_float(&mut self.input, Some(self.options.max_exponent))
    }

    /// Reads a double without an exponent; an `e` after the number is left
    /// in the input.
    pub fn read_f64_plain(&mut self) -> Parsed<f64> {
        numbers::read_float(&mut self.input, None)
    }

    /// Reads a whitespace-delimited word into `dst` (`%s`).
    ///
    /// Returns `false`, leaving `dst` untouched, at end of input.
    pub fn read_word(&mut self, dst: &mut BString) -> bool {
        text::read_word(&mut self.input, dst)
    }

    /// Reads the rest of the current line into `dst` without its terminator.
    ///
    /// Leading whitespace is kept. Returns `false` only at end of input.
    pub fn read_line(&mut self, dst: &mut BString) -> bool {
        text::read_line(&mut self.input, dst, None)
    }

    /// Like [`read_line`](Self::read_line) but stores at most `max_len`
    /// bytes. The rest of the line is consumed and dropped.
    pub fn read_line_bounded(&mut self, dst: &mut BString, max_len: usize) -> bool {
        text::read_line(&mut self.input, dst, Some(max_len))
    }

    /// Skips empty lines, then behaves like
    /// [`read_line_bounded`](Self::read_line_bounded).
    pub fn read_nonempty_line(&mut self, dst: &mut BString, max_len: usize) -> bool {
        text::read_nonempty_line(&mut self.input, dst, max_len)
    }

    /// Consumes one byte, optionally skipping whitespace first (`%c`).
    pub fn read_char(&mut self, skip_whitespace: bool) -> Option<u8> {
        text::read_char(&mut self.input, skip_whitespace)
    }

    /// Runs the format string `fmt` against the input, storing each
    /// conversion into the next slot.
    ///
    /// - Whitespace in `fmt` makes the next conversion skip input whitespace.
    ///   Numeric and `%s` conversions skip it anyway; it matters for `%c`.
    /// - Other non-`%` bytes are passed over without looking at the input.
    /// - The first conversion that finds no token stops the scan. Slots from
    ///   that one on are left untouched.
    /// - An unknown directive, or a slot that does not fit its conversion,
    ///   stops the scan with [`Outcome::InvalidFormat`] no matter how many
    ///   conversions already succeeded.
    ///
    /// Out-of-range integers are stored saturated and count as converted.
    pub fn scan(&mut self, fmt: &str, slots: &mut [Slot<'_>]) -> Outcome {
        let mut slots = slots.iter_mut();
        let mut converted = 0usize;
        let mut skip_pending = false;

        for directive in directives(fmt) {
            let conversion = match directive {
                Ok(Directive::Whitespace) => {
                    skip_pending = true;
                    continue;
                }
                Ok(Directive::Literal(_)) => continue,
                Ok(Directive::Convert(conversion)) => conversion,
                Err(err) => return Self::invalid(err),
            };

            let Some(slot) = slots.next() else {
                return Self::invalid(FormatError::MissingSlot { index: converted });
            };
            if slot.conversion() != conversion {
                return Self::invalid(FormatError::SlotMismatch {
                    index: converted,
                    expected: conversion,
                    found: slot.conversion(),
                });
            }

            if skip_pending {
                self.input.skip_whitespace();
                skip_pending = false;
            }
            if !self.convert(slot) {
                return self.halted(converted);
            }
            converted += 1;
        }

        debug!(target: "bufscan::scan", converted, "scan complete");
        Outcome::Converted(converted)
    }

    fn convert(&mut self, slot: &mut Slot<'_>) -> bool {
        match slot {
            Slot::I32(dst) => store(self.read_i32(), &mut **dst),
            Slot::U32(dst) => store(self.read_u32(), &mut **dst),
            Slot::I64(dst) => store(self.read_i64(), &mut **dst),
            Slot::U64(dst) => store(self.read_u64(), &mut **dst),
            Slot::F64(dst) => store(self.read_f64(), &mut **dst),
            Slot::Word(dst) => self.read_word(dst),
            Slot::Char(dst) => match self.input.next() {
                Some(b) => {
                    **dst = b;
                    true
                }
                None => false,
            },
        }
    }

    fn halted(&mut self, converted: usize) -> Outcome {
        let outcome = if converted == 0 && self.input.at_end() {
            Outcome::EndOfInput
        } else {
            Outcome::Converted(converted)
        };
        debug!(target: "bufscan::scan", ?outcome, "scan stopped early");
        outcome
    }

    fn invalid(err: FormatError) -> Outcome {
        warn!(target: "bufscan::scan", error = %err, "invalid format");
        Outcome::InvalidFormat(err)
    }
}

fn store<T>(parsed: Parsed<T>, dst: &mut T) -> bool {
    match parsed.value() {
        Some(v) => {
            *dst = v;
            true
        }
        None => false,
    }
}

//! Refillable input buffer: the single cursor every reader works through.
//!
//! Layout
//! - `data` is a fixed-capacity block. `data[read_pos..valid_end]` holds bytes
//!   fetched from the source but not yet consumed.
//! - When the window is empty the next `peek`/`next` refills the whole block
//!   from the source and resets `read_pos` to zero.
//! - A source that returns zero bytes latches `exhausted`. From then on the
//!   buffer answers end-of-input without touching the source again.
//!
//! Invariants
//! - `read_pos <= valid_end <= data.len()`.
//! - `exhausted` is never cleared.
//! - Readers never need to un-read a byte: they `peek` first and only
//!   consume what belongs to the token, so the cursor itself is the pushback.
#![expect(clippy::inline_always)]

use tracing::trace;

use crate::source::ByteSource;


/// C `isspace` in the "C" locale: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline(always)]
pub(crate) const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[derive(Debug)]
pub(crate) struct InputBuffer<S> {
    source: S,
    data: Box<[u8]>,
    read_pos: usize,
    valid_end: usize,
    exhausted: bool,
    refills: usize,
}

impl<S: ByteSource> InputBuffer<S> {
    pub(crate) fn new(source: S, capacity: usize) -> Self {
        Self {
            source,
            data: vec![0u8; capacity.max(1)].into_boxed_slice(),
            read_pos: 0,
            valid_end: 0,
            exhausted: false,
            refills: 0,
        }
    }

    /// Pulls the next block from the source. Only called on an empty window.
    #[cold]
    fn refill(&mut self) {
        debug_assert!(self.read_pos >= self.valid_end);
        if self.exhausted {
            return;
        }
        let n = self.source.read(&mut self.data);
        self.refills += 1;
        self.read_pos = 0;
        if n == 0 {
            self.valid_end = 0;
            self.exhausted = true;
            trace!(target: "bufscan::buffer", refills = self.refills, "source exhausted");
        } else {
            // A misbehaving source can't push the window past the block.
            self.valid_end = n.min(self.data.len());
            trace!(target: "bufscan::buffer", bytes = self.valid_end, "refilled");
        }
    }

    /// Returns the unread window, refilling first if it is empty.
    ///
    /// An empty slice means end of input.
    #[inline(always)]
    pub(crate) fn fill(&mut self) -> &[u8] {
        if self.read_pos >= self.valid_end {
            self.refill();
        }
        &self.data[self.read_pos..self.valid_end]
    }

    #[inline(always)]
    pub(crate) fn peek(&mut self) -> Option<u8> {
        if self.read_pos >= self.valid_end {
            self.refill();
            if self.read_pos >= self.valid_end {
                return None;
            }
        }
        Some(self.data[self.read_pos])
    }

    /// Marks `n` bytes of the current window as consumed.
    #[inline(always)]
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(self.read_pos + n <= self.valid_end);
        self.read_pos += n;
    }

    pub(crate) fn at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn skip_whitespace(&mut self) {
        self.discard_while(is_space);
    }

    /// Consumes bytes while `predicate` holds, across refills. Returns the
    /// number of bytes skipped.
    pub(crate) fn discard_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let mut skipped = 0;
        loop {
            let window = self.fill();
            if window.is_empty() {
                break;
            }
            let len = window.len();
            let prefix = window.iter().take_while(|&&b| predicate(b)).count();
            self.consume(prefix);
            skipped += prefix;
            if prefix < len {
                break;
            }
        }
        skipped
    }

    /// Appends bytes to `dst` while `predicate` holds, across refills. Returns
    /// the number of bytes copied.
    pub(crate) fn copy_while<F>(&mut self, dst: &mut Vec<u8>, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let mut copied = 0;
        loop {
            let window = self.fill();
            if window.is_empty() {
                break;
            }
            let len = window.len();
            let prefix = window.iter().take_while(|&&b| predicate(b)).count();
            dst.extend_from_slice(&window[..prefix]);
            self.consume(prefix);
            copied += prefix;
            if prefix < len {
                break;
            }
        }
        copied
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn refills(&self) -> usize {
        self.refills
    }

    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub(crate) fn into_source(self) -> S {
        self.source
    }

    #[cfg(any(test, feature = "fuzzing"))]
    pub(crate) fn cursor(&self) -> (usize, usize, usize) {
        (self.read_pos, self.valid_end, self.data.len())
    }
}

impl<S: ByteSource> Iterator for InputBuffer<S> {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.read_pos += 1;
        Some(b)
    }
}

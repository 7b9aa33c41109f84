//! A buffered, format-driven scanner for byte streams.
//!
//! `bufscan` reads integers, doubles, words, lines and single bytes from any
//! [`ByteSource`] through one large refillable buffer, so the underlying
//! stream is read in big blocks no matter how small the tokens are. A
//! `scanf`-like dispatcher runs a format string against the input and stores
//! each conversion into a typed [`Slot`].
//!
//! ```rust
//! use bufscan::{Outcome, Scanner, scan};
//!
//! let mut scanner = Scanner::from_reader(&b"3\n10 20 30\n"[..]);
//! let mut n = 0i32;
//! assert_eq!(scan!(scanner, "%d", n), Outcome::Converted(1));
//!
//! let mut total = 0i64;
//! for _ in 0..n {
//!     let mut v = 0i64;
//!     assert_eq!(scan!(scanner, "%lld", v), Outcome::Converted(1));
//!     total += v;
//! }
//! assert_eq!(total, 60);
//! assert_eq!(scan!(scanner, "%lld", total), Outcome::EndOfInput);
//! ```
//!
//! Differences from C `scanf` worth knowing:
//! - Out-of-range integers saturate to the type's bounds instead of being
//!   undefined, and still count as converted.
//! - Literal bytes in the format are skipped over, not matched.
//! - No field widths, `%[...]` sets, `%n` or `%%`.
//! - End of input before the first conversion is [`Outcome::EndOfInput`];
//!   a malformed first field with input remaining is `Converted(0)`.

mod buffer;
mod error;
mod format;
mod numbers;
mod options;
mod outcome;
mod scanner;
mod slot;
mod source;
mod text;

#[cfg(test)]
mod tests;

pub use bstr::BString;
pub use error::FormatError;
pub use format::{Conversion, Directive, Directives, directives};
pub use numbers::{Parsed, ScanInt};
pub use options::{DEFAULT_CAPACITY, DEFAULT_MAX_EXPONENT, ScannerOptions};
pub use outcome::Outcome;
pub use scanner::Scanner;
pub use slot::Slot;
pub use source::{ByteSource, IoSource, SliceSource};

/// Runs [`Scanner::scan`] with slots built from plain places.
///
/// ```rust
/// use bufscan::{Outcome, Scanner, SliceSource, scan};
///
/// let mut scanner = Scanner::new(SliceSource::new(b"7 -8"));
/// let (mut a, mut b) = (0i32, 0i64);
/// assert_eq!(scan!(scanner, "%d %lld", a, b), Outcome::Converted(2));
/// assert_eq!((a, b), (7, -8));
/// ```
#[macro_export]
macro_rules! scan {
    ( $scanner:expr, $fmt:expr $(, $place:expr )* $(,)? ) => {
        $scanner.scan($fmt, &mut [ $( $crate::Slot::from(&mut $place) ),* ])
    };
}

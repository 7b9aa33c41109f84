//! Format string decoding.
//!
//! A format string is decoded lazily, one directive at a time, so a bad
//! directive late in the string only stops the scan when it is reached.
//!
//! | Directive                  | Meaning                                   |
//! |----------------------------|-------------------------------------------|
//! | run of whitespace          | skip input whitespace before the next conversion |
//! | any other byte except `%`  | ignored (no input is matched)             |
//! | `%d`                       | `i32`                                     |
//! | `%u`                       | `u32`                                     |
//! | `%lld`, `%lli`             | `i64`                                     |
//! | `%llu`                     | `u64`                                     |
//! | `%f` `%e` `%g` `%lf` `%le` `%lg` | `f64` (exponent allowed)            |
//! | `%s`                       | whitespace-delimited word                 |
//! | `%c`                       | one byte                                  |

use core::fmt;

use crate::{buffer::is_space, error::FormatError};

/// The typed conversions a format string can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conversion {
    /// `%d`
    I32,
    /// `%u`
    U32,
    /// `%lld` / `%lli`
    I64,
    /// `%llu`
    U64,
    /// `%f`, `%e`, `%g` and their `l` forms
    F64,
    /// `%s`
    Word,
    /// `%c`
    Char,
}

impl Conversion {
    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Conversion::I32 => "signed 32-bit integer",
            Conversion::U32 => "unsigned 32-bit integer",
            Conversion::I64 => "signed 64-bit integer",
            Conversion::U64 => "unsigned 64-bit integer",
            Conversion::F64 => "double",
            Conversion::Word => "string",
            Conversion::Char => "character",
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded element of a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// One or more whitespace bytes.
    Whitespace,
    /// A non-`%`, non-whitespace byte.
    Literal(u8),
    /// A `%` conversion.
    Convert(Conversion),
}

/// Iterator over the directives of a format string.
///
/// Yields at most one error, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct Directives<'f> {
    fmt: &'f [u8],
    pos: usize,
}

/// Decodes `fmt` lazily.
///
/// ```rust
/// use bufscan::{Conversion, Directive, directives};
///
/// let decoded: Vec<_> = directives("%d, %lf").collect::<Result<_, _>>().unwrap();
/// assert_eq!(
///     decoded,
///     [
///         Directive::Convert(Conversion::I32),
///         Directive::Literal(b','),
///         Directive::Whitespace,
///         Directive::Convert(Conversion::F64),
///     ]
/// );
/// ```
pub fn directives(fmt: &str) -> Directives<'_> {
    Directives {
        fmt: fmt.as_bytes(),
        pos: 0,
    }
}

impl Directives<'_> {
    fn fail(&mut self, err: FormatError) -> Option<Result<Directive, FormatError>> {
        self.pos = self.fmt.len();
        Some(Err(err))
    }

    fn tag(&self, start: usize, end: usize) -> String {
        let end = end.min(self.fmt.len());
        String::from_utf8_lossy(&self.fmt[start..end]).into_owned()
    }
}

impl Iterator for Directives<'_> {
    type Item = Result<Directive, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        let &first = self.fmt.get(self.pos)?;

        if is_space(first) {
            self.pos += self.fmt[self.pos..].iter().take_while(|&&b| is_space(b)).count();
            return Some(Ok(Directive::Whitespace));
        }
        if first != b'%' {
            self.pos += 1;
            return Some(Ok(Directive::Literal(first)));
        }

        let offset = self.pos;
        let at = |i: usize| self.fmt.get(offset + i).copied();
        let (conversion, len) = match (at(1), at(2), at(3)) {
            (None, ..) | (Some(b'l'), None, _) | (Some(b'l'), Some(b'l'), None) => {
                return self.fail(FormatError::TruncatedDirective { offset });
            }
            (Some(b'd'), ..) => (Conversion::I32, 2),
            (Some(b'u'), ..) => (Conversion::U32, 2),
            (Some(b'f' | b'e' | b'g'), ..) => (Conversion::F64, 2),
            (Some(b's'), ..) => (Conversion::Word, 2),
            (Some(b'c'), ..) => (Conversion::Char, 2),
            (Some(b'l'), Some(b'f' | b'e' | b'g'), _) => (Conversion::F64, 3),
            (Some(b'l'), Some(b'l'), Some(b'd' | b'i')) => (Conversion::I64, 4),
            (Some(b'l'), Some(b'l'), Some(b'u')) => (Conversion::U64, 4),
            (Some(b'l'), Some(b'l'), Some(_)) => {
                let tag = self.tag(offset + 1, offset + 4);
                return self.fail(FormatError::UnknownConversion { offset, tag });
            }
            (Some(b'l'), Some(_), _) => {
                let tag = self.tag(offset + 1, offset + 3);
                return self.fail(FormatError::UnknownConversion { offset, tag });
            }
            (Some(_), ..) => {
                let tag = self.tag(offset + 1, offset + 2);
                return self.fail(FormatError::UnknownConversion { offset, tag });
            }
        };
        self.pos += len;
        Some(Ok(Directive::Convert(conversion)))
    }
}

impl core::iter::FusedIterator for Directives<'_> {}

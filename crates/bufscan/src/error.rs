use thiserror::Error;

use crate::format::Conversion;

/// Why a format string (or the slots passed with it) was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `%` directive whose type tag is not recognized.
    #[error("unknown conversion '%{tag}' at offset {offset}")]
    UnknownConversion {
        /// Byte offset of the `%`.
        offset: usize,
        /// The unrecognized tag as written.
        tag: String,
    },
    /// The format ends after `%`, `%l` or `%ll`.
    #[error("format ends inside the directive at offset {offset}")]
    TruncatedDirective {
        /// Byte offset of the `%`.
        offset: usize,
    },
    /// More conversions than slots.
    #[error("no output slot for conversion #{index}")]
    MissingSlot {
        /// Zero-based conversion index.
        index: usize,
    },
    /// A slot of the wrong type for its conversion.
    #[error("conversion #{index} expects a {expected} slot, got a {found} slot")]
    SlotMismatch {
        /// Zero-based conversion index.
        index: usize,
        /// What the format asked for.
        expected: Conversion,
        /// What the caller supplied.
        found: Conversion,
    },
}

use crate::error::FormatError;

/// Result of one [`Scanner::scan`](crate::Scanner::scan) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// This many conversions were stored, in order. Fewer than requested
    /// means a conversion failed on malformed input.
    Converted(usize),
    /// The input ended before the first conversion could be stored.
    EndOfInput,
    /// The format (or the slots given with it) was invalid. Conversions
    /// before the bad directive may have consumed input and stored values.
    InvalidFormat(FormatError),
}

impl Outcome {
    /// Number of stored conversions, if the format was valid.
    pub fn count(&self) -> Option<usize> {
        match self {
            Outcome::Converted(n) => Some(*n),
            Outcome::EndOfInput => Some(0),
            Outcome::InvalidFormat(_) => None,
        }
    }

    /// Whether the scan hit end of input before storing anything.
    pub fn is_eof(&self) -> bool {
        matches!(self, Outcome::EndOfInput)
    }

    /// Whether the format was rejected.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::InvalidFormat(_))
    }

    /// Conventional integer encoding: the count, `-1` for end of input, `-2`
    /// for an invalid format.
    pub fn to_raw(&self) -> i64 {
        match self {
            Outcome::Converted(n) => i64::try_from(*n).unwrap_or(i64::MAX),
            Outcome::EndOfInput => -1,
            Outcome::InvalidFormat(_) => -2,
        }
    }
}

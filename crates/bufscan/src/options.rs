/// Default buffer capacity: 4 MiB.
pub const DEFAULT_CAPACITY: usize = 1 << 22;

/// Default cap on the magnitude of a scientific-notation exponent.
pub const DEFAULT_MAX_EXPONENT: u32 = 400;

/// Configuration options for a [`Scanner`](crate::Scanner).
///
/// # Examples
///
/// ```rust
/// use bufscan::{Scanner, ScannerOptions, SliceSource};
///
/// let options = ScannerOptions {
///     capacity: 64 * 1024,
///     ..Default::default()
/// };
/// let scanner = Scanner::with_options(SliceSource::new(b"1 2 3"), options);
/// assert_eq!(scanner.capacity(), 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerOptions {
    /// Size of the internal read buffer in bytes.
    ///
    /// Each refill asks the underlying source for at most this many bytes.
    /// A value of zero is treated as one.
    ///
    /// # Default
    ///
    /// [`DEFAULT_CAPACITY`] (4 MiB)
    pub capacity: usize,

    /// Largest exponent magnitude applied when reading `1.5e<exp>` style
    /// numbers.
    ///
    /// Exponent digits past the cap are still consumed from the input; only
    /// the applied scale is clamped. Scaling is done by repeated
    /// multiplication or division by ten, so this bounds the work per
    /// number. The cap changes a result only when the exponent exceeds it
    /// and the mantissa is far enough from one to pull the product back into
    /// the finite range.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_EXPONENT`] (400)
    pub max_exponent: u32,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_exponent: DEFAULT_MAX_EXPONENT,
        }
    }
}

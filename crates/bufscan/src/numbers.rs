//! Numeric readers.
//!
//! Integers accumulate their magnitude in a `u64` with checked arithmetic and
//! compare it against the target type's limit for the parsed sign. The first
//! step that would leave the range flips the result to saturated, but the
//! remaining digits are still consumed so the cursor ends up after the whole
//! numeral.
//!
//! Floats are assembled the simple way: integer part, then a fractional
//! numerator over a power-of-ten denominator, then an optional exponent
//! applied by repeated multiplication or division. This is not correctly
//! rounded; the last bit or two may differ from `str::parse::<f64>`.

use crate::{buffer::InputBuffer, source::ByteSource};

/// Result of one numeric conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed<T> {
    /// The numeral fit the target type.
    Exact(T),
    /// The numeral was out of range; the value is the type's boundary in the
    /// direction of the overflow.
    Saturated(T),
    /// No numeral at the cursor. Leading whitespace and a lone sign may still
    /// have been consumed.
    Missing,
}

impl<T> Parsed<T> {
    /// The converted value, saturated or not.
    pub fn value(self) -> Option<T> {
        match self {
            Parsed::Exact(v) | Parsed::Saturated(v) => Some(v),
            Parsed::Missing => None,
        }
    }

    /// Whether the conversion hit the type's range limit.
    pub fn is_saturated(&self) -> bool {
        matches!(self, Parsed::Saturated(_))
    }

    /// Whether no numeral was found.
    pub fn is_missing(&self) -> bool {
        matches!(self, Parsed::Missing)
    }

    /// Maps the carried value, keeping the variant.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Parsed<U> {
        match self {
            Parsed::Exact(v) => Parsed::Exact(f(v)),
            Parsed::Saturated(v) => Parsed::Saturated(f(v)),
            Parsed::Missing => Parsed::Missing,
        }
    }
}

/// Integer types the scanner can produce.
///
/// Sealed: implemented for `i32`, `u32`, `i64` and `u64`.
pub trait ScanInt: Copy + sealed::Sealed {
    /// Whether a leading `+`/`-` is accepted.
    const SIGNED: bool;
    /// Largest magnitude accepted without a minus sign.
    const POS_LIMIT: u64;
    /// Largest magnitude accepted after a minus sign.
    const NEG_LIMIT: u64;
    /// Saturation value for positive overflow.
    const MAX: Self;
    /// Saturation value for negative overflow.
    const MIN: Self;

    /// Builds the value from an in-range magnitude.
    #[doc(hidden)]
    fn from_magnitude(negative: bool, magnitude: u64) -> Self;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! scan_int {
    (signed $t:ty) => {
        impl sealed::Sealed for $t {}

        impl ScanInt for $t {
            const SIGNED: bool = true;
            const POS_LIMIT: u64 = <$t>::MAX as u64;
            const NEG_LIMIT: u64 = <$t>::MAX as u64 + 1;
            const MAX: Self = <$t>::MAX;
            const MIN: Self = <$t>::MIN;

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            fn from_magnitude(negative: bool, magnitude: u64) -> Self {
                if negative {
                    (magnitude as i64).wrapping_neg() as $t
                } else {
                    magnitude as $t
                }
            }
        }
    };
    (unsigned $t:ty) => {
        impl sealed::Sealed for $t {}

        impl ScanInt for $t {
            const SIGNED: bool = false;
            const POS_LIMIT: u64 = <$t>::MAX as u64;
            const NEG_LIMIT: u64 = 0;
            const MAX: Self = <$t>::MAX;
            const MIN: Self = <$t>::MAX;

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_magnitude(_negative: bool, magnitude: u64) -> Self {
                magnitude as $t
            }
        }
    };
}

scan_int!(signed i32);
scan_int!(signed i64);
scan_int!(unsigned u32);
scan_int!(unsigned u64);

/// Reads a decimal integer after skipping whitespace.
///
/// Signed types accept one leading `+` or `-`. A sign that is not followed by
/// a digit is consumed and the conversion reports [`Parsed::Missing`].
pub(crate) fn read_int<T: ScanInt, S: ByteSource>(input: &mut InputBuffer<S>) -> Parsed<T> {
    input.skip_whitespace();

    let mut negative = false;
    if T::SIGNED {
        match input.peek() {
            Some(b'-') => {
                negative = true;
                input.consume(1);
            }
            Some(b'+') => input.consume(1),
            _ => {}
        }
    }
    if !input.peek().is_some_and(|b| b.is_ascii_digit()) {
        return Parsed::Missing;
    }

    let limit = if negative { T::NEG_LIMIT } else { T::POS_LIMIT };
    let mut magnitude = 0u64;
    let mut overflow = false;
    loop {
        let window = input.fill();
        if window.is_empty() {
            break;
        }
        let len = window.len();
        let digits = window.iter().take_while(|b| b.is_ascii_digit()).count();
        if !overflow {
            for &b in &window[..digits] {
                match magnitude
                    .checked_mul(10)
                    .and_then(|m| m.checked_add(u64::from(b - b'0')))
                {
                    Some(m) if m <= limit => magnitude = m,
                    _ => {
                        overflow = true;
                        break;
                    }
                }
            }
        }
        input.consume(digits);
        if digits < len {
            break;
        }
    }

    if overflow {
        Parsed::Saturated(if negative { T::MIN } else { T::MAX })
    } else {
        Parsed::Exact(T::from_magnitude(negative, magnitude))
    }
}

// Past this the fractional denominator would overflow to infinity.
const MAX_FRACTION_SCALE: f64 = 1e300;

/// Reads a decimal floating-point number after skipping whitespace.
///
/// Grammar: `[+-] digits* [. digits*]` followed, when `max_exponent` is
/// `Some`, by an optional `[eE] [+-] digits*`. At least a digit or a `.` must
/// follow the sign. An exponent larger than the cap is clamped and the result
/// is reported as [`Parsed::Saturated`].
pub(crate) fn read_float<S: ByteSource>(
    input: &mut InputBuffer<S>,
    max_exponent: Option<u32>,
) -> Parsed<f64> {
    input.skip_whitespace();

    let mut sign = 1.0;
    match input.peek() {
        Some(b'-') => {
            sign = -1.0;
            input.consume(1);
        }
        Some(b'+') => input.consume(1),
        _ => {}
    }
    if !input.peek().is_some_and(|b| b.is_ascii_digit() || b == b'.') {
        return Parsed::Missing;
    }

    let mut whole = 0.0f64;
    while let Some(b) = input.peek().filter(u8::is_ascii_digit) {
        whole = whole * 10.0 + f64::from(b - b'0');
        input.consume(1);
    }

    let mut numerator = 0.0f64;
    let mut denominator = 1.0f64;
    if input.peek() == Some(b'.') {
        input.consume(1);
        while let Some(b) = input.peek().filter(u8::is_ascii_digit) {
            if denominator < MAX_FRACTION_SCALE {
                numerator = numerator * 10.0 + f64::from(b - b'0');
                denominator *= 10.0;
            }
            input.consume(1);
        }
    }
    let mut value = sign * (whole + numerator / denominator);

    let Some(cap) = max_exponent else {
        return Parsed::Exact(value);
    };
    if !matches!(input.peek(), Some(b'e' | b'E')) {
        return Parsed::Exact(value);
    }
    input.consume(1);

    let mut negative_exp = false;
    match input.peek() {
        Some(b'-') => {
            negative_exp = true;
            input.consume(1);
        }
        Some(b'+') => input.consume(1),
        _ => {}
    }
    let mut exponent = 0u32;
    let mut clamped = false;
    while let Some(b) = input.peek().filter(u8::is_ascii_digit) {
        exponent = exponent.saturating_mul(10).saturating_add(u32::from(b - b'0'));
        if exponent > cap {
            exponent = cap;
            clamped = true;
        }
        input.consume(1);
    }

    // Scaled one step at a time so a zero mantissa stays zero and products
    // near the edge of the range stay finite.
    for _ in 0..exponent {
        if value == 0.0 || value.is_infinite() {
            break;
        }
        if negative_exp {
            value /= 10.0;
        } else {
            value *= 10.0;
        }
    }

    if clamped {
        Parsed::Saturated(value)
    } else {
        Parsed::Exact(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tests::chunk_helpers::ChunkedSource;

    fn input(s: &str) -> InputBuffer<ChunkedSource> {
        InputBuffer::new(ChunkedSource::new(s), 4)
    }

    fn rest(mut b: InputBuffer<ChunkedSource>) -> Vec<u8> {
        b.by_ref().collect()
    }

    #[rstest]
    #[case("42", Parsed::Exact(42))]
    #[case("  -123", Parsed::Exact(-123))]
    #[case("+7", Parsed::Exact(7))]
    #[case("-0", Parsed::Exact(0))]
    #[case("2147483647", Parsed::Exact(i32::MAX))]
    #[case("-2147483648", Parsed::Exact(i32::MIN))]
    #[case("2147483648", Parsed::Saturated(i32::MAX))]
    #[case("-2147483649", Parsed::Saturated(i32::MIN))]
    #[case("999999999999999999999999999", Parsed::Saturated(i32::MAX))]
    #[case("00000000000000000000000012", Parsed::Exact(12))]
    #[case("", Parsed::Missing)]
    #[case("x1", Parsed::Missing)]
    fn reads_i32(#[case] src: &str, #[case] expected: Parsed<i32>) {
        assert_eq!(read_int::<i32, _>(&mut input(src)), expected);
    }

    #[rstest]
    #[case("9223372036854775807", Parsed::Exact(i64::MAX))]
    #[case("-9223372036854775808", Parsed::Exact(i64::MIN))]
    #[case("9223372036854775808", Parsed::Saturated(i64::MAX))]
    #[case("-9223372036854775809", Parsed::Saturated(i64::MIN))]
    #[case("-99999999999999999999999", Parsed::Saturated(i64::MIN))]
    fn reads_i64(#[case] src: &str, #[case] expected: Parsed<i64>) {
        assert_eq!(read_int::<i64, _>(&mut input(src)), expected);
    }

    #[rstest]
    #[case("4294967295", Parsed::Exact(u32::MAX))]
    #[case("2147483648", Parsed::Exact(2_147_483_648))]
    #[case("4294967296", Parsed::Saturated(u32::MAX))]
    #[case("+1", Parsed::Missing)]
    #[case("-1", Parsed::Missing)]
    fn reads_u32(#[case] src: &str, #[case] expected: Parsed<u32>) {
        assert_eq!(read_int::<u32, _>(&mut input(src)), expected);
    }

    #[rstest]
    #[case("18446744073709551615", Parsed::Exact(u64::MAX))]
    #[case("9223372036854775808", Parsed::Exact(9_223_372_036_854_775_808))]
    #[case("18446744073709551616", Parsed::Saturated(u64::MAX))]
    #[case("184467440737095516150", Parsed::Saturated(u64::MAX))]
    fn reads_u64(#[case] src: &str, #[case] expected: Parsed<u64>) {
        assert_eq!(read_int::<u64, _>(&mut input(src)), expected);
    }

    #[test]
    fn overflow_consumes_the_whole_numeral() {
        let mut b = input("123456789012345678901234567890 tail");
        assert!(read_int::<i32, _>(&mut b).is_saturated());
        assert_eq!(rest(b), b" tail");
    }

    #[test]
    fn lone_sign_is_consumed() {
        let mut b = input("  -x");
        assert!(read_int::<i64, _>(&mut b).is_missing());
        assert_eq!(rest(b), b"x");
    }

    #[test]
    fn unsigned_leaves_sign_in_place() {
        let mut b = input(" -5");
        assert!(read_int::<u64, _>(&mut b).is_missing());
        assert_eq!(rest(b), b"-5");
    }

    #[test]
    fn integer_stops_at_non_digit() {
        let mut b = input("12.5");
        assert_eq!(read_int::<i32, _>(&mut b), Parsed::Exact(12));
        assert_eq!(rest(b), b".5");
    }

    fn approx(actual: Parsed<f64>, expected: f64) {
        let v = actual.value().expect("a value");
        let tolerance = expected.abs() * 1e-9;
        assert!((v - expected).abs() <= tolerance, "{v} != {expected}");
    }

    #[rstest]
    #[case("3.125", 3.125)]
    #[case("-2.75", -2.75)]
    #[case("0.0", 0.0)]
    #[case("42", 42.0)]
    #[case(".5", 0.5)]
    #[case("7.", 7.0)]
    #[case("+0.25", 0.25)]
    #[case("1.23e4", 12300.0)]
    #[case("-5.67e-8", -5.67e-8)]
    #[case("1E+3", 1000.0)]
    #[case("2e", 2.0)]
    fn reads_scientific(#[case] src: &str, #[case] expected: f64) {
        approx(read_float(&mut input(src), Some(400)), expected);
    }

    #[test]
    fn plain_float_leaves_exponent_unread() {
        let mut b = input("1.5e3");
        approx(read_float(&mut b, None), 1.5);
        assert_eq!(rest(b), b"e3");
    }

    #[test]
    fn float_needs_digit_or_point() {
        assert!(read_float(&mut input("-e5"), Some(400)).is_missing());
        assert!(read_float(&mut input(""), Some(400)).is_missing());
        assert!(read_float(&mut input("abc"), None).is_missing());
    }

    #[test]
    fn lone_point_reads_as_zero() {
        assert_eq!(read_float(&mut input("."), Some(400)), Parsed::Exact(0.0));
    }

    #[test]
    fn huge_exponent_is_clamped_and_consumed() {
        let mut b = input("1e99999999999999 next");
        let parsed = read_float(&mut b, Some(400));
        assert_eq!(parsed, Parsed::Saturated(f64::INFINITY));
        assert_eq!(rest(b), b" next");

        let parsed = read_float(&mut input("-1e-99999"), Some(400));
        assert!(parsed.is_saturated());
        assert_eq!(parsed.value(), Some(-0.0));
    }

    #[rstest]
    #[case("0e400", Parsed::Exact(0.0))]
    #[case("0e309", Parsed::Exact(0.0))]
    #[case("-0e-400", Parsed::Exact(-0.0))]
    #[case("0.0e999", Parsed::Saturated(0.0))]
    fn zero_mantissa_ignores_exponent(#[case] src: &str, #[case] expected: Parsed<f64>) {
        let parsed = read_float(&mut input(src), Some(400));
        assert_eq!(parsed, expected);
        assert!(!parsed.value().is_some_and(f64::is_nan));
    }

    #[rstest]
    #[case("0.01e310", 1e308)]
    #[case("1e-310", 1e-310)]
    fn exponent_past_the_range_can_still_be_finite(#[case] src: &str, #[case] expected: f64) {
        let parsed = read_float(&mut input(src), Some(400));
        assert!(!parsed.is_saturated());
        let v = parsed.value().expect("a value");
        assert!(v.is_finite());
        approx(parsed, expected);
    }

    #[test]
    fn long_fraction_stays_finite() {
        let src = format!("0.{}", "3".repeat(400));
        approx(read_float(&mut input(&src), Some(400)), 1.0 / 3.0);
    }

    #[test]
    fn parsed_helpers() {
        assert_eq!(Parsed::Exact(2).map(|v| v * 2), Parsed::Exact(4));
        assert_eq!(Parsed::Saturated(1).map(|v| v + 1), Parsed::Saturated(2));
        assert_eq!(Parsed::<i32>::Missing.map(|v| v + 1), Parsed::Missing);
        assert_eq!(Parsed::Saturated(5).value(), Some(5));
    }
}

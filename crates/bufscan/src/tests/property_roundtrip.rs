use quickcheck::QuickCheck;

use crate::{Outcome, Parsed, Scanner, SliceSource, scan};

fn tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Property: printing in-range integers and scanning them back loses nothing.
#[test]
fn integers_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(a: i32, b: u32, c: i64, d: u64, pad: Vec<u8>) -> bool {
        let ws: String = pad.iter().map(|p| [' ', '\t', '\n', '\r'][*p as usize % 4]).collect();
        let text = format!("{ws}{a}{ws} {b} {c}\n{d}{ws}");
        let mut scanner = Scanner::new(SliceSource::new(text.as_bytes()));
        let (mut a2, mut b2, mut c2, mut d2) = (0i32, 0u32, 0i64, 0u64);
        scan!(scanner, "%d %u %lld %llu", a2, b2, c2, d2) == Outcome::Converted(4)
            && (a, b, c, d) == (a2, b2, c2, d2)
            && scan!(scanner, "%d", a2) == Outcome::EndOfInput
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(i32, u32, i64, u64, Vec<u8>) -> bool);
}

/// Property: any numeral above a width's range saturates to that width's
/// bound, in the direction of its sign.
#[test]
fn overflow_saturates_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(high: u64, extra: u8, negative: bool) -> bool {
        // Always strictly beyond i64/u64 range: an extra digit on a value
        // already >= 10^19 / 10.
        let digits = format!("{}{}{}", high.max(1_844_674_407_370_955_162), extra % 10, extra % 7);
        let text = if negative { format!("-{digits}") } else { digits.clone() };

        let mut s = Scanner::new(SliceSource::new(text.as_bytes()));
        let signed32 = s.read_i32();
        let mut s = Scanner::new(SliceSource::new(text.as_bytes()));
        let signed64 = s.read_i64();
        let mut s = Scanner::new(SliceSource::new(digits.as_bytes()));
        let unsigned32 = s.read_u32();
        let mut s = Scanner::new(SliceSource::new(digits.as_bytes()));
        let unsigned64 = s.read_u64();

        let (i32_bound, i64_bound) = if negative {
            (i32::MIN, i64::MIN)
        } else {
            (i32::MAX, i64::MAX)
        };
        signed32 == Parsed::Saturated(i32_bound)
            && signed64 == Parsed::Saturated(i64_bound)
            && unsigned32 == Parsed::Saturated(u32::MAX)
            && unsigned64 == Parsed::Saturated(u64::MAX)
            && s.at_end()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(u64, u8, bool) -> bool);
}

/// Property: doubles printed with `{:e}` scan back to within a few ulps.
#[test]
fn doubles_roundtrip_quickcheck() {
    fn prop(mantissa: i32, exponent: i8) -> bool {
        let x = f64::from(mantissa) * 10f64.powi(i32::from(exponent % 40));
        let text = format!("{x:e}");
        let mut s = Scanner::new(SliceSource::new(text.as_bytes()));
        match s.read_f64() {
            Parsed::Exact(y) => x == y || ((x - y) / x).abs() < 1e-12,
            _ => false,
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(i32, i8) -> bool);
}

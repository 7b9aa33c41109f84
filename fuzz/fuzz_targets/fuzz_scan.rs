#![no_main]
use arbitrary::Arbitrary;
use bufscan::{
    BString, ByteSource, Conversion, Directive, Outcome, Scanner, ScannerOptions, Slot, directives,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Case {
    format: String,
    input: Vec<u8>,
    sizes: Vec<u8>,
    capacity: u8,
    rounds: u8,
}

/// Serves the input in reads of the given sizes, cycling through them.
struct Chunks<'a> {
    data: &'a [u8],
    sizes: &'a [u8],
    turn: usize,
}

impl ByteSource for Chunks<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let want = match self.sizes {
            [] => usize::MAX,
            sizes => usize::from(sizes[self.turn % sizes.len()].max(1)),
        };
        self.turn += 1;
        let n = want.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        n
    }
}

#[derive(Debug, PartialEq)]
enum Value {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F64(u64),
    Word(BString),
    Char(u8),
}

fn storage(format: &str) -> Vec<Value> {
    directives(format)
        .map_while(Result::ok)
        .filter_map(|d| match d {
            Directive::Convert(c) => Some(match c {
                Conversion::I32 => Value::I32(0),
                Conversion::U32 => Value::U32(0),
                Conversion::I64 => Value::I64(0),
                Conversion::U64 => Value::U64(0),
                Conversion::F64 => Value::F64(0),
                Conversion::Word => Value::Word(BString::default()),
                Conversion::Char => Value::Char(0),
            }),
            _ => None,
        })
        .collect()
}

/// Runs the format `rounds` times and records every outcome and stored value.
fn run(case: &Case, sizes: &[u8], capacity: usize) -> Vec<(Outcome, Vec<Value>)> {
    let mut scanner = Scanner::with_options(
        Chunks {
            data: &case.input,
            sizes,
            turn: 0,
        },
        ScannerOptions {
            capacity,
            ..Default::default()
        },
    );
    let mut log = Vec::new();
    for _ in 0..=case.rounds % 8 {
        let mut values = storage(&case.format);
        let mut doubles = vec![0f64; values.len()];
        let outcome = {
            let mut slots: Vec<Slot<'_>> = values
                .iter_mut()
                .zip(doubles.iter_mut())
                .map(|(v, d)| match v {
                    Value::I32(x) => Slot::from(x),
                    Value::U32(x) => Slot::from(x),
                    Value::I64(x) => Slot::from(x),
                    Value::U64(x) => Slot::from(x),
                    Value::F64(_) => Slot::from(d),
                    Value::Word(x) => Slot::from(x),
                    Value::Char(x) => Slot::from(x),
                })
                .collect();
            scanner.scan(&case.format, &mut slots)
        };
        for (v, d) in values.iter_mut().zip(&doubles) {
            if let Value::F64(bits) = v {
                *bits = d.to_bits();
            }
        }

        let (read, end, cap) = scanner.cursor();
        assert!(read <= end && end <= cap, "cursor out of order: {read} {end} {cap}");
        assert!(cap >= 1);

        let stop = matches!(outcome, Outcome::EndOfInput | Outcome::InvalidFormat(_));
        log.push((outcome, values));
        if stop {
            break;
        }
    }
    log
}

fuzz_target!(|case: Case| {
    let whole = run(&case, &[], 1 << 16);
    let chunked = run(&case, &case.sizes, usize::from(case.capacity));
    assert_eq!(whole, chunked);
});

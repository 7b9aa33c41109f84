use bstr::BString;

use crate::format::Conversion;

/// A typed destination for one conversion.
///
/// Slots are matched positionally against the conversions of a format
/// string; see [`Scanner::scan`](crate::Scanner::scan). The [`scan!`](crate::scan)
/// macro builds them from plain `&mut` places.
#[derive(Debug)]
pub enum Slot<'a> {
    /// Target of `%d`.
    I32(&'a mut i32),
    /// Target of `%u`.
    U32(&'a mut u32),
    /// Target of `%lld` / `%lli`.
    I64(&'a mut i64),
    /// Target of `%llu`.
    U64(&'a mut u64),
    /// Target of `%f`, `%e`, `%g`, `%lf`, `%le`, `%lg`.
    F64(&'a mut f64),
    /// Target of `%s`. Replaced, not appended to.
    Word(&'a mut BString),
    /// Target of `%c`.
    Char(&'a mut u8),
}

impl Slot<'_> {
    /// The conversion this slot can receive.
    pub fn conversion(&self) -> Conversion {
        match self {
            Slot::I32(_) => Conversion::I32,
            Slot::U32(_) => Conversion::U32,
            Slot::I64(_) => Conversion::I64,
            Slot::U64(_) => Conversion::U64,
            Slot::F64(_) => Conversion::F64,
            Slot::Word(_) => Conversion::Word,
            Slot::Char(_) => Conversion::Char,
        }
    }
}

macro_rules! slot_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $t> for Slot<'a> {
                fn from(place: &'a mut $t) -> Self {
                    Slot::$variant(place)
                }
            }
        )*
    };
}

slot_from! {
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f64 => F64,
    BString => Word,
    u8 => Char,
}

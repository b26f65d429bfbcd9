//! Element types of typed views.

use std::fmt;

/// Wire identifier of a view's element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    U8 = 0x01,
    I8 = 0x02,
    U16 = 0x03,
    I16 = 0x04,
    U32 = 0x05,
    I32 = 0x06,
    U64 = 0x07,
    I64 = 0x08,
    F32 = 0x09,
    F64 = 0x0A,
}

impl ElementType {
    /// Size in bytes of one element.
    pub fn size(self) -> usize {
        match self {
            ElementType::U8 | ElementType::I8 => 1,
            ElementType::U16 | ElementType::I16 => 2,
            ElementType::U32 | ElementType::I32 | ElementType::F32 => 4,
            ElementType::U64 | ElementType::I64 | ElementType::F64 => 8,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(ElementType::U8),
            0x02 => Some(ElementType::I8),
            0x03 => Some(ElementType::U16),
            0x04 => Some(ElementType::I16),
            0x05 => Some(ElementType::U32),
            0x06 => Some(ElementType::I32),
            0x07 => Some(ElementType::U64),
            0x08 => Some(ElementType::I64),
            0x09 => Some(ElementType::F32),
            0x0A => Some(ElementType::F64),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementType::U8 => "u8",
            ElementType::I8 => "i8",
            ElementType::U16 => "u16",
            ElementType::I16 => "i16",
            ElementType::U32 => "u32",
            ElementType::I32 => "i32",
            ElementType::U64 => "u64",
            ElementType::I64 => "i64",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Primitive numeric type that can be stored in a typed view.
///
/// Sealed: implemented for the ten primitives matching [`ElementType`].
/// Bytes are always little-endian; floats round-trip bit-for-bit, NaN
/// payloads included.
pub trait Scalar: sealed::Sealed + Copy + Default + PartialEq + fmt::Debug + 'static {
    const ELEMENT_TYPE: ElementType;
    const SIZE: usize;

    /// Writes `self` into `out`, which is exactly `SIZE` bytes long.
    fn write_le(self, out: &mut [u8]);

    /// Reads a value from exactly `SIZE` bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                const ELEMENT_TYPE: ElementType = ElementType::$variant;
                const SIZE: usize = std::mem::size_of::<$t>();

                fn write_le(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_scalar!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);

//! EXIF entry value decoding
//!
//! Interprets the raw bytes of a directory entry as one of the twelve TIFF
//! data formats under the byte order selected by the segment's TIFF header.

use std::fmt;
use std::io::{Cursor, Result};

use log::trace;

use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler};

/// Data format of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    UnsignedByte,
    AsciiStrings,
    UnsignedShort,
    UnsignedLong,
    UnsignedRational,
    SignedByte,
    Undefined,
    SignedShort,
    SignedLong,
    SignedRational,
    SignedFloat,
    DoubleFloat,
    /// A format code outside 1..=12
    Unknown(u16),
}

impl DataFormat {
    /// Maps a TIFF field type code to a data format
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => DataFormat::UnsignedByte,
            2 => DataFormat::AsciiStrings,
            3 => DataFormat::UnsignedShort,
            4 => DataFormat::UnsignedLong,
            5 => DataFormat::UnsignedRational,
            6 => DataFormat::SignedByte,
            7 => DataFormat::Undefined,
            8 => DataFormat::SignedShort,
            9 => DataFormat::SignedLong,
            10 => DataFormat::SignedRational,
            11 => DataFormat::SignedFloat,
            12 => DataFormat::DoubleFloat,
            other => DataFormat::Unknown(other),
        }
    }

    /// Returns the TIFF field type code for this format
    pub fn code(&self) -> u16 {
        match self {
            DataFormat::UnsignedByte => 1,
            DataFormat::AsciiStrings => 2,
            DataFormat::UnsignedShort => 3,
            DataFormat::UnsignedLong => 4,
            DataFormat::UnsignedRational => 5,
            DataFormat::SignedByte => 6,
            DataFormat::Undefined => 7,
            DataFormat::SignedShort => 8,
            DataFormat::SignedLong => 9,
            DataFormat::SignedRational => 10,
            DataFormat::SignedFloat => 11,
            DataFormat::DoubleFloat => 12,
            DataFormat::Unknown(code) => *code,
        }
    }

    /// Size in bytes of a single component of this format
    ///
    /// Unknown formats are treated as one byte per component.
    pub fn element_size(&self) -> usize {
        match self {
            DataFormat::UnsignedByte
            | DataFormat::AsciiStrings
            | DataFormat::SignedByte
            | DataFormat::Undefined
            | DataFormat::Unknown(_) => 1,
            DataFormat::UnsignedShort | DataFormat::SignedShort => 2,
            DataFormat::UnsignedLong | DataFormat::SignedLong | DataFormat::SignedFloat => 4,
            DataFormat::UnsignedRational | DataFormat::SignedRational | DataFormat::DoubleFloat => 8,
        }
    }

    /// Returns a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            DataFormat::UnsignedByte => "unsigned byte",
            DataFormat::AsciiStrings => "ascii strings",
            DataFormat::UnsignedShort => "unsigned short",
            DataFormat::UnsignedLong => "unsigned long",
            DataFormat::UnsignedRational => "unsigned rational",
            DataFormat::SignedByte => "signed byte",
            DataFormat::Undefined => "undefined",
            DataFormat::SignedShort => "signed short",
            DataFormat::SignedLong => "signed long",
            DataFormat::SignedRational => "signed rational",
            DataFormat::SignedFloat => "signed float",
            DataFormat::DoubleFloat => "double float",
            DataFormat::Unknown(_) => "unknown",
        }
    }
}

/// Unsigned rational number (no reduction, denominator may be zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsignedRational {
    pub numerator: u32,
    pub denominator: u32,
}

impl UnsignedRational {
    /// Converts to f64, or None for a zero denominator
    pub fn to_f64(&self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(self.numerator as f64 / self.denominator as f64)
        }
    }
}

impl fmt::Display for UnsignedRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Signed rational number (no reduction, denominator may be zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SignedRational {
    /// Converts to f64, or None for a zero denominator
    pub fn to_f64(&self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(self.numerator as f64 / self.denominator as f64)
        }
    }
}

impl fmt::Display for SignedRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A decoded entry value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unsigned byte, undefined, and unknown formats
    Bytes(Vec<u8>),
    Text(String),
    UnsignedShort(u16),
    UnsignedLong(u32),
    UnsignedRational(UnsignedRational),
    SignedByte(i8),
    SignedShort(i16),
    SignedLong(i32),
    SignedRational(SignedRational),
    Float(f32),
    Double(f64),
}

impl Value {
    /// Returns the value as u32 for the unsigned integer variants
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::UnsignedShort(v) => Some(*v as u32),
            Value::UnsignedLong(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bytes(bytes) => {
                let shown: Vec<String> = bytes.iter().take(16).map(|b| format!("{:02x}", b)).collect();
                write!(f, "[{}", shown.join(" "))?;
                if bytes.len() > 16 {
                    write!(f, " ... ({} bytes)", bytes.len())?;
                }
                write!(f, "]")
            }
            Value::Text(text) => write!(f, "\"{}\"", text.trim_end_matches('\0')),
            Value::UnsignedShort(v) => write!(f, "{}", v),
            Value::UnsignedLong(v) => write!(f, "{}", v),
            Value::UnsignedRational(r) => write!(f, "{}", r),
            Value::SignedByte(v) => write!(f, "{}", v),
            Value::SignedShort(v) => write!(f, "{}", v),
            Value::SignedLong(v) => write!(f, "{}", v),
            Value::SignedRational(r) => write!(f, "{}", r),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
        }
    }
}

/// Decodes a raw entry value
///
/// Numeric formats decode the first component of `raw`. Byte and text
/// formats take all of `raw`. Unknown formats, and numeric input shorter
/// than one component, come back as `Value::Bytes` unchanged.
///
/// Rational fields are laid out denominator first and are always read
/// big-endian, whatever `order` says. Callers reading little-endian EXIF
/// should be aware that rationals are not byte-swapped.
pub fn decode(raw: &[u8], format: DataFormat, order: ByteOrder) -> Value {
    let handler = order.create_handler();
    let mut reader = Cursor::new(raw);

    let decoded: Result<Value> = match format {
        DataFormat::UnsignedByte | DataFormat::Undefined | DataFormat::Unknown(_) => {
            Ok(Value::Bytes(raw.to_vec()))
        }
        DataFormat::AsciiStrings => Ok(Value::Text(String::from_utf8_lossy(raw).into_owned())),
        DataFormat::SignedByte => match raw.first() {
            Some(byte) => Ok(Value::SignedByte(*byte as i8)),
            None => Ok(Value::Bytes(Vec::new())),
        },
        DataFormat::UnsignedShort => handler.read_u16(&mut reader).map(Value::UnsignedShort),
        DataFormat::UnsignedLong => handler.read_u32(&mut reader).map(Value::UnsignedLong),
        DataFormat::SignedShort => handler.read_i16(&mut reader).map(Value::SignedShort),
        DataFormat::SignedLong => handler.read_i32(&mut reader).map(Value::SignedLong),
        DataFormat::SignedFloat => handler.read_f32(&mut reader).map(Value::Float),
        DataFormat::DoubleFloat => handler.read_f64(&mut reader).map(Value::Double),
        DataFormat::UnsignedRational => {
            read_rational_fields(&mut reader).map(|(denominator, numerator)| {
                Value::UnsignedRational(UnsignedRational { numerator, denominator })
            })
        }
        DataFormat::SignedRational => {
            read_rational_fields(&mut reader).map(|(denominator, numerator)| {
                Value::SignedRational(SignedRational {
                    numerator: numerator as i32,
                    denominator: denominator as i32,
                })
            })
        }
    };

    decoded.unwrap_or_else(|e| {
        trace!("Short {} value ({} bytes): {}, keeping raw bytes", format.name(), raw.len(), e);
        Value::Bytes(raw.to_vec())
    })
}

/// Decodes every component of a raw entry value
///
/// Byte and text formats yield a single value spanning all of `raw`.
pub fn decode_all(raw: &[u8], format: DataFormat, order: ByteOrder) -> Vec<Value> {
    match format {
        DataFormat::UnsignedByte
        | DataFormat::Undefined
        | DataFormat::Unknown(_)
        | DataFormat::AsciiStrings => vec![decode(raw, format, order)],
        _ => raw
            .chunks_exact(format.element_size())
            .map(|chunk| decode(chunk, format, order))
            .collect(),
    }
}

/// Reads the (denominator, numerator) pair of a rational, big-endian
fn read_rational_fields(reader: &mut Cursor<&[u8]>) -> Result<(u32, u32)> {
    let fields = BigEndianHandler;
    let denominator = fields.read_u32(reader)?;
    let numerator = fields.read_u32(reader)?;
    Ok((denominator, numerator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_long_both_orders() {
        let raw = [0x00, 0x00, 0x00, 0x10];
        assert_eq!(decode(&raw, DataFormat::UnsignedLong, ByteOrder::BigEndian), Value::UnsignedLong(16));
        assert_eq!(
            decode(&raw, DataFormat::UnsignedLong, ByteOrder::LittleEndian),
            Value::UnsignedLong(0x1000_0000)
        );
    }

    #[test]
    fn test_rational_ignores_byte_order() {
        let raw = [0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01];
        let expected = Value::UnsignedRational(UnsignedRational { numerator: 1, denominator: 2 });
        assert_eq!(decode(&raw, DataFormat::UnsignedRational, ByteOrder::BigEndian), expected);
        assert_eq!(decode(&raw, DataFormat::UnsignedRational, ByteOrder::LittleEndian), expected);
    }

    #[test]
    fn test_signed_rational() {
        let raw = [0x00, 0x00, 0x00, 0x03, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(
            decode(&raw, DataFormat::SignedRational, ByteOrder::LittleEndian),
            Value::SignedRational(SignedRational { numerator: -1, denominator: 3 })
        );
    }

    #[test]
    fn test_signed_integers() {
        assert_eq!(decode(&[0xFE], DataFormat::SignedByte, ByteOrder::BigEndian), Value::SignedByte(-2));
        assert_eq!(
            decode(&[0xFF, 0xFE], DataFormat::SignedShort, ByteOrder::BigEndian),
            Value::SignedShort(-2)
        );
        assert_eq!(
            decode(&[0xFE, 0xFF, 0xFF, 0xFF], DataFormat::SignedLong, ByteOrder::LittleEndian),
            Value::SignedLong(-2)
        );
    }

    #[test]
    fn test_floats() {
        let single = 1.5f32.to_le_bytes();
        assert_eq!(decode(&single, DataFormat::SignedFloat, ByteOrder::LittleEndian), Value::Float(1.5));

        let double = (-0.25f64).to_be_bytes();
        assert_eq!(decode(&double, DataFormat::DoubleFloat, ByteOrder::BigEndian), Value::Double(-0.25));
    }

    #[test]
    fn test_text_without_terminator() {
        assert_eq!(
            decode(b"Canon", DataFormat::AsciiStrings, ByteOrder::LittleEndian),
            Value::Text("Canon".to_string())
        );
    }

    #[test]
    fn test_unknown_format_keeps_raw() {
        let raw = [1, 2, 3];
        assert_eq!(decode(&raw, DataFormat::from_code(99), ByteOrder::BigEndian), Value::Bytes(vec![1, 2, 3]));
    }

    #[test]
    fn test_short_input_keeps_raw() {
        assert_eq!(decode(&[0x01], DataFormat::UnsignedShort, ByteOrder::BigEndian), Value::Bytes(vec![0x01]));
    }

    #[test]
    fn test_decode_all_shorts() {
        let raw = [0x08, 0x00, 0x08, 0x00, 0x08, 0x00];
        assert_eq!(
            decode_all(&raw, DataFormat::UnsignedShort, ByteOrder::LittleEndian),
            vec![Value::UnsignedShort(8), Value::UnsignedShort(8), Value::UnsignedShort(8)]
        );
    }

    #[test]
    fn test_rational_to_f64() {
        assert_eq!(UnsignedRational { numerator: 1, denominator: 4 }.to_f64(), Some(0.25));
        assert_eq!(UnsignedRational { numerator: 1, denominator: 0 }.to_f64(), None);
    }
}

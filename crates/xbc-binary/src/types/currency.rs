use std::fmt;

use serde_json::Value;
use xbc_types::{BytesSink, CodecError, CodecResult, Hash160};

use super::{expect_str, SerializedType};
use crate::context::CodecContext;
use crate::parser::BinaryParser;

/// Code of the native asset.
pub const NATIVE_CODE: &str = "XAH";

fn is_iso_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"?!@#$%^&*(){}[]|".contains(&b)
}

fn is_iso_code(code: &[u8]) -> bool {
    code.len() == 3 && code.iter().all(|b| is_iso_char(*b))
}

/// 160-bit currency code.
///
/// Three-character codes occupy bytes 12..15 of an otherwise zero value;
/// the native code is all zeros; anything else is 40 hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Currency(Hash160);

impl Currency {
    pub const NATIVE: Self = Self(Hash160::ZERO);

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(Hash160::from_array(bytes))
    }

    pub fn parse(code: &str) -> CodecResult<Self> {
        if code == NATIVE_CODE {
            return Ok(Self::NATIVE);
        }
        // Any three bytes go in the ISO slot; codes outside the ISO alphabet
        // render back as hex.
        if code.len() == 3 {
            let mut bytes = [0u8; 20];
            bytes[12..15].copy_from_slice(code.as_bytes());
            return Ok(Self::from_bytes(bytes));
        }
        let upper_hex = code.len() == 40
            && code
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
        if !upper_hex {
            return Err(CodecError::InvalidCurrency(code.to_string()));
        }
        Hash160::from_hex(code).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        self.0.as_bytes()
    }

    pub fn is_native(&self) -> bool {
        self.0.is_zero()
    }

    /// Zero everywhere except the three ISO bytes.
    pub fn is_standard_format(&self) -> bool {
        let b = self.as_bytes();
        b[..12].iter().all(|x| *x == 0) && b[15..].iter().all(|x| *x == 0)
    }

    /// The three-character code, if this currency has one.
    pub fn iso_code(&self) -> Option<&str> {
        if self.is_native() {
            return Some(NATIVE_CODE);
        }
        if !self.is_standard_format() {
            return None;
        }
        let code = &self.as_bytes()[12..15];
        if code == NATIVE_CODE.as_bytes() || !is_iso_code(code) {
            return None;
        }
        std::str::from_utf8(code).ok()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iso_code() {
            Some(code) => f.write_str(code),
            None => f.write_str(&self.0.to_hex()),
        }
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({self})")
    }
}

impl SerializedType for Currency {
    fn from_json(_ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
        Self::parse(expect_str(value, "currency")?)
    }

    fn from_parser(parser: &mut BinaryParser<'_>, _size: Option<usize>) -> CodecResult<Self> {
        parser.read_array().map(Self::from_bytes)
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        sink.put(self.as_bytes());
    }

    fn to_json(&self, _ctx: &CodecContext<'_>) -> Value {
        Value::String(self.to_string())
    }
}

use serde_json::Value;
use xbc_definitions::{Definitions, FieldInfo};
use xbc_types::{CodecError, CodecResult};

use crate::context::CodecContext;
use crate::types;

/// Deepest nesting of objects and arrays a decode will follow.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Forward-only cursor over serialized bytes.
#[derive(Clone, Debug)]
pub struct BinaryParser<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> BinaryParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            depth: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// The next byte, without consuming it.
    pub fn peek(&self) -> CodecResult<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(CodecError::UnexpectedEnd {
                needed: 1,
                remaining: 0,
            })
    }

    pub fn skip(&mut self, n: usize) -> CodecResult<()> {
        self.read(n).map(|_| ())
    }

    /// Consume exactly `n` bytes.
    pub fn read(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEnd {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> CodecResult<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_u64(&mut self) -> CodecResult<u64> {
        self.read_array().map(u64::from_be_bytes)
    }

    /// Decode a 1-3 byte length prefix.
    pub fn read_variable_length_length(&mut self) -> CodecResult<usize> {
        let b1 = self.read_u8()? as usize;
        match b1 {
            0..=192 => Ok(b1),
            193..=240 => {
                let b2 = self.read_u8()? as usize;
                Ok(193 + (b1 - 193) * 256 + b2)
            }
            241..=254 => {
                let b2 = self.read_u8()? as usize;
                let b3 = self.read_u8()? as usize;
                Ok(12_481 + (b1 - 241) * 65_536 + b2 * 256 + b3)
            }
            _ => Err(CodecError::InvalidLengthPrefix(b1 as u8)),
        }
    }

    /// A length prefix followed by that many bytes.
    pub fn read_variable_length(&mut self) -> CodecResult<&'a [u8]> {
        let len = self.read_variable_length_length()?;
        self.read(len)
    }

    /// Decode a field header into its `(type code, nth)` pair.
    pub fn read_field_ordinal(&mut self) -> CodecResult<(u16, u16)> {
        let first = self.read_u8()?;
        let mut type_code = (first >> 4) as u16;
        let mut nth = (first & 0x0f) as u16;
        if type_code == 0 {
            type_code = self.read_u8()? as u16;
            if type_code < 16 {
                return Err(CodecError::InvalidFieldHeader(format!(
                    "type code {type_code} must not use the extended form"
                )));
            }
        }
        if nth == 0 {
            nth = self.read_u8()? as u16;
            if nth < 16 {
                return Err(CodecError::InvalidFieldHeader(format!(
                    "field code {nth} must not use the extended form"
                )));
            }
        }
        Ok((type_code, nth))
    }

    /// Read a field header and resolve it against `definitions`.
    pub fn read_field<'d>(&mut self, definitions: &'d Definitions) -> CodecResult<&'d FieldInfo> {
        let (type_code, nth) = self.read_field_ordinal()?;
        definitions
            .field_by_ordinal(type_code, nth)
            .ok_or(CodecError::UnknownOrdinal { type_code, nth })
    }

    /// Run `read` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`].
    pub(crate) fn nested<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> CodecResult<T>,
    ) -> CodecResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(CodecError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    /// Read the value of `field`, including its length prefix if it has one.
    pub fn read_field_value(
        &mut self,
        ctx: &CodecContext<'_>,
        field: &FieldInfo,
    ) -> CodecResult<Value> {
        let size = if field.is_vl_encoded {
            Some(self.read_variable_length_length()?)
        } else {
            None
        };
        types::read_value(ctx, field, self, size)
    }
}

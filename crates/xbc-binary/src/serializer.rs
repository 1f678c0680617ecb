use serde_json::Value;
use xbc_definitions::{FieldInfo, FieldKind};
use xbc_types::{BytesSink, CodecError, CodecResult};

use crate::context::CodecContext;
use crate::types;

/// Largest length a variable-length prefix can express.
pub const MAX_VARIABLE_LENGTH: usize = 918_744;

/// Trailing marker of a nested `STObject`.
pub const OBJECT_END_MARKER: u8 = 0xE1;
/// Trailing marker of an `STArray`.
pub const ARRAY_END_MARKER: u8 = 0xF1;

/// Encode a length as its 1-3 byte prefix.
pub fn encode_variable_length(len: usize) -> CodecResult<Vec<u8>> {
    if len <= 192 {
        Ok(vec![len as u8])
    } else if len <= 12_480 {
        let len = len - 193;
        Ok(vec![193 + (len >> 8) as u8, (len & 0xff) as u8])
    } else if len <= MAX_VARIABLE_LENGTH {
        let len = len - 12_481;
        Ok(vec![
            241 + (len >> 16) as u8,
            ((len >> 8) & 0xff) as u8,
            (len & 0xff) as u8,
        ])
    } else {
        Err(CodecError::LengthOverflow {
            length: len,
            max: MAX_VARIABLE_LENGTH,
        })
    }
}

/// Writes fields (header, optional length prefix, value) into a sink.
pub struct BinarySerializer<'s> {
    sink: &'s mut dyn BytesSink,
}

impl<'s> BinarySerializer<'s> {
    pub fn new(sink: &'s mut dyn BytesSink) -> Self {
        Self { sink }
    }

    pub fn put(&mut self, bytes: &[u8]) {
        self.sink.put(bytes);
    }

    /// Write `bytes` preceded by their length prefix.
    pub fn write_length_encoded(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let prefix = encode_variable_length(bytes.len())?;
        self.put(&prefix);
        self.put(bytes);
        Ok(())
    }

    /// Write one field of an object.
    ///
    /// With `omit_value` a variable-length field is written as its header and
    /// a zero length, without encoding `value`.
    pub fn write_field_and_value(
        &mut self,
        ctx: &CodecContext<'_>,
        field: &FieldInfo,
        value: &Value,
        omit_value: bool,
    ) -> CodecResult<()> {
        if field.header.is_empty() {
            return Err(CodecError::UnsupportedField(field.name.clone()));
        }
        self.put(&field.header);
        if field.is_vl_encoded {
            let mut bytes = Vec::new();
            if !omit_value {
                types::write_value(ctx, field, value, &mut bytes)?;
            }
            self.write_length_encoded(&bytes)
        } else {
            types::write_value(ctx, field, value, &mut *self.sink)?;
            if field.kind == FieldKind::StObject {
                self.put(&[OBJECT_END_MARKER]);
            }
            Ok(())
        }
    }
}

use serde_json::Value;
use xbc_definitions::{EnumKind, EnumTable};
use xbc_types::{BytesSink, CodecError, CodecResult};

use crate::context::CodecContext;
use crate::parser::BinaryParser;

/// A transaction type, ledger entry type or transaction result code.
///
/// JSON carries the symbolic name; the wire carries the code in
/// [`EnumKind::width`] big-endian bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub kind: EnumKind,
    pub code: u16,
}

fn unknown(kind: EnumKind, value: impl ToString) -> CodecError {
    CodecError::UnknownEnumValue {
        table: kind.name(),
        value: value.to_string(),
    }
}

impl EnumValue {
    fn checked(kind: EnumKind, table: &EnumTable, code: i64) -> CodecResult<Self> {
        if table.name(code).is_none() {
            return Err(unknown(kind, code));
        }
        let max = if kind.width() == 1 { u8::MAX as i64 } else { u16::MAX as i64 };
        if !(0..=max).contains(&code) {
            return Err(CodecError::OutOfRange {
                type_name: kind.name(),
                value: code.to_string(),
            });
        }
        Ok(Self {
            kind,
            code: code as u16,
        })
    }

    /// Accepts a name, a registered code, or a registered code as a string.
    pub fn from_json(ctx: &CodecContext<'_>, kind: EnumKind, value: &Value) -> CodecResult<Self> {
        let table = ctx.definitions.enum_table(kind);
        let code = match value {
            Value::String(name) => match table.code(name) {
                Some(code) => code,
                None => name.parse::<i64>().map_err(|_| unknown(kind, name))?,
            },
            Value::Number(n) => n.as_i64().ok_or_else(|| unknown(kind, n))?,
            other => return Err(unknown(kind, other)),
        };
        Self::checked(kind, table, code)
    }

    pub fn from_parser(kind: EnumKind, parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        let code = match kind.width() {
            1 => parser.read_u8()? as u16,
            _ => parser.read_u16()?,
        };
        Ok(Self { kind, code })
    }

    pub fn write_to(&self, sink: &mut dyn BytesSink) {
        match self.kind.width() {
            1 => sink.put(&[self.code as u8]),
            _ => sink.put(&self.code.to_be_bytes()),
        }
    }

    pub fn name<'a>(&self, ctx: &CodecContext<'a>) -> Option<&'a str> {
        ctx.definitions.enum_table(self.kind).name(self.code as i64)
    }

    /// The symbolic name; unregistered codes are a lookup error.
    pub fn to_json(&self, ctx: &CodecContext<'_>) -> CodecResult<Value> {
        self.name(ctx)
            .map(|n| Value::String(n.to_string()))
            .ok_or_else(|| unknown(self.kind, self.code))
    }
}

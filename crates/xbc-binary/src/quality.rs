//! Offer quality: the exchange rate of an offer, stored as the last eight
//! bytes of its book directory index.
//!
//! The first byte is the decimal exponent biased by 100; the remaining seven
//! hold a 16-digit mantissa.

use xbc_types::{CodecError, CodecResult};

use crate::decimal::Decimal;

const EXPONENT_BIAS: i64 = 100;

fn out_of_range(value: &str) -> CodecError {
    CodecError::OutOfRange {
        type_name: "Quality",
        value: value.to_string(),
    }
}

/// Encode a decimal rate.
pub fn encode_quality(value: &str) -> CodecResult<[u8; 8]> {
    let decimal: Decimal = value.parse()?;
    let (mantissa, exponent) = decimal.to_mantissa_16().ok_or_else(|| out_of_range(value))?;
    let biased = exponent
        .checked_add(EXPONENT_BIAS)
        .and_then(|e| u8::try_from(e).ok())
        .ok_or_else(|| out_of_range(value))?;
    let mut bytes = mantissa.to_be_bytes();
    bytes[0] = biased;
    Ok(bytes)
}

/// Decode the rate held in the last eight bytes of `bytes`.
pub fn decode_quality(bytes: &[u8]) -> CodecResult<Decimal> {
    if bytes.len() < 8 {
        return Err(CodecError::InvalidLength {
            expected: 8,
            actual: bytes.len(),
        });
    }
    let tail = &bytes[bytes.len() - 8..];
    let exponent = tail[0] as i64 - EXPONENT_BIAS;
    let mut mantissa = [0u8; 8];
    mantissa[1..].copy_from_slice(&tail[1..]);
    Ok(Decimal::from_parts(
        false,
        u64::from_be_bytes(mantissa),
        exponent as i32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbc_types::ErrorKind;

    #[test]
    fn known_vector() {
        let bytes = encode_quality("195796912.5171664").unwrap();
        assert_eq!(hex::encode_upper(bytes), "5D06F4C3362FE1D0");
        assert_eq!(decode_quality(&bytes).unwrap().to_string(), "195796912.5171664");
    }

    #[test]
    fn decodes_from_directory_index_tail() {
        let mut index = hex::decode("4627DFFCFF8B5A265EDBD8AE8C14A52325DBFEDAF4F5C32E").unwrap();
        index.extend_from_slice(&hex::decode("5D06F4C3362FE1D0").unwrap());
        assert_eq!(decode_quality(&index).unwrap().to_string(), "195796912.5171664");
    }

    #[test]
    fn short_input_rejected() {
        assert_eq!(
            decode_quality(&[1, 2, 3]).unwrap_err(),
            CodecError::InvalidLength { expected: 8, actual: 3 }
        );
    }

    #[test]
    fn too_many_digits_rejected() {
        assert!(encode_quality("1.23456789012345678").is_err());
        assert!(encode_quality("1e200").is_err());
    }

    #[test]
    fn extreme_exponents_are_range_errors() {
        for value in ["1e9223372036854775807", "1e-9223372036854775808"] {
            let err = encode_quality(value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range, "{value}");
        }
    }
}

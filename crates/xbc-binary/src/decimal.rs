use std::fmt;
use std::str::FromStr;

use xbc_types::CodecError;

/// Arbitrary-precision decimal in normalized scientific form.
///
/// Stored as a sign, the significant digits with leading and trailing zeros
/// stripped, and the power of ten of the first digit. Zero has no digits.
/// Formatting follows the usual JavaScript-style rules: exponential notation
/// only when the exponent is at most -7 or at least 21.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    negative: bool,
    digits: Vec<u8>,
    exponent: i64,
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: Vec::new(),
            exponent: 0,
        }
    }

    /// `mantissa * 10^exponent`.
    pub fn from_parts(negative: bool, mantissa: u64, exponent: i32) -> Self {
        if mantissa == 0 {
            return Self::zero();
        }
        let text = mantissa.to_string();
        let significant = text.trim_end_matches('0');
        Self {
            negative,
            digits: significant.bytes().map(|b| b - b'0').collect(),
            exponent: text.len() as i64 - 1 + exponent as i64,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Number of significant digits.
    pub fn precision(&self) -> usize {
        self.digits.len()
    }

    /// Power of ten of the first significant digit.
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Split into a 16-digit integer mantissa and its power of ten, so that
    /// the value equals `mantissa * 10^exponent` with `mantissa` in
    /// `[10^15, 10^16)`. Returns `None` for more than 16 significant digits
    /// or an exponent too small to shift. Zero yields `(0, exponent - 15)`.
    pub fn to_mantissa_16(&self) -> Option<(u64, i64)> {
        if self.precision() > 16 {
            return None;
        }
        let mut mantissa = 0u64;
        for i in 0..16 {
            mantissa = mantissa * 10 + *self.digits.get(i).unwrap_or(&0) as u64;
        }
        if self.is_zero() {
            mantissa = 0;
        }
        Some((mantissa, self.exponent.checked_sub(15)?))
    }
}

impl FromStr for Decimal {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CodecError::InvalidAmount(format!("not a decimal number: {s:?}"));

        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (mantissa, exp) = match unsigned.find(['e', 'E']) {
            Some(i) => (&unsigned[..i], &unsigned[i + 1..]),
            None => (unsigned, ""),
        };
        let exp: i64 = if exp.is_empty() && mantissa.len() == unsigned.len() {
            0
        } else {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            exp.parse().map_err(|_| invalid())?
        };
        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let all: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes())
            .map(|b| b - b'0')
            .collect();
        let Some(first) = all.iter().position(|d| *d != 0) else {
            return Ok(Self::zero());
        };
        let last = all.iter().rposition(|d| *d != 0).unwrap_or(first);
        let exponent = (int_part.len() as i64 - 1 - first as i64)
            .checked_add(exp)
            .ok_or_else(invalid)?;
        Ok(Self {
            negative,
            digits: all[first..=last].to_vec(),
            exponent,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let digits: String = self.digits.iter().map(|d| (b'0' + d) as char).collect();
        let e = self.exponent;
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        if e <= -7 || e >= 21 {
            out.push_str(&digits[..1]);
            if digits.len() > 1 {
                out.push('.');
                out.push_str(&digits[1..]);
            }
            out.push('e');
            out.push(if e < 0 { '-' } else { '+' });
            out.push_str(&e.unsigned_abs().to_string());
        } else if e < 0 {
            out.push_str("0.");
            out.push_str(&"0".repeat((-e - 1) as usize));
            out.push_str(&digits);
        } else {
            let int_len = e as usize + 1;
            if int_len >= digits.len() {
                out.push_str(&digits);
                out.push_str(&"0".repeat(int_len - digits.len()));
            } else {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            }
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn normalizes_digits_and_exponent() {
        let v = d("7072.8");
        assert_eq!(v.precision(), 5);
        assert_eq!(v.exponent(), 3);

        let v = d("0.00123");
        assert_eq!(v.precision(), 3);
        assert_eq!(v.exponent(), -3);

        let v = d("1000");
        assert_eq!(v.precision(), 1);
        assert_eq!(v.exponent(), 3);

        let v = d("-1.5e-7");
        assert!(v.is_negative());
        assert_eq!(v.exponent(), -7);
    }

    #[test]
    fn zero_forms() {
        for s in ["0", "0.000", "-0", "0e10", ".0"] {
            assert!(d(s).is_zero(), "{s}");
            assert_eq!(d(s).to_string(), "0");
        }
    }

    #[test]
    fn rejects_malformed() {
        for s in ["", "-", ".", "1.2.3", "abc", "1e", "1e+", "0x10", "1 "] {
            assert!(s.parse::<Decimal>().is_err(), "{s:?}");
        }
    }

    #[test]
    fn mantissa_16() {
        assert_eq!(
            d("7072.8").to_mantissa_16(),
            Some((7_072_800_000_000_000, -12))
        );
        assert_eq!(
            d("195796912.5171664").to_mantissa_16(),
            Some((1_957_969_125_171_664, -7))
        );
        assert_eq!(d("12345678901234567").to_mantissa_16(), None);
        assert_eq!(d("1e-9223372036854775808").to_mantissa_16(), None);
    }

    #[test]
    fn display_fixed_and_exponential() {
        assert_eq!(d("7072.8").to_string(), "7072.8");
        assert_eq!(d("1000").to_string(), "1000");
        assert_eq!(d("0.000001").to_string(), "0.000001");
        assert_eq!(d("0.0000001").to_string(), "1e-7");
        assert_eq!(d("-0.00000015").to_string(), "-1.5e-7");
        assert_eq!(d("1e20").to_string(), "100000000000000000000");
        assert_eq!(d("1e21").to_string(), "1e+21");
        assert_eq!(d("12.5e21").to_string(), "1.25e+22");
        assert_eq!(
            d("1e-9223372036854775808").to_string(),
            "1e-9223372036854775808"
        );
    }

    #[test]
    fn from_parts_matches_parse() {
        assert_eq!(Decimal::from_parts(false, 7_072_800_000_000_000, -12), d("7072.8"));
        assert_eq!(Decimal::from_parts(true, 15, 0), d("-15"));
        assert!(Decimal::from_parts(true, 0, 5).is_zero());
    }
}

//! Numeric literals
//!
//! Quantities carry `f64` magnitudes. Literals are read the way a user writes
//! them: integer literals go through `i64` so they are exact, anything with a
//! decimal point or a negative exponent is read as a float.

use thiserror::Error;

/// Error type for numeric literal parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Number is not finite: {0}")]
    NonFinite(String),
}

/// Length of the longest prefix of `s` matching `[-+]?\d*\.?\d+([eE][-+]?\d+)?`
///
/// Returns `None` when no prefix matches.
pub fn scan_literal(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    // `\d*\.?\d+` needs at least one digit after an optional dot
    let mut end = if int_digits > 0 { Some(pos) } else { None };
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac = frac_start;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > frac_start {
            end = Some(frac);
        }
    }
    let mantissa_end = end?;

    // Optional exponent, only consumed when complete
    let mut pos = mantissa_end;
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'-' || bytes[exp] == b'+') {
            exp += 1;
        }
        let digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > digits_start {
            pos = exp;
        }
    }

    Some(pos)
}

/// True if the literal is read as an integer (no decimal point, no negative exponent)
pub fn is_integer_literal(s: &str) -> bool {
    !s.contains('.') && !s.contains("e-") && !s.contains("E-")
}

/// Parse a complete numeric literal
pub fn parse_literal(s: &str) -> Result<f64, NumberError> {
    let s = s.trim();
    if scan_literal(s) != Some(s.len()) {
        return Err(NumberError::ParseError(s.to_string()));
    }

    if is_integer_literal(s) {
        if let Some(n) = parse_exact_integer(s) {
            return Ok(n as f64);
        }
    }

    let value: f64 = s.parse()
        .map_err(|_| NumberError::ParseError(s.to_string()))?;
    if !value.is_finite() {
        return Err(NumberError::NonFinite(s.to_string()));
    }
    Ok(value)
}

/// Integer literal with an optional non-negative exponent; `None` on overflow
fn parse_exact_integer(s: &str) -> Option<i64> {
    let lower = s.to_ascii_lowercase();
    let mut parts = lower.splitn(2, 'e');
    let mantissa: i64 = parts.next()?.parse().ok()?;

    match parts.next() {
        None => Some(mantissa),
        Some(exp) => {
            let exp: u32 = exp.trim_start_matches('+').parse().ok()?;
            mantissa.checked_mul(10i64.checked_pow(exp)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_literal() {
        assert_eq!(scan_literal("50km"), Some(2));
        assert_eq!(scan_literal("-3.14 rad"), Some(5));
        assert_eq!(scan_literal(".5m"), Some(2));
        assert_eq!(scan_literal("1e3 m"), Some(3));
        assert_eq!(scan_literal("2e-3"), Some(4));
        assert_eq!(scan_literal("km"), None);
        assert_eq!(scan_literal("-"), None);
        assert_eq!(scan_literal("."), None);
    }

    #[test]
    fn test_scan_literal_leaves_incomplete_exponent() {
        // "2 exabytes" style input: the 'e' belongs to the unit
        assert_eq!(scan_literal("2exabyte"), Some(1));
        assert_eq!(scan_literal("2e-x"), Some(1));
    }

    #[test]
    fn test_scan_literal_trailing_dot() {
        // "5." is not a valid mantissa end, the dot is left over
        assert_eq!(scan_literal("5."), Some(1));
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(parse_literal("42").unwrap(), 42.0);
        assert_eq!(parse_literal("-7").unwrap(), -7.0);
        assert_eq!(parse_literal("+7").unwrap(), 7.0);
        assert_eq!(parse_literal("12e3").unwrap(), 12000.0);
        assert!(is_integer_literal("12e3"));
        assert!(is_integer_literal("12E+3"));
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(parse_literal("3.5").unwrap(), 3.5);
        assert_eq!(parse_literal(".25").unwrap(), 0.25);
        assert_eq!(parse_literal("25e-2").unwrap(), 0.25);
        assert!(!is_integer_literal("25e-2"));
        assert!(!is_integer_literal("1.0"));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        let value = parse_literal("99999999999999999999").unwrap();
        assert_eq!(value, 1e20);

        let value = parse_literal("1e30").unwrap();
        assert_eq!(value, 1e30);
    }

    #[test]
    fn test_invalid_literals() {
        assert!(parse_literal("").is_err());
        assert!(parse_literal("abc").is_err());
        assert!(parse_literal("1.2.3").is_err());
        assert!(parse_literal("5.").is_err());
        assert!(matches!(parse_literal("1e999"), Err(NumberError::NonFinite(_))));
    }
}

//! Human-readable size strings.
//!
//! Units are binary: `KB` = 1024, `MB` = 1024², `GB` = 1024³, `TB` = 1024⁴.
//! The `KiB`/`MiB`/... spellings are accepted as aliases. A bare number is
//! a byte count.

use thiserror::Error;

/// Errors from [`parse_size`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("empty size string")]
    Empty,
    #[error("invalid size number: {0}")]
    InvalidNumber(String),
    #[error("unknown size unit: {0}")]
    UnknownUnit(String),
}

const KIB: f64 = 1024.0;

fn unit_multiplier(unit: &str) -> Option<f64> {
    let factor = match unit.to_ascii_lowercase().as_str() {
        "" | "b" | "byte" | "bytes" => 1.0,
        "k" | "kb" | "kib" => KIB,
        "m" | "mb" | "mib" => KIB * KIB,
        "g" | "gb" | "gib" => KIB * KIB * KIB,
        "t" | "tb" | "tib" => KIB * KIB * KIB * KIB,
        "p" | "pb" | "pib" => KIB * KIB * KIB * KIB * KIB,
        _ => return None,
    };
    Some(factor)
}

/// Parse a size such as `"10 GB"`, `"1.5TB"`, `"700MiB"` or `"1024"` into bytes.
///
/// Thousands separators (`,`) are ignored. Fractional results are truncated.
pub fn parse_size(input: &str) -> Result<u64, SizeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SizeError::Empty);
    }

    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);

    let number = number.replace(',', "");
    let value: f64 = number
        .parse()
        .map_err(|_| SizeError::InvalidNumber(number.clone()))?;

    let unit = unit.trim();
    let factor = unit_multiplier(unit).ok_or_else(|| SizeError::UnknownUnit(unit.to_string()))?;

    Ok((value * factor) as u64)
}

/// Parse a size and append `force_unit` when the input has no unit of its own.
///
/// Some indexers announce sizes as bare numbers in a fixed unit.
pub fn parse_size_with_unit(input: &str, force_unit: Option<&str>) -> Result<u64, SizeError> {
    match force_unit {
        Some(unit) if !unit.is_empty() && input.trim().chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') => {
            parse_size(&format!("{} {}", input.trim(), unit))
        }
        _ => parse_size(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binary_units() {
        assert_eq!(parse_size("10 GB"), Ok(10 * 1024 * 1024 * 1024));
        assert_eq!(parse_size("40GB"), Ok(40 * 1024 * 1024 * 1024));
        assert_eq!(parse_size("1.5TB"), Ok(1024 * 1024 * 1024 * 1024 * 3 / 2));
        assert_eq!(parse_size("700 MiB"), Ok(700 * 1024 * 1024));
        assert_eq!(parse_size("12 kb"), Ok(12 * 1024));
    }

    #[test]
    fn test_parse_bare_bytes() {
        assert_eq!(parse_size("1024"), Ok(1024));
        assert_eq!(parse_size(" 30000000001 "), Ok(30_000_000_001));
        assert_eq!(parse_size("1,234 MB"), Ok(1234 * 1024 * 1024));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_size(""), Err(SizeError::Empty));
        assert_eq!(parse_size("GB"), Err(SizeError::InvalidNumber(String::new())));
        assert_eq!(
            parse_size("10 parsecs"),
            Err(SizeError::UnknownUnit("parsecs".to_string()))
        );
    }

    #[test]
    fn test_force_unit() {
        assert_eq!(parse_size_with_unit("2", Some("GB")), Ok(2 * 1024 * 1024 * 1024));
        assert_eq!(parse_size_with_unit("2 MB", Some("GB")), Ok(2 * 1024 * 1024));
        assert_eq!(parse_size_with_unit("2048", None), Ok(2048));
    }
}

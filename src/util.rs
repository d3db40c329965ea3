// Utility helpers for numeric cleaning and display formatting.
//
// This module centralizes all the "dirty" warehouse-value handling so the
// rest of the code can assume clean, typed values. The cleaning policies are
// deliberately asymmetric: visitor counts coerce to zero (a safe identity in
// sums), growth percentages coerce to missing so they can be dropped instead
// of being misreported as zero.
use num_format::{Locale, ToFormattedString};

/// Parse a possibly string-formatted metric into `f64`.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
///
/// Already-clean numeric input passes through unchanged, so the cleaner is
/// idempotent.
pub fn clean_metric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok()
}

/// Clean a visitor-count cell into an integer, coercing anything
/// unparseable to `0`. Never surfaces an error: count cells feed sums where
/// zero cannot corrupt the result.
pub fn clean_count(raw: &str) -> i64 {
    clean_metric(raw).map_or(0, |v| v as i64)
}

/// Clean a monetary amount into `f64` with a `0.0` fallback. Used for the
/// sanctioned/utilised columns of the project summary table.
pub fn clean_amount(raw: &str) -> f64 {
    clean_metric(raw).unwrap_or(0.0)
}

/// Strict integer-year parse. Unlike the count cleaner this returns `None`
/// on failure: a year that does not parse is a schema problem, not a dirty
/// value.
pub fn parse_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

/// Format a floating-point value with a fixed number of decimal places and
/// locale-aware thousands separators (e.g., `1,234,567.89`).
pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert commas into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values, used for
    // every visitor count shown to the user.
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_strips_thousands_separators() {
        assert_eq!(clean_count("1,234"), 1234);
        assert_eq!(clean_count("10,000"), 10000);
    }

    #[test]
    fn count_is_idempotent_on_clean_input() {
        assert_eq!(clean_count("1234"), 1234);
        assert_eq!(clean_count("  1234  "), 1234);
    }

    #[test]
    fn count_coerces_garbage_to_zero() {
        assert_eq!(clean_count(""), 0);
        assert_eq!(clean_count("n/a"), 0);
        assert_eq!(clean_count("12.34.56"), 0);
    }

    #[test]
    fn metric_keeps_missing_distinct_from_zero() {
        assert_eq!(clean_metric("0"), Some(0.0));
        assert_eq!(clean_metric(""), None);
        assert_eq!(clean_metric("N/A"), None);
        assert_eq!(clean_metric("-12.5"), Some(-12.5));
        assert_eq!(clean_metric("1,234.56"), Some(1234.56));
    }

    #[test]
    fn amount_falls_back_to_zero() {
        assert_eq!(clean_amount("1,000.50"), 1000.50);
        assert_eq!(clean_amount("unknown"), 0.0);
    }

    #[test]
    fn year_parse_is_strict() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year(" 2020 "), Some(2020));
        assert_eq!(parse_year("2020_21"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-500.0, 2), "-500.00");
        assert_eq!(format_int(12000i64), "12,000");
        assert_eq!(format_int(-500i64), "-500");
    }
}

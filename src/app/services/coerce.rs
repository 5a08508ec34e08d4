//! Field coercion for inline edits.
//!
//! Edits never fail: prices that don't read as a non-negative number become
//! `0`, and blank names are reported as `None` so the caller can keep the
//! previous value.

use std::sync::OnceLock;

use regex_lite::Regex;

fn noise_pattern() -> Option<&'static Regex> {
    static NOISE: OnceLock<Option<Regex>> = OnceLock::new();
    NOISE.get_or_init(|| Regex::new(r"[^0-9.,\-]").ok()).as_ref()
}

fn grouping_pattern() -> Option<&'static Regex> {
    static GROUPING: OnceLock<Option<Regex>> = OnceLock::new();
    GROUPING
        .get_or_init(|| Regex::new(r"^\d{1,3}(,\d{3})+(\.\d+)?$").ok())
        .as_ref()
}

/// Clamp a numeric price into the stored domain.
pub fn coerce_price(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 { value } else { 0.0 }
}

/// Parse what a user typed into a price field.
///
/// Blank input means "not set". Currency symbols and spaces are ignored,
/// `1,250.00` reads as a grouped number and `4,50` as a comma decimal.
/// Anything still unreadable, negative or non-finite becomes `Some(0.0)`.
pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = match noise_pattern() {
        Some(re) => re.replace_all(trimmed, "").into_owned(),
        None => trimmed.to_string(),
    };
    if cleaned.is_empty() {
        return Some(0.0);
    }

    let is_grouped = grouping_pattern().is_some_and(|re| re.is_match(&cleaned));
    let normalized = if is_grouped || (cleaned.contains(',') && cleaned.contains('.')) {
        cleaned.replace(',', "")
    } else {
        cleaned.replace(',', ".")
    };

    Some(normalized.parse::<f64>().map(coerce_price).unwrap_or(0.0))
}

/// Trimmed name, or `None` when nothing is left.
pub fn normalize_name(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trimmed description; blank clears it.
pub fn normalize_description(text: &str) -> Option<String> {
    normalize_name(text)
}

/// Render a stored price for display or for seeding an edit draft.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        format!("{:.2}", price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_price() {
        assert_eq!(coerce_price(3.5), 3.5);
        assert_eq!(coerce_price(f64::NAN), 0.0);
        assert_eq!(coerce_price(f64::INFINITY), 0.0);
        assert_eq!(coerce_price(-2.0), 0.0);
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_price("4.5"), Some(4.5));
        assert_eq!(parse_price(" 12 "), Some(12.0));
        assert_eq!(parse_price("0"), Some(0.0));
    }

    #[test]
    fn test_parse_blank_is_unset() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
    }

    #[test]
    fn test_parse_strips_currency() {
        assert_eq!(parse_price("$4.50"), Some(4.5));
        assert_eq!(parse_price("4.50 €"), Some(4.5));
        assert_eq!(parse_price("EUR 7"), Some(7.0));
    }

    #[test]
    fn test_parse_separators() {
        assert_eq!(parse_price("4,50"), Some(4.5));
        assert_eq!(parse_price("1,250"), Some(1250.0));
        assert_eq!(parse_price("1,250.75"), Some(1250.75));
    }

    #[test]
    fn test_parse_garbage_becomes_zero() {
        assert_eq!(parse_price("abc"), Some(0.0));
        assert_eq!(parse_price("1.2.3"), Some(0.0));
        assert_eq!(parse_price("-5"), Some(0.0));
        assert_eq!(parse_price("NaN"), Some(0.0));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Soup "), Some("Soup".to_string()));
        assert_eq!(normalize_name(" \t "), None);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(4.0), "4");
        assert_eq!(format_price(4.5), "4.50");
    }
}

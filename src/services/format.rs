//! Number formatting for metrics and chart labels

/// Compact human-readable value with optional currency prefix.
///
/// Three tiers: units, "mil", "milhões". Tier selection happens before the
/// two-decimal rounding, so values just under a boundary can render as
/// "1000.00 mil". Matches the upstream dashboard formatter exactly,
/// trailing unit space included.
pub fn format_compact(value: f64, prefix: &str) -> String {
    let mut value = value;
    for unit in ["", "mil"] {
        if value < 1000.0 {
            return format!("{} {:.2} {}", prefix, value, unit);
        }
        value /= 1000.0;
    }
    format!("{} {:.2} milhões", prefix, value)
}

/// Format a count with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== format_compact tests ==========

    #[test]
    fn test_compact_units_tier_has_trailing_space() {
        assert_eq!(format_compact(500.0, "R$"), "R$ 500.00 ");
    }

    #[test]
    fn test_compact_thousands_tier() {
        assert_eq!(format_compact(1500.0, "R$"), "R$ 1.50 mil");
    }

    #[test]
    fn test_compact_millions_tier() {
        assert_eq!(format_compact(2_500_000.0, "R$"), "R$ 2.50 milhões");
    }

    #[test]
    fn test_compact_empty_prefix() {
        assert_eq!(format_compact(42.0, ""), " 42.00 ");
    }

    #[test]
    fn test_compact_exact_thousand_scales() {
        assert_eq!(format_compact(1000.0, "R$"), "R$ 1.00 mil");
    }

    #[test]
    fn test_compact_million_boundary() {
        assert_eq!(format_compact(1_000_000.0, "R$"), "R$ 1.00 milhões");
    }

    #[test]
    fn test_compact_asymmetry_just_below_a_million() {
        // Only one < 1000 check happens after the first division, so this
        // stays in the "mil" tier and rounds up to 1000.00
        assert_eq!(format_compact(999_999.5, "R$"), "R$ 1000.00 mil");
    }

    #[test]
    fn test_compact_zero() {
        assert_eq!(format_compact(0.0, "R$"), "R$ 0.00 ");
    }

    // ========== format_number tests ==========

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0), "0");
    }

    #[test]
    fn test_format_number_small() {
        assert_eq!(format_number(999), "999");
    }

    #[test]
    fn test_format_number_thousand() {
        assert_eq!(format_number(1000), "1,000");
    }

    #[test]
    fn test_format_number_large() {
        assert_eq!(format_number(1234567), "1,234,567");
    }
}

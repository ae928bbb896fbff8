use chrono::NaiveDateTime;

/// Format an event timestamp for display.
///
/// Renders a 12-hour clock with leading zero, then two spaces, then the
/// zero-padded US-style date: `03:30:05 PM  07/04/2023`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDateTime;
/// use insights_core::formatting::format_event_time;
///
/// let dt = NaiveDateTime::parse_from_str("2023-07-04 15:30:05", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(format_event_time(dt), "03:30:05 PM  07/04/2023");
/// ```
pub fn format_event_time(dt: NaiveDateTime) -> String {
    dt.format("%I:%M:%S %p  %m/%d/%Y").to_string()
}

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        let decimal_digits = &frac_str[1..];
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a count for table display with thousands separators.
pub fn format_count(count: u64) -> String {
    format_number(count as f64, 0)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    // ── format_event_time ────────────────────────────────────────────────────

    #[test]
    fn test_format_event_time_afternoon() {
        assert_eq!(format_event_time(ts("2023-07-04 15:30:05")), "03:30:05 PM  07/04/2023");
    }

    #[test]
    fn test_format_event_time_morning_leading_zero() {
        assert_eq!(format_event_time(ts("2024-01-09 09:05:01")), "09:05:01 AM  01/09/2024");
    }

    #[test]
    fn test_format_event_time_midnight_is_twelve_am() {
        assert_eq!(format_event_time(ts("2024-12-31 00:00:00")), "12:00:00 AM  12/31/2024");
    }

    #[test]
    fn test_format_event_time_noon_is_twelve_pm() {
        assert_eq!(format_event_time(ts("2024-06-15 12:00:00")), "12:00:00 PM  06/15/2024");
    }

    #[test]
    fn test_format_event_time_two_spaces_before_date() {
        let s = format_event_time(ts("2023-07-04 15:30:05"));
        assert!(s.contains("PM  07"));
    }

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_exact_thousands() {
        assert_eq!(format_number(1_000.0, 0), "1,000");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    // ── format_count ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    // ── group_thousands (via format_number) ──────────────────────────────────

    #[test]
    fn test_group_thousands_one_digit() {
        assert_eq!(format_number(5.0, 0), "5");
    }

    #[test]
    fn test_group_thousands_four_digits() {
        assert_eq!(format_number(1234.0, 0), "1,234");
    }
}

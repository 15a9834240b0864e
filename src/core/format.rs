//! Conversion between numbers and display text.

/// Fractional digits kept when rendering a non-integer.
pub const FRACTION_DIGITS: usize = 12;

/// Render a value the way the display shows it.
///
/// Integers have no decimal point. Other values are rounded to
/// [`FRACTION_DIGITS`] places with trailing zeros and a dangling point
/// removed. Negative zero renders as `"0"`.
///
/// # Example
///
/// ```rust
/// use tally::core::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(-2.5), "-2.5");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }

    let fixed = format!("{value:.prec$}", prec = FRACTION_DIGITS);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        // Rounds to zero; shown unsigned even though the value is negative.
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Parse display text as a number.
///
/// Accepts partial entries such as `"3."` and `"-0."`. Returns `None` for
/// the error marker or any text that is not a plain decimal number. A typed
/// number too long for `f64` parses to an infinity; callers treat that as
/// overflow.
pub fn parse_display(text: &str) -> Option<f64> {
    let plain = text
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-');
    if !plain {
        return None;
    }
    text.parse::<f64>().ok()
}

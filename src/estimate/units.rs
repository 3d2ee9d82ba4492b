use crate::estimate::types::{DataUnit, ParsedExpression, TimeUnit};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Trailing time divisor: "/ month", "/day", "/s"
    static ref TIME_DIVISOR: Regex = Regex::new(r"/\s*([a-zA-Z]+)\s*$").unwrap();
}

/// Split a preprocessed expression into its arithmetic part and unit tags.
///
/// The time divisor is always the outermost token, so it is stripped first;
/// the data unit is then taken from the last whitespace-separated token.
pub fn parse_units(expr: &str) -> ParsedExpression {
    let mut math = expr.to_string();
    let mut time_unit = None;
    let mut data_unit = None;

    let divisor = TIME_DIVISOR.captures(&math).and_then(|caps| {
        let unit = TimeUnit::from_token(&caps[1])?;
        let start = caps.get(0)?.start();
        Some((unit, start))
    });
    if let Some((unit, start)) = divisor {
        time_unit = Some(unit);
        math = math[..start].trim().to_string();
    }

    let tokens: Vec<&str> = math.split_whitespace().collect();
    if let Some((last, rest)) = tokens.split_last() {
        if let Some(unit) = DataUnit::from_token(last) {
            data_unit = Some(unit);
            math = rest
                .join(" ")
                .trim_end_matches(|c| c == ' ' || c == '*')
                .to_string();
        }
    }

    ParsedExpression {
        math,
        data_unit,
        time_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unit_only() {
        let parsed = parse_units("30 * 1e9 * 500 bytes");
        assert_eq!(parsed.math, "30 * 1e9 * 500");
        assert_eq!(parsed.data_unit, Some(DataUnit::Byte));
        assert_eq!(parsed.time_unit, None);
    }

    #[test]
    fn test_time_unit_only() {
        let parsed = parse_units("500 * 1e6 / month");
        assert_eq!(parsed.math, "500 * 1e6");
        assert_eq!(parsed.data_unit, None);
        assert_eq!(parsed.time_unit, Some(TimeUnit::Month));
    }

    #[test]
    fn test_data_and_time_units() {
        let parsed = parse_units("2 * 10 GB/day");
        assert_eq!(parsed.math, "2 * 10");
        assert_eq!(parsed.data_unit, Some(DataUnit::Gigabyte));
        assert_eq!(parsed.time_unit, Some(TimeUnit::Day));
    }

    #[test]
    fn test_dangling_operator_stripped() {
        let parsed = parse_units("500 * MB");
        assert_eq!(parsed.math, "500");
        assert_eq!(parsed.data_unit, Some(DataUnit::Megabyte));
    }

    #[test]
    fn test_unknown_tokens_left_in_place() {
        let parsed = parse_units("10 / fortnight");
        assert_eq!(parsed.math, "10 / fortnight");
        assert_eq!(parsed.time_unit, None);

        let parsed = parse_units("10 apples");
        assert_eq!(parsed.math, "10 apples");
        assert_eq!(parsed.data_unit, None);
    }

    #[test]
    fn test_plain_arithmetic() {
        let parsed = parse_units("1 + 2 * (3 - 1)");
        assert_eq!(parsed.math, "1 + 2 * (3 - 1)");
        assert_eq!(parsed.data_unit, None);
        assert_eq!(parsed.time_unit, None);
    }

    #[test]
    fn test_empty_residual() {
        let parsed = parse_units("bytes / s");
        assert_eq!(parsed.math, "");
        assert_eq!(parsed.data_unit, Some(DataUnit::Byte));
        assert_eq!(parsed.time_unit, Some(TimeUnit::Second));
    }
}

use crate::estimate::types::{DataUnit, Rate, TargetUnit, TimeUnit};

/// Word-style thresholds for dimensionless counts, largest first
const NUMBER_THRESHOLDS: [(f64, &str); 4] = [
    (1e12, "trillion"),
    (1e9, "billion"),
    (1e6, "million"),
    (1e3, "K"),
];

/// Relative distance to the nearest integer under which it is shown as an integer
const INTEGER_TOLERANCE: f64 = 0.05;
/// Absolute distance under which the integer is shown without "~"
const EXACT_TOLERANCE: f64 = 0.01;

/// Format a scaled value: "15", "~193", "~1.7"
pub fn format_magnitude(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let rounded = value.round_ties_even();
    if rounded != 0.0 && (value - rounded).abs() / rounded.abs() < INTEGER_TOLERANCE {
        if value == rounded || (value - rounded).abs() < EXACT_TOLERANCE {
            format!("{:.0}", rounded)
        } else {
            format!("~{:.0}", rounded)
        }
    } else {
        format!("~{}", compact_one_decimal(value))
    }
}

/// One decimal place with trailing zeros and dot dropped: 1.70 -> "1.7", 2.0 -> "2"
fn compact_one_decimal(value: f64) -> String {
    let fixed = format!("{:.1}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Format a dimensionless count with a word suffix ("1.5 billion", "20K")
/// followed by `rate_label`
pub fn format_number(value: f64, rate_label: &str) -> String {
    let abs_val = value.abs();
    for (threshold, suffix) in NUMBER_THRESHOLDS {
        if abs_val >= threshold {
            let formatted = format_magnitude(value / threshold);
            let sep = if suffix.len() <= 1 { "" } else { " " };
            return format!("{}{}{}{}", formatted, sep, suffix, rate_label);
        }
    }
    format!("{}{}", format_magnitude(value), rate_label)
}

/// Format a byte count using the largest unit it reaches ("15 TB", "0 bytes")
pub fn format_bytes(bytes: f64, rate_label: &str) -> String {
    let abs_val = bytes.abs();
    let unit = DataUnit::DESCENDING
        .into_iter()
        .find(|unit| abs_val >= unit.bytes())
        .unwrap_or(DataUnit::Byte);
    format!(
        "{} {}{}",
        format_magnitude(bytes / unit.bytes()),
        unit.label(),
        rate_label
    )
}

fn format_in_unit(bytes: f64, unit: DataUnit, label: &str, rate_label: &str) -> String {
    format!(
        "{} {}{}",
        format_magnitude(bytes / unit.bytes()),
        label,
        rate_label
    )
}

/// Build the display string for an evaluated magnitude and its unit tags.
///
/// | data | time | rate   | display                                           |
/// |------|------|--------|---------------------------------------------------|
/// | yes  | yes  | some   | bytes per requested span, auto unit               |
/// | yes  | yes  | none   | bytes per second, auto unit                       |
/// | no   | yes  | some   | count per requested span                          |
/// | no   | yes  | none   | count per second                                  |
/// | yes  | no   | any    | bytes in target unit (or auto), rate label only   |
/// | no   | no   | any    | plain count, or raw bytes forced into target unit |
pub fn format_result(
    magnitude: f64,
    data_unit: Option<DataUnit>,
    time_unit: Option<TimeUnit>,
    target: &TargetUnit,
    rate: Rate,
) -> String {
    let rate_label = rate.label();

    match (data_unit, time_unit) {
        (Some(data), Some(time)) => {
            let (per, label) = match rate.time_unit() {
                Some(per) => (per, rate_label),
                None => (TimeUnit::Second, "/s"),
            };
            let bytes_per = magnitude * data.bytes() / time.seconds() * per.seconds();
            format_bytes(bytes_per, label)
        }
        (None, Some(time)) => {
            let (per, label) = match rate.time_unit() {
                Some(per) => (per, rate_label),
                None => (TimeUnit::Second, "/s"),
            };
            format_number(magnitude / time.seconds() * per.seconds(), label)
        }
        (Some(data), None) => {
            let bytes = magnitude * data.bytes();
            match target {
                TargetUnit::Data { unit, label } => format_in_unit(bytes, *unit, label, rate_label),
                TargetUnit::Auto | TargetUnit::None => format_bytes(bytes, rate_label),
            }
        }
        (None, None) => match target {
            TargetUnit::Data { unit, label } => format_in_unit(magnitude, *unit, label, rate_label),
            TargetUnit::Auto | TargetUnit::None => format_number(magnitude, rate_label),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_magnitude_integers() {
        assert_eq!(format_magnitude(0.0), "0");
        assert_eq!(format_magnitude(15.0), "15");
        assert_eq!(format_magnitude(1.0), "1");
        assert_eq!(format_magnitude(100.005), "100");
        assert_eq!(format_magnitude(-42.0), "-42");
    }

    #[test]
    fn test_format_magnitude_approximate() {
        assert_eq!(format_magnitude(192.9), "~193");
        assert_eq!(format_magnitude(1.7), "~1.7");
        assert_eq!(format_magnitude(1.75), "~1.8");
        assert_eq!(format_magnitude(0.5), "~0.5");
        assert_eq!(format_magnitude(1e-7), "~0");
        assert_eq!(format_magnitude(-0.01), "~0");
        // 2.96 is within 5% of 3 but not within 0.01
        assert_eq!(format_magnitude(2.96), "~3");
    }

    #[test]
    fn test_negative_zero_shown_as_zero() {
        assert_eq!(compact_one_decimal(-0.04), "0");
        assert_eq!(format_magnitude(-0.04), "~0");
        assert_eq!(format_magnitude(-0.3), "~-0.3");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.5e9, ""), "~1.5 billion");
        assert_eq!(format_number(2e12, ""), "2 trillion");
        assert_eq!(format_number(20_000.0, ""), "20K");
        assert_eq!(format_number(3e6, "/day"), "3 million/day");
        assert_eq!(format_number(999.0, "/s"), "999/s");
        assert_eq!(format_number(-5e6, ""), "-5 million");
    }

    #[test]
    fn test_format_bytes_thresholds() {
        assert_eq!(format_bytes(1.5e13, ""), "15 TB");
        assert_eq!(format_bytes(1e6, ""), "1 MB");
        assert_eq!(format_bytes(1000.0, ""), "1 KB");
        assert_eq!(format_bytes(999.0, ""), "999 bytes");
        assert_eq!(format_bytes(0.0, ""), "0 bytes");
        assert_eq!(format_bytes(0.5, ""), "~0.5 bytes");
        assert_eq!(format_bytes(3e18, "/s"), "3000 PB/s");
    }

    #[test]
    fn test_format_result_rate_conversion() {
        // 1 GB/s expressed per day
        let display = format_result(
            1.0,
            Some(DataUnit::Gigabyte),
            Some(TimeUnit::Second),
            &TargetUnit::Auto,
            Rate::PerDay,
        );
        assert_eq!(display, "~86 TB/day");

        let display = format_result(
            86_400.0,
            None,
            Some(TimeUnit::Day),
            &TargetUnit::Auto,
            Rate::PerSecond,
        );
        assert_eq!(display, "1/s");
    }

    #[test]
    fn test_format_result_defaults_to_per_second() {
        let display = format_result(
            500e6,
            None,
            Some(TimeUnit::Month),
            &TargetUnit::Auto,
            Rate::None,
        );
        assert_eq!(display, "~193/s");

        let display = format_result(
            8_640.0,
            Some(DataUnit::Gigabyte),
            Some(TimeUnit::Day),
            &TargetUnit::Auto,
            Rate::None,
        );
        assert_eq!(display, "100 MB/s");
    }

    #[test]
    fn test_format_result_forced_target() {
        let target = TargetUnit::parse("GB").unwrap();
        let display = format_result(5e9, Some(DataUnit::Byte), None, &target, Rate::None);
        assert_eq!(display, "5 GB");

        let display = format_result(100.0, None, None, &target, Rate::None);
        assert_eq!(display, "~0 GB");

        let display = format_result(2.0, None, None, &TargetUnit::Auto, Rate::PerHour);
        assert_eq!(display, "2/hour");
    }
}

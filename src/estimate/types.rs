use crate::estimate::error::EstimateError;
use serde::{Deserialize, Serialize};

/// Byte multiple attached to an expression, decimal (1 KB = 1000 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
    Petabyte,
}

impl DataUnit {
    /// Largest first, used for auto-selecting a display unit
    pub const DESCENDING: [DataUnit; 6] = [
        DataUnit::Petabyte,
        DataUnit::Terabyte,
        DataUnit::Gigabyte,
        DataUnit::Megabyte,
        DataUnit::Kilobyte,
        DataUnit::Byte,
    ];

    /// Look up a data-size token such as "bytes", "MB" or "gigabytes" (case-insensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "bytes" | "byte" => Some(DataUnit::Byte),
            "kb" | "kilobyte" | "kilobytes" => Some(DataUnit::Kilobyte),
            "mb" | "megabyte" | "megabytes" => Some(DataUnit::Megabyte),
            "gb" | "gigabyte" | "gigabytes" => Some(DataUnit::Gigabyte),
            "tb" | "terabyte" | "terabytes" => Some(DataUnit::Terabyte),
            "pb" | "petabyte" | "petabytes" => Some(DataUnit::Petabyte),
            _ => None,
        }
    }

    /// Size of one unit in bytes
    pub fn bytes(self) -> f64 {
        match self {
            DataUnit::Byte => 1.0,
            DataUnit::Kilobyte => 1e3,
            DataUnit::Megabyte => 1e6,
            DataUnit::Gigabyte => 1e9,
            DataUnit::Terabyte => 1e12,
            DataUnit::Petabyte => 1e15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DataUnit::Byte => "bytes",
            DataUnit::Kilobyte => "KB",
            DataUnit::Megabyte => "MB",
            DataUnit::Gigabyte => "GB",
            DataUnit::Terabyte => "TB",
            DataUnit::Petabyte => "PB",
        }
    }
}

/// Time span used as a rate divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    /// Fixed at 30 days
    Month,
    /// Julian year, 365.25 days
    Year,
}

impl TimeUnit {
    /// Look up a time token as written after "/" (case-insensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "second" | "seconds" | "s" => Some(TimeUnit::Second),
            "minute" | "minutes" | "min" => Some(TimeUnit::Minute),
            "hour" | "hours" | "hr" => Some(TimeUnit::Hour),
            "day" | "days" => Some(TimeUnit::Day),
            "month" | "months" => Some(TimeUnit::Month),
            "year" | "years" => Some(TimeUnit::Year),
            _ => None,
        }
    }

    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3_600.0,
            TimeUnit::Day => 86_400.0,
            TimeUnit::Month => 30.0 * 86_400.0,
            TimeUnit::Year => 365.25 * 86_400.0,
        }
    }
}

/// Rate selector requested by the caller for the final display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rate {
    #[default]
    None,
    PerSecond,
    PerMinute,
    PerHour,
    PerDay,
    PerMonth,
    PerYear,
}

impl Rate {
    pub fn parse(s: &str) -> Result<Self, EstimateError> {
        match s {
            "none" => Ok(Rate::None),
            "/s" => Ok(Rate::PerSecond),
            "/min" => Ok(Rate::PerMinute),
            "/hour" => Ok(Rate::PerHour),
            "/day" => Ok(Rate::PerDay),
            "/month" => Ok(Rate::PerMonth),
            "/year" => Ok(Rate::PerYear),
            other => Err(EstimateError::UnknownRate(other.to_string())),
        }
    }

    pub fn time_unit(self) -> Option<TimeUnit> {
        match self {
            Rate::None => None,
            Rate::PerSecond => Some(TimeUnit::Second),
            Rate::PerMinute => Some(TimeUnit::Minute),
            Rate::PerHour => Some(TimeUnit::Hour),
            Rate::PerDay => Some(TimeUnit::Day),
            Rate::PerMonth => Some(TimeUnit::Month),
            Rate::PerYear => Some(TimeUnit::Year),
        }
    }

    /// Suffix appended to a display string; empty for `Rate::None`
    pub fn label(self) -> &'static str {
        match self {
            Rate::None => "",
            Rate::PerSecond => "/s",
            Rate::PerMinute => "/min",
            Rate::PerHour => "/hour",
            Rate::PerDay => "/day",
            Rate::PerMonth => "/month",
            Rate::PerYear => "/year",
        }
    }
}

/// Display unit requested by the caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetUnit {
    #[default]
    Auto,
    None,
    /// Forced conversion; `label` is the caller's spelling and is used verbatim
    Data { unit: DataUnit, label: String },
}

impl TargetUnit {
    pub fn parse(s: &str) -> Result<Self, EstimateError> {
        match s {
            "auto" => Ok(TargetUnit::Auto),
            "none" => Ok(TargetUnit::None),
            other => DataUnit::from_token(other)
                .map(|unit| TargetUnit::Data {
                    unit,
                    label: other.to_string(),
                })
                .ok_or_else(|| EstimateError::UnknownUnit(other.to_string())),
        }
    }
}

/// Output of the unit extractor
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpression {
    /// What is left for the arithmetic evaluator
    pub math: String,
    pub data_unit: Option<DataUnit>,
    pub time_unit: Option<TimeUnit>,
}

/// Result of evaluating one expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Expression exactly as supplied
    pub expression: String,
    pub result_display: String,
    /// Evaluated magnitude before any unit conversion
    pub raw_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unit_tokens() {
        assert_eq!(DataUnit::from_token("bytes"), Some(DataUnit::Byte));
        assert_eq!(DataUnit::from_token("MB"), Some(DataUnit::Megabyte));
        assert_eq!(DataUnit::from_token("Gigabytes"), Some(DataUnit::Gigabyte));
        assert_eq!(DataUnit::from_token("pb"), Some(DataUnit::Petabyte));
        assert_eq!(DataUnit::from_token("XB"), None);
        assert_eq!(DataUnit::from_token("bits"), None);
    }

    #[test]
    fn test_time_unit_tokens() {
        assert_eq!(TimeUnit::from_token("s"), Some(TimeUnit::Second));
        assert_eq!(TimeUnit::from_token("HR"), Some(TimeUnit::Hour));
        assert_eq!(TimeUnit::from_token("Months"), Some(TimeUnit::Month));
        assert_eq!(TimeUnit::from_token("week"), None);
        assert_eq!(TimeUnit::Month.seconds(), 2_592_000.0);
        assert_eq!(TimeUnit::Year.seconds(), 31_557_600.0);
    }

    #[test]
    fn test_rate_parse() {
        assert_eq!(Rate::parse("none").unwrap(), Rate::None);
        assert_eq!(Rate::parse("/hour").unwrap(), Rate::PerHour);
        assert_eq!(Rate::PerDay.time_unit(), Some(TimeUnit::Day));
        assert_eq!(Rate::None.label(), "");
        assert!(matches!(
            Rate::parse("/week"),
            Err(EstimateError::UnknownRate(r)) if r == "/week"
        ));
    }

    #[test]
    fn test_target_unit_parse() {
        assert_eq!(TargetUnit::parse("auto").unwrap(), TargetUnit::Auto);
        assert_eq!(TargetUnit::parse("none").unwrap(), TargetUnit::None);
        assert_eq!(
            TargetUnit::parse("GB").unwrap(),
            TargetUnit::Data {
                unit: DataUnit::Gigabyte,
                label: "GB".to_string()
            }
        );
        assert!(matches!(
            TargetUnit::parse("XB"),
            Err(EstimateError::UnknownUnit(u)) if u == "XB"
        ));
    }
}

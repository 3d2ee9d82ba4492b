// Expression pipeline: scale words -> unit tags -> arithmetic -> display string

pub mod arith;
pub mod error;
pub mod formatter;
pub mod scale;
pub mod types;
pub mod units;


pub use error::EstimateError;
pub use formatter::{format_bytes, format_magnitude, format_number};
pub use types::{DataUnit, Estimate, ParsedExpression, Rate, TargetUnit, TimeUnit};

/// Evaluate an informal expression such as "30 billion * 500 bytes".
///
/// `target_unit` is "auto", "none" or a byte unit ("bytes", "KB" .. "PB");
/// `rate` is "none" or one of "/s", "/min", "/hour", "/day", "/month", "/year".
pub fn evaluate(expression: &str, target_unit: &str, rate: &str) -> Result<Estimate, EstimateError> {
    let target = TargetUnit::parse(target_unit)?;
    let rate = Rate::parse(rate)?;

    let scaled = scale::preprocess_scale(expression);
    let parsed = units::parse_units(&scaled);
    log::debug!(
        "parsed {:?}: math={:?} data={:?} time={:?}",
        expression,
        parsed.math,
        parsed.data_unit,
        parsed.time_unit
    );

    let magnitude = arith::safe_eval(&parsed.math)?;
    if let Some(unit) = parsed.data_unit {
        if !(magnitude * unit.bytes()).is_finite() {
            return Err(EstimateError::Arithmetic(format!(
                "result is not a finite number of bytes: {}",
                expression
            )));
        }
    }
    let result_display =
        formatter::format_result(magnitude, parsed.data_unit, parsed.time_unit, &target, rate);
    log::debug!("{:?} = {} ({})", expression, result_display, magnitude);

    Ok(Estimate {
        expression: expression.to_string(),
        result_display,
        raw_value: magnitude,
    })
}

/// `evaluate` with target unit "auto" and rate "none"
pub fn evaluate_default(expression: &str) -> Result<Estimate, EstimateError> {
    evaluate(expression, "auto", "none")
}

//! Compact range expressions: `START..STOP[;STEP]`.
//!
//! The upper bound is inclusive. A `.` in any component switches the whole
//! expression to floating point; otherwise every component is an integer.

use thiserror::Error;

use crate::preference::Literal;

/// Upper bound on the number of candidates a single range may expand to.
pub const MAX_RANGE_LEN: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("range '{expr}' is missing the '..' separator")]
    MissingSeparator { expr: String },
    #[error("range component '{component}' is not a number")]
    NotNumeric { component: String },
    #[error("range '{expr}' has a zero step")]
    ZeroStep { expr: String },
    #[error("range '{expr}' has a non-finite component")]
    NonFinite { expr: String },
    #[error("range '{expr}' expands to more than {max} values", max = MAX_RANGE_LEN)]
    TooLarge { expr: String },
}

struct RangeParts<'a> {
    start: &'a str,
    stop: &'a str,
    step: &'a str,
}

fn split_parts(expr: &str) -> Result<RangeParts<'_>, RangeParseError> {
    let (start, rest) = expr
        .split_once("..")
        .ok_or_else(|| RangeParseError::MissingSeparator {
            expr: expr.to_string(),
        })?;
    let (stop, step) = rest.split_once(';').unwrap_or((rest, "1"));
    Ok(RangeParts {
        start: start.trim(),
        stop: stop.trim(),
        step: step.trim(),
    })
}

pub fn parse_range(expr: &str) -> Result<Vec<Literal>, RangeParseError> {
    let parts = split_parts(expr)?;
    let is_float = [parts.start, parts.stop, parts.step]
        .iter()
        .any(|component| component.contains('.'));

    if is_float {
        let values = float_range(expr, &parts)?;
        Ok(values.into_iter().map(Literal::Float).collect())
    } else {
        let values = integer_range(expr, &parts)?;
        Ok(values.into_iter().map(Literal::Integer).collect())
    }
}

fn parse_component<T: std::str::FromStr>(component: &str) -> Result<T, RangeParseError> {
    component
        .parse::<T>()
        .map_err(|_| RangeParseError::NotNumeric {
            component: component.to_string(),
        })
}

fn integer_range(expr: &str, parts: &RangeParts<'_>) -> Result<Vec<i64>, RangeParseError> {
    let start: i64 = parse_component(parts.start)?;
    let stop: i64 = parse_component(parts.stop)?;
    let step: i64 = parse_component(parts.step)?;
    if step == 0 {
        return Err(RangeParseError::ZeroStep {
            expr: expr.to_string(),
        });
    }

    // Widen so spans like i64::MIN..i64::MAX cannot wrap.
    let span = i128::from(stop) - i128::from(start);
    let step = i128::from(step);
    let count = if span != 0 && (span > 0) != (step > 0) {
        0
    } else {
        span / step + 1
    };
    if count > MAX_RANGE_LEN as i128 {
        return Err(RangeParseError::TooLarge {
            expr: expr.to_string(),
        });
    }

    // Every value lies between start and stop, so the narrowing is lossless.
    Ok((0..count)
        .map(|i| (i128::from(start) + i * step) as i64)
        .collect())
}

/// Slack applied to the step count so `0.0..0.3;0.1` still reaches `0.3`.
const FLOAT_STEP_EPSILON: f64 = 1e-9;

fn float_range(expr: &str, parts: &RangeParts<'_>) -> Result<Vec<f64>, RangeParseError> {
    let start: f64 = parse_component(parts.start)?;
    let stop: f64 = parse_component(parts.stop)?;
    let step: f64 = parse_component(parts.step)?;
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Err(RangeParseError::NonFinite {
            expr: expr.to_string(),
        });
    }
    if step == 0.0 {
        return Err(RangeParseError::ZeroStep {
            expr: expr.to_string(),
        });
    }

    let steps = ((stop - start) / step + FLOAT_STEP_EPSILON).floor();
    if steps.is_nan() || steps < 0.0 {
        return Ok(Vec::new());
    }
    if steps >= MAX_RANGE_LEN as f64 {
        return Err(RangeParseError::TooLarge {
            expr: expr.to_string(),
        });
    }

    let count = steps as usize + 1;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;

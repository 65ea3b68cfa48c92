//! Timed arc parsing.

use super::normalizer::NormalizerConfig;
use crate::defaults::{DECIMAL_PLACES, TIME_SCALE_FACTOR};
use crate::error::{Result, SubwordError};
use std::fmt;

/// A label-file field that is numeric when it parses, verbatim text otherwise.
///
/// Some label files carry non-numeric scores; those pass through unchanged
/// rather than failing the parse.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn coerce(raw: &str) -> Self {
        raw.parse::<f64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(raw.to_string()))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    fn into_seconds(self) -> Self {
        match self {
            Self::Number(raw) => Self::Number(to_seconds(raw)),
            text => text,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Convert a raw label-file time to seconds, rounded to 6 decimal places.
///
/// Rounding goes through the correctly rounded decimal form, so ties are
/// decided by the exact binary value rather than by a rescaled product.
pub fn to_seconds(raw: f64) -> f64 {
    let seconds = raw / TIME_SCALE_FACTOR;
    format!("{seconds:.prec$}", prec = DECIMAL_PLACES)
        .parse()
        .unwrap_or(seconds)
}

/// One timed transition from a label file.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedArc {
    pub start_time: FieldValue,
    pub end_time: FieldValue,
    /// The label as written in the file, context and position codes included.
    pub raw_label: String,
    /// The normalised corpus token.
    pub token: String,
    /// Negative log-likelihood.
    pub score: FieldValue,
}

impl TimedArc {
    /// Parse a `<start> <end> <label> <score>` line.
    pub fn parse(line: &str, config: &NormalizerConfig) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[start, end, label, score] = fields.as_slice() else {
            return Err(SubwordError::format(
                line,
                format!("expected 4 fields, found {}", fields.len()),
            ));
        };

        Ok(Self {
            start_time: FieldValue::coerce(start).into_seconds(),
            end_time: FieldValue::coerce(end).into_seconds(),
            raw_label: label.to_string(),
            token: config.normalize(label)?,
            score: FieldValue::coerce(score),
        })
    }

    pub fn starts_at_zero(&self) -> bool {
        self.start_time.as_f64() == Some(0.0)
    }
}

impl fmt::Display for TimedArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ---- {} / {} ----> {}",
            self.start_time, self.token, self.score, self.end_time
        )
    }
}

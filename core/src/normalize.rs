//! Input normalization: untrusted request fields into [`StudentFeatures`].
//!
//! One policy serves both the form and the JSON entry point:
//! - integer fields default to 0 when missing or null
//! - boolean fields are true only for the text `"yes"` (any case)
//! - ranges are checked after every field has parsed, in a fixed order

use std::collections::BTreeMap;

use crate::features::FieldRange;
use crate::features::HOURS_PER_DAY;
use crate::features::PERCENT;
use crate::features::StudentFeatures;

/// Wire names shared by the HTML form and the JSON API.
pub const STUDY_HOURS: &str = "study_hours";
pub const ATTENDANCE: &str = "attendance";
pub const ASSIGNMENTS: &str = "assignments";
pub const SOCIAL_MEDIA: &str = "social_media";
pub const SLEEP_HOURS: &str = "sleep_hours";
pub const BACKLOGS: &str = "backlogs";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a whole number, got {value:?}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}

impl ValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotAnInteger { field, .. } | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// A single untrusted field value as it arrived on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Integer(i),
                // Above i64::MAX: still a whole number, just out of every range.
                (None, Some(_)) => Self::Integer(i64::MAX),
                (None, None) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Text(s),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Text(other.to_string()),
        }
    }
}

/// Field name to raw value mapping for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput {
    fields: BTreeMap<String, RawValue>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from form pairs. A repeated key keeps its first value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        let mut input = Self::new();
        for (key, value) in pairs {
            input.fields.entry(key.into()).or_insert_with(|| value.into());
        }
        input
    }

    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: object
                .into_iter()
                .map(|(key, value)| (key, RawValue::from(value)))
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }
}

/// Parse and range-check the six student metrics.
///
/// The first unparseable field wins over any range violation; among range
/// violations the order is study hours, attendance, social media, sleep.
pub fn normalize(raw: &RawInput) -> Result<StudentFeatures, ValidationError> {
    let study_hours = parse_integer(raw, STUDY_HOURS)?;
    let attendance = parse_integer(raw, ATTENDANCE)?;
    let assignments_done = parse_yes(raw, ASSIGNMENTS);
    let social_media_hours = parse_integer(raw, SOCIAL_MEDIA)?;
    let sleep_hours = parse_integer(raw, SLEEP_HOURS)?;
    let has_backlogs = parse_yes(raw, BACKLOGS);

    Ok(StudentFeatures {
        study_hours: check_range(STUDY_HOURS, study_hours, HOURS_PER_DAY)?,
        attendance: check_range(ATTENDANCE, attendance, PERCENT)?,
        assignments_done,
        social_media_hours: check_range(SOCIAL_MEDIA, social_media_hours, HOURS_PER_DAY)?,
        sleep_hours: check_range(SLEEP_HOURS, sleep_hours, HOURS_PER_DAY)?,
        has_backlogs,
    })
}

fn parse_integer(raw: &RawInput, field: &'static str) -> Result<i64, ValidationError> {
    let not_an_integer = |value: String| ValidationError::NotAnInteger { field, value };

    match raw.get(field) {
        None | Some(RawValue::Null) => Ok(0),
        Some(RawValue::Integer(i)) => Ok(*i),
        Some(RawValue::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| not_an_integer(text.clone())),
        Some(RawValue::Float(f)) => {
            let in_range = (i64::MIN as f64..=i64::MAX as f64).contains(f);
            if f.is_finite() && f.fract() == 0.0 && in_range {
                Ok(*f as i64)
            } else {
                Err(not_an_integer(f.to_string()))
            }
        }
        Some(RawValue::Bool(b)) => Err(not_an_integer(b.to_string())),
    }
}

fn parse_yes(raw: &RawInput, field: &str) -> bool {
    matches!(raw.get(field), Some(RawValue::Text(text)) if text.eq_ignore_ascii_case("yes"))
}

fn check_range(field: &'static str, value: i64, range: FieldRange) -> Result<u8, ValidationError> {
    let out_of_range = || ValidationError::OutOfRange {
        field,
        min: range.min,
        max: range.max,
        value,
    };

    if !range.contains(value) {
        return Err(out_of_range());
    }
    u8::try_from(value).map_err(|_| out_of_range())
}

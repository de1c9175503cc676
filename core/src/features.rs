//! Validated per-request student metrics and their model encoding.

use serde::Serialize;

/// Number of columns the trained model expects.
pub const FEATURE_COUNT: usize = 6;

/// Fixed-order numeric encoding handed to the classifier.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Inclusive bounds for an integer metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub min: i64,
    pub max: i64,
}

impl FieldRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const HOURS_PER_DAY: FieldRange = FieldRange::new(0, 24);
pub const PERCENT: FieldRange = FieldRange::new(0, 100);

/// Largest value each column of [`StudentFeatures::to_vector`] can take.
/// Every column's minimum is 0.
pub const FEATURE_MAXIMA: FeatureVector = [
    HOURS_PER_DAY.max as f64,
    PERCENT.max as f64,
    1.0,
    HOURS_PER_DAY.max as f64,
    HOURS_PER_DAY.max as f64,
    1.0,
];

/// Student metrics after normalization.
///
/// Only [`crate::normalize::normalize`] builds these from untrusted input, so
/// every numeric field is inside its documented range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudentFeatures {
    /// Daily study hours, 0-24.
    pub study_hours: u8,
    /// Attendance percentage, 0-100.
    pub attendance: u8,
    pub assignments_done: bool,
    /// Daily social media hours, 0-24.
    pub social_media_hours: u8,
    /// Nightly sleep hours, 0-24.
    pub sleep_hours: u8,
    pub has_backlogs: bool,
}

impl StudentFeatures {
    /// Encode in the column order the model was trained on:
    /// `[study_hours, attendance, assignments_done, social_media_hours, sleep_hours, has_backlogs]`.
    ///
    /// Changing this order requires retraining the model.
    pub fn to_vector(&self) -> FeatureVector {
        [
            f64::from(self.study_hours),
            f64::from(self.attendance),
            flag(self.assignments_done),
            f64::from(self.social_media_hours),
            f64::from(self.sleep_hours),
            flag(self.has_backlogs),
        ]
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

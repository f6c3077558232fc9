//! Shared validation machinery for strict and tolerant parsing.
//!
//! Every entity, value object, and identifier implements [`Parse`] by writing
//! one routine, [`Parse::validate`], which records violations on a
//! [`Validator`]. The two public entry points are derived from it:
//!
//! - [`Parse::parse`] is strict and returns the first violated constraint.
//! - [`Parse::safe_parse`] is tolerant and returns every violation as a
//!   [`ValidationReport`], so one bad nested element cannot hide another.

use crate::errors::{ValidationError, ValidationReport};
use crate::types::Seconds;

/// Path reported for a value parsed on its own, outside any payload.
const ROOT_PATH: &str = "value";

/// Two-entry-point parsing from a raw payload into a validated value.
pub trait Parse: Sized {
    /// Unvalidated input shape.
    type Raw;

    /// Validates `raw`, recording every violation on `v`.
    ///
    /// Returns `None` when at least one violation was recorded for this value.
    /// Implementations keep checking remaining fields after a failure.
    fn validate(raw: Self::Raw, v: &mut Validator) -> Option<Self>;

    /// Tolerant parse: every violation is collected into the report.
    fn safe_parse(raw: Self::Raw) -> Result<Self, ValidationReport> {
        let mut v = Validator::new();
        let value = Self::validate(raw, &mut v);
        v.finish(value)
    }

    /// Strict parse: fails with the first violated constraint.
    fn parse(raw: Self::Raw) -> Result<Self, ValidationError> {
        Self::safe_parse(raw).map_err(ValidationReport::into_first)
    }
}

/// Collects violations while walking a payload.
///
/// Field and index scopes build the path reported with each violation
/// (`exerciseSets[1].restDuration`).
#[derive(Debug, Default)]
pub struct Validator {
    path: Vec<String>,
    issues: Vec<ValidationError>,
}

impl Validator {
    /// Creates a validator positioned at the payload root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` inside the named field scope.
    pub fn field<T>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.path.push(name.to_owned());
        let out = f(self);
        self.path.pop();
        out
    }

    /// Runs `f` inside the scope of element `index` of the current sequence.
    pub fn index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.path.push(format!("[{index}]"));
        let out = f(self);
        self.path.pop();
        out
    }

    /// Validates every element of `items`, keeping going after failures.
    ///
    /// Returns `None` if any element failed.
    pub fn each<R, T>(
        &mut self,
        items: Vec<R>,
        mut f: impl FnMut(R, &mut Self) -> Option<T>,
    ) -> Option<Vec<T>> {
        let mut out = Vec::with_capacity(items.len());
        let mut failed = false;
        for (i, item) in items.into_iter().enumerate() {
            match self.index(i, |v| f(item, v)) {
                Some(value) => out.push(value),
                None => failed = true,
            }
        }
        if failed {
            None
        } else {
            Some(out)
        }
    }

    /// Records a violation at the current path.
    pub fn report(&mut self, message: impl Into<String>) {
        let path = self.current_path();
        self.issues.push(ValidationError::new(path, message));
    }

    /// Rejects empty strings.
    pub fn non_empty(&mut self, value: String) -> Option<String> {
        if value.is_empty() {
            self.report("must not be empty");
            None
        } else {
            Some(value)
        }
    }

    /// Accepts integers in `min..=u32::MAX`.
    pub fn count(&mut self, value: i64, min: u32) -> Option<u32> {
        if value < i64::from(min) {
            self.report(format!("must be at least {min}"));
            return None;
        }
        match u32::try_from(value) {
            Ok(n) => Some(n),
            Err(_) => {
                self.report(format!("must be at most {}", u32::MAX));
                None
            }
        }
    }

    /// Rejects NaN and infinities.
    pub fn finite(&mut self, value: f64) -> Option<f64> {
        if value.is_finite() {
            Some(value)
        } else {
            self.report("must be a finite number");
            None
        }
    }

    /// Accepts a finite, non-negative number of seconds.
    pub fn seconds(&mut self, value: f64) -> Option<Seconds> {
        let seconds = Seconds::new(value);
        if seconds.is_none() {
            self.report("must be a non-negative number of seconds");
        }
        seconds
    }

    /// Returns `true` if no violation has been recorded yet.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Converts the walk result into the tolerant-parse outcome.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationReport> {
        match (value, ValidationReport::from_issues(self.issues)) {
            (_, Some(report)) => Err(report),
            (Some(value), None) => Ok(value),
            (None, None) => Err(ValidationReport::single(ValidationError::new(
                ROOT_PATH,
                "failed validation",
            ))),
        }
    }

    fn current_path(&self) -> String {
        if self.path.is_empty() {
            return ROOT_PATH.to_owned();
        }
        let mut out = String::new();
        for segment in &self.path {
            if !out.is_empty() && !segment.starts_with('[') {
                out.push('.');
            }
            out.push_str(segment);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_fields_and_indices() {
        let mut v = Validator::new();
        v.field("exerciseSets", |v| {
            v.index(2, |v| {
                v.field("setNumber", |v| {
                    v.report("must be at least 1");
                    None::<()>
                })
            })
        });
        let report = v.finish(None::<()>).unwrap_err();
        assert_eq!(report.first().path, "exerciseSets[2].setNumber");
    }

    #[test]
    fn root_violation_uses_value_path() {
        let mut v = Validator::new();
        assert!(v.non_empty(String::new()).is_none());
        assert_eq!(v.finish(None::<String>).unwrap_err().first().path, "value");
    }

    #[test]
    fn count_enforces_minimum_and_range() {
        let mut v = Validator::new();
        assert_eq!(v.count(1, 1), Some(1));
        assert!(v.is_clean());
        assert_eq!(v.count(0, 1), None);
        assert_eq!(v.count(i64::from(u32::MAX) + 1, 0), None);
        let report = v.finish(None::<u32>).unwrap_err();
        assert_eq!(report.len(), 2);
        assert!(report.first().message.contains("at least 1"));
    }

    #[test]
    fn each_keeps_checking_after_a_failure() {
        let mut v = Validator::new();
        let out = v.field("sets", |v| {
            v.each(vec![0_i64, 3, -1], |n, v| v.count(n, 1))
        });
        assert!(out.is_none());
        let report = v.finish(out).unwrap_err();
        assert!(report.has_path("sets[0]"));
        assert!(report.has_path("sets[2]"));
        assert!(!report.has_path("sets[1]"));
    }

    #[test]
    fn seconds_rejects_negative_and_nan() {
        let mut v = Validator::new();
        assert!(v.seconds(0.0).is_some());
        assert!(v.seconds(-1.0).is_none());
        assert!(v.seconds(f64::NAN).is_none());
        assert!(v.finite(f64::INFINITY).is_none());
        assert_eq!(v.finish(None::<()>).unwrap_err().len(), 3);
    }
}

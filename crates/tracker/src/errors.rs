//! Error types surfaced by the workout-tracker domain.
//!
//! Two domain error kinds exist:
//!
//! - [`ValidationError`]: a strict parser rejected a payload. Raised at the
//!   parse boundary, before any port call, so invalid input never reaches
//!   storage. The tolerant parsers return a [`ValidationReport`] holding every
//!   violation instead.
//! - [`NotFoundError`]: a use case required an existing entity and the
//!   repository port returned nothing.
//!
//! Adapter failures travel as [`PortError`], which wraps the adapter's own
//! error unmodified. [`DomainError`] is the union returned by use cases.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single violated constraint.
///
/// `path` locates the offending field inside the payload using the serialized
/// field names, e.g. `"name"` or `"exerciseSets[2].setNumber"`. A bare value
/// parsed on its own (an identifier, a timestamp) reports the path `"value"`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Location of the offending field.
    pub path: String,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl ValidationError {
    /// Creates a new [`ValidationError`].
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Every violation found by one tolerant parse, in discovery order.
///
/// Never empty: a successful parse produces the value, not an empty report.
/// Deserializing an empty issue list fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReportIssues", into = "ReportIssues")]
pub struct ValidationReport {
    issues: Vec<ValidationError>,
}

/// Serialized form of a [`ValidationReport`].
#[derive(Serialize, Deserialize)]
struct ReportIssues {
    issues: Vec<ValidationError>,
}

impl TryFrom<ReportIssues> for ValidationReport {
    type Error = String;

    fn try_from(raw: ReportIssues) -> Result<Self, Self::Error> {
        Self::from_issues(raw.issues)
            .ok_or_else(|| "a validation report needs at least one issue".to_string())
    }
}

impl From<ValidationReport> for ReportIssues {
    fn from(report: ValidationReport) -> Self {
        Self {
            issues: report.issues,
        }
    }
}

impl ValidationReport {
    /// Builds a report from collected issues.
    ///
    /// Returns `None` if `issues` is empty.
    pub fn from_issues(issues: Vec<ValidationError>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    /// Builds a report holding exactly one violation.
    pub fn single(issue: ValidationError) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    /// The first violated constraint, as reported by the strict parsers.
    pub fn first(&self) -> &ValidationError {
        &self.issues[0]
    }

    /// Consumes the report, keeping only the first violation.
    pub fn into_first(mut self) -> ValidationError {
        self.issues.swap_remove(0)
    }

    /// All violations in discovery order.
    pub fn issues(&self) -> &[ValidationError] {
        &self.issues
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Always `false`; a report holds at least one issue.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` if any violation is reported at exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation issue(s): ", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl From<ValidationReport> for ValidationError {
    fn from(report: ValidationReport) -> Self {
        report.into_first()
    }
}

// ---------------------------------------------------------------------------
// Not found
// ---------------------------------------------------------------------------

/// The kind of entity a [`NotFoundError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Exercise,
    Workout,
    WorkoutLog,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Exercise => write!(f, "Exercise"),
            EntityKind::Workout => write!(f, "Workout"),
            EntityKind::WorkoutLog => write!(f, "Workout log"),
        }
    }
}

/// A use case required an existing entity that the repository did not return.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// Kind of the missing entity.
    pub entity: EntityKind,
    /// Identifier that was looked up.
    pub id: String,
}

impl NotFoundError {
    /// Creates a [`NotFoundError`] for `entity` with the given identifier.
    pub fn new(entity: EntityKind, id: impl Into<String>) -> Self {
        Self {
            entity,
            id: id.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Port failures
// ---------------------------------------------------------------------------

/// An adapter-defined failure raised by a port implementation.
///
/// The domain does not interpret the cause; it is carried unmodified and can
/// be recovered with [`downcast_ref`](Self::downcast_ref).
#[derive(Debug)]
pub struct PortError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl PortError {
    /// Wraps an adapter error (or a plain message).
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(source.into())
    }

    /// Returns the wrapped adapter error if it is of type `E`.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Consumes the wrapper, returning the adapter error.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for PortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

// ---------------------------------------------------------------------------
// Use-case errors
// ---------------------------------------------------------------------------

/// Errors returned by use cases.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The input payload violated a domain constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The port implementation failed; the cause is adapter-defined.
    #[error("Port failure: {0}")]
    Port(#[from] PortError),
}

impl From<ValidationReport> for DomainError {
    fn from(report: ValidationReport) -> Self {
        DomainError::Validation(report.into_first())
    }
}

impl DomainError {
    /// Returns `true` for [`DomainError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }

    /// Returns `true` for [`DomainError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_includes_path() {
        let err = ValidationError::new("exerciseSets[0].setNumber", "must be at least 1");
        assert_eq!(err.to_string(), "exerciseSets[0].setNumber: must be at least 1");
    }

    #[test]
    fn empty_report_is_not_constructed() {
        assert!(ValidationReport::from_issues(Vec::new()).is_none());
    }

    #[test]
    fn report_keeps_order_and_first() {
        let report = ValidationReport::from_issues(vec![
            ValidationError::new("name", "must not be empty"),
            ValidationError::new("id", "must not be empty"),
        ])
        .unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.first().path, "name");
        assert!(report.has_path("id"));
        assert!(report.to_string().starts_with("2 validation issue(s)"));
        assert_eq!(report.into_first().path, "name");
    }

    #[test]
    fn empty_report_does_not_deserialize() {
        assert!(serde_json::from_str::<ValidationReport>(r#"{"issues":[]}"#).is_err());

        let report: ValidationReport =
            serde_json::from_str(r#"{"issues":[{"path":"name","message":"must not be empty"}]}"#)
                .unwrap();
        assert!(!report.is_empty());
        assert_eq!(report.first().path, "name");
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "issues": [{ "path": "name", "message": "must not be empty" }] })
        );
    }

    #[test]
    fn not_found_display_for_workout_log() {
        let err = NotFoundError::new(EntityKind::WorkoutLog, "log-1");
        assert_eq!(err.to_string(), "Workout log not found");
        assert_eq!(err.id, "log-1");
    }

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn port_error_preserves_adapter_cause() {
        let err = PortError::new(DiskError);
        assert_eq!(err.to_string(), "disk on fire");
        assert!(err.downcast_ref::<DiskError>().is_some());

        let domain: DomainError = err.into();
        assert!(matches!(domain, DomainError::Port(_)));
        assert!(domain.to_string().contains("disk on fire"));
    }

    #[test]
    fn domain_error_from_report_keeps_first_issue() {
        let report =
            ValidationReport::from_issues(vec![ValidationError::new("sets", "must be at least 1")])
                .unwrap();
        let err: DomainError = report.into();
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }
}

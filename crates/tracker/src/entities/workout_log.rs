//! The WorkoutLog entity: one performed (or in-progress) session of a workout.
//!
//! A log starts [`InProgress`](WorkoutLogStatus::InProgress) with no sets and
//! becomes [`Completed`](WorkoutLogStatus::Completed) once `completed_at` is
//! set. Every mutation builds a new raw candidate from the current value plus
//! a delta and re-runs the strict parser over the whole log.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{ValidationError, ValidationReport};
use crate::identifiers::{ExerciseId, WorkoutId, WorkoutLogId};
use crate::types::{RawTimestamp, Seconds, Timestamp};
use crate::validation::{Parse, Validator};
use crate::value_objects::{LoggedExerciseSet, RawLoggedExerciseSet};

/// Unvalidated payload for a [`WorkoutLog`] with a known identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkoutLog {
    pub id: String,
    pub workout_id: String,
    pub started_at: RawTimestamp,
    #[serde(default)]
    pub completed_at: Option<RawTimestamp>,
    #[serde(default)]
    pub exercise_sets: Vec<RawLoggedExerciseSet>,
}

/// Payload for creating a [`WorkoutLog`]; the identifier is generated when
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutLog {
    #[serde(default)]
    pub id: Option<String>,
    pub workout_id: String,
    pub started_at: RawTimestamp,
    #[serde(default)]
    pub completed_at: Option<RawTimestamp>,
    #[serde(default)]
    pub exercise_sets: Vec<RawLoggedExerciseSet>,
}

impl NewWorkoutLog {
    /// An in-progress session of `workout_id` starting at `started_at`.
    pub fn starting(workout_id: impl Into<String>, started_at: impl Into<RawTimestamp>) -> Self {
        Self {
            id: None,
            workout_id: workout_id.into(),
            started_at: started_at.into(),
            completed_at: None,
            exercise_sets: Vec::new(),
        }
    }
}

/// Lifecycle state derived from `completed_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutLogStatus {
    InProgress,
    Completed,
}

/// A session of a workout, holding the ordered history of logged sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkoutLog", into = "RawWorkoutLog")]
pub struct WorkoutLog {
    id: WorkoutLogId,
    workout_id: WorkoutId,
    started_at: Timestamp,
    completed_at: Option<Timestamp>,
    exercise_sets: Vec<LoggedExerciseSet>,
}

impl WorkoutLog {
    /// Builds a brand-new log, generating an identifier unless one is supplied.
    pub fn create(new: NewWorkoutLog) -> Result<Self, ValidationError> {
        Self::parse(RawWorkoutLog {
            id: new.id.unwrap_or_else(|| WorkoutLogId::generate().into_string()),
            workout_id: new.workout_id,
            started_at: new.started_at,
            completed_at: new.completed_at,
            exercise_sets: new.exercise_sets,
        })
    }

    /// Returns a revalidated copy with `change` applied; the identifier is kept.
    pub fn update(&self, change: impl FnOnce(&mut RawWorkoutLog)) -> Result<Self, ValidationError> {
        let mut raw = self.to_raw();
        change(&mut raw);
        raw.id = self.id.to_string();
        Self::parse(raw)
    }

    /// Appends `set` after every set logged so far.
    ///
    /// Completed logs accept new sets too; reopening is not modelled.
    pub fn add_logged_set(&self, set: LoggedExerciseSet) -> Result<Self, ValidationError> {
        self.update(|raw| raw.exercise_sets.push(set.to_raw()))
    }

    /// Marks the session completed at `at`.
    ///
    /// `at` preceding `started_at` is accepted but logged.
    pub fn complete(&self, at: Timestamp) -> Result<Self, ValidationError> {
        if at < self.started_at {
            warn!(
                workout_log_id = %self.id,
                started_at = %self.started_at,
                completed_at = %at,
                "Workout log completed before it started"
            );
        }
        self.update(|raw| raw.completed_at = Some(at.into()))
    }

    /// Rewrites the rest duration of every set numbered `set_number` for
    /// `exercise_id`.
    ///
    /// Set numbers are unique per exercise only by convention, so duplicates
    /// are all rewritten. A log with no matching set is returned unchanged.
    pub fn update_rest_duration(
        &self,
        exercise_id: &ExerciseId,
        set_number: u32,
        rest_duration: Seconds,
    ) -> Result<Self, ValidationError> {
        let matches: Vec<bool> = self
            .exercise_sets
            .iter()
            .map(|set| set.is_set(exercise_id, set_number))
            .collect();
        self.update(|raw| {
            for (set, matched) in raw.exercise_sets.iter_mut().zip(matches) {
                if matched {
                    set.rest_duration = rest_duration.as_f64();
                }
            }
        })
    }

    /// Returns the log's identifier.
    pub fn id(&self) -> &WorkoutLogId {
        &self.id
    }

    /// The workout this session performs.
    pub fn workout_id(&self) -> &WorkoutId {
        &self.workout_id
    }

    /// Returns when the session was started.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// `None` while the session is in progress.
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Logged sets in the order they were logged.
    pub fn exercise_sets(&self) -> &[LoggedExerciseSet] {
        &self.exercise_sets
    }

    /// Logged sets of one exercise, in logging order.
    pub fn sets_for<'a>(
        &'a self,
        exercise_id: &'a ExerciseId,
    ) -> impl Iterator<Item = &'a LoggedExerciseSet> + 'a {
        self.exercise_sets
            .iter()
            .filter(move |set| set.exercise_id() == exercise_id)
    }

    /// Lifecycle state derived from `completed_at`.
    pub fn status(&self) -> WorkoutLogStatus {
        match self.completed_at {
            Some(_) => WorkoutLogStatus::Completed,
            None => WorkoutLogStatus::InProgress,
        }
    }

    /// Returns `true` once the session has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Converts back to the unvalidated payload shape.
    pub fn to_raw(&self) -> RawWorkoutLog {
        RawWorkoutLog {
            id: self.id.to_string(),
            workout_id: self.workout_id.to_string(),
            started_at: self.started_at.into(),
            completed_at: self.completed_at.map(RawTimestamp::from),
            exercise_sets: self
                .exercise_sets
                .iter()
                .map(LoggedExerciseSet::to_raw)
                .collect(),
        }
    }
}

impl Parse for WorkoutLog {
    type Raw = RawWorkoutLog;

    fn validate(raw: RawWorkoutLog, v: &mut Validator) -> Option<Self> {
        let id = v.field("id", |v| WorkoutLogId::validate(raw.id, v));
        let workout_id = v.field("workoutId", |v| WorkoutId::validate(raw.workout_id, v));
        let started_at = v.field("startedAt", |v| Timestamp::validate(raw.started_at, v));
        let completed_at = v.field("completedAt", |v| match raw.completed_at {
            None => Some(None),
            Some(ts) => Timestamp::validate(ts, v).map(Some),
        });
        let exercise_sets = v.field("exerciseSets", |v| {
            v.each(raw.exercise_sets, LoggedExerciseSet::validate)
        });

        Some(Self {
            id: id?,
            workout_id: workout_id?,
            started_at: started_at?,
            completed_at: completed_at?,
            exercise_sets: exercise_sets?,
        })
    }
}

impl TryFrom<RawWorkoutLog> for WorkoutLog {
    type Error = ValidationReport;

    fn try_from(raw: RawWorkoutLog) -> Result<Self, Self::Error> {
        Self::safe_parse(raw)
    }
}

impl From<WorkoutLog> for RawWorkoutLog {
    fn from(log: WorkoutLog) -> Self {
        log.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn at(minute: u32) -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap())
    }

    fn raw_set(exercise_id: &str, set_number: i64, rest: f64) -> RawLoggedExerciseSet {
        RawLoggedExerciseSet {
            exercise_id: exercise_id.to_string(),
            set_number,
            weight: Some(50.0),
            time: None,
            reps: Some(8),
            exercise_duration: 30.0,
            rest_duration: rest,
            completed_at: at(10).into(),
        }
    }

    fn set(exercise_id: &str, set_number: i64, rest: f64) -> LoggedExerciseSet {
        LoggedExerciseSet::parse(raw_set(exercise_id, set_number, rest)).unwrap()
    }

    fn started() -> WorkoutLog {
        WorkoutLog::create(NewWorkoutLog::starting("w1", at(0))).unwrap()
    }

    fn exercise(id: &str) -> ExerciseId {
        ExerciseId::parse(id.to_string()).unwrap()
    }

    #[test]
    fn starts_in_progress_and_empty() {
        let log = started();
        assert_eq!(log.status(), WorkoutLogStatus::InProgress);
        assert!(log.completed_at().is_none());
        assert!(log.exercise_sets().is_empty());
        assert_eq!(log.workout_id().as_str(), "w1");
    }

    #[test]
    fn create_rejects_empty_workout_id() {
        let err = WorkoutLog::create(NewWorkoutLog::starting("", at(0))).unwrap_err();
        assert_eq!(err.path, "workoutId");
    }

    #[test]
    fn add_logged_set_appends_in_order() {
        let log = started()
            .add_logged_set(set("e1", 1, 60.0))
            .unwrap()
            .add_logged_set(set("e2", 1, 90.0))
            .unwrap()
            .add_logged_set(set("e1", 2, 60.0))
            .unwrap();
        let order: Vec<(&str, u32)> = log
            .exercise_sets()
            .iter()
            .map(|s| (s.exercise_id().as_str(), s.set_number()))
            .collect();
        assert_eq!(order, vec![("e1", 1), ("e2", 1), ("e1", 2)]);
        assert_eq!(log.sets_for(&exercise("e1")).count(), 2);
    }

    #[test]
    fn add_logged_set_leaves_original_untouched() {
        let log = started();
        let next = log.add_logged_set(set("e1", 1, 60.0)).unwrap();
        assert!(log.exercise_sets().is_empty());
        assert_eq!(next.exercise_sets().len(), 1);
        assert_eq!(next.id(), log.id());
    }

    #[test]
    fn complete_sets_timestamp_and_keeps_sets() {
        let log = started().add_logged_set(set("e1", 1, 60.0)).unwrap();
        let done = log.complete(at(45)).unwrap();
        assert_eq!(done.status(), WorkoutLogStatus::Completed);
        assert_eq!(done.completed_at(), Some(at(45)));
        assert_eq!(done.exercise_sets(), log.exercise_sets());
    }

    #[test]
    fn completing_before_start_is_permitted() {
        let log = started();
        let earlier = Timestamp::from_utc(log.started_at().as_datetime() - Duration::minutes(5));
        assert!(log.complete(earlier).unwrap().is_completed());
    }

    #[test]
    fn completed_logs_still_accept_sets() {
        let done = started().complete(at(30)).unwrap();
        let more = done.add_logged_set(set("e1", 1, 60.0)).unwrap();
        assert!(more.is_completed());
        assert_eq!(more.exercise_sets().len(), 1);
    }

    #[test]
    fn rest_duration_update_rewrites_every_duplicate() {
        let log = started()
            .add_logged_set(set("e1", 1, 60.0))
            .unwrap()
            .add_logged_set(set("e1", 1, 45.0))
            .unwrap()
            .add_logged_set(set("e1", 2, 60.0))
            .unwrap()
            .add_logged_set(set("e2", 1, 60.0))
            .unwrap();
        let rest = Seconds::new(120.0).unwrap();
        let updated = log.update_rest_duration(&exercise("e1"), 1, rest).unwrap();
        let rests: Vec<f64> = updated
            .exercise_sets()
            .iter()
            .map(|s| s.rest_duration().as_f64())
            .collect();
        assert_eq!(rests, vec![120.0, 120.0, 60.0, 60.0]);
    }

    #[test]
    fn rest_duration_update_without_match_is_a_no_op() {
        let log = started().add_logged_set(set("e1", 1, 60.0)).unwrap();
        let updated = log
            .update_rest_duration(&exercise("e9"), 1, Seconds::zero())
            .unwrap();
        assert_eq!(updated, log);
    }

    #[test]
    fn safe_parse_reports_every_bad_nested_set() {
        let report = WorkoutLog::safe_parse(RawWorkoutLog {
            id: "log-1".to_string(),
            workout_id: "w1".to_string(),
            started_at: "2024-05-01T09:00:00Z".into(),
            completed_at: Some("not a time".into()),
            exercise_sets: vec![
                raw_set("e1", 0, 60.0),
                raw_set("e1", 2, 60.0),
                raw_set("e1", 3, -10.0),
            ],
        })
        .unwrap_err();
        assert_eq!(report.len(), 3);
        assert!(report.has_path("completedAt"));
        assert!(report.has_path("exerciseSets[0].setNumber"));
        assert!(report.has_path("exerciseSets[2].restDuration"));
    }

    #[test]
    fn iso_strings_and_native_timestamps_parse_alike() {
        let from_iso = WorkoutLog::parse(RawWorkoutLog {
            id: "log-1".to_string(),
            workout_id: "w1".to_string(),
            started_at: "2024-05-01T09:00:00Z".into(),
            completed_at: None,
            exercise_sets: Vec::new(),
        })
        .unwrap();
        let from_native = WorkoutLog::parse(RawWorkoutLog {
            started_at: at(0).into(),
            ..from_iso.to_raw()
        })
        .unwrap();
        assert_eq!(from_iso, from_native);
    }

    #[test]
    fn serde_round_trip_is_lossless() {
        let log = started()
            .add_logged_set(set("e1", 1, 60.0))
            .unwrap()
            .complete(at(50))
            .unwrap();
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"exerciseSets\""));
        let back: WorkoutLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}

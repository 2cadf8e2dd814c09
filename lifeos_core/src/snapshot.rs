//! Snapshot of backend tables.
//!
//! The hosted backend owns all persistence. A snapshot is the set of rows a
//! client fetched, saved as one JSON object with an array per table. Loading
//! is the validation boundary: each row is parsed and checked on its own, and
//! rows that fail are logged and skipped rather than failing the whole load.

use crate::{
    Error, Habit, HabitCompletion, HabitFrequency, Result, Task, WorkoutPlan, WorkoutSession,
};
use chrono::NaiveTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use uuid::Uuid;

/// Validated records from every table
#[derive(Clone, Debug, Default, Serialize)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub habit_completions: Vec<HabitCompletion>,
    pub workout_plans: Vec<WorkoutPlan>,
    pub workout_sessions: Vec<WorkoutSession>,
    pub tasks: Vec<Task>,
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    habits: Vec<Value>,
    #[serde(default)]
    habit_completions: Vec<Value>,
    #[serde(default)]
    workout_plans: Vec<Value>,
    #[serde(default)]
    workout_sessions: Vec<Value>,
    #[serde(default)]
    tasks: Vec<Value>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Snapshot(format!("No snapshot found at {:?}", path)));
        }

        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&contents)?;
        tracing::info!(
            "Loaded snapshot from {:?}: {} habits, {} completions, {} plans, {} sessions, {} tasks",
            path,
            snapshot.habits.len(),
            snapshot.habit_completions.len(),
            snapshot.workout_plans.len(),
            snapshot.workout_sessions.len(),
            snapshot.tasks.len()
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(contents)?;

        Ok(Self {
            habits: parse_records("habits", raw.habits, validate_habit),
            habit_completions: parse_records("habit_completions", raw.habit_completions, |_| {
                Ok(())
            }),
            workout_plans: parse_records("workout_plans", raw.workout_plans, validate_plan),
            workout_sessions: parse_records(
                "workout_sessions",
                raw.workout_sessions,
                validate_session,
            ),
            tasks: parse_records("tasks", raw.tasks, |_| Ok(())),
        })
    }

    /// Rows owned by `user_id` only
    pub fn for_user(&self, user_id: Uuid) -> Self {
        Self {
            habits: owned_by(&self.habits, user_id, |h| h.user_id),
            habit_completions: owned_by(&self.habit_completions, user_id, |c| c.user_id),
            workout_plans: owned_by(&self.workout_plans, user_id, |p| p.user_id),
            workout_sessions: owned_by(&self.workout_sessions, user_id, |s| s.user_id),
            tasks: owned_by(&self.tasks, user_id, |t| t.user_id),
        }
    }
}

fn owned_by<T: Clone>(rows: &[T], user_id: Uuid, owner: impl Fn(&T) -> Uuid) -> Vec<T> {
    rows.iter().filter(|r| owner(r) == user_id).cloned().collect()
}

fn parse_records<T, F>(table: &str, rows: Vec<Value>, validate: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Result<()>,
{
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let parsed = serde_json::from_value::<T>(row)
            .map_err(Error::from)
            .and_then(|record| validate(&record).map(|_| record));

        match parsed {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Skipping {} row {}: {}", table, index, e);
            }
        }
    }

    tracing::debug!("Parsed {} rows from {}", records.len(), table);
    records
}

fn validate_habit(habit: &Habit) -> Result<()> {
    if habit.frequency == HabitFrequency::Custom {
        if let Some(n) = habit.times_per_week {
            if !(2..=7).contains(&n) {
                return Err(Error::InvalidRecord(format!(
                    "habit {} has times_per_week {} outside 2..=7",
                    habit.id, n
                )));
            }
        }
    }
    Ok(())
}

fn validate_plan(plan: &WorkoutPlan) -> Result<()> {
    if plan.day_of_week > 6 {
        return Err(Error::InvalidRecord(format!(
            "plan {} has day_of_week {} outside 0..=6",
            plan.id, plan.day_of_week
        )));
    }
    validate_time(plan.session_time.as_deref())
}

fn validate_session(session: &WorkoutSession) -> Result<()> {
    validate_time(session.session_time.as_deref())
}

/// Accepts `HH:MM` and `HH:MM:SS`; blank means untimed
fn validate_time(time: Option<&str>) -> Result<()> {
    let Some(time) = time.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(());
    };

    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map(|_| ())
        .map_err(|e| Error::InvalidRecord(format!("invalid session_time {:?}: {}", time, e)))
}

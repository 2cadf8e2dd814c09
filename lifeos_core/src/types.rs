//! Core domain types for LifeOS.
//!
//! Records mirror the rows the hosted backend returns:
//! - Habits and their dated completions
//! - Recurring workout plans and concrete workout sessions
//! - Tasks across backlog, board and archive
//!
//! Derived view types (calendar entries, enriched habits, task boards) live
//! next to the code that computes them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Habit Types
// ============================================================================

/// How often a habit is expected to be done
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HabitFrequency {
    Daily,
    Weekly,
    /// A fixed number of times per week, see `Habit::times_per_week`
    Custom,
}

/// A habit definition
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub frequency: HabitFrequency,
    /// Only meaningful for `HabitFrequency::Custom` (2..=7)
    #[serde(default)]
    pub times_per_week: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A habit marked done on a calendar date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HabitCompletion {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub completed_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Workout Types
// ============================================================================

/// Lifecycle of a concrete workout session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    #[default]
    Reserved,
    Completed,
}

impl WorkoutStatus {
    /// Next status in the reserved -> completed -> reserved cycle
    pub fn next(self) -> Self {
        match self {
            WorkoutStatus::Reserved => WorkoutStatus::Completed,
            WorkoutStatus::Completed => WorkoutStatus::Reserved,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkoutStatus::Reserved => "reserved",
            WorkoutStatus::Completed => "completed",
        }
    }
}

/// A recurring workout template bound to a weekday
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    #[serde(default)]
    pub session_time: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Free text, rendered as markdown by clients
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// A concrete workout on a specific date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Set when the session covers a recurring plan on its date
    #[serde(default)]
    pub plan_id: Option<Uuid>,
    pub session_date: NaiveDate,
    #[serde(default)]
    pub session_time: Option<String>,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: WorkoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new workout session
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewWorkoutSession {
    pub user_id: Uuid,
    pub plan_id: Option<Uuid>,
    pub session_date: NaiveDate,
    pub session_time: Option<String>,
    pub name: String,
    pub notes: Option<String>,
    pub status: WorkoutStatus,
}

// ============================================================================
// Task Types
// ============================================================================

/// Where a task sits in the backlog/board/archive flow
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Todo,
    Active,
    Completed,
    Cancelled,
}

/// A tracked task
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

// ============================================================================
// Runtime Context
// ============================================================================

/// Explicitly passed session context for view computations
///
/// Holds who is asking and what "now" is, so no computation reads the clock
/// or looks up the signed-in user on its own.
#[derive(Clone, Debug)]
pub struct UserContext {
    pub user_id: Option<Uuid>,
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
}

impl UserContext {
    pub fn new(user_id: Option<Uuid>, today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            today,
            now,
        }
    }
}

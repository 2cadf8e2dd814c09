#![forbid(unsafe_code)]

//! Core domain model and view logic for LifeOS.
//!
//! This crate provides:
//! - Domain types (habits, workouts, tasks) as stored by the backend
//! - Habit streak calculation
//! - Weekly workout calendar projection
//! - Habit and task board views
//! - Snapshot loading, configuration and logging

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod week;
pub mod streak;
pub mod projection;
pub mod habits;
pub mod tasks;
pub mod snapshot;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use streak::{compute_streak, StreakConfig};
pub use projection::{project_day, project_week, DayEntries, EntryKind, WorkoutEntry};
pub use habits::{enrich_habits, toggle_completion, HabitWithCompletions, Toggle};
pub use tasks::{board, transition, TaskBoard};
pub use snapshot::Snapshot;

//! Task board: backlog, kanban columns and archive.
//!
//! Completed tasks stay on the board for a grace period after completion
//! and then move to the archive.

use crate::{Task, TaskStatus};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Tasks split into the views the application shows
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskBoard {
    /// Newest first by creation
    pub backlog: Vec<Task>,
    /// Most recently touched first
    pub todo: Vec<Task>,
    pub active: Vec<Task>,
    /// Completed within the grace period, newest first
    pub completed: Vec<Task>,
    /// Completed before the grace period, newest first
    pub archived: Vec<Task>,
    pub cancelled: Vec<Task>,
}

impl TaskBoard {
    /// Number of tasks shown on the kanban board
    pub fn board_len(&self) -> usize {
        self.todo.len() + self.active.len() + self.completed.len()
    }
}

/// When a task counts as completed; rows missing `completed_at` fall back
/// to their last update
fn completion_time(task: &Task) -> DateTime<Utc> {
    task.completed_at.unwrap_or(task.updated_at)
}

/// Split `tasks` into board views as of `now`
///
/// A grace period reaching past the earliest representable time archives
/// nothing.
pub fn board(tasks: &[Task], now: DateTime<Utc>, archive_after_days: u32) -> TaskBoard {
    let cutoff = now
        .checked_sub_signed(Duration::days(i64::from(archive_after_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut board = TaskBoard::default();

    for task in tasks {
        let bucket = match task.status {
            TaskStatus::Backlog => &mut board.backlog,
            TaskStatus::Todo => &mut board.todo,
            TaskStatus::Active => &mut board.active,
            TaskStatus::Cancelled => &mut board.cancelled,
            TaskStatus::Completed if completion_time(task) >= cutoff => &mut board.completed,
            TaskStatus::Completed => &mut board.archived,
        };
        bucket.push(task.clone());
    }

    board.backlog.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    board.todo.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    board.active.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    board.cancelled.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    board
        .completed
        .sort_by(|a, b| completion_time(b).cmp(&completion_time(a)));
    board
        .archived
        .sort_by(|a, b| completion_time(b).cmp(&completion_time(a)));

    tracing::debug!(
        "Task board: {} on board, {} in backlog, {} archived",
        board.board_len(),
        board.backlog.len(),
        board.archived.len()
    );
    board
}

/// Move `task` to `status`, keeping `completed_at` consistent
///
/// Returns false when the task already has that status.
pub fn transition(task: &mut Task, status: TaskStatus, now: DateTime<Utc>) -> bool {
    if task.status == status {
        return false;
    }

    task.status = status;
    task.updated_at = now;
    task.completed_at = match status {
        TaskStatus::Completed => Some(now),
        _ => None,
    };
    true
}

//! Habit board: habits enriched with recent completions and streaks.

use crate::config::HabitsConfig;
use crate::streak::compute_streak;
use crate::{Habit, HabitCompletion, HabitFrequency, UserContext};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// A habit as shown on the board
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HabitWithCompletions {
    #[serde(flatten)]
    pub habit: Habit,
    /// Completions inside the window, newest first
    pub completions: Vec<HabitCompletion>,
    pub streak: u32,
    pub done_today: bool,
}

/// Completions dated within `window_days` of `today` (inclusive)
///
/// A window reaching past the earliest representable date keeps everything.
pub fn recent_completions(
    completions: &[HabitCompletion],
    today: NaiveDate,
    window_days: u32,
) -> impl Iterator<Item = &HabitCompletion> {
    let cutoff = today
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);
    completions.iter().filter(move |c| c.completed_date >= cutoff)
}

/// Attach completions, streak and today's state to each habit
///
/// Habits keep their input order.
pub fn enrich_habits(
    habits: &[Habit],
    completions: &[HabitCompletion],
    ctx: &UserContext,
    cfg: &HabitsConfig,
) -> Vec<HabitWithCompletions> {
    let mut by_habit: HashMap<Uuid, Vec<HabitCompletion>> = HashMap::new();
    for completion in recent_completions(completions, ctx.today, cfg.completion_window_days) {
        by_habit
            .entry(completion.habit_id)
            .or_default()
            .push(completion.clone());
    }

    let streak_cfg = cfg.streak_config();
    let enriched: Vec<HabitWithCompletions> = habits
        .iter()
        .map(|habit| {
            let mut completions = by_habit.remove(&habit.id).unwrap_or_default();
            completions.sort_by(|a, b| b.completed_date.cmp(&a.completed_date));

            let streak = compute_streak(
                habit,
                completions.iter().map(|c| c.completed_date),
                ctx.today,
                &streak_cfg,
            );
            let done_today = completions.iter().any(|c| c.completed_date == ctx.today);

            HabitWithCompletions {
                habit: habit.clone(),
                completions,
                streak,
                done_today,
            }
        })
        .collect();

    tracing::debug!("Enriched {} habits", enriched.len());
    enriched
}

/// Outcome of toggling a habit on a date
#[derive(Clone, Debug, PartialEq)]
pub enum Toggle {
    Inserted(HabitCompletion),
    Removed(HabitCompletion),
}

/// Mark `habit` done on `date`, or undo it if it already is
///
/// Keeps at most one completion per (habit, date), the same as an upsert on
/// that pair.
pub fn toggle_completion(
    completions: &mut Vec<HabitCompletion>,
    habit: &Habit,
    date: NaiveDate,
    ctx: &UserContext,
) -> Toggle {
    let matches = |c: &HabitCompletion| c.habit_id == habit.id && c.completed_date == date;

    if let Some(pos) = completions.iter().position(matches) {
        let removed = completions.remove(pos);
        completions.retain(|c| !matches(c));
        tracing::debug!("Removed completion of habit {} on {}", habit.id, date);
        return Toggle::Removed(removed);
    }

    let completion = HabitCompletion {
        id: Uuid::new_v4(),
        habit_id: habit.id,
        user_id: ctx.user_id.unwrap_or(habit.user_id),
        completed_date: date,
        created_at: ctx.now,
    };
    completions.push(completion.clone());
    tracing::debug!("Recorded completion of habit {} on {}", habit.id, date);
    Toggle::Inserted(completion)
}

/// Unit the streak of `habit` is counted in
pub fn streak_unit(habit: &Habit) -> &'static str {
    match habit.frequency {
        HabitFrequency::Daily => "days",
        HabitFrequency::Weekly | HabitFrequency::Custom => "weeks",
    }
}

pub fn frequency_label(habit: &Habit) -> String {
    match (habit.frequency, habit.times_per_week) {
        (HabitFrequency::Custom, Some(n)) => format!("{}x/week", n),
        (HabitFrequency::Custom, None) => "Custom".into(),
        (HabitFrequency::Daily, _) => "Daily".into(),
        (HabitFrequency::Weekly, _) => "Weekly".into(),
    }
}

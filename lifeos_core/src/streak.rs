//! Habit streak calculation.
//!
//! A streak counts consecutive qualifying periods ending at, or just before,
//! the present:
//! - Daily habits count days. A not-yet-done today does not break the streak.
//! - Weekly and custom habits count weeks meeting the weekly target. The
//!   current week only counts once its target is met.

use crate::week::week_start_of;
use crate::{Habit, HabitFrequency};
use chrono::{Duration, NaiveDate, Weekday};
use std::collections::{BTreeSet, HashMap};

/// Parameters that are conventions rather than habit data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreakConfig {
    /// First day of a streak week
    pub week_start: Weekday,
    /// Weekly target for a custom habit without `times_per_week`
    pub custom_default_required: u32,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            custom_default_required: 1,
        }
    }
}

/// Completions per week a habit needs for that week to count
pub fn required_per_week(habit: &Habit, cfg: &StreakConfig) -> u32 {
    match habit.frequency {
        HabitFrequency::Daily | HabitFrequency::Weekly => 1,
        HabitFrequency::Custom => habit
            .times_per_week
            .map(u32::from)
            .unwrap_or(cfg.custom_default_required),
    }
}

/// Compute the current streak of `habit` as of `today`
///
/// `completions` may contain duplicates; each date counts once. Dates after
/// `today` are ignored.
pub fn compute_streak<I>(habit: &Habit, completions: I, today: NaiveDate, cfg: &StreakConfig) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let done: BTreeSet<NaiveDate> = completions.into_iter().filter(|d| *d <= today).collect();

    if done.is_empty() {
        return 0;
    }

    let streak = match habit.frequency {
        HabitFrequency::Daily => daily_streak(&done, today),
        HabitFrequency::Weekly | HabitFrequency::Custom => {
            weekly_streak(&done, today, required_per_week(habit, cfg), cfg.week_start)
        }
    };

    tracing::debug!(
        "Streak for habit {} ({:?}): {}",
        habit.id,
        habit.frequency,
        streak
    );
    streak
}

fn daily_streak(done: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if done.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while done.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

fn weekly_streak(
    done: &BTreeSet<NaiveDate>,
    today: NaiveDate,
    required: u32,
    week_start: Weekday,
) -> u32 {
    // A zero target would never stop the walk
    let required = required.max(1);

    let mut per_week: HashMap<NaiveDate, u32> = HashMap::new();
    for date in done {
        *per_week.entry(week_start_of(*date, week_start)).or_default() += 1;
    }
    let count = |week: &NaiveDate| per_week.get(week).copied().unwrap_or(0);

    let mut cursor = week_start_of(today, week_start);
    if count(&cursor) < required {
        cursor -= Duration::days(7);
    }

    let mut streak = 0;
    while count(&cursor) >= required {
        streak += 1;
        cursor -= Duration::days(7);
    }
    streak
}

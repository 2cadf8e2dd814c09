//! Weekly workout calendar projection.
//!
//! Recurring plans are templates: on every date whose weekday matches, a
//! plan shows up as a projected entry unless a concrete session on that date
//! already covers it (links to it by `plan_id`). Sessions are always shown.

use crate::week::{day_of_week_index, week_dates};
use crate::{NewWorkoutSession, WorkoutPlan, WorkoutSession, WorkoutStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use uuid::Uuid;

/// What a calendar entry stands for
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryKind {
    /// A concrete session, with the plan it covers if any
    Session {
        session: WorkoutSession,
        plan: Option<WorkoutPlan>,
    },
    /// A plan occurrence nobody has booked yet
    PlanProjection { plan: WorkoutPlan },
}

/// One item in a calendar day
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkoutEntry {
    /// Stable identity for the (source, date) pair
    pub key: String,
    pub date: NaiveDate,
    pub session_time: Option<String>,
    pub name: String,
    pub notes: Option<String>,
    /// `None` for projections
    pub status: Option<WorkoutStatus>,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl WorkoutEntry {
    pub fn from_session(session: &WorkoutSession, plan: Option<&WorkoutPlan>) -> Self {
        Self {
            key: format!("session-{}", session.id),
            date: session.session_date,
            session_time: normalize_time(session.session_time.as_deref()),
            name: session.name.clone(),
            notes: session.notes.clone(),
            status: Some(session.status),
            kind: EntryKind::Session {
                session: session.clone(),
                plan: plan.cloned(),
            },
        }
    }

    pub fn from_plan(plan: &WorkoutPlan, date: NaiveDate) -> Self {
        Self {
            key: format!("plan-{}-{}", plan.id, date),
            date,
            session_time: normalize_time(plan.session_time.as_deref()),
            name: plan.name.clone(),
            notes: plan.notes.clone(),
            status: None,
            kind: EntryKind::PlanProjection { plan: plan.clone() },
        }
    }

    pub fn plan(&self) -> Option<&WorkoutPlan> {
        match &self.kind {
            EntryKind::Session { plan, .. } => plan.as_ref(),
            EntryKind::PlanProjection { plan } => Some(plan),
        }
    }

    pub fn session(&self) -> Option<&WorkoutSession> {
        match &self.kind {
            EntryKind::Session { session, .. } => Some(session),
            EntryKind::PlanProjection { .. } => None,
        }
    }

    pub fn is_projection(&self) -> bool {
        matches!(self.kind, EntryKind::PlanProjection { .. })
    }

    /// Projections of deactivated plans still render, but disabled
    pub fn is_active(&self) -> bool {
        match &self.kind {
            EntryKind::Session { .. } => true,
            EntryKind::PlanProjection { plan } => plan.active,
        }
    }

    /// Build the insert payload that books this entry as a reserved session
    pub fn register_session(&self, user_id: Uuid) -> NewWorkoutSession {
        NewWorkoutSession {
            user_id,
            plan_id: self.plan().map(|p| p.id),
            session_date: self.date,
            session_time: self.session_time.clone(),
            name: self.name.clone(),
            notes: self.notes.clone(),
            status: WorkoutStatus::Reserved,
        }
    }
}

/// All entries for one calendar day
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayEntries {
    pub date: NaiveDate,
    pub day_of_week: u8,
    pub entries: Vec<WorkoutEntry>,
}

fn normalize_time(time: Option<&str>) -> Option<String> {
    time.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

/// Timed entries first, ascending; untimed keep their relative order
fn by_session_time(a: &WorkoutEntry, b: &WorkoutEntry) -> Ordering {
    match (&a.session_time, &b.session_time) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Merge concrete sessions and recurring plans into the entries for `date`
///
/// `sessions` may span several dates; only those on `date` are used.
/// `day_of_week` is the plan weekday index of `date` (Monday = 0).
pub fn project_day(
    date: NaiveDate,
    day_of_week: u8,
    sessions: &[WorkoutSession],
    plans: &[WorkoutPlan],
) -> Vec<WorkoutEntry> {
    let day_sessions: Vec<&WorkoutSession> =
        sessions.iter().filter(|s| s.session_date == date).collect();

    let mut entries: Vec<WorkoutEntry> = day_sessions
        .iter()
        .map(|session| {
            let plan = session
                .plan_id
                .and_then(|id| plans.iter().find(|p| p.id == id));
            WorkoutEntry::from_session(session, plan)
        })
        .collect();

    let covered: HashSet<Uuid> = day_sessions.iter().filter_map(|s| s.plan_id).collect();

    entries.extend(
        plans
            .iter()
            .filter(|p| p.day_of_week == day_of_week && !covered.contains(&p.id))
            .map(|p| WorkoutEntry::from_plan(p, date)),
    );

    // Stable sort keeps sessions ahead of projections among untimed entries
    entries.sort_by(by_session_time);
    entries
}

/// Project the seven days starting at `week_start`
pub fn project_week(
    week_start: NaiveDate,
    sessions: &[WorkoutSession],
    plans: &[WorkoutPlan],
) -> Vec<DayEntries> {
    let days: Vec<DayEntries> = week_dates(week_start)
        .into_iter()
        .map(|date| {
            let day_of_week = day_of_week_index(date);
            DayEntries {
                date,
                day_of_week,
                entries: project_day(date, day_of_week, sessions, plans),
            }
        })
        .collect();

    tracing::debug!(
        "Projected week of {}: {} entries",
        week_start,
        days.iter().map(|d| d.entries.len()).sum::<usize>()
    );
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2026-03-04 is a Wednesday
    fn wednesday() -> NaiveDate {
        date(2026, 3, 4)
    }

    fn plan(name: &str, day_of_week: u8, time: Option<&str>) -> WorkoutPlan {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        WorkoutPlan {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.into(),
            day_of_week,
            session_time: time.map(String::from),
            active: true,
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn session(name: &str, on: NaiveDate, time: Option<&str>, plan_id: Option<Uuid>) -> WorkoutSession {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        WorkoutSession {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            plan_id,
            session_date: on,
            session_time: time.map(String::from),
            name: name.into(),
            notes: None,
            status: WorkoutStatus::Reserved,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn names(entries: &[WorkoutEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_matching_plan_projects_once() {
        let plans = vec![plan("Legs", 2, Some("18:00")), plan("Swim", 4, None)];
        let entries = project_day(wednesday(), 2, &[], &plans);

        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_projection());
        assert_eq!(entries[0].name, "Legs");
        assert_eq!(entries[0].status, None);
        assert_eq!(entries[0].key, format!("plan-{}-2026-03-04", plans[0].id));
    }

    #[test]
    fn test_covering_session_replaces_projection() {
        let plans = vec![plan("Legs", 2, Some("18:00"))];
        let sessions = vec![session("Legs", wednesday(), Some("18:30"), Some(plans[0].id))];

        let entries = project_day(wednesday(), 2, &sessions, &plans);

        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_projection());
        assert_eq!(entries[0].session_time.as_deref(), Some("18:30"));
        assert_eq!(entries[0].plan().map(|p| p.id), Some(plans[0].id));
        assert_eq!(entries[0].status, Some(WorkoutStatus::Reserved));
    }

    #[test]
    fn test_session_on_other_date_does_not_cover() {
        let plans = vec![plan("Legs", 2, None)];
        let sessions = vec![session("Legs", date(2026, 2, 25), None, Some(plans[0].id))];

        let entries = project_day(wednesday(), 2, &sessions, &plans);

        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_projection());
    }

    #[test]
    fn test_inactive_plan_still_projects() {
        let mut paused = plan("Yoga", 2, None);
        paused.active = false;

        let entries = project_day(wednesday(), 2, &[], &[paused]);

        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_active());
    }

    #[test]
    fn test_timed_entries_sort_before_untimed() {
        let plans = vec![plan("Morning", 2, Some("09:00")), plan("Whenever", 2, None)];
        let sessions = vec![session("Early", wednesday(), Some("07:30"), None)];

        let entries = project_day(wednesday(), 2, &sessions, &plans);

        assert_eq!(names(&entries), vec!["Early", "Morning", "Whenever"]);
    }

    #[test]
    fn test_unsorted_insertion_order_is_sorted_by_time() {
        let plans = vec![plan("Dawn yoga", 2, Some("07:30"))];
        let sessions = vec![
            session("Swim", wednesday(), Some("09:00"), None),
            session("Walk", wednesday(), None, None),
        ];

        let entries = project_day(wednesday(), 2, &sessions, &plans);

        assert_eq!(names(&entries), vec!["Dawn yoga", "Swim", "Walk"]);
        let times: Vec<Option<&str>> = entries.iter().map(|e| e.session_time.as_deref()).collect();
        assert_eq!(times, vec![Some("07:30"), Some("09:00"), None]);
    }

    #[test]
    fn test_untimed_sessions_precede_untimed_projections() {
        let plans = vec![plan("Plan A", 2, None), plan("Plan B", 2, None)];
        let sessions = vec![
            session("Walk", wednesday(), None, None),
            session("Stretch", wednesday(), Some("  "), None),
        ];

        let entries = project_day(wednesday(), 2, &sessions, &plans);

        assert_eq!(names(&entries), vec!["Walk", "Stretch", "Plan A", "Plan B"]);
        assert_eq!(entries[1].session_time, None);
    }

    #[test]
    fn test_ad_hoc_session_keeps_plan_projection() {
        let plans = vec![plan("Legs", 2, Some("18:00"))];
        let sessions = vec![session("Run", wednesday(), Some("07:00"), None)];

        let entries = project_day(wednesday(), 2, &sessions, &plans);

        assert_eq!(names(&entries), vec!["Run", "Legs"]);
        assert!(entries[0].plan().is_none());
    }

    #[test]
    fn test_project_day_is_idempotent() {
        let plans = vec![plan("Legs", 2, Some("18:00")), plan("Core", 2, Some("18:00"))];
        let sessions = vec![
            session("Legs", wednesday(), None, Some(plans[0].id)),
            session("Run", wednesday(), Some("06:45"), None),
        ];

        let first = project_day(wednesday(), 2, &sessions, &plans);
        let second = project_day(wednesday(), 2, &sessions, &plans);
        assert_eq!(first, second);
        // Run 06:45, Core 18:00, then the untimed covering session
        assert_eq!(names(&first), vec!["Run", "Core", "Legs"]);
    }

    #[test]
    fn test_project_week_places_plans_by_weekday() {
        let plans = vec![plan("Monday lift", 0, None), plan("Sunday ride", 6, None)];
        let week = project_week(date(2026, 3, 2), &[], &plans);

        assert_eq!(week.len(), 7);
        assert_eq!(names(&week[0].entries), vec!["Monday lift"]);
        assert_eq!(names(&week[6].entries), vec!["Sunday ride"]);
        assert!(week[1..6].iter().all(|d| d.entries.is_empty()));
        assert_eq!(week[6].day_of_week, 6);
    }

    #[test]
    fn test_register_session_from_projection() {
        let p = plan("Legs", 2, Some("18:00"));
        let entry = WorkoutEntry::from_plan(&p, wednesday());
        let user = Uuid::new_v4();

        let draft = entry.register_session(user);

        assert_eq!(draft.user_id, user);
        assert_eq!(draft.plan_id, Some(p.id));
        assert_eq!(draft.session_date, wednesday());
        assert_eq!(draft.session_time.as_deref(), Some("18:00"));
        assert_eq!(draft.status, WorkoutStatus::Reserved);
    }

    #[test]
    fn test_entry_serializes_kind_tag() {
        let p = plan("Legs", 2, None);
        let entry = WorkoutEntry::from_plan(&p, wednesday());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "plan_projection");
        assert_eq!(json["date"], "2026-03-04");
    }
}

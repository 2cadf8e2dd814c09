use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use lifeos_core::habits::{frequency_label, streak_unit};
use lifeos_core::week::{format_week_range, week_start_of};
use lifeos_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "lifeos")]
#[command(about = "Habits, workouts and tasks from a LifeOS snapshot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Snapshot file (JSON export of the backend tables)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compute views as of this date (YYYY-MM-DD) instead of the local date
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Only show rows owned by this user
    #[arg(long, global = true)]
    user: Option<Uuid>,
}

#[derive(Subcommand)]
enum Commands {
    /// List habits with their current streaks (default)
    Habits,

    /// Show the workout calendar for a week
    Week {
        /// Any date inside the week to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show tasks
    Tasks {
        #[arg(long, value_enum, default_value_t = TaskView::Board)]
        view: TaskView,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum TaskView {
    Board,
    Backlog,
    Archive,
}

fn main() -> Result<()> {
    // Initialize logging
    lifeos_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(Commands::Config) = cli.command {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let ctx = build_context(cli.user, cli.today);
    let snapshot_path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| config.data.snapshot_path.clone());
    tracing::debug!("Using snapshot {:?} as of {}", snapshot_path, ctx.today);
    let mut snapshot = Snapshot::load(&snapshot_path)?;
    if let Some(user_id) = ctx.user_id {
        snapshot = snapshot.for_user(user_id);
    }

    match cli.command {
        Some(Commands::Week { date }) => cmd_week(&snapshot, &ctx, date, &config),
        Some(Commands::Tasks { view }) => cmd_tasks(&snapshot, &ctx, view, &config),
        Some(Commands::Habits) | Some(Commands::Config) | None => {
            cmd_habits(&snapshot, &ctx, &config)
        }
    }

    Ok(())
}

/// Pin "now" to the end of the requested day so views are reproducible
fn build_context(user_id: Option<Uuid>, today: Option<NaiveDate>) -> UserContext {
    match today {
        Some(today) => {
            let now: DateTime<Utc> =
                today.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::seconds(1);
            UserContext::new(user_id, today, now)
        }
        None => UserContext::new(user_id, Local::now().date_naive(), Utc::now()),
    }
}

fn cmd_habits(snapshot: &Snapshot, ctx: &UserContext, config: &Config) {
    let habits = enrich_habits(
        &snapshot.habits,
        &snapshot.habit_completions,
        ctx,
        &config.habits,
    );

    if habits.is_empty() {
        println!("No habits yet.");
        return;
    }

    println!("Habits ({})", habits.len());
    for h in &habits {
        println!(
            "  [{}] {:<24} {:<9} streak {} {}",
            if h.done_today { "✓" } else { " " },
            h.habit.name,
            frequency_label(&h.habit),
            h.streak,
            streak_unit(&h.habit)
        );
    }
}

fn cmd_week(snapshot: &Snapshot, ctx: &UserContext, date: Option<NaiveDate>, config: &Config) {
    let start = week_start_of(date.unwrap_or(ctx.today), config.habits.week_start);
    let days = project_week(start, &snapshot.workout_sessions, &snapshot.workout_plans);

    println!("Week of {}", format_week_range(start));
    for day in &days {
        let marker = if day.date == ctx.today { " (today)" } else { "" };
        println!();
        println!("{}{}", day.date.format("%a %Y-%m-%d"), marker);

        if day.entries.is_empty() {
            println!("  -");
            continue;
        }
        for entry in &day.entries {
            println!(
                "  {:<5}  {}  [{}]",
                display_time(entry.session_time.as_deref()),
                entry.name,
                entry_tag(entry)
            );
        }
    }
}

fn display_time(time: Option<&str>) -> &str {
    match time {
        Some(t) => t.get(..5).unwrap_or(t),
        None => "--:--",
    }
}

fn entry_tag(entry: &WorkoutEntry) -> String {
    match (&entry.kind, entry.status) {
        (EntryKind::PlanProjection { .. }, _) if !entry.is_active() => "plan, inactive".into(),
        (EntryKind::PlanProjection { .. }, _) => "plan".into(),
        (EntryKind::Session { .. }, Some(status)) => status.label().into(),
        (EntryKind::Session { .. }, None) => "session".into(),
    }
}

fn cmd_tasks(snapshot: &Snapshot, ctx: &UserContext, view: TaskView, config: &Config) {
    let tasks = board(&snapshot.tasks, ctx.now, config.tasks.archive_after_days);

    match view {
        TaskView::Board => {
            print_section("To do", &tasks.todo);
            print_section("Active", &tasks.active);
            print_section("Completed", &tasks.completed);
        }
        TaskView::Backlog => print_section("Backlog", &tasks.backlog),
        TaskView::Archive => print_section("Archived", &tasks.archived),
    }
}

fn print_section(title: &str, tasks: &[Task]) {
    println!("{} ({})", title, tasks.len());
    for task in tasks {
        match task.due_date {
            Some(due) => println!("  - {} (due {})", task.title, due),
            None => println!("  - {}", task.title),
        }
    }
}

use clap::{Args, Parser, Subcommand, ValueEnum};
use dayboard_core::rule::RuleUnit;

/// A calendar-day task planner with recurring tasks, per-date skips, and amendments
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// Show the agenda for a day (or a span of days)
    Agenda(AgendaCommand),
    /// List all master task rows
    List,
    /// Preview upcoming occurrences of a task
    Preview(PreviewCommand),
    /// Edit a task's fields or schedule
    Edit(EditCommand),
    /// Skip a single occurrence of a task
    Skip(SkipCommand),
    /// Restore a previously skipped occurrence
    Unskip(UnskipCommand),
    /// Change a single occurrence without touching the master
    Amend(AmendCommand),
    /// Toggle a task's done state for a date
    Done(DoneCommand),
    /// Delete a task and all its occurrences
    Delete(DeleteCommand),
}

/// Recurrence flags shared by `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct RuleFlags {
    /// How the task repeats
    #[clap(long, value_enum, help = "Human-friendly frequency (daily, weekly, weekdays, etc.)")]
    pub every: Option<RecurrencePreset>,
    /// Days of week for weekly schedules
    #[clap(long, help = "Days of week (mon,tue,wed,thu,fri,sat,sun)")]
    pub on: Option<String>,
    /// Repeat every N units
    #[clap(long, help = "Repeat every N units (e.g., --interval 3 --unit day)")]
    pub interval: Option<u32>,
    /// Stepping unit for custom schedules
    #[clap(long, value_enum, help = "Unit for custom schedules (day, week, month, year)")]
    pub unit: Option<UnitArg>,
    /// End date for recurrence
    #[clap(long, help = "Last date the task repeats (e.g., '2025-12-31')")]
    pub until: Option<String>,
    /// Maximum number of occurrences
    #[clap(long, help = "Maximum number of occurrences")]
    pub count: Option<u32>,
    /// Day of month for monthly schedules
    #[clap(long, help = "Day of month (1-31) for monthly schedules")]
    pub by_month_day: Option<u32>,
}

impl RuleFlags {
    /// True when no recurrence flag was given at all.
    pub fn is_empty(&self) -> bool {
        self.every.is_none()
            && self.on.is_none()
            && self.interval.is_none()
            && self.unit.is_none()
            && self.until.is_none()
            && self.count.is_none()
            && self.by_month_day.is_none()
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The text of the task
    pub text: String,
    /// The date the task lives on
    #[clap(short, long, help = "Anchor date (e.g., '2025-09-01', 'tomorrow')")]
    pub date: Option<String>,
    /// Card color shown in day views
    #[clap(long)]
    pub color: Option<String>,
    /// Free-form notes
    #[clap(long)]
    pub notes: Option<String>,
    /// Position within the day's list
    #[clap(long)]
    pub order: Option<i64>,
    #[clap(flatten)]
    pub rule: RuleFlags,
}

#[derive(Parser, Debug, Clone)]
pub struct AgendaCommand {
    /// The day to show (defaults to today)
    pub date: Option<String>,
    /// Number of days to show
    #[clap(short = 'n', long, default_value = "1")]
    pub days: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// The ID of the task to preview
    pub id: String,
    /// Number of weeks to look ahead
    #[clap(long, short, default_value = "4")]
    pub weeks: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub text: Option<String>,

    /// Move the task's anchor date
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub color: Option<String>,
    #[arg(long, conflicts_with = "color")]
    pub color_clear: bool,

    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, conflicts_with = "notes")]
    pub notes_clear: bool,

    #[arg(long)]
    pub order: Option<i64>,
    #[arg(long, conflicts_with = "order")]
    pub order_clear: bool,

    #[command(flatten)]
    pub rule: RuleFlags,
    #[arg(long, conflicts_with = "every", help = "Remove recurrence (convert to one-time task)")]
    pub never: bool,

    /// Apply schedule changes without prompting
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SkipCommand {
    /// The ID of the task
    pub id: String,
    /// The date of the occurrence to skip
    pub date: String,
}

#[derive(Parser, Debug, Clone)]
pub struct UnskipCommand {
    /// The ID of the task
    pub id: String,
    /// The date of the occurrence to restore
    pub date: String,
}

#[derive(Parser, Debug, Clone)]
pub struct AmendCommand {
    /// The ID of the task
    pub id: String,
    /// The date of the occurrence to change
    pub date: String,

    #[arg(long)]
    pub text: Option<String>,
    /// Mark this occurrence done
    #[arg(long)]
    pub done: bool,
    /// Mark this occurrence not done
    #[arg(long, conflicts_with = "done")]
    pub not_done: bool,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub order: Option<i64>,

    /// Drop the stored override for this date
    #[arg(long, conflicts_with_all = ["text", "done", "not_done", "color", "notes", "order"])]
    pub clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task
    pub id: String,
    /// The date of the occurrence (defaults to today)
    #[clap(long)]
    pub date: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

/// Human-friendly recurrence patterns
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencePreset {
    /// Every day
    Daily,
    /// Every week (same weekday)
    Weekly,
    /// Monday to Friday
    Weekdays,
    /// Every two weeks
    Biweekly,
    /// Every month (same date)
    Monthly,
    /// Every year (same date)
    Yearly,
    /// Free-form interval and unit
    Custom,
}

impl std::fmt::Display for RecurrencePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecurrencePreset::Daily => write!(f, "daily"),
            RecurrencePreset::Weekly => write!(f, "weekly"),
            RecurrencePreset::Weekdays => write!(f, "weekdays"),
            RecurrencePreset::Biweekly => write!(f, "biweekly"),
            RecurrencePreset::Monthly => write!(f, "monthly"),
            RecurrencePreset::Yearly => write!(f, "yearly"),
            RecurrencePreset::Custom => write!(f, "custom"),
        }
    }
}

/// CLI-facing mirror of the core rule unit
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitArg {
    Day,
    Week,
    Month,
    Year,
}

impl UnitArg {
    pub fn to_rule_unit(self) -> RuleUnit {
        match self {
            UnitArg::Day => RuleUnit::Day,
            UnitArg::Week => RuleUnit::Week,
            UnitArg::Month => RuleUnit::Month,
            UnitArg::Year => RuleUnit::Year,
        }
    }
}

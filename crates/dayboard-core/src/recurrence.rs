use chrono::{Datelike, NaiveDate};

use crate::models::{Occurrence, Task};
use crate::rule::{CustomRule, RecurrenceRule, RuleUnit, WeekdayCode};

/// Determines whether a recurrence rule fires on a target date.
///
/// # Arguments
///
/// * `base` - The anchor date the rule is evaluated against
/// * `target` - The date being tested
/// * `rule` - The recurrence rule, in normalized form
///
/// # Behavior
///
/// A target before the base never matches, and a target past the rule's
/// `until` bound never matches (the bound itself is inclusive). Within those
/// limits each rule matches by pattern alone:
///
/// - `daily` matches every day; its stored interval is not consulted
/// - `weekly` matches the base's weekday, or membership in `byDay` when that
///   set is non-empty; its stored interval is not consulted either
/// - `monthly` matches the base's day-of-month, so a base on the 31st skips
///   shorter months entirely
/// - `yearly` matches the base's month and day
/// - `custom` filters by `byDay` first, then steps from the base in whole
///   intervals of its unit; a custom rule without a unit matches nothing
pub fn occurs_on(base: NaiveDate, target: NaiveDate, rule: &RecurrenceRule) -> bool {
    if target < base {
        return false;
    }
    if let Some(until) = rule.until() {
        if target > until {
            return false;
        }
    }
    match rule {
        RecurrenceRule::Never => false,
        RecurrenceRule::Daily { .. } => true,
        RecurrenceRule::Weekly { by_day, .. } => {
            if by_day.is_empty() {
                target.weekday() == base.weekday()
            } else {
                by_day.contains(&WeekdayCode::from_weekday(target.weekday()))
            }
        }
        RecurrenceRule::Monthly { .. } => target.day() == base.day(),
        RecurrenceRule::Yearly { .. } => {
            target.month() == base.month() && target.day() == base.day()
        }
        RecurrenceRule::Custom(custom) => occurs_on_custom(base, target, custom),
    }
}

fn occurs_on_custom(base: NaiveDate, target: NaiveDate, rule: &CustomRule) -> bool {
    if !rule.by_day.is_empty()
        && !rule
            .by_day
            .contains(&WeekdayCode::from_weekday(target.weekday()))
    {
        return false;
    }
    let unit = match rule.unit {
        Some(unit) => unit,
        None => return false,
    };
    let every = i64::from(rule.interval.max(1));
    let day_diff = target.signed_duration_since(base).num_days();
    match unit {
        RuleUnit::Day => day_diff % every == 0,
        RuleUnit::Week => day_diff % (7 * every) == 0,
        RuleUnit::Month => target.day() == base.day() && months_between(base, target) % every == 0,
        RuleUnit::Year => {
            target.month() == base.month()
                && target.day() == base.day()
                && i64::from(target.year() - base.year()) % every == 0
        }
    }
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let from_total = i64::from(from.year()) * 12 + i64::from(from.month0());
    let to_total = i64::from(to.year()) * 12 + i64::from(to.month0());
    to_total - from_total
}

/// Materializes a task's occurrences over an inclusive date window.
///
/// # Arguments
///
/// * `task` - The master task row
/// * `window_start` - First date to consider
/// * `window_end` - Last date to consider
///
/// # Returns
///
/// One [`Occurrence`] per date the task shows up on, in ascending date order.
/// A window that ends before the task's anchor date yields nothing. The
/// anchor date itself is emitted whenever it falls inside the window, even
/// when the rule's pattern would not select it, but exceptions and the
/// rule's `until` bound mask the anchor like any other date.
pub fn expand_occurrences(
    task: &Task,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();
    if window_end < task.date_key {
        return occurrences;
    }
    let mut date = window_start;
    while date <= window_end {
        if let Some(occurrence) = occurrence_for(task, date) {
            occurrences.push(occurrence);
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    occurrences
}

/// Materializes a task's occurrence on a single date, if it has one.
pub fn occurrence_for(task: &Task, date: NaiveDate) -> Option<Occurrence> {
    let is_base = date == task.date_key;
    let repeats = task.rule.is_recurring() && occurs_on(task.date_key, date, &task.rule);
    if !is_base && !repeats {
        return None;
    }
    if task.exception_dates.contains(&date) {
        return None;
    }
    if let Some(until) = task.rule.until() {
        if date > until {
            return None;
        }
    }
    let fields = match task.overrides.get(&date) {
        Some(patch) => task.fields.merged(patch),
        None => task.fields.clone(),
    };
    Some(Occurrence {
        master_id: task.id,
        date_key: date,
        is_base,
        fields,
    })
}

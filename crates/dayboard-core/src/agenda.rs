use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Task, TaskView};
use crate::recurrence::occurs_on;

/// Assembles the list of tasks visible on a single date.
///
/// # Arguments
///
/// * `date_key` - The date being rendered
/// * `window` - Master rows whose occurrences may touch that date
///
/// # Behavior
///
/// Rows anchored on the date itself pass through as-is; their per-date
/// overrides are not consulted, edits to a real row land on the row. Every
/// other master contributes a virtual row when its rule fires on the date
/// and the date is not excepted, with that date's override merged over the
/// master's fields.
///
/// # Returns
///
/// Views sorted by display order (unordered rows last), with the master id
/// as a stable tiebreaker.
pub fn tasks_for_date(date_key: NaiveDate, window: &[Task]) -> Vec<TaskView> {
    let mut views: Vec<TaskView> = Vec::new();

    for task in window {
        if task.date_key == date_key {
            views.push(TaskView {
                master_id: task.id,
                date_key,
                is_virtual: false,
                fields: task.fields.clone(),
            });
        }
    }

    for task in window {
        if task.date_key == date_key || task.rule.is_never() {
            continue;
        }
        if !occurs_on(task.date_key, date_key, &task.rule) {
            continue;
        }
        if task.exception_dates.contains(&date_key) {
            continue;
        }
        let fields = match task.overrides.get(&date_key) {
            Some(patch) => task.fields.merged(patch),
            None => task.fields.clone(),
        };
        views.push(TaskView {
            master_id: task.id,
            date_key,
            is_virtual: true,
            fields,
        });
    }

    views.sort_by_key(|view| {
        (
            view.fields.display_order.unwrap_or(i64::MAX),
            view.master_id.unwrap_or_else(Uuid::max),
        )
    });
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPatch;
    use crate::rule::RecurrenceRule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(text: &str, base: NaiveDate, id: u128) -> Task {
        let mut task = Task::new(text, base);
        task.id = Some(Uuid::from_u128(id));
        task
    }

    #[test]
    fn test_real_rows_pass_through_without_override_merge() {
        let day = date(2024, 1, 10);
        let mut master = task("Call dentist", day, 1);
        master.overrides.insert(
            day,
            TaskPatch {
                text: Some("Should not appear".to_string()),
                ..TaskPatch::default()
            },
        );
        let views = tasks_for_date(day, &[master]);
        assert_eq!(views.len(), 1);
        assert!(!views[0].is_virtual);
        assert_eq!(views[0].fields.text, "Call dentist");
    }

    #[test]
    fn test_anchor_date_yields_one_row_even_when_recurring() {
        let day = date(2024, 1, 1);
        let master = task("Journal", day, 1).with_rule(RecurrenceRule::daily());
        let views = tasks_for_date(day, &[master]);
        assert_eq!(views.len(), 1);
        assert!(!views[0].is_virtual);
    }

    #[test]
    fn test_virtual_rows_merge_their_override() {
        let day = date(2024, 1, 3);
        let mut master = task("Journal", date(2024, 1, 1), 1).with_rule(RecurrenceRule::daily());
        master.overrides.insert(
            day,
            TaskPatch {
                is_done: Some(true),
                notes: Some("done early".to_string()),
                ..TaskPatch::default()
            },
        );
        let views = tasks_for_date(day, &[master]);
        assert_eq!(views.len(), 1);
        assert!(views[0].is_virtual);
        assert!(views[0].fields.is_done);
        assert_eq!(views[0].fields.notes.as_deref(), Some("done early"));
        assert_eq!(views[0].fields.text, "Journal");
    }

    #[test]
    fn test_excepted_dates_produce_no_virtual() {
        let day = date(2024, 1, 3);
        let mut master = task("Journal", date(2024, 1, 1), 1).with_rule(RecurrenceRule::daily());
        master.exception_dates.insert(day);
        assert!(tasks_for_date(day, &[master]).is_empty());
    }

    #[test]
    fn test_never_rules_produce_no_virtual() {
        let master = task("One-off", date(2024, 1, 1), 1);
        assert!(tasks_for_date(date(2024, 1, 2), &[master]).is_empty());
    }

    #[test]
    fn test_sorted_by_display_order_with_unordered_last() {
        let day = date(2024, 1, 1);
        let mut second = task("second", day, 1);
        second.fields.display_order = Some(20);
        let mut first = task("first", day, 2);
        first.fields.display_order = Some(10);
        let unordered = task("unordered", day, 3);
        let views = tasks_for_date(day, &[second, unordered, first]);
        let texts: Vec<&str> = views.iter().map(|v| v.fields.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "unordered"]);
    }

    #[test]
    fn test_equal_orders_tie_break_on_master_id() {
        let day = date(2024, 1, 1);
        let a = task("a", day, 9);
        let b = task("b", day, 4);
        let views = tasks_for_date(day, &[a, b]);
        let texts: Vec<&str> = views.iter().map(|v| v.fields.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn test_real_and_virtual_rows_interleave_by_order() {
        let day = date(2024, 1, 8);
        let mut real = task("real", day, 1);
        real.fields.display_order = Some(5);
        let mut recurring = task("virtual", date(2024, 1, 1), 2).with_rule(RecurrenceRule::daily());
        recurring.fields.display_order = Some(1);
        let views = tasks_for_date(day, &[real, recurring]);
        let texts: Vec<&str> = views.iter().map(|v| v.fields.text.as_str()).collect();
        assert_eq!(texts, vec!["virtual", "real"]);
        assert!(views[0].is_virtual);
        assert!(!views[1].is_virtual);
    }
}

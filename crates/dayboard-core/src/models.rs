use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::rule::RecurrenceRule;

/// A persisted master task: the row that anchors a recurrence rule.
///
/// `date_key` is the calendar day the task is due and the day its rule is
/// anchored to. `exception_dates` are hard exclusions (never materialize),
/// `overrides` are per-date field patches applied only to that occurrence's
/// rendered snapshot. Everything derived from a master (occurrences, day
/// views) is computed on demand and never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Present only once the task has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub date_key: NaiveDate,
    /// Canonical rule location. Legacy rows stored the rule under `repeat`
    /// or `repeat_info`; those keys are absorbed here on read.
    #[serde(
        rename = "repeatingRule",
        alias = "repeat",
        alias = "repeat_info",
        default
    )]
    pub rule: RecurrenceRule,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exception_dates: BTreeSet<NaiveDate>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<NaiveDate, TaskPatch>,
    #[serde(flatten)]
    pub fields: TaskFields,
}

impl Task {
    /// Creates an unsaved task anchored to `date_key`. The store assigns an
    /// ID on first upsert.
    pub fn new(text: impl Into<String>, date_key: NaiveDate) -> Self {
        Self {
            id: None,
            date_key,
            rule: RecurrenceRule::Never,
            exception_dates: BTreeSet::new(),
            overrides: BTreeMap::new(),
            fields: TaskFields {
                text: text.into(),
                is_done: false,
                color: None,
                notes: None,
                display_order: None,
            },
        }
    }

    pub fn with_rule(mut self, rule: RecurrenceRule) -> Self {
        self.rule = rule.normalized();
        self
    }

    pub fn with_order(mut self, display_order: i64) -> Self {
        self.fields.display_order = Some(display_order);
        self
    }
}

/// Display fields shared by a master task and every snapshot derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub text: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Position within a day's list; absent values render (and sort) last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
}

impl TaskFields {
    /// Returns a copy of these fields with the patch's present values laid
    /// over them. The receiver is untouched; overrides never mutate masters.
    pub fn merged(&self, patch: &TaskPatch) -> TaskFields {
        TaskFields {
            text: patch.text.clone().unwrap_or_else(|| self.text.clone()),
            is_done: patch.is_done.unwrap_or(self.is_done),
            color: patch.color.clone().or_else(|| self.color.clone()),
            notes: patch.notes.clone().or_else(|| self.notes.clone()),
            display_order: patch.display_order.or(self.display_order),
        }
    }
}

/// A partial-field patch keyed by date in `Task::overrides`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.is_done.is_none()
            && self.color.is_none()
            && self.notes.is_none()
            && self.display_order.is_none()
    }

    /// Folds a newer patch into this one; the newer patch's present values
    /// win, absent values leave the existing ones in place.
    pub fn merge(&mut self, newer: TaskPatch) {
        if newer.text.is_some() {
            self.text = newer.text;
        }
        if newer.is_done.is_some() {
            self.is_done = newer.is_done;
        }
        if newer.color.is_some() {
            self.color = newer.color;
        }
        if newer.notes.is_some() {
            self.notes = newer.notes;
        }
        if newer.display_order.is_some() {
            self.display_order = newer.display_order;
        }
    }
}

/// Materializer output: one date on which a master logically occurs, with
/// the master's fields merged with any override for that date. Never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub master_id: Option<Uuid>,
    pub date_key: NaiveDate,
    /// True iff this is the master's own anchor date.
    pub is_base: bool,
    pub fields: TaskFields,
}

/// View-assembler output: one entry of a day's rendered task list. Virtual
/// entries are projected from a rule and have no persisted row of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskView {
    pub master_id: Option<Uuid>,
    pub date_key: NaiveDate,
    pub is_virtual: bool,
    pub fields: TaskFields,
}

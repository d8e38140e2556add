//! # Dayboard Core Library
//!
//! The scheduling engine behind the Dayboard day planner: calendar-day tasks
//! with recurrence rules, per-date exceptions and overrides, and on-the-fly
//! occurrence materialization.
//!
//! ## Features
//!
//! - **Fail-Open Rule Normalization**: Loosely-shaped rule payloads from
//!   storage or UI degrade to safe canonical forms instead of erroring
//! - **Virtual Occurrences**: Recurring tasks stay single master rows;
//!   per-date copies are materialized on demand and never persisted
//! - **Per-Date Exceptions and Overrides**: Skip a single occurrence or
//!   change just its fields without touching the master
//! - **Guarded Rule Edits**: Structural rule changes route through a
//!   confirmation port before they rewrite a schedule
//! - **Pluggable Persistence**: A small store trait with JSON-file and
//!   in-memory implementations
//!
//! ## Core Modules
//!
//! - [`rule`]: Recurrence rule model, normalization, and wire format
//! - [`recurrence`]: The occurrence predicate and window materializer
//! - [`agenda`]: Single-day assembly of real and virtual rows
//! - [`guard`]: Confirmation flow for destructive rule changes
//! - [`models`]: Task rows, field patches, and view types
//! - [`store`]: The task store port and its implementations
//! - [`error`]: Error types shared across the crate
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dayboard_core::models::Task;
//! use dayboard_core::recurrence::expand_occurrences;
//! use dayboard_core::rule::RecurrenceRule;
//!
//! let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let standup = Task::new("Morning standup", base).with_rule(RecurrenceRule::weekdays());
//!
//! let week_end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//! let occurrences = expand_occurrences(&standup, base, week_end);
//! assert_eq!(occurrences.len(), 5);
//! for occurrence in &occurrences {
//!     println!("{}: {}", occurrence.date_key, occurrence.fields.text);
//! }
//! ```

pub mod agenda;
pub mod error;
pub mod guard;
pub mod models;
pub mod recurrence;
pub mod rule;
pub mod store;

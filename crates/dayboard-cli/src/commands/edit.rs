use anyhow::{anyhow, Result};
use dayboard_core::error::CoreError;
use dayboard_core::guard::{apply_rule_change, needs_confirmation};
use dayboard_core::rule::RecurrenceRule;
use dayboard_core::store::TaskStore;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::cli::EditCommand;
use crate::config::Config;
use crate::parser::{parse_date, rule_from_flags};
use crate::util::resolve_task_id;

pub fn edit_task(store: &mut impl TaskStore, command: EditCommand, config: &Config) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id)?;
    let mut task = store
        .get(task_id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.to_string())))?;

    if let Some(text) = command.text {
        task.fields.text = text;
    }
    if let Some(date_str) = &command.date {
        task.date_key = parse_date(date_str)?;
    }
    if command.color_clear {
        task.fields.color = None;
    } else if let Some(color) = command.color {
        task.fields.color = Some(color);
    }
    if command.notes_clear {
        task.fields.notes = None;
    } else if let Some(notes) = command.notes {
        task.fields.notes = Some(notes);
    }
    if command.order_clear {
        task.fields.display_order = None;
    } else if let Some(order) = command.order {
        task.fields.display_order = Some(order);
    }

    let candidate = if command.never {
        Some(RecurrenceRule::Never)
    } else {
        rule_from_flags(&command.rule)?
    };

    let mut schedule_kept = false;
    if let Some(candidate) = candidate {
        let wanted = candidate.normalized();
        let assume_yes = command.yes || config.assume_yes;
        let text = task.fields.text.clone();
        let mut port = move |old: &RecurrenceRule, new: &RecurrenceRule| {
            if assume_yes {
                return true;
            }
            Confirm::new()
                .with_prompt(format!(
                    "This changes how '{}' repeats ({} -> {}) and will reshape its occurrences. Continue?",
                    text, old, new
                ))
                .default(false)
                .interact()
                .unwrap_or(false)
        };

        let applied = apply_rule_change(task.rule.clone(), wanted.clone(), &mut port);
        schedule_kept = needs_confirmation(&applied, &wanted);
        task.rule = applied;
    }

    let updated = store.upsert(task)?;
    println!(
        "Updated task with ID: {}",
        updated
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    if schedule_kept {
        println!("{}", "Schedule change discarded; kept the existing rule.".yellow());
    }

    Ok(())
}

use anyhow::{anyhow, Result};
use dayboard_core::error::CoreError;
use dayboard_core::recurrence::occurs_on;
use dayboard_core::store::TaskStore;

use crate::cli::DoneCommand;
use crate::parser::{parse_date, today};
use crate::util::resolve_task_id;

/// Toggles completion. On the anchor date this flips the master itself;
/// on any other date it records a per-date override so the rest of the
/// series is untouched.
pub fn done_task(store: &mut impl TaskStore, command: DoneCommand) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id)?;
    let date = match command.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let mut task = store
        .get(task_id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.to_string())))?;

    if date == task.date_key {
        task.fields.is_done = !task.fields.is_done;
        let task = store.upsert(task)?;
        println!(
            "Marked '{}' as {} on {}.",
            task.fields.text,
            if task.fields.is_done { "done" } else { "not done" },
            date
        );
        return Ok(());
    }

    let has_occurrence = task.rule.is_recurring()
        && !task.exception_dates.contains(&date)
        && occurs_on(task.date_key, date, &task.rule);
    if !has_occurrence {
        return Err(anyhow!(CoreError::InvalidInput(format!(
            "'{}' has no occurrence on {}",
            task.fields.text, date
        ))));
    }

    let currently_done = task
        .overrides
        .get(&date)
        .and_then(|patch| patch.is_done)
        .unwrap_or(task.fields.is_done);
    task.overrides.entry(date).or_default().is_done = Some(!currently_done);

    let task = store.upsert(task)?;
    println!(
        "Marked '{}' as {} on {}.",
        task.fields.text,
        if currently_done { "not done" } else { "done" },
        date
    );
    Ok(())
}

use anyhow::{anyhow, Result};
use dayboard_core::error::CoreError;
use dayboard_core::models::TaskPatch;
use dayboard_core::store::TaskStore;

use crate::cli::AmendCommand;
use crate::parser::parse_date;
use crate::util::resolve_task_id;

pub fn amend_occurrence(store: &mut impl TaskStore, command: AmendCommand) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id)?;
    let date = parse_date(&command.date)?;
    let mut task = store
        .get(task_id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.to_string())))?;

    if command.clear {
        if task.overrides.remove(&date).is_none() {
            println!("'{}' has no override on {}.", task.fields.text, date);
            return Ok(());
        }
        let task = store.upsert(task)?;
        println!("Cleared the override for '{}' on {}.", task.fields.text, date);
        return Ok(());
    }

    let patch = TaskPatch {
        text: command.text,
        is_done: if command.done {
            Some(true)
        } else if command.not_done {
            Some(false)
        } else {
            None
        },
        color: command.color,
        notes: command.notes,
        display_order: command.order,
    };
    if patch.is_empty() {
        return Err(anyhow!(CoreError::InvalidInput(
            "Nothing to amend: pass at least one field flag (see dayboard amend --help).".to_string()
        )));
    }

    task.overrides.entry(date).or_default().merge(patch);
    let task = store.upsert(task)?;
    println!("Amended '{}' on {}.", task.fields.text, date);
    Ok(())
}

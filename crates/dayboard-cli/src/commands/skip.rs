use anyhow::{anyhow, Result};
use dayboard_core::error::CoreError;
use dayboard_core::store::TaskStore;

use crate::cli::{SkipCommand, UnskipCommand};
use crate::parser::parse_date;
use crate::util::resolve_task_id;

pub fn skip_occurrence(store: &mut impl TaskStore, command: SkipCommand) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id)?;
    let date = parse_date(&command.date)?;
    let mut task = store
        .get(task_id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.to_string())))?;

    if !task.exception_dates.insert(date) {
        println!("'{}' is already skipped on {}.", task.fields.text, date);
        return Ok(());
    }

    let task = store.upsert(task)?;
    println!("Skipped '{}' on {}.", task.fields.text, date);
    Ok(())
}

pub fn unskip_occurrence(store: &mut impl TaskStore, command: UnskipCommand) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id)?;
    let date = parse_date(&command.date)?;
    let mut task = store
        .get(task_id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.to_string())))?;

    if !task.exception_dates.remove(&date) {
        println!("'{}' was not skipped on {}.", task.fields.text, date);
        return Ok(());
    }

    let task = store.upsert(task)?;
    println!("Restored '{}' on {}.", task.fields.text, date);
    Ok(())
}

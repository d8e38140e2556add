use anyhow::{anyhow, Result};
use chrono::Days;
use dayboard_core::error::CoreError;
use dayboard_core::recurrence::expand_occurrences;
use dayboard_core::store::TaskStore;
use owo_colors::OwoColorize;

use crate::cli::PreviewCommand;
use crate::parser::today;
use crate::util::resolve_task_id;

pub fn preview_task(store: &impl TaskStore, command: PreviewCommand) -> Result<()> {
    let task_id = resolve_task_id(store, &command.id)?;
    let task = store
        .get(task_id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.to_string())))?;

    let weeks = command.weeks.max(1);
    let start = today();
    let end = start
        .checked_add_days(Days::new(u64::from(weeks) * 7))
        .ok_or_else(|| anyhow!("Preview window extends past the supported calendar"))?;
    let occurrences = expand_occurrences(&task, start, end);

    println!(
        "Upcoming occurrences of '{}' ({}):",
        task.fields.text.bold(),
        task.rule.to_string().cyan()
    );
    if occurrences.is_empty() {
        println!("  None in the next {} weeks.", weeks);
        return Ok(());
    }

    for occurrence in &occurrences {
        let mut line = format!(
            "  {}  {}",
            occurrence.date_key.format("%Y-%m-%d (%a)"),
            occurrence.fields.text
        );
        if occurrence.is_base {
            line.push_str(" (anchor)");
        }
        if task.overrides.contains_key(&occurrence.date_key) {
            line.push_str(" (amended)");
        }
        if occurrence.fields.is_done {
            line.push_str(" ✓");
        }
        println!("{}", line);
    }

    Ok(())
}

use anyhow::Result;
use dayboard_core::models::Task;
use dayboard_core::store::TaskStore;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::parser::{parse_date, rule_from_flags, today};

pub fn add_task(store: &mut impl TaskStore, command: AddCommand) -> Result<()> {
    let date_key = match command.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let rule = rule_from_flags(&command.rule)?;

    let mut task = Task::new(command.text, date_key);
    task.fields.color = command.color;
    task.fields.notes = command.notes;
    task.fields.display_order = command.order;
    if let Some(rule) = rule {
        task = task.with_rule(rule);
    }

    let added = store.upsert(task)?;
    let id = added
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    let subtle_style = Style::new().bright_black();

    if added.rule.is_recurring() {
        println!(
            "{} Created recurring task: {}",
            "✓".style(success_style),
            added.fields.text.bright_white().bold()
        );
        println!("  {} Task ID: {}", "→".style(info_style), id.yellow());
        println!(
            "  {} Repeats {} from {}",
            "→".style(info_style),
            added.rule.to_string().cyan(),
            added.date_key
        );

        println!("\n{} Next steps:", "💡".style(subtle_style));
        println!(
            "   {} Preview occurrences: dayboard preview {}",
            "•".style(subtle_style),
            id.yellow()
        );
        println!(
            "   {} Skip a single date: dayboard skip {} <date>",
            "•".style(subtle_style),
            id.yellow()
        );
    } else {
        println!(
            "{} Created task: {}",
            "✓".style(success_style),
            added.fields.text.bright_white().bold()
        );
        println!("  {} Task ID: {}", "→".style(info_style), id.yellow());
        println!(
            "  {} Scheduled for: {}",
            "→".style(info_style),
            added.date_key.to_string().cyan()
        );

        println!("\n{} Quick actions:", "💡".style(subtle_style));
        println!(
            "   {} Mark done: dayboard done {}",
            "•".style(subtle_style),
            id.yellow()
        );
        println!(
            "   {} Edit task: dayboard edit {}",
            "•".style(subtle_style),
            id.yellow()
        );
    }

    Ok(())
}

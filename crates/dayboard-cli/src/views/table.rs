use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use dayboard_core::models::{Task, TaskView};
use owo_colors::OwoColorize;
use uuid::Uuid;

/// Renders one agenda day: a weekday header followed by the assembled
/// occurrences, virtual ones marked with `↻`.
pub fn display_agenda_day(date: NaiveDate, views: &[TaskView]) {
    println!(
        "{} {}",
        date.format("%A").to_string().bold(),
        date.format("%Y-%m-%d").to_string().bright_black()
    );

    if views.is_empty() {
        println!("  No tasks.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Done", "Order"]);

    for view in views {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(view.master_id)));

        let mut display_text = String::new();
        if view.is_virtual {
            display_text.push_str("↻ ");
        }
        display_text.push_str(&view.fields.text);

        let mut text_cell = Cell::new(display_text);
        if view.fields.is_done {
            text_cell = text_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        } else if let Some(color) = view.fields.color.as_deref().and_then(card_color) {
            text_cell = text_cell.fg(color);
        }
        row.add_cell(text_cell);

        row.add_cell(Cell::new(if view.fields.is_done { "✓" } else { "" }));
        row.add_cell(Cell::new(
            view.fields
                .display_order
                .map(|order| order.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ));

        table.add_row(row);
    }

    println!("{table}");
}

/// Renders the master list: one row per stored task, recurring ones
/// marked with `↻` and their rule spelled out.
pub fn display_masters(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Date", "Repeats", "Done"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(task.id)));

        let mut display_text = String::new();
        if task.rule.is_recurring() {
            display_text.push_str("↻ ");
        }
        display_text.push_str(&task.fields.text);

        let mut text_cell = Cell::new(display_text);
        if task.fields.is_done {
            text_cell = text_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        } else if let Some(color) = task.fields.color.as_deref().and_then(card_color) {
            text_cell = text_cell.fg(color);
        }
        row.add_cell(text_cell);

        row.add_cell(Cell::new(task.date_key.to_string()));
        row.add_cell(Cell::new(if task.rule.is_never() {
            "-".to_string()
        } else {
            task.rule.to_string()
        }));
        row.add_cell(Cell::new(if task.fields.is_done { "✓" } else { "" }));

        table.add_row(row);
    }

    println!("{table}");
}

fn short_id(id: Option<Uuid>) -> String {
    id.map(|id| id.to_string()[..8].to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn card_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" | "purple" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "grey" | "gray" => Some(Color::DarkGrey),
        _ => None,
    }
}

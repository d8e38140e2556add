use anyhow::{anyhow, Result};
use chrono::Days;
use dayboard_core::agenda::tasks_for_date;
use dayboard_core::store::TaskStore;

use crate::cli::AgendaCommand;
use crate::config::Config;
use crate::parser::{parse_date, today};
use crate::views::table::display_agenda_day;

pub fn show_agenda(store: &impl TaskStore, command: AgendaCommand, config: &Config) -> Result<()> {
    let start = match command.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let days = command.days.max(1);
    let end = start
        .checked_add_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| anyhow!("Agenda window extends past the supported calendar"))?;

    // One padded fetch covers every day in the span.
    let padding = u64::from(config.padding_weeks) * 7;
    let from = start.checked_sub_days(Days::new(padding)).unwrap_or(start);
    let to = end.checked_add_days(Days::new(padding)).unwrap_or(end);
    let window = store.list_window(from, to)?;

    let mut date = start;
    while date <= end {
        display_agenda_day(date, &tasks_for_date(date, &window));
        if date < end {
            println!();
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(())
}

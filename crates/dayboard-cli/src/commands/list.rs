use anyhow::Result;
use dayboard_core::store::TaskStore;

use crate::views::table::display_masters;

pub fn list_tasks(store: &impl TaskStore) -> Result<()> {
    let tasks = store.list()?;
    display_masters(&tasks);
    Ok(())
}

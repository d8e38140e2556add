use anyhow::Result;
use dayboard_core::store::TaskStore;
use uuid::Uuid;

pub fn delete_task(store: &mut impl TaskStore, task_id: Uuid) -> Result<()> {
    store.delete(task_id)?;
    println!("Deleted task with ID: {}", task_id);
    Ok(())
}

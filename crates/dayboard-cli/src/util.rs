use anyhow::{anyhow, Result};
use dayboard_core::error::CoreError;
use dayboard_core::store::TaskStore;
use uuid::Uuid;

/// Resolves a short ID prefix to a full task UUID.
///
/// Matching is case-insensitive against the hyphenated UUID string. A
/// prefix that matches several tasks is reported with the candidates so
/// the user can retry with more characters.
pub fn resolve_task_id(store: &impl TaskStore, short_id: &str) -> Result<Uuid> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }

    let needle = short_id.to_lowercase();
    let mut matches: Vec<(Uuid, String)> = Vec::new();
    for task in store.list()? {
        if let Some(id) = task.id {
            if id.to_string().starts_with(&needle) {
                matches.push((id, task.fields.text));
            }
        }
    }

    match matches.len() {
        1 => Ok(matches[0].0),
        0 => Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID prefix '{}'",
            short_id
        )))),
        _ => Err(anyhow!(CoreError::AmbiguousId(
            matches
                .into_iter()
                .map(|(id, text)| (id.to_string(), text))
                .collect()
        ))),
    }
}

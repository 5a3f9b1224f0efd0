use reminders_domain::{Entity, ID};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Useful functions for creating inmemory repositories

fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    collection.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fails when an entity with the same id is already stored, like a primary key would
pub fn insert<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) -> anyhow::Result<()> {
    let mut collection = lock(collection);
    if collection.iter().any(|item| item.id() == val.id()) {
        anyhow::bail!("Duplicate id: {}", val.id());
    }
    collection.push(val.clone());
    Ok(())
}

/// Runs `update` on the stored entity with `val_id` under the lock.
/// Returns false when there is none or `update` declined.
pub fn update<T: Entity, F: FnOnce(&mut T) -> bool>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    update: F,
) -> bool {
    let mut collection = lock(collection);
    match collection.iter_mut().find(|item| item.id() == val_id) {
        Some(item) => update(item),
        None => false,
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    lock(collection)
        .iter()
        .find(|item| item.id() == val_id)
        .cloned()
}

pub fn find_by<T: Clone + Entity, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    lock(collection)
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

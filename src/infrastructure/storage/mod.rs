use crate::core::errors::MealsplitError;
use crate::core::models::{ExpenseEntry, Person};
use async_trait::async_trait;

/// Entry store and person registry backing a [`crate::core::services::MealsplitService`].
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_entries(&self) -> Result<Vec<ExpenseEntry>, MealsplitError>;
    async fn append_entry(&self, entry: ExpenseEntry) -> Result<(), MealsplitError>;
    async fn pop_last_entry(&self) -> Result<Option<ExpenseEntry>, MealsplitError>;
    /// Moves the current entries into a snapshot called `name` and leaves the
    /// current list empty. Returns the number of archived entries.
    async fn archive_entries(&self, name: &str) -> Result<usize, MealsplitError>;
    /// Snapshot names, oldest first.
    async fn list_archives(&self) -> Result<Vec<String>, MealsplitError>;
    async fn get_archive(&self, name: &str) -> Result<Option<Vec<ExpenseEntry>>, MealsplitError>;
    async fn get_people(&self) -> Result<Vec<Person>, MealsplitError>;
    async fn save_person(&self, person: Person) -> Result<(), MealsplitError>;
    /// Removes every registry record called `name`, returning them in registry order.
    async fn remove_person(&self, name: &str) -> Result<Vec<Person>, MealsplitError>;
}

pub mod in_memory;
pub mod json_file;

use crate::core::errors::MealsplitError;
use crate::core::models::{ExpenseEntry, Person};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<Vec<ExpenseEntry>>>,
    archives: Arc<RwLock<BTreeMap<String, Vec<ExpenseEntry>>>>,
    people: Arc<RwLock<Vec<Person>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            entries: Arc::new(RwLock::new(Vec::new())),
            archives: Arc::new(RwLock::new(BTreeMap::new())),
            people: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get_entries(&self) -> Result<Vec<ExpenseEntry>, MealsplitError> {
        let entries = self.entries.read().await;
        Ok(entries.clone())
    }

    async fn append_entry(&self, entry: ExpenseEntry) -> Result<(), MealsplitError> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn pop_last_entry(&self) -> Result<Option<ExpenseEntry>, MealsplitError> {
        let mut entries = self.entries.write().await;
        Ok(entries.pop())
    }

    async fn archive_entries(&self, name: &str) -> Result<usize, MealsplitError> {
        let mut entries = self.entries.write().await;
        let mut archives = self.archives.write().await;
        if archives.contains_key(name) {
            return Err(MealsplitError::StorageError(format!("Archive {} already exists", name)));
        }
        let archived = std::mem::take(&mut *entries);
        let count = archived.len();
        archives.insert(name.to_string(), archived);
        Ok(count)
    }

    async fn list_archives(&self) -> Result<Vec<String>, MealsplitError> {
        let archives = self.archives.read().await;
        Ok(archives.keys().cloned().collect())
    }

    async fn get_archive(&self, name: &str) -> Result<Option<Vec<ExpenseEntry>>, MealsplitError> {
        let archives = self.archives.read().await;
        Ok(archives.get(name).cloned())
    }

    async fn get_people(&self) -> Result<Vec<Person>, MealsplitError> {
        let people = self.people.read().await;
        Ok(people.clone())
    }

    async fn save_person(&self, person: Person) -> Result<(), MealsplitError> {
        let mut people = self.people.write().await;
        people.push(person);
        Ok(())
    }

    async fn remove_person(&self, name: &str) -> Result<Vec<Person>, MealsplitError> {
        let mut people = self.people.write().await;
        let removed: Vec<Person> = people.iter().filter(|p| p.name == name).cloned().collect();
        people.retain(|p| p.name != name);
        Ok(removed)
    }
}

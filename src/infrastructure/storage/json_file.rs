use crate::constants::{ARCHIVE_DIR, ENTRIES_FILE, PEOPLE_FILE};
use crate::core::errors::MealsplitError;
use crate::core::models::{ExpenseEntry, Person};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// File-backed store laid out as
/// `<dir>/data.json`, `<dir>/people.json` and `<dir>/previous-data/<name>.json`.
///
/// Missing files read as empty lists. Every write goes to a temporary file that is
/// then renamed over the target.
pub struct JsonFileStorage {
    dir: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStorage {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn entries_path(&self) -> PathBuf {
        self.dir.join(ENTRIES_FILE)
    }

    fn people_path(&self) -> PathBuf {
        self.dir.join(PEOPLE_FILE)
    }

    fn archive_dir(&self) -> PathBuf {
        self.dir.join(ARCHIVE_DIR)
    }

    fn archive_path(&self, name: &str) -> Option<PathBuf> {
        let stem = name.strip_suffix(".json").unwrap_or(name);
        if stem.is_empty() || stem.contains(['/', '\\']) || stem.starts_with('.') {
            return None;
        }
        Some(self.archive_dir().join(format!("{}.json", stem)))
    }
}

pub(crate) async fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, MealsplitError> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(MealsplitError::StorageError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|e| MealsplitError::MalformedRecord {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub(crate) async fn write_list<T: Serialize>(path: &Path, items: &[T]) -> Result<(), MealsplitError> {
    let body = serde_json::to_string_pretty(items)
        .map_err(|e| MealsplitError::StorageError(format!("Failed to encode {}: {}", path.display(), e)))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body)
        .await
        .map_err(|e| MealsplitError::StorageError(format!("Failed to write {}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| MealsplitError::StorageError(format!("Failed to replace {}: {}", path.display(), e)))?;
    debug!("Wrote {} records to {}", items.len(), path.display());
    Ok(())
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn get_entries(&self) -> Result<Vec<ExpenseEntry>, MealsplitError> {
        read_list(&self.entries_path()).await
    }

    async fn append_entry(&self, entry: ExpenseEntry) -> Result<(), MealsplitError> {
        let _guard = self.write_lock.lock().await;
        let path = self.entries_path();
        let mut entries: Vec<ExpenseEntry> = read_list(&path).await?;
        entries.push(entry);
        write_list(&path, &entries).await
    }

    async fn pop_last_entry(&self) -> Result<Option<ExpenseEntry>, MealsplitError> {
        let _guard = self.write_lock.lock().await;
        let path = self.entries_path();
        let mut entries: Vec<ExpenseEntry> = read_list(&path).await?;
        let last = entries.pop();
        if last.is_some() {
            write_list(&path, &entries).await?;
        }
        Ok(last)
    }

    async fn archive_entries(&self, name: &str) -> Result<usize, MealsplitError> {
        let _guard = self.write_lock.lock().await;
        let target = self
            .archive_path(name)
            .ok_or_else(|| MealsplitError::StorageError(format!("Invalid archive name {}", name)))?;
        if fs::try_exists(&target).await.unwrap_or(false) {
            return Err(MealsplitError::StorageError(format!("Archive {} already exists", name)));
        }
        let path = self.entries_path();
        let entries: Vec<ExpenseEntry> = read_list(&path).await?;
        fs::create_dir_all(self.archive_dir())
            .await
            .map_err(|e| MealsplitError::StorageError(format!("Failed to create archive directory: {}", e)))?;
        write_list(&target, &entries).await?;
        write_list::<ExpenseEntry>(&path, &[]).await?;
        Ok(entries.len())
    }

    async fn list_archives(&self) -> Result<Vec<String>, MealsplitError> {
        let mut dir = match fs::read_dir(self.archive_dir()).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(MealsplitError::StorageError(format!("Failed to list archives: {}", e))),
        };
        let mut names = Vec::new();
        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| MealsplitError::StorageError(format!("Failed to list archives: {}", e)))?
        {
            let path = item.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn get_archive(&self, name: &str) -> Result<Option<Vec<ExpenseEntry>>, MealsplitError> {
        let Some(path) = self.archive_path(name) else {
            return Ok(None);
        };
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        read_list(&path).await.map(Some)
    }

    async fn get_people(&self) -> Result<Vec<Person>, MealsplitError> {
        read_list(&self.people_path()).await
    }

    async fn save_person(&self, person: Person) -> Result<(), MealsplitError> {
        let _guard = self.write_lock.lock().await;
        let path = self.people_path();
        let mut people: Vec<Person> = read_list(&path).await?;
        people.push(person);
        write_list(&path, &people).await
    }

    async fn remove_person(&self, name: &str) -> Result<Vec<Person>, MealsplitError> {
        let _guard = self.write_lock.lock().await;
        let path = self.people_path();
        let mut people: Vec<Person> = read_list(&path).await?;
        let removed: Vec<Person> = people.iter().filter(|p| p.name == name).cloned().collect();
        if !removed.is_empty() {
            people.retain(|p| p.name != name);
            write_list(&path, &people).await?;
        }
        Ok(removed)
    }
}

use crate::constants::{
    ARCHIVE_NAME_FORMAT, DATA_ARCHIVED, ENTRY_ADDED, ENTRY_DELETED, MAX_NAME_LENGTH, PERSON_ADDED, PERSON_REMOVED,
};
use crate::core::errors::MealsplitError;
use crate::core::models::{AppLog, ExpenseEntry, Person, SettlementStatement};
use crate::core::settlement::compute_settlements;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::json;
use std::collections::HashSet;

pub struct MealsplitService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
    max_amount: f64,
}

impl<L: LoggingService, S: Storage> MealsplitService<L, S> {
    pub fn new(storage: S, logging: L, max_amount: f64) -> Self {
        info!("Initializing MealsplitService (max amount {})", max_amount);
        MealsplitService {
            storage,
            logging,
            max_amount,
        }
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), MealsplitError> {
        if value.trim().is_empty() {
            return Err(MealsplitError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.trim() != value {
            return Err(MealsplitError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot start or end with whitespace", field),
            ));
        }
        if value.chars().count() > max_length {
            return Err(MealsplitError::invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(MealsplitError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), MealsplitError> {
        if !amount.is_finite() {
            return Err(MealsplitError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number",
            ));
        }
        if amount <= 0.0 {
            return Err(MealsplitError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be greater than 0",
            ));
        }
        if amount > self.max_amount {
            return Err(MealsplitError::invalid_input(
                field,
                "Amount Too Large",
                format!("Amount cannot exceed {}", self.max_amount),
            ));
        }
        if ((amount * 100.0).round() - amount * 100.0).abs() > 1e-6 {
            return Err(MealsplitError::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot have more than 2 decimal places",
            ));
        }
        Ok(())
    }

    /// Appends to the activity log. The change it describes is already stored, so a
    /// failed write is reported and the operation still succeeds.
    async fn record_action(&self, action: &str, details: serde_json::Value) {
        if let Err(e) = self.logging.log_action(action, details).await {
            warn!("Failed to record {} in the activity log: {}", action, e);
        }
    }

    // PERSON REGISTRY

    pub async fn add_person(&self, name: &str) -> Result<Person, MealsplitError> {
        self.validate_string_input("name", name, MAX_NAME_LENGTH)?;
        let people = self.storage.get_people().await?;
        if people.iter().any(|p| p.name == name) {
            return Err(MealsplitError::PersonAlreadyExists(name.to_string()));
        }
        let person = Person {
            id: Person::next_id(&people),
            name: name.to_string(),
        };
        self.storage.save_person(person.clone()).await?;
        info!("Added person {} with id {}", person.name, person.id);
        self.record_action(PERSON_ADDED, json!({ "id": person.id, "name": person.name }))
            .await;
        Ok(person)
    }

    pub async fn list_people(&self) -> Result<Vec<Person>, MealsplitError> {
        self.storage.get_people().await
    }

    /// Removes every registry record called `name`. Recorded entries naming them are kept.
    pub async fn remove_person(&self, name: &str) -> Result<Vec<Person>, MealsplitError> {
        let removed = self.storage.remove_person(name).await?;
        if removed.is_empty() {
            return Err(MealsplitError::PersonNotFound(name.to_string()));
        }
        let ids: Vec<u64> = removed.iter().map(|p| p.id).collect();
        info!("Removed person {} ({} record(s))", name, ids.len());
        self.record_action(PERSON_REMOVED, json!({ "ids": ids, "name": name }))
            .await;
        Ok(removed)
    }

    // ENTRIES

    pub async fn add_entry(
        &self,
        payer: &str,
        amount: f64,
        participants: Vec<String>,
    ) -> Result<ExpenseEntry, MealsplitError> {
        let people = self.storage.get_people().await?;
        if people.is_empty() {
            return Err(MealsplitError::NoPeopleRegistered);
        }
        let registered: HashSet<&str> = people.iter().map(|p| p.name.as_str()).collect();
        if !registered.contains(payer) {
            return Err(MealsplitError::PersonNotFound(payer.to_string()));
        }
        self.validate_amount_input("amount", amount)?;
        if participants.is_empty() {
            return Err(MealsplitError::invalid_input(
                "participants",
                "Invalid participants",
                "At least one person must share the expense",
            ));
        }
        let mut seen = HashSet::with_capacity(participants.len());
        for name in &participants {
            if !registered.contains(name.as_str()) {
                return Err(MealsplitError::PersonNotFound(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                return Err(MealsplitError::invalid_input(
                    "participants",
                    "Duplicate participant",
                    format!("{} is listed more than once", name),
                ));
            }
        }

        let entry = ExpenseEntry::new(payer, amount, participants, Utc::now())?;
        self.storage.append_entry(entry.clone()).await?;
        info!(
            "{} paid {} for {} people",
            entry.payer,
            entry.amount,
            entry.participants.len()
        );
        self.record_action(
            ENTRY_ADDED,
            json!({
                "payer": entry.payer,
                "amount": entry.amount,
                "participants": entry.participants,
            }),
        )
        .await;
        Ok(entry)
    }

    /// Drops the most recently recorded entry, if any.
    pub async fn delete_last_entry(&self) -> Result<Option<ExpenseEntry>, MealsplitError> {
        let removed = self.storage.pop_last_entry().await?;
        match &removed {
            Some(entry) => {
                info!("Deleted last entry paid by {}", entry.payer);
                self.record_action(
                    ENTRY_DELETED,
                    json!({ "payer": entry.payer, "amount": entry.amount }),
                )
                .await;
            }
            None => warn!("Delete requested but there are no entries"),
        }
        Ok(removed)
    }

    pub async fn list_entries(&self) -> Result<Vec<ExpenseEntry>, MealsplitError> {
        self.storage.get_entries().await
    }

    // SETTLEMENT

    pub async fn settle(&self) -> Result<Vec<SettlementStatement>, MealsplitError> {
        let entries = self.storage.get_entries().await?;
        let statements = compute_settlements(&entries)?;
        debug!(
            "Computed {} statements from {} entries",
            statements.len(),
            entries.len()
        );
        Ok(statements)
    }

    pub async fn settle_archive(&self, name: &str) -> Result<Vec<SettlementStatement>, MealsplitError> {
        let entries = self.load_archive(name).await?;
        compute_settlements(&entries)
    }

    // ARCHIVES

    /// Moves the current entries into a snapshot named after the current UTC time
    /// and starts an empty list. `None` when there was nothing to archive.
    pub async fn clear_data(&self) -> Result<Option<String>, MealsplitError> {
        let entries = self.storage.get_entries().await?;
        if entries.is_empty() {
            warn!("Clear requested but there are no entries");
            return Ok(None);
        }
        let name = Utc::now().format(ARCHIVE_NAME_FORMAT).to_string();
        let count = self.storage.archive_entries(&name).await?;
        info!("Archived {} entries as {}", count, name);
        self.record_action(DATA_ARCHIVED, json!({ "archive": name, "entries": count }))
            .await;
        Ok(Some(name))
    }

    pub async fn list_archives(&self) -> Result<Vec<String>, MealsplitError> {
        self.storage.list_archives().await
    }

    pub async fn load_archive(&self, name: &str) -> Result<Vec<ExpenseEntry>, MealsplitError> {
        self.storage
            .get_archive(name)
            .await?
            .ok_or_else(|| MealsplitError::ArchiveNotFound(name.to_string()))
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, MealsplitError> {
        self.logging.get_logs().await
    }
}

use crate::constants::ACTIVITY_FILE;
use crate::core::errors::MealsplitError;
use crate::core::models::AppLog;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::json_file::{read_list, write_list};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Activity log kept in `<dir>/activity.json`, next to the entry and people files.
pub struct JsonFileLogging {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLogging {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileLogging {
            path: dir.into().join(ACTIVITY_FILE),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl LoggingService for JsonFileLogging {
    async fn log_action(&self, action: &str, details: serde_json::Value) -> Result<(), MealsplitError> {
        let record = AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            details: serde_json::from_value(details)
                .map_err(|e| MealsplitError::LoggingError(format!("Failed to serialize log details: {}", e)))?,
            timestamp: chrono::Utc::now(),
        };
        let _guard = self.write_lock.lock().await;
        let mut logs: Vec<AppLog> = read_list(&self.path)
            .await
            .map_err(|e| MealsplitError::LoggingError(e.to_string()))?;
        logs.push(record);
        write_list(&self.path, &logs)
            .await
            .map_err(|e| MealsplitError::LoggingError(e.to_string()))
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, MealsplitError> {
        read_list(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn actions_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let logging = JsonFileLogging::new(dir.path());
        assert!(logging.get_logs().await.unwrap().is_empty());

        logging.log_action("PERSON_ADDED", json!({ "id": 1, "name": "Ana" })).await.unwrap();
        logging.log_action("ENTRY_DELETED", json!({ "payer": "Ana" })).await.unwrap();

        let reopened = JsonFileLogging::new(dir.path());
        let logs = reopened.get_logs().await.unwrap();
        let actions: Vec<&str> = logs.iter().map(|l| l.action.as_str()).collect();
        assert_eq!(actions, vec!["PERSON_ADDED", "ENTRY_DELETED"]);
        assert_eq!(logs[0].details["name"], "Ana");
    }

    #[tokio::test]
    async fn details_must_be_an_object() {
        let dir = tempfile::tempdir().unwrap();
        let logging = JsonFileLogging::new(dir.path());
        let result = logging.log_action("PERSON_ADDED", json!("Ana")).await;
        assert!(matches!(result, Err(MealsplitError::LoggingError(_))));
        assert!(!dir.path().join(ACTIVITY_FILE).exists());
    }
}

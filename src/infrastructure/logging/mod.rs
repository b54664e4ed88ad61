pub mod in_memory;
pub mod json_file;

use crate::core::errors::MealsplitError;
use crate::core::models::AppLog;
use async_trait::async_trait;

#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(&self, action: &str, details: serde_json::Value) -> Result<(), MealsplitError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, MealsplitError>;
}

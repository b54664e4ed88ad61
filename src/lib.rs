pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;
pub mod presentation;

pub use crate::core::errors::MealsplitError;
pub use crate::core::models::{Debtors, ExpenseEntry, Person, SettlementStatement};
pub use crate::core::services::MealsplitService;
pub use crate::core::settlement::{GroupKey, compute_settlements};
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::logging::json_file::JsonFileLogging;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;
pub use crate::infrastructure::storage::json_file::JsonFileStorage;

#[cfg(test)]
mod tests;

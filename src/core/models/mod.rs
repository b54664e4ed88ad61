pub mod audit;
pub mod entry;
pub mod person;
pub mod statement;

pub use audit::AppLog;
pub use entry::{ExpenseEntry, ExpenseRecord};
pub use person::Person;
pub use statement::{Debtors, SettlementStatement};

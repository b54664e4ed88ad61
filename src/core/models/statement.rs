use serde::{Deserialize, Serialize};
use std::fmt;

/// Who owes a payer their share.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "names")]
pub enum Debtors {
    /// The payer was the only participant.
    NoOne,
    People(Vec<String>),
}

impl Debtors {
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Debtors::NoOne
        } else {
            Debtors::People(names)
        }
    }

    pub fn names(&self) -> &[String] {
        match self {
            Debtors::NoOne => &[],
            Debtors::People(names) => names,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }
}

impl fmt::Display for Debtors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Debtors::NoOne => write!(f, "No one"),
            Debtors::People(names) => write!(f, "{}", names.join(", ")),
        }
    }
}

/// "`payer` should receive `amount_owed_per_share` from each of `owed_by`" for one
/// payer within one participant group.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SettlementStatement {
    pub payer: String,
    /// Unrounded; round only when displaying.
    pub amount_owed_per_share: f64,
    pub owed_by: Debtors,
    pub total_paid: f64,
    pub share_count: usize,
    pub entry_count: usize,
    /// Members of the participant group, sorted.
    pub participants: Vec<String>,
}

impl SettlementStatement {
    /// Per-share amount rounded to cents for display.
    pub fn rounded_amount(&self) -> String {
        format!("{:.2}", self.amount_owed_per_share)
    }
}

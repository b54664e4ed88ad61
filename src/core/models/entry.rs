use crate::core::errors::MealsplitError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Flat shape of an expense as it sits in `data.json` and in archived snapshots.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub name: String,
    pub amount: f64,
    pub people_who_ate: usize,
    pub date: String,
    pub people: Vec<String>,
}

/// A validated expense: `payer` paid `amount` on behalf of every name in `participants`.
///
/// (De)serializes through [`ExpenseRecord`], so every entry read from storage has
/// passed [`ExpenseEntry::validate`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "ExpenseRecord", into = "ExpenseRecord")]
pub struct ExpenseEntry {
    pub payer: String,
    pub amount: f64,
    pub participants: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ExpenseEntry {
    pub fn new(
        payer: impl Into<String>,
        amount: f64,
        participants: Vec<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, MealsplitError> {
        let entry = ExpenseEntry {
            payer: payer.into(),
            amount,
            participants,
            timestamp,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Checks the invariants the settlement engine relies on.
    pub fn validate(&self) -> Result<(), MealsplitError> {
        check_identifier("payer", &self.payer)?;
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(MealsplitError::InvalidEntry(format!(
                "amount must be a positive number, got {}",
                self.amount
            )));
        }
        if self.participants.is_empty() {
            return Err(MealsplitError::InvalidEntry(format!(
                "expense paid by {} has no participants",
                self.payer
            )));
        }
        let mut seen = HashSet::with_capacity(self.participants.len());
        for name in &self.participants {
            check_identifier("participant", name)?;
            if !seen.insert(name.as_str()) {
                return Err(MealsplitError::InvalidEntry(format!("participant {} listed twice", name)));
            }
        }
        Ok(())
    }
}

fn check_identifier(role: &str, name: &str) -> Result<(), MealsplitError> {
    if name.trim().is_empty() {
        return Err(MealsplitError::InvalidEntry(format!("{} name is empty", role)));
    }
    if name.chars().any(char::is_control) {
        return Err(MealsplitError::InvalidEntry(format!(
            "{} name {:?} contains control characters",
            role, name
        )));
    }
    Ok(())
}

impl TryFrom<ExpenseRecord> for ExpenseEntry {
    type Error = MealsplitError;

    fn try_from(record: ExpenseRecord) -> Result<Self, Self::Error> {
        if record.people_who_ate != record.people.len() {
            return Err(MealsplitError::InvalidEntry(format!(
                "peopleWhoAte is {} but {} people are listed",
                record.people_who_ate,
                record.people.len()
            )));
        }
        let timestamp = DateTime::parse_from_rfc3339(&record.date)
            .map_err(|e| MealsplitError::InvalidEntry(format!("invalid date {:?}: {}", record.date, e)))?
            .with_timezone(&Utc);
        ExpenseEntry::new(record.name, record.amount, record.people, timestamp)
    }
}

impl From<ExpenseEntry> for ExpenseRecord {
    fn from(entry: ExpenseEntry) -> Self {
        ExpenseRecord {
            name: entry.payer,
            amount: entry.amount,
            people_who_ate: entry.participants.len(),
            date: entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            people: entry.participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn loads_legacy_record() {
        let raw = json!({
            "name": "Ana",
            "amount": 42.5,
            "peopleWhoAte": 2,
            "date": "2024-03-09T19:15:00.000Z",
            "people": ["Ben", "Ana"]
        });
        let entry: ExpenseEntry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entry.payer, "Ana");
        assert_eq!(entry.participants, names(&["Ben", "Ana"]));
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn rejects_record_with_no_people() {
        let raw = json!({
            "name": "Ana",
            "amount": 10.0,
            "peopleWhoAte": 0,
            "date": "2024-03-09T19:15:00.000Z",
            "people": []
        });
        let err = serde_json::from_value::<ExpenseEntry>(raw).unwrap_err();
        assert!(err.to_string().contains("no participants"));
    }

    #[test]
    fn rejects_head_count_mismatch() {
        let record = ExpenseRecord {
            name: "Ana".to_string(),
            amount: 10.0,
            people_who_ate: 3,
            date: "2024-03-09T19:15:00.000Z".to_string(),
            people: names(&["Ana", "Ben"]),
        };
        assert!(matches!(ExpenseEntry::try_from(record), Err(MealsplitError::InvalidEntry(_))));
    }

    #[test]
    fn rejects_bad_amounts_and_names() {
        let now = Utc::now();
        assert!(ExpenseEntry::new("Ana", 0.0, names(&["Ana"]), now).is_err());
        assert!(ExpenseEntry::new("Ana", -3.0, names(&["Ana"]), now).is_err());
        assert!(ExpenseEntry::new("Ana", f64::NAN, names(&["Ana"]), now).is_err());
        assert!(ExpenseEntry::new("  ", 5.0, names(&["Ana"]), now).is_err());
        assert!(ExpenseEntry::new("Ana", 5.0, names(&["Ana", "Ana"]), now).is_err());
        assert!(ExpenseEntry::new("Ana", 5.0, names(&["A\u{1f}B"]), now).is_err());
        assert!(ExpenseEntry::new("Ana", 5.0, names(&["Ana", "Ben"]), now).is_ok());
    }
}

//! Settlement engine: turns a snapshot of expense entries into
//! "X should get A from {names}" statements.
//!
//! Entries are grouped by their participant *set*, then by payer. Each payer
//! subgroup yields one statement whose per-share amount is the subgroup total
//! divided by the group size. Mutual debts across subgroups are not netted.

use crate::core::errors::MealsplitError;
use crate::core::models::{Debtors, ExpenseEntry, SettlementStatement};
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Separator between names in a [`GroupKey`]. Names may not contain control
/// characters, so it can never occur inside one.
pub const KEY_SEPARATOR: char = '\u{1f}';

/// Canonical, order-independent identity of a participant set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn from_participants<S: AsRef<str>>(participants: &[S]) -> Self {
        let mut names: Vec<&str> = participants.iter().map(AsRef::as_ref).collect();
        names.sort_unstable();
        let mut key = String::new();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                key.push(KEY_SEPARATOR);
            }
            key.push_str(name);
        }
        GroupKey(key)
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_SEPARATOR)
    }

    pub fn share_count(&self) -> usize {
        self.members().count()
    }

    /// Group members other than `payer`, in key order.
    pub fn others(&self, payer: &str) -> Vec<String> {
        self.members()
            .filter(|m| *m != payer)
            .map(String::from)
            .collect()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<&str> = self.members().collect();
        write!(f, "{}", members.join(", "))
    }
}

struct PayerTotal<'a> {
    payer: &'a str,
    total_paid: f64,
    entry_count: usize,
}

struct ParticipantGroup<'a> {
    key: GroupKey,
    payers: Vec<PayerTotal<'a>>,
}

impl<'a> ParticipantGroup<'a> {
    fn add(&mut self, entry: &'a ExpenseEntry) {
        match self.payers.iter_mut().find(|p| p.payer == entry.payer) {
            Some(total) => {
                total.total_paid += entry.amount;
                total.entry_count += 1;
            }
            None => self.payers.push(PayerTotal {
                payer: &entry.payer,
                total_paid: entry.amount,
                entry_count: 1,
            }),
        }
    }
}

/// Computes one statement per (participant group, payer) pair.
///
/// Groups come out in the order their first entry appears, payers within a group
/// likewise. Fails with [`MealsplitError::InvalidEntry`] if any entry breaks the
/// entry invariants, before any division takes place.
pub fn compute_settlements(entries: &[ExpenseEntry]) -> Result<Vec<SettlementStatement>, MealsplitError> {
    let mut groups: Vec<ParticipantGroup<'_>> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for entry in entries {
        entry.validate()?;
        let key = GroupKey::from_participants(&entry.participants);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(ParticipantGroup {
                    key,
                    payers: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].add(entry);
    }

    let mut statements = Vec::new();
    for group in &groups {
        // Non-empty by entry validation, so never zero.
        let share_count = group.key.share_count();
        debug!("Group [{}] has {} payer(s)", group.key, group.payers.len());
        let participants: Vec<String> = group.key.members().map(String::from).collect();
        for total in &group.payers {
            statements.push(SettlementStatement {
                payer: total.payer.to_string(),
                amount_owed_per_share: total.total_paid / share_count as f64,
                owed_by: Debtors::from_names(group.key.others(total.payer)),
                total_paid: total.total_paid,
                share_count,
                entry_count: total.entry_count,
                participants: participants.clone(),
            });
        }
    }
    Ok(statements)
}

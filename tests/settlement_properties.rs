use chrono::Utc;
use mealsplit::{Debtors, ExpenseEntry, compute_settlements};
use proptest::prelude::*;

const POOL: [&str; 5] = ["Ana", "Ben", "Cy", "Dee", "Eli"];

fn build_entries(amounts: &[u32], payers: &[usize], masks: &[u8]) -> Vec<ExpenseEntry> {
    amounts
        .iter()
        .zip(payers)
        .zip(masks)
        .map(|((&amount, &payer), &mask)| {
            let participants = POOL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, name)| name.to_string())
                .collect();
            ExpenseEntry {
                payer: POOL[payer % POOL.len()].to_string(),
                amount: f64::from(amount),
                participants,
                timestamp: Utc::now(),
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn money_is_conserved(
        amounts in prop::collection::vec(1u32..=150, 0..=30),
        payers in prop::collection::vec(0usize..5, 30),
        masks in prop::collection::vec(1u8..32, 30),
    ) {
        let entries = build_entries(&amounts, &payers, &masks);
        let statements = compute_settlements(&entries).expect("valid entries");

        let paid: f64 = entries.iter().map(|e| e.amount).sum();
        let settled: f64 = statements.iter().map(|s| s.total_paid).sum();
        prop_assert_eq!(paid, settled);

        let counted: usize = statements.iter().map(|s| s.entry_count).sum();
        prop_assert_eq!(counted, entries.len());
    }

    #[test]
    fn shares_rebuild_totals_and_exclude_payer(
        amounts in prop::collection::vec(1u32..=150, 0..=30),
        payers in prop::collection::vec(0usize..5, 30),
        masks in prop::collection::vec(1u8..32, 30),
    ) {
        let entries = build_entries(&amounts, &payers, &masks);
        for statement in compute_settlements(&entries).expect("valid entries") {
            let rebuilt = statement.amount_owed_per_share * statement.share_count as f64;
            prop_assert!((rebuilt - statement.total_paid).abs() <= 1e-9 * statement.total_paid);
            prop_assert!(!statement.owed_by.contains(&statement.payer));
            match &statement.owed_by {
                Debtors::NoOne => {
                    prop_assert_eq!(statement.participants.clone(), vec![statement.payer.clone()])
                }
                Debtors::People(names) => {
                    let expected: Vec<String> = statement
                        .participants
                        .iter()
                        .filter(|p| **p != statement.payer)
                        .cloned()
                        .collect();
                    prop_assert_eq!(names.clone(), expected);
                }
            }
        }
    }

    #[test]
    fn participant_order_does_not_matter(
        amounts in prop::collection::vec(1u32..=150, 0..=30),
        payers in prop::collection::vec(0usize..5, 30),
        masks in prop::collection::vec(1u8..32, 30),
    ) {
        let entries = build_entries(&amounts, &payers, &masks);
        let reversed: Vec<ExpenseEntry> = entries
            .iter()
            .cloned()
            .map(|mut e| {
                e.participants.reverse();
                e
            })
            .collect();

        let first = compute_settlements(&entries).expect("valid entries");
        prop_assert_eq!(&first, &compute_settlements(&entries).expect("valid entries"));
        prop_assert_eq!(first, compute_settlements(&reversed).expect("valid entries"));
    }
}

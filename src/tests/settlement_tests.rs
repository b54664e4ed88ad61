use crate::core::models::Debtors;
use crate::tests::{create_test_service, names, service_with_people};

#[tokio::test]
async fn test_settle_without_entries() {
    let service = create_test_service();
    assert!(service.settle().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settle_groups_by_participant_set() {
    let service = service_with_people(&["Ana", "Ben", "Cy"]).await;
    service.add_entry("Ana", 30.0, names(&["Ana", "Ben", "Cy"])).await.unwrap();
    service.add_entry("Ben", 10.0, names(&["Ana", "Ben"])).await.unwrap();
    service.add_entry("Ana", 15.0, names(&["Cy", "Ben", "Ana"])).await.unwrap();
    service.add_entry("Ana", 8.0, names(&["Ben", "Ana"])).await.unwrap();
    service.add_entry("Cy", 9.0, names(&["Cy"])).await.unwrap();

    let statements = service.settle().await.unwrap();
    let summary: Vec<(&str, String, String)> = statements
        .iter()
        .map(|s| (s.payer.as_str(), s.rounded_amount(), s.owed_by.to_string()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Ana", "15.00".to_string(), "Ben, Cy".to_string()),
            ("Ben", "5.00".to_string(), "Ana".to_string()),
            ("Ana", "4.00".to_string(), "Ben".to_string()),
            ("Cy", "9.00".to_string(), "No one".to_string()),
        ]
    );
    assert_eq!(statements[3].owed_by, Debtors::NoOne);
}

#[tokio::test]
async fn test_settle_is_repeatable_and_read_only() {
    let service = service_with_people(&["Ana", "Ben"]).await;
    service.add_entry("Ana", 10.0, names(&["Ana", "Ben"])).await.unwrap();
    service.add_entry("Ben", 10.0, names(&["Ben", "Ana"])).await.unwrap();

    let before = service.list_entries().await.unwrap();
    let first = service.settle().await.unwrap();
    let second = service.settle().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(service.list_entries().await.unwrap(), before);

    // Mutual debts stand alone.
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].amount_owed_per_share, 5.0);
    assert_eq!(first[1].amount_owed_per_share, 5.0);
}

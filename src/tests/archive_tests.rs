use crate::constants::DATA_ARCHIVED;
use crate::core::errors::MealsplitError;
use crate::tests::{names, service_with_people};

#[tokio::test]
async fn test_clear_without_entries_archives_nothing() {
    let service = service_with_people(&["Ana"]).await;
    assert!(service.clear_data().await.unwrap().is_none());
    assert!(service.list_archives().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_archives_and_resets() {
    let service = service_with_people(&["Ana", "Ben"]).await;
    service.add_entry("Ana", 24.0, names(&["Ana", "Ben"])).await.unwrap();
    service.add_entry("Ben", 6.0, names(&["Ben"])).await.unwrap();

    let name = service.clear_data().await.unwrap().unwrap();
    assert!(name.ends_with('Z'));
    assert!(!name.contains(':'));
    assert!(service.list_entries().await.unwrap().is_empty());
    assert!(service.settle().await.unwrap().is_empty());
    assert_eq!(service.list_archives().await.unwrap(), vec![name.clone()]);

    let archived = service.load_archive(&name).await.unwrap();
    assert_eq!(archived.len(), 2);

    let statements = service.settle_archive(&name).await.unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].rounded_amount(), "12.00");

    // People survive a clear.
    assert_eq!(service.list_people().await.unwrap().len(), 2);

    let logs = service.get_app_logs().await.unwrap();
    let archived_log = logs.iter().find(|l| l.action == DATA_ARCHIVED).unwrap();
    assert_eq!(archived_log.details["entries"], 2);
}

#[tokio::test]
async fn test_missing_archive() {
    let service = service_with_people(&["Ana"]).await;
    let result = service.load_archive("1999-01-01T00-00-00.000Z").await;
    assert!(matches!(result, Err(MealsplitError::ArchiveNotFound(_))));
    let result = service.settle_archive("1999-01-01T00-00-00.000Z").await;
    assert!(matches!(result, Err(MealsplitError::ArchiveNotFound(_))));
}

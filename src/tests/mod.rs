mod archive_tests;
mod settlement_tests;

use crate::core::services::MealsplitService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub const TEST_MAX_AMOUNT: f64 = 150.0;

pub fn create_test_service() -> MealsplitService<InMemoryLogging, InMemoryStorage> {
    let _ = env_logger::builder().is_test(true).try_init();
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    MealsplitService::new(storage, logging, TEST_MAX_AMOUNT)
}

pub async fn service_with_people(names: &[&str]) -> MealsplitService<InMemoryLogging, InMemoryStorage> {
    let service = create_test_service();
    for name in names {
        service.add_person(name).await.unwrap();
    }
    service
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

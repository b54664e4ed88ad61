// Activity log actions
pub const PERSON_ADDED: &str = "PERSON_ADDED";
pub const PERSON_REMOVED: &str = "PERSON_REMOVED";
pub const ENTRY_ADDED: &str = "ENTRY_ADDED";
pub const ENTRY_DELETED: &str = "ENTRY_DELETED";
pub const DATA_ARCHIVED: &str = "DATA_ARCHIVED";

pub const MAX_NAME_LENGTH: usize = 50;

// Data directory layout
pub const ENTRIES_FILE: &str = "data.json";
pub const PEOPLE_FILE: &str = "people.json";
pub const ACTIVITY_FILE: &str = "activity.json";
pub const ARCHIVE_DIR: &str = "previous-data";
pub const ARCHIVE_NAME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3fZ";

// doc constants
pub const DOC_ID: &str = "id";

// store constants
pub const SEQUENCE_TABLE: &str = "$doodle_sequences";
pub const INDEX_SUFFIX: &str = "_index";
pub const INDEX_NAME_SEPARATOR: &str = "_";
pub const IN_MEMORY_LOCATION_PREFIX: &str = "memory:";

// result messages
pub const PUSH_SUCCESS_MESSAGE: &str = "New data has been added to the JSON file successfully!";
pub const UPDATE_SUCCESS_MESSAGE: &str = "JSON file has been updated successfully!";

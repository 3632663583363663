use std::env;

/// Name given to the single section every migrated question group carries.
pub const DEFAULT_SECTION_NAME: &str = "Misc";
/// Display order of the default section.
pub const DEFAULT_ORDER: i32 = 0;
/// Version stamped on every migrated question group instance.
pub const DEFAULT_VERSION: i32 = 0;
/// Separator packing several chosen values into one legacy multi-select answer.
pub const MULTI_SELECT_DELIMITER: char = ',';
pub const DEFAULT_EVENT_FOR_CUSTOM_FIELDS: &str = "Create";
pub const DEFAULT_EVENT_FOR_SURVEYS: &str = "View";
/// Title template for question groups built from custom fields, `{}` is
/// replaced by the event source description, e.g. "Create Client".
pub const QUESTION_GROUP_TITLE_FOR_ADDITIONAL_FIELDS: &str = "Additional Fields for {}";
/// chrono format used when a date answer is rendered as response text.
pub const DATE_RESPONSE_FORMAT: &str = "%d/%m/%Y";

/// Initializes and Holds envrionment variable settings which
/// control system behavior. Panics if a setting is present
/// but cannot be parsed.
#[derive(Debug)]
pub struct EnvConfigSettings {
    pub db_url: Option<String>,
    pub run_db_migrations: bool,
}

impl EnvConfigSettings {
    pub fn init() -> Self {
        let db_url = env::var("DATABASE_URL").ok();
        let run_db_migrations = env::var("RUN_DB_MIGRATIONS")
            .unwrap_or("false".to_string())
            .parse::<bool>()
            .expect("Unable to parse RUN_DB_MIGRATIONS configuration as boolean!");

        Self {
            db_url,
            run_db_migrations,
        }
    }
}

/// Renders [QUESTION_GROUP_TITLE_FOR_ADDITIONAL_FIELDS] for an event source description.
pub fn additional_fields_title(event_source_description: &str) -> String {
    QUESTION_GROUP_TITLE_FOR_ADDITIONAL_FIELDS.replace("{}", event_source_description)
}

#[cfg(test)]
mod tests {
    use super::additional_fields_title;

    #[test]
    fn additional_fields_title_test() {
        assert_eq!(
            "Additional Fields for Create Group",
            additional_fields_title("Create Group")
        );
    }
}

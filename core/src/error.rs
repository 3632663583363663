use std::{error::Error, fmt, result};

pub type Result<T, E = MigrationError> = result::Result<T, E>;

#[derive(Debug, PartialEq)]
pub enum MigrationError {
    InvalidInput(String),
    LookupNotFound {
        section_name: String,
        question_id: i32,
        question_group_id: i32,
    },
    DbError(String),
    SerDe(String),
}

impl Error for MigrationError {}

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MigrationError::InvalidInput(s) => write!(f, "Invalid migration input: {}", s),
            MigrationError::LookupNotFound {
                section_name,
                question_id,
                question_group_id,
            } => write!(
                f,
                "No section question found for section '{}', question {} in question group {}",
                section_name, question_id, question_group_id
            ),
            MigrationError::DbError(s) => write!(f, "Database related error: {}", s),
            MigrationError::SerDe(s) => write!(f, "SerDe related error: {}", s),
        }
    }
}

impl From<diesel::result::Error> for MigrationError {
    fn from(e: diesel::result::Error) -> Self {
        MigrationError::DbError(e.to_string())
    }
}

impl From<diesel::result::ConnectionError> for MigrationError {
    fn from(e: diesel::result::ConnectionError) -> Self {
        MigrationError::DbError(e.to_string())
    }
}

impl From<serde_json::Error> for MigrationError {
    fn from(e: serde_json::Error) -> Self {
        MigrationError::SerDe(e.to_string())
    }
}

impl From<serde_yaml::Error> for MigrationError {
    fn from(e: serde_yaml::Error) -> Self {
        MigrationError::SerDe(e.to_string())
    }
}

impl From<std::io::Error> for MigrationError {
    fn from(e: std::io::Error) -> Self {
        MigrationError::SerDe(e.to_string())
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conf::{DEFAULT_ORDER, DEFAULT_SECTION_NAME};

/// Question types understood by the questionnaire subsystem.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Invalid,
    Freetext,
    Date,
    Numeric,
    SingleSelect,
    MultiSelect,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChoiceDto {
    pub order: i32,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionDto {
    pub title: String,
    pub question_type: QuestionType,
    pub mandatory: bool,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub choices: Vec<ChoiceDto>,
}

impl QuestionDto {
    pub fn new(
        title: impl Into<String>,
        question_type: QuestionType,
        mandatory: bool,
        order: i32,
    ) -> Self {
        Self {
            title: title.into(),
            question_type,
            mandatory,
            order,
            min_value: None,
            max_value: None,
            choices: vec![],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SectionDto {
    pub name: String,
    pub order: i32,
    pub questions: Vec<QuestionDto>,
}

impl Default for SectionDto {
    /// The single section migrated question groups are built around.
    fn default() -> Self {
        Self {
            name: DEFAULT_SECTION_NAME.to_string(),
            order: DEFAULT_ORDER,
            questions: vec![],
        }
    }
}

/// The event (e.g. "Create") and record type (e.g. "Client") a question group
/// is attached to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventSourceDto {
    pub event: String,
    pub source: String,
    pub description: String,
}

impl EventSourceDto {
    pub fn new(event: &str, source: &str) -> Self {
        Self {
            event: event.to_string(),
            source: source.to_string(),
            description: format!("{} {}", event, source),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionGroupDto {
    pub title: String,
    pub event_source: EventSourceDto,
    pub editable: bool,
    pub ppi: bool,
    pub sections: Vec<SectionDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionGroupResponseDto {
    pub section_question_id: i32,
    pub response: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionGroupInstanceDto {
    pub date_conducted: NaiveDate,
    pub completed: bool,
    pub creator_id: i32,
    /// Customer or account the responses belong to, 0 when neither
    pub entity_id: i32,
    pub question_group_id: i32,
    pub version: i32,
    pub responses: Vec<QuestionGroupResponseDto>,
}

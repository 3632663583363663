use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{MigrationError, Result};
use crate::model::custom_field::{CustomFieldType, EntityType};
use crate::model::questionnaire::QuestionType;
use crate::model::survey::{AnswerType, SurveyType};

static CUSTOM_FIELD_TYPE_TO_QUESTION_TYPE: Lazy<HashMap<CustomFieldType, QuestionType>> =
    Lazy::new(|| {
        HashMap::from([
            (CustomFieldType::None, QuestionType::Invalid),
            (CustomFieldType::AlphaNumeric, QuestionType::Freetext),
            (CustomFieldType::Numeric, QuestionType::Numeric),
            (CustomFieldType::Date, QuestionType::Date),
        ])
    });

static ENTITY_TYPE_TO_SOURCE: Lazy<HashMap<EntityType, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (EntityType::Client, "Client"),
        (EntityType::Group, "Group"),
        (EntityType::Center, "Center"),
    ])
});

static SURVEY_TYPE_TO_SOURCE: Lazy<HashMap<SurveyType, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (SurveyType::Client, "Client"),
        (SurveyType::Group, "Group"),
        (SurveyType::Center, "Center"),
    ])
});

static ANSWER_TYPE_TO_QUESTION_TYPE: Lazy<HashMap<AnswerType, QuestionType>> = Lazy::new(|| {
    HashMap::from([
        (AnswerType::Invalid, QuestionType::Invalid),
        (AnswerType::FreeText, QuestionType::Freetext),
        (AnswerType::Date, QuestionType::Date),
        (AnswerType::Number, QuestionType::Numeric),
        (AnswerType::SingleSelect, QuestionType::SingleSelect),
        (AnswerType::Choice, QuestionType::SingleSelect),
        (AnswerType::MultiSelect, QuestionType::MultiSelect),
    ])
});

pub(crate) fn question_type_for_custom_field(
    field_type: CustomFieldType,
) -> Result<QuestionType> {
    CUSTOM_FIELD_TYPE_TO_QUESTION_TYPE
        .get(&field_type)
        .copied()
        .ok_or_else(|| {
            MigrationError::InvalidInput(format!(
                "no question type for custom field type {field_type:?}"
            ))
        })
}

pub(crate) fn source_for_entity_type(entity_type: EntityType) -> Result<&'static str> {
    ENTITY_TYPE_TO_SOURCE
        .get(&entity_type)
        .copied()
        .ok_or_else(|| {
            MigrationError::InvalidInput(format!(
                "no event source for entity type {entity_type:?}"
            ))
        })
}

pub(crate) fn source_for_survey_type(survey_type: SurveyType) -> Result<&'static str> {
    SURVEY_TYPE_TO_SOURCE
        .get(&survey_type)
        .copied()
        .ok_or_else(|| {
            MigrationError::InvalidInput(format!(
                "no event source for survey type {survey_type:?}"
            ))
        })
}

pub(crate) fn question_type_for_answer(answer_type: AnswerType) -> Result<QuestionType> {
    ANSWER_TYPE_TO_QUESTION_TYPE
        .get(&answer_type)
        .copied()
        .ok_or_else(|| {
            MigrationError::InvalidInput(format!(
                "no question type for answer type {answer_type:?}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_answers_become_single_select() {
        assert_eq!(
            Ok(QuestionType::SingleSelect),
            question_type_for_answer(AnswerType::Choice)
        );
    }

    #[test]
    fn only_customer_records_have_sources() {
        assert_eq!(Ok("Center"), source_for_entity_type(EntityType::Center));
        assert_eq!(
            Err(MigrationError::InvalidInput(
                "no event source for entity type Loan".to_string()
            )),
            source_for_entity_type(EntityType::Loan)
        );
        assert!(matches!(
            source_for_survey_type(SurveyType::All),
            Err(MigrationError::InvalidInput(_))
        ));
    }
}

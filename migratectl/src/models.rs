use qmigrate::lookup::SectionQuestionDeclaration;
use qmigrate::model::custom_field::CustomFieldDefinition;
use qmigrate::model::questionnaire::{QuestionGroupDto, QuestionGroupInstanceDto};
use qmigrate::model::survey::SurveyInstance;
use serde::{Deserialize, Serialize};

/// The custom fields of one or more legacy forms.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub(crate) struct CustomFieldsDeclaration {
    pub(crate) custom_fields: Vec<CustomFieldDefinition>,
}

/// A filled in survey together with the id of the question group its survey
/// was migrated to.
#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub(crate) struct SurveyInstanceDeclaration {
    pub(crate) question_group_id: i32,
    pub(crate) instance: SurveyInstance,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub(crate) struct SectionQuestionsDeclaration {
    pub(crate) section_questions: Vec<SectionQuestionDeclaration>,
}

/// Everything produced by one run, written out as JSON.
#[derive(Serialize, Deserialize, PartialEq, Debug, Default)]
pub(crate) struct MigrationReport {
    pub(crate) question_groups: Vec<QuestionGroupDto>,
    pub(crate) question_group_instances: Vec<QuestionGroupInstanceDto>,
}

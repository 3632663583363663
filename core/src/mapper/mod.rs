//! Translates legacy custom field and survey records into the question group
//! representation of the questionnaire subsystem.

use crate::conf::{
    additional_fields_title, DEFAULT_EVENT_FOR_CUSTOM_FIELDS, DEFAULT_EVENT_FOR_SURVEYS,
    DEFAULT_SECTION_NAME, DEFAULT_VERSION, MULTI_SELECT_DELIMITER,
};
use crate::error::{MigrationError, Result};
use crate::lookup::SectionQuestionLookup;
use crate::model::custom_field::{CustomFieldDefinition, EntityType};
use crate::model::questionnaire::{
    ChoiceDto, EventSourceDto, QuestionDto, QuestionGroupDto, QuestionGroupInstanceDto,
    QuestionGroupResponseDto, SectionDto,
};
use crate::model::survey::{
    AnswerType, QuestionChoice, Survey, SurveyAnswer, SurveyInstance, SurveyQuestion,
    SurveyResponse, SurveyTarget,
};

mod tables;

use tables::{
    question_type_for_answer, question_type_for_custom_field, source_for_entity_type,
    source_for_survey_type,
};

/// Holds the [SectionQuestionLookup] used to place migrated responses and
/// implements the legacy to questionnaire mappings. Every mapping builds a
/// fresh DTO graph and leaves its input untouched.
pub struct QuestionnaireMigrationMapper<L> {
    lookup: L,
}

impl<L> QuestionnaireMigrationMapper<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Maps one custom field to a question placed at `order`.
    pub fn map_question(
        &self,
        custom_field: &CustomFieldDefinition,
        order: i32,
    ) -> Result<QuestionDto> {
        Ok(QuestionDto::new(
            custom_field.label.clone(),
            question_type_for_custom_field(custom_field.field_type)?,
            custom_field.mandatory,
            order,
        ))
    }

    /// Builds a single section question group from the custom fields of one
    /// form. The owning entity type of the first field decides the event source
    /// for the whole group.
    pub fn map_from_custom_fields(
        &self,
        custom_fields: &[CustomFieldDefinition],
    ) -> Result<QuestionGroupDto> {
        let first = custom_fields.first().ok_or_else(|| {
            MigrationError::InvalidInput(
                "at least one custom field is required to build a question group".to_string(),
            )
        })?;

        let mut section = SectionDto::default();
        for (i, custom_field) in custom_fields.iter().enumerate() {
            section
                .questions
                .push(self.map_question(custom_field, i as i32)?);
        }

        let source = source_for_entity_type(EntityType::from_id(first.entity_type)?)?;
        let event_source = EventSourceDto::new(DEFAULT_EVENT_FOR_CUSTOM_FIELDS, source);
        Ok(QuestionGroupDto {
            title: additional_fields_title(&event_source.description),
            event_source,
            editable: false,
            ppi: false,
            sections: vec![section],
        })
    }

    pub fn map_from_survey(&self, survey: &Survey) -> Result<QuestionGroupDto> {
        let source = source_for_survey_type(survey.applies_to)?;

        let mut section = SectionDto::default();
        for (i, survey_question) in survey.questions.iter().enumerate() {
            section
                .questions
                .push(map_survey_question(survey_question, i as i32)?);
        }

        Ok(QuestionGroupDto {
            title: survey.name.clone(),
            event_source: EventSourceDto::new(DEFAULT_EVENT_FOR_SURVEYS, source),
            editable: false,
            ppi: false,
            sections: vec![section],
        })
    }
}

impl<L: SectionQuestionLookup> QuestionnaireMigrationMapper<L> {
    /// Maps a survey instance onto the question group `question_group_id` the
    /// survey was migrated to. Responses keep their order, a multi-select
    /// response expands in place to one response per chosen value.
    pub async fn map_question_group_instance(
        &mut self,
        survey_instance: &SurveyInstance,
        question_group_id: i32,
    ) -> Result<QuestionGroupInstanceDto> {
        let responses = self
            .map_to_question_group_responses(survey_instance, question_group_id)
            .await?;
        Ok(QuestionGroupInstanceDto {
            date_conducted: survey_instance.date_conducted,
            completed: survey_instance.completed,
            creator_id: i32::from(survey_instance.creator_id),
            entity_id: map_to_entity_id(survey_instance),
            question_group_id,
            version: DEFAULT_VERSION,
            responses,
        })
    }

    async fn map_to_question_group_responses(
        &mut self,
        survey_instance: &SurveyInstance,
        question_group_id: i32,
    ) -> Result<Vec<QuestionGroupResponseDto>> {
        let mut responses = Vec::new();
        for survey_response in survey_instance.responses.iter() {
            if survey_response.question.answer_type != AnswerType::MultiSelect {
                let section_question_id = self
                    .section_question_id(question_group_id, survey_response.question.question_id)
                    .await?;
                responses.push(QuestionGroupResponseDto {
                    section_question_id,
                    response: survey_response.to_string(),
                });
            } else {
                responses.extend(
                    self.map_multi_select_response(question_group_id, survey_response)
                        .await?,
                );
            }
        }
        Ok(responses)
    }

    async fn map_multi_select_response(
        &mut self,
        question_group_id: i32,
        survey_response: &SurveyResponse,
    ) -> Result<Vec<QuestionGroupResponseDto>> {
        let multi_select_value = match &survey_response.answer {
            SurveyAnswer::MultiSelect(v) if !v.is_empty() => v,
            SurveyAnswer::MultiSelect(_) | SurveyAnswer::Empty => return Ok(vec![]),
            other => {
                return Err(MigrationError::InvalidInput(format!(
                    "multi-select question {} holds a {:?} answer",
                    survey_response.question.question_id, other
                )))
            }
        };
        let section_question_id = self
            .section_question_id(question_group_id, survey_response.question.question_id)
            .await?;
        Ok(multi_select_value
            .split(MULTI_SELECT_DELIMITER)
            .filter(|answer| !answer.is_empty())
            .map(|answer| QuestionGroupResponseDto {
                section_question_id,
                response: answer.to_string(),
            })
            .collect())
    }

    async fn section_question_id(
        &mut self,
        question_group_id: i32,
        question_id: i32,
    ) -> Result<i32> {
        self.lookup
            .resolve_section_question_ids(DEFAULT_SECTION_NAME, question_id, question_group_id)
            .await?
            .first()
            .copied()
            .ok_or_else(|| MigrationError::LookupNotFound {
                section_name: DEFAULT_SECTION_NAME.to_string(),
                question_id,
                question_group_id,
            })
    }
}

/// Customer id or account id of the instance target, 0 when it has neither.
pub fn map_to_entity_id(survey_instance: &SurveyInstance) -> i32 {
    match survey_instance.target {
        SurveyTarget::Customer(customer_id) => customer_id,
        SurveyTarget::Account(account_id) => account_id,
        SurveyTarget::NoTarget => 0,
    }
}

fn map_survey_question(survey_question: &SurveyQuestion, order: i32) -> Result<QuestionDto> {
    let question = &survey_question.question;
    let mut question_dto = QuestionDto::new(
        question.short_name.clone(),
        question_type_for_answer(question.answer_type)?,
        survey_question.mandatory,
        order,
    );
    match question.answer_type {
        AnswerType::Number => {
            question_dto.min_value = question.numeric_min;
            question_dto.max_value = question.numeric_max;
        }
        AnswerType::SingleSelect | AnswerType::MultiSelect | AnswerType::Choice => {
            question_dto.choices = map_choices(&question.choices);
        }
        AnswerType::Invalid | AnswerType::FreeText | AnswerType::Date => (),
    }
    Ok(question_dto)
}

fn map_choices(choices: &[QuestionChoice]) -> Vec<ChoiceDto> {
    choices
        .iter()
        .enumerate()
        .map(|(i, choice)| ChoiceDto {
            order: i as i32,
            value: choice.choice_text.clone(),
        })
        .collect()
}

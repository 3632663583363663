use std::io::Read;
use std::iter;
use std::path::PathBuf;

use itertools::Itertools;
use qmigrate::error::Result;
use qmigrate::lookup::{InMemorySectionQuestions, SectionQuestionLookup};
use qmigrate::mapper::QuestionnaireMigrationMapper;
use qmigrate::model::custom_field::CustomFieldDefinition;
use qmigrate::model::questionnaire::{QuestionGroupDto, QuestionGroupInstanceDto};
use qmigrate::model::survey::Survey;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::models::{
    CustomFieldsDeclaration, MigrationReport, SectionQuestionsDeclaration,
    SurveyInstanceDeclaration,
};

pub(crate) fn process_custom_field_configs<L>(
    mapper: &QuestionnaireMigrationMapper<L>,
    path: PathBuf,
) -> Result<Vec<QuestionGroupDto>> {
    let custom_fields = read_declarations::<CustomFieldsDeclaration>(path)
        .into_iter()
        .flat_map(|(_, decl)| decl.custom_fields)
        .collect_vec();

    let mut question_groups = vec![];
    for fields in group_by_entity_type(custom_fields) {
        let question_group = mapper.map_from_custom_fields(&fields)?;
        info!(
            "Mapped {} custom fields to question group '{}'",
            fields.len(),
            question_group.title
        );
        question_groups.push(question_group);
    }
    Ok(question_groups)
}

pub(crate) fn process_survey_configs<L>(
    mapper: &QuestionnaireMigrationMapper<L>,
    path: PathBuf,
) -> Result<Vec<QuestionGroupDto>> {
    let mut question_groups = vec![];
    for (filepath, survey) in read_declarations::<Survey>(path) {
        let question_group = mapper.map_from_survey(&survey)?;
        info!(
            "Mapped survey '{}' from {} with {} questions",
            survey.name,
            filepath,
            survey.questions.len()
        );
        question_groups.push(question_group);
    }
    Ok(question_groups)
}

pub(crate) async fn process_instance_configs<L: SectionQuestionLookup>(
    mapper: &mut QuestionnaireMigrationMapper<L>,
    path: PathBuf,
) -> Result<Vec<QuestionGroupInstanceDto>> {
    let mut instances = vec![];
    for (filepath, decl) in read_declarations::<SurveyInstanceDeclaration>(path) {
        let instance = mapper
            .map_question_group_instance(&decl.instance, decl.question_group_id)
            .await?;
        info!(
            "Mapped survey instance from {} to {} responses of question group {}",
            filepath,
            instance.responses.len(),
            decl.question_group_id
        );
        instances.push(instance);
    }
    Ok(instances)
}

pub(crate) fn load_section_questions(path: PathBuf) -> InMemorySectionQuestions {
    read_declarations::<SectionQuestionsDeclaration>(path)
        .into_iter()
        .flat_map(|(_, decl)| decl.section_questions)
        .collect()
}

/// Runs every declaration kind that was requested through the mapper.
pub(crate) async fn migrate<L: SectionQuestionLookup>(
    mapper: &mut QuestionnaireMigrationMapper<L>,
    custom_fields: Option<PathBuf>,
    surveys: Option<PathBuf>,
    instances: Option<PathBuf>,
) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    if let Some(p) = custom_fields {
        report
            .question_groups
            .extend(process_custom_field_configs(mapper, p)?);
    }

    if let Some(p) = surveys {
        report
            .question_groups
            .extend(process_survey_configs(mapper, p)?);
    }

    if let Some(p) = instances {
        report
            .question_group_instances
            .extend(process_instance_configs(mapper, p).await?);
    }

    Ok(report)
}

/// Splits custom fields into one list per owning entity type, each ordered by
/// the position of the field within its form. Lists are ordered by entity type id.
pub(crate) fn group_by_entity_type(
    custom_fields: Vec<CustomFieldDefinition>,
) -> Vec<Vec<CustomFieldDefinition>> {
    custom_fields
        .into_iter()
        .into_group_map_by(|field| field.entity_type)
        .into_iter()
        .sorted_by_key(|(entity_type, _)| *entity_type)
        .map(|(_, fields)| fields.into_iter().sorted_by_key(|f| f.ordinal).collect())
        .collect()
}

/// Parses all declarations found by recursively walking the provided path. Files or
/// documents which cannot be parsed are logged and skipped.
fn read_declarations<T: DeserializeOwned>(path: PathBuf) -> Vec<(String, T)> {
    walk_directory(path)
        .filter_map(|filepath| match std::fs::File::open(&filepath) {
            Ok(f) => {
                let filename = filepath.to_string_lossy().to_string();
                let decls = parse_documents::<T, _>(std::io::BufReader::new(f), &filename);
                Some(iter::repeat(filename).zip(decls).collect_vec())
            }
            Err(e) => {
                warn!(
                    "Unable to open file at {} with error {e}",
                    filepath.to_string_lossy()
                );
                None
            }
        })
        .flatten()
        .collect()
}

fn parse_documents<T: DeserializeOwned, R: Read>(reader: R, filename: &str) -> Vec<T> {
    let mut obj = vec![];
    for document in serde_yaml::Deserializer::from_reader(reader) {
        match serde_yaml::with::singleton_map_recursive::deserialize(document) {
            Ok(decl) => obj.push(decl),
            Err(e) => {
                warn!(
                    "Unable to deserialize object as YAML from file {} with error {}",
                    filename, e,
                );
            }
        }
    }
    obj
}

fn walk_directory(dir: PathBuf) -> impl Iterator<Item = PathBuf> {
    let walk = walkdir::WalkDir::new(dir).sort_by_file_name();
    walk.into_iter().filter_map(|r| match r {
        Err(e) => {
            warn!("Error walking directory: {}", e);
            None
        }
        Ok(entry) if entry.path().is_dir() => None,
        Ok(entry) => Some(entry.path().to_owned()),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use qmigrate::error::Result;
    use qmigrate::lookup::InMemorySectionQuestions;
    use qmigrate::mapper::QuestionnaireMigrationMapper;
    use qmigrate::model::custom_field::{CustomFieldDefinition, CustomFieldType};
    use qmigrate::model::survey::{AnswerType, Survey, SurveyAnswer, SurveyTarget, SurveyType};

    use crate::models::{SectionQuestionsDeclaration, SurveyInstanceDeclaration};

    use super::{group_by_entity_type, load_section_questions, parse_documents, read_declarations};

    const SURVEY_YAML: &str = r#"
name: Client poverty survey
applies_to: CLIENT
questions:
  - question:
      question_id: 11
      short_name: Household size
      answer_type: NUMBER
      numeric_min: 1
      numeric_max: 20
    mandatory: true
  - question:
      question_id: 12
      short_name: Assets owned
      answer_type: MULTISELECT
      choices:
        - choice_text: Radio
        - choice_text: Bicycle
---
name: Broken survey
applies_to: NOWHERE
questions: []
"#;

    const INSTANCE_YAML: &str = r#"
question_group_id: 4
instance:
  date_conducted: 2010-11-30
  completed: true
  creator_id: 1
  target:
    customer: 42
  responses:
    - question:
        question_id: 11
        short_name: Household size
        answer_type: NUMBER
      answer:
        number: 6
    - question:
        question_id: 12
        short_name: Assets owned
        answer_type: MULTISELECT
      answer:
        multi_select: Radio,,Bicycle
"#;

    const SECTION_QUESTIONS_YAML: &str = r#"
section_questions:
  - section_name: Misc
    question_id: 11
    question_group_id: 4
    section_question_id: 21
  - section_name: Misc
    question_id: 12
    question_group_id: 4
    section_question_id: 22
"#;

    fn field(label: &str, entity_type: i16, ordinal: i32) -> CustomFieldDefinition {
        CustomFieldDefinition {
            label: label.to_string(),
            mandatory: false,
            field_type: CustomFieldType::AlphaNumeric,
            entity_type,
            ordinal,
        }
    }

    #[test]
    fn unparsable_documents_are_skipped() {
        let surveys = parse_documents::<Survey, _>(SURVEY_YAML.as_bytes(), "surveys.yaml");
        assert_eq!(1, surveys.len());
        assert_eq!(SurveyType::Client, surveys[0].applies_to);
        assert!(surveys[0].questions[0].mandatory);
        assert_eq!(
            AnswerType::MultiSelect,
            surveys[0].questions[1].question.answer_type
        );
    }

    #[test]
    fn custom_fields_grouped_per_entity_type() {
        let groups = group_by_entity_type(vec![
            field("Meeting day", 20, 0),
            field("Spouse", 1, 1),
            field("External id", 1, 0),
            field("Loan officer notes", 12, 0),
        ]);
        let labels = groups
            .iter()
            .map(|fields| fields.iter().map(|f| f.label.as_str()).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                vec!["External id", "Spouse"],
                vec!["Loan officer notes"],
                vec!["Meeting day"],
            ],
            labels
        );
    }

    #[tokio::test]
    async fn missing_declaration_path_reads_as_nothing() {
        let path = PathBuf::from("/nonexistent/qmigrate/section_questions");
        assert!(read_declarations::<Survey>(path.clone()).is_empty());

        let mut mapper = QuestionnaireMigrationMapper::new(load_section_questions(path));
        let decl = parse_documents::<SurveyInstanceDeclaration, _>(
            INSTANCE_YAML.as_bytes(),
            "instances.yaml",
        )
        .remove(0);
        assert!(mapper
            .map_question_group_instance(&decl.instance, decl.question_group_id)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn instance_declaration_maps_with_declared_section_questions() -> Result<()> {
        let mut decls = parse_documents::<SurveyInstanceDeclaration, _>(
            INSTANCE_YAML.as_bytes(),
            "instances.yaml",
        );
        assert_eq!(1, decls.len());
        let decl = decls.remove(0);
        assert_eq!(SurveyTarget::Customer(42), decl.instance.target);
        assert_eq!(
            SurveyAnswer::MultiSelect("Radio,,Bicycle".to_string()),
            decl.instance.responses[1].answer
        );

        let lookup: InMemorySectionQuestions = parse_documents::<SectionQuestionsDeclaration, _>(
            SECTION_QUESTIONS_YAML.as_bytes(),
            "section_questions.yaml",
        )
        .into_iter()
        .flat_map(|d| d.section_questions)
        .collect();
        let mut mapper = QuestionnaireMigrationMapper::new(lookup);

        let dto = mapper
            .map_question_group_instance(&decl.instance, decl.question_group_id)
            .await?;
        assert_eq!(42, dto.entity_id);
        assert_eq!(
            vec![(21, "6"), (22, "Radio"), (22, "Bicycle")],
            dto.responses
                .iter()
                .map(|r| (r.section_question_id, r.response.as_str()))
                .collect::<Vec<_>>()
        );
        Ok(())
    }
}

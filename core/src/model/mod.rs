pub mod custom_field;
pub mod questionnaire;
pub mod survey;

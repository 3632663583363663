use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conf::DATE_RESPONSE_FORMAT;

/// The kind of record a [Survey] is conducted against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurveyType {
    Customer,
    Client,
    Group,
    Center,
    Loan,
    Savings,
    All,
}

/// How a legacy [Question] expects to be answered.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnswerType {
    Invalid,
    FreeText,
    Date,
    Number,
    SingleSelect,
    MultiSelect,
    Choice,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionChoice {
    pub choice_text: String,
    /// Legacy display order, not carried over when choices are migrated
    #[serde(default)]
    pub order: Option<i32>,
}

impl QuestionChoice {
    pub fn new(choice_text: impl Into<String>) -> Self {
        Self {
            choice_text: choice_text.into(),
            order: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    pub question_id: i32,
    pub short_name: String,
    pub answer_type: AnswerType,
    #[serde(default)]
    pub numeric_min: Option<i32>,
    #[serde(default)]
    pub numeric_max: Option<i32>,
    #[serde(default)]
    pub choices: Vec<QuestionChoice>,
}

/// Placement of a [Question] within a [Survey].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SurveyQuestion {
    pub question: Question,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub order: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Survey {
    pub name: String,
    pub applies_to: SurveyType,
    pub questions: Vec<SurveyQuestion>,
}

/// The record a [SurveyInstance] was filled in for. Customer and account
/// targets exclude each other.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurveyTarget {
    Customer(i32),
    Account(i32),
    #[default]
    NoTarget,
}

/// The stored value of one answered question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurveyAnswer {
    FreeText(String),
    Number(f64),
    Date(NaiveDate),
    Choice(QuestionChoice),
    /// Chosen values packed with [MULTI_SELECT_DELIMITER][crate::conf::MULTI_SELECT_DELIMITER]
    MultiSelect(String),
    #[default]
    Empty,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SurveyResponse {
    pub question: Question,
    #[serde(default)]
    pub answer: SurveyAnswer,
}

impl fmt::Display for SurveyResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.answer {
            SurveyAnswer::FreeText(s) => write!(f, "{}", s),
            SurveyAnswer::Number(n) => write!(f, "{}", n),
            SurveyAnswer::Date(d) => write!(f, "{}", d.format(DATE_RESPONSE_FORMAT)),
            SurveyAnswer::Choice(c) => write!(f, "{}", c.choice_text),
            SurveyAnswer::MultiSelect(s) => write!(f, "{}", s),
            SurveyAnswer::Empty => Ok(()),
        }
    }
}

/// A completed or in-progress response to a [Survey].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SurveyInstance {
    pub date_conducted: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    pub creator_id: i16,
    #[serde(default)]
    pub target: SurveyTarget,
    #[serde(default)]
    pub responses: Vec<SurveyResponse>,
}

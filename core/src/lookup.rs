use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Resolves where a question was placed when its question group was saved.
#[async_trait]
pub trait SectionQuestionLookup: Send {
    /// Returns the ids of the section questions which join `question_id` to the
    /// section named `section_name` of question group `question_group_id`,
    /// ordered by id. An empty result means the question was never placed.
    async fn resolve_section_question_ids(
        &mut self,
        section_name: &str,
        question_id: i32,
        question_group_id: i32,
    ) -> Result<Vec<i32>>;
}

/// A single placement of a question in a saved question group, as declared in
/// a section question file.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct SectionQuestionDeclaration {
    pub section_name: String,
    pub question_id: i32,
    pub question_group_id: i32,
    pub section_question_id: i32,
}

type SectionQuestionKey = (String, i32, i32);

/// Holds section question placements in memory. Used when no database is
/// available and as a stand in for [PgDb][crate::crud::PgDb] in tests.
#[derive(Debug, Default, Clone)]
pub struct InMemorySectionQuestions {
    placements: HashMap<SectionQuestionKey, Vec<i32>>,
}

impl InMemorySectionQuestions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        section_name: &str,
        question_id: i32,
        question_group_id: i32,
        section_question_id: i32,
    ) {
        let ids = self
            .placements
            .entry((section_name.to_string(), question_id, question_group_id))
            .or_default();
        ids.push(section_question_id);
        ids.sort_unstable();
    }
}

impl FromIterator<SectionQuestionDeclaration> for InMemorySectionQuestions {
    fn from_iter<T: IntoIterator<Item = SectionQuestionDeclaration>>(iter: T) -> Self {
        let mut lookup = InMemorySectionQuestions::new();
        for decl in iter {
            lookup.insert(
                &decl.section_name,
                decl.question_id,
                decl.question_group_id,
                decl.section_question_id,
            );
        }
        lookup
    }
}

#[async_trait]
impl SectionQuestionLookup for InMemorySectionQuestions {
    async fn resolve_section_question_ids(
        &mut self,
        section_name: &str,
        question_id: i32,
        question_group_id: i32,
    ) -> Result<Vec<i32>> {
        Ok(self
            .placements
            .get(&(section_name.to_string(), question_id, question_group_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Result;

    use super::{InMemorySectionQuestions, SectionQuestionDeclaration, SectionQuestionLookup};

    #[tokio::test]
    async fn resolves_declared_placements_in_id_order() -> Result<()> {
        let mut lookup: InMemorySectionQuestions = vec![
            SectionQuestionDeclaration {
                section_name: "Misc".to_string(),
                question_id: 4,
                question_group_id: 2,
                section_question_id: 31,
            },
            SectionQuestionDeclaration {
                section_name: "Misc".to_string(),
                question_id: 4,
                question_group_id: 2,
                section_question_id: 17,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(
            vec![17, 31],
            lookup.resolve_section_question_ids("Misc", 4, 2).await?
        );
        assert!(lookup
            .resolve_section_question_ids("Misc", 4, 3)
            .await?
            .is_empty());
        Ok(())
    }
}

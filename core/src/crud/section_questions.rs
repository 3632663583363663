use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::error::Result;
use crate::lookup::SectionQuestionLookup;
use crate::schema;

use super::PgDb;

impl<'a> PgDb<'a> {
    pub async fn get_section_question_ids(
        &mut self,
        section_name_val: &str,
        question_id_val: i32,
        question_group_id_val: i32,
    ) -> Result<Vec<i32>> {
        use schema::sections::dsl as section;
        use schema::sections_questions::dsl as section_question;

        let ids = section_question::sections_questions
            .inner_join(section::sections)
            .filter(
                section::name.eq(section_name_val).and(
                    section_question::question_id
                        .eq(question_id_val)
                        .and(section::question_group_id.eq(question_group_id_val)),
                ),
            )
            .select(section_question::id)
            .order(section_question::id.asc())
            .load::<i32>(&mut self.con)
            .await?;

        debug!(
            "Found {} section questions for question {} of question group {} in section {}",
            ids.len(),
            question_id_val,
            question_group_id_val,
            section_name_val
        );
        Ok(ids)
    }
}

#[async_trait]
impl<'a> SectionQuestionLookup for PgDb<'a> {
    async fn resolve_section_question_ids(
        &mut self,
        section_name: &str,
        question_id: i32,
        question_group_id: i32,
    ) -> Result<Vec<i32>> {
        self.get_section_question_ids(section_name, question_id, question_group_id)
            .await
    }
}

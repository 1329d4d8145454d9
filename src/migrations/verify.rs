//! Post-migration verification.
//!
//! Re-reads the legacy tree and checks that every topic and question exists
//! under the course with the fields a migration would have written. Nothing
//! is written.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::migrations::defaults::{
    has_created_at, normalize_question, normalize_topic, CREATED_AT,
};
use crate::migrations::{CourseLayout, QUESTIONS, TOPIC_COUNT};
use crate::models::Timestamp;
use crate::store::{fields_of, Document, DocumentReader, Fields, QueryExt};

/// A difference between the legacy tree and the course tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VerifyIssue {
    MissingCourse {
        course_id: String,
    },
    TopicCountMismatch {
        expected: u64,
        actual: Option<JsonValue>,
    },
    MissingTopic {
        topic_id: String,
    },
    MissingQuestion {
        topic_id: String,
        question_id: String,
    },
    FieldMismatch {
        path: String,
        field: String,
        expected: JsonValue,
        actual: Option<JsonValue>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReport {
    pub checked_topics: u64,
    pub checked_questions: u64,
    pub issues: Vec<VerifyIssue>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Compares a legacy collection with its migrated course.
pub struct CourseVerifier<'a, R> {
    reader: &'a R,
}

impl<'a, R: DocumentReader> CourseVerifier<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    pub async fn verify(
        &self,
        legacy_collection: &str,
        course_id: &str,
    ) -> Result<VerifyReport, AppError> {
        let layout = CourseLayout::new(legacy_collection, course_id)?;
        let mut report = VerifyReport::default();

        let topics = self.reader.collection(&layout.legacy).fetch_all().await?;

        match self.reader.get_document(&layout.course).await? {
            None => report.issues.push(VerifyIssue::MissingCourse {
                course_id: course_id.to_string(),
            }),
            Some(course) => {
                let expected = topics.len() as u64;
                let count = course.get_opt::<u64>(TOPIC_COUNT).ok().flatten();
                if count != Some(expected) {
                    report.issues.push(VerifyIssue::TopicCountMismatch {
                        expected,
                        actual: course.get_raw(TOPIC_COUNT).cloned(),
                    });
                }
            }
        }

        for legacy_topic in &topics {
            report.checked_topics += 1;
            let target = layout.topics.doc(legacy_topic.id())?;
            let Some(migrated) = self.reader.get_document(&target).await? else {
                report.issues.push(VerifyIssue::MissingTopic {
                    topic_id: legacy_topic.id().to_string(),
                });
                continue;
            };
            let expected = fields_of(&normalize_topic(legacy_topic.fields(), Timestamp::now()))?;
            compare(&mut report, legacy_topic, &migrated, &expected, &["title", "description"]);

            let source_questions = legacy_topic.path().collection(QUESTIONS)?;
            let questions = self.reader.collection(&source_questions).fetch_all().await?;
            let target_questions = target.collection(QUESTIONS)?;
            for legacy_question in &questions {
                report.checked_questions += 1;
                let path = target_questions.doc(legacy_question.id())?;
                let Some(migrated) = self.reader.get_document(&path).await? else {
                    report.issues.push(VerifyIssue::MissingQuestion {
                        topic_id: legacy_topic.id().to_string(),
                        question_id: legacy_question.id().to_string(),
                    });
                    continue;
                };
                let expected =
                    fields_of(&normalize_question(legacy_question.fields(), Timestamp::now()))?;
                compare(&mut report, legacy_question, &migrated, &expected, &["question", "answer"]);
            }
        }

        tracing::info!(
            "Verified {} topics and {} questions: {} issues",
            report.checked_topics,
            report.checked_questions,
            report.issues.len()
        );
        Ok(report)
    }
}

/// Records a mismatch for each differing field. `createdAt` is only checked
/// when the legacy document had one, since defaulted values differ per run.
fn compare(
    report: &mut VerifyReport,
    legacy: &Document,
    migrated: &Document,
    expected: &Fields,
    text_fields: &[&str],
) {
    let mut fields: Vec<&str> = text_fields.to_vec();
    if has_created_at(legacy.fields()) {
        fields.push(CREATED_AT);
    }

    for field in fields {
        let want = expected.get(field).cloned().unwrap_or(JsonValue::Null);
        let got = migrated.get_raw(field);
        if got != Some(&want) {
            report.issues.push(VerifyIssue::FieldMismatch {
                path: migrated.path().to_string(),
                field: field.to_string(),
                expected: want,
                actual: got.cloned(),
            });
        }
    }
}

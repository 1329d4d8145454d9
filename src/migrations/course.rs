//! Legacy topic tree to course tree migration.

use futures::{stream, TryStreamExt};
use serde::Deserialize;

use crate::error::AppError;
use crate::migrations::defaults::{normalize_question, normalize_topic};
use crate::migrations::result::{MigrationOutcome, MigrationResult, Tally};
use crate::migrations::{CourseLayout, QUESTIONS, TOPIC_COUNT};
use crate::models::{Course, CourseMetadata, Timestamp};
use crate::store::{
    fields_of, Batch as _, Document, DocumentClient, DocumentWriter, Fields, QueryExt, SetOptions,
};

/// How the course document's `topicCount` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TopicCountPolicy {
    /// Written once, before any topic is copied, from the number of legacy
    /// topics read. Overstates the count if the run fails part-way.
    #[default]
    SourceSnapshot,
    /// Written as `0` with the course, then merged with the number of topics
    /// actually copied once the loop completes.
    Written,
}

/// How migration writes reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Each write is committed as it is issued. A failure leaves every
    /// earlier write in place.
    #[default]
    Direct,
    /// All writes go through one batch, committed at the end and rolled back
    /// on the first failure.
    Batched,
    /// Like `Batched`, but always rolled back.
    DryRun,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationOptions {
    pub topic_count: TopicCountPolicy,
    pub write_mode: WriteMode,
}

/// Copies a flat legacy topic collection into `courses/{course}/topics`.
///
/// Topic and question ids are preserved. The legacy tree is only read.
pub struct CourseMigrator<'a, C: DocumentClient> {
    client: &'a C,
    options: MigrationOptions,
    now: Option<Timestamp>,
}

impl<'a, C: DocumentClient> CourseMigrator<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self::with_options(client, MigrationOptions::default())
    }

    pub fn with_options(client: &'a C, options: MigrationOptions) -> Self {
        Self {
            client,
            options,
            now: None,
        }
    }

    /// Pins the timestamp used for `createdAt` values this run generates.
    pub fn at(mut self, now: Timestamp) -> Self {
        self.now = Some(now);
        self
    }

    /// Runs the migration, reporting every failure in the returned result.
    pub async fn migrate(
        &self,
        legacy_collection: &str,
        course_id: &str,
        metadata: &CourseMetadata,
    ) -> MigrationResult {
        tracing::info!(
            "Starting migration from '{}' to course '{}' ({:?})",
            legacy_collection,
            course_id,
            self.options
        );

        match self.try_migrate(legacy_collection, course_id, metadata).await {
            Ok(outcome) => {
                match &outcome {
                    MigrationOutcome::NothingToMigrate => {
                        tracing::warn!("No topics found in '{}'", legacy_collection)
                    }
                    MigrationOutcome::Migrated(tally) => tracing::info!(
                        "Migration completed: {} topics, {} questions; '{}' is left in place",
                        tally.topics,
                        tally.questions,
                        legacy_collection
                    ),
                    MigrationOutcome::DryRun(tally) => tracing::info!(
                        "Dry run completed: {} topics, {} questions staged and discarded",
                        tally.topics,
                        tally.questions
                    ),
                }
                MigrationResult::from_outcome(&outcome, legacy_collection)
            }
            Err(e) => {
                tracing::error!("Migration failed: {}", e);
                MigrationResult::failed(&e)
            }
        }
    }

    /// Runs the migration, propagating the first failure.
    pub async fn try_migrate(
        &self,
        legacy_collection: &str,
        course_id: &str,
        metadata: &CourseMetadata,
    ) -> Result<MigrationOutcome, AppError> {
        let layout = CourseLayout::new(legacy_collection, course_id)?;

        let topics = self.client.collection(&layout.legacy).fetch_all().await?;
        if topics.is_empty() {
            return Ok(MigrationOutcome::NothingToMigrate);
        }
        tracing::info!("Found {} topics to migrate", topics.len());

        let now = self.now.unwrap_or_else(Timestamp::now);

        match self.options.write_mode {
            WriteMode::Direct => {
                let tally = self
                    .copy_tree(self.client, &layout, metadata, topics, now)
                    .await?;
                Ok(MigrationOutcome::Migrated(tally))
            }
            mode @ (WriteMode::Batched | WriteMode::DryRun) => {
                let batch = self.client.begin().await?;
                match self.copy_tree(&batch, &layout, metadata, topics, now).await {
                    Ok(tally) if mode == WriteMode::DryRun => {
                        batch.rollback().await?;
                        Ok(MigrationOutcome::DryRun(tally))
                    }
                    Ok(tally) => {
                        batch.commit().await?;
                        Ok(MigrationOutcome::Migrated(tally))
                    }
                    Err(e) => {
                        tracing::error!("Migration of '{}' failed, rolling back: {}", layout.course, e);
                        batch.rollback().await?;
                        Err(e)
                    }
                }
            }
        }
    }

    /// Writes the course document and every topic with its questions.
    ///
    /// Topics are processed strictly one after another, in listing order.
    async fn copy_tree<W>(
        &self,
        writer: &W,
        layout: &CourseLayout,
        metadata: &CourseMetadata,
        topics: Vec<Document>,
        now: Timestamp,
    ) -> Result<Tally, AppError>
    where
        W: DocumentWriter + ?Sized,
    {
        let total = topics.len();
        let initial_count = match self.options.topic_count {
            TopicCountPolicy::SourceSnapshot => total as u64,
            TopicCountPolicy::Written => 0,
        };
        let course = Course::new(&layout.course_id, metadata, now, initial_count);
        writer
            .set_document(&layout.course, fields_of(&course)?, SetOptions::REPLACE)
            .await?;
        tracing::info!("Created course '{}'", layout.course);

        let tally = stream::iter(topics.into_iter().map(Ok::<_, AppError>))
            .try_fold(Tally::default(), |tally, topic| async move {
                let questions = self.copy_topic(writer, layout, &topic, now).await?;
                let tally = tally.record_topic(questions);
                tracing::info!("Migrated topic {}/{}: {}", tally.topics, total, topic.id());
                Ok(tally)
            })
            .await?;

        if self.options.topic_count == TopicCountPolicy::Written {
            let mut count = Fields::new();
            count.insert(TOPIC_COUNT.to_string(), tally.topics.into());
            writer
                .set_document(&layout.course, count, SetOptions::MERGE)
                .await?;
        }

        Ok(tally)
    }

    /// Copies one topic and its questions, returning the question count.
    async fn copy_topic<W>(
        &self,
        writer: &W,
        layout: &CourseLayout,
        legacy_topic: &Document,
        now: Timestamp,
    ) -> Result<u64, AppError>
    where
        W: DocumentWriter + ?Sized,
    {
        let topic = normalize_topic(legacy_topic.fields(), now);
        tracing::debug!("Migrating topic: {}", topic.title);

        let target = layout.topics.doc(legacy_topic.id())?;
        writer
            .set_document(&target, fields_of(&topic)?, SetOptions::REPLACE)
            .await?;

        let source_questions = legacy_topic.path().collection(QUESTIONS)?;
        let questions = self.client.collection(&source_questions).fetch_all().await?;
        tracing::debug!("  Found {} questions", questions.len());

        let target_questions = target.collection(QUESTIONS)?;
        for legacy_question in &questions {
            let question = normalize_question(legacy_question.fields(), now);
            writer
                .set_document(
                    &target_questions.doc(legacy_question.id())?,
                    fields_of(&question)?,
                    SetOptions::REPLACE,
                )
                .await?;
        }

        Ok(questions.len() as u64)
    }
}

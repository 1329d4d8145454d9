//! Result values handed back to whoever triggered a migration or seed.

use serde::Serialize;

use crate::error::AppError;

/// Running totals of a migration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub topics: u64,
    pub questions: u64,
}

impl Tally {
    /// Counts one more topic and the questions copied with it.
    pub fn record_topic(self, questions: u64) -> Self {
        Self {
            topics: self.topics + 1,
            questions: self.questions + questions,
        }
    }
}

/// What a migration run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The legacy collection was empty; nothing was written.
    NothingToMigrate,
    /// Every legacy topic and question was copied.
    Migrated(Tally),
    /// Everything was staged and then discarded.
    DryRun(Tally),
}

/// Flat result of a migration, as shown to an administrator.
///
/// Failures carry only the error message, never partial counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrated_topics: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrated_questions: Option<u64>,
}

impl MigrationResult {
    pub fn from_outcome(outcome: &MigrationOutcome, legacy_collection: &str) -> Self {
        match outcome {
            MigrationOutcome::NothingToMigrate => Self {
                success: false,
                message: Some(format!(
                    "No existing topics found in '{}' to migrate",
                    legacy_collection
                )),
                error: None,
                migrated_topics: None,
                migrated_questions: None,
            },
            MigrationOutcome::Migrated(tally) => Self::counted(
                format!(
                    "Successfully migrated {} topics and {} questions",
                    tally.topics, tally.questions
                ),
                tally,
            ),
            MigrationOutcome::DryRun(tally) => Self::counted(
                format!(
                    "Dry run: would migrate {} topics and {} questions",
                    tally.topics, tally.questions
                ),
                tally,
            ),
        }
    }

    pub fn failed(error: &AppError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
            migrated_topics: None,
            migrated_questions: None,
        }
    }

    fn counted(message: String, tally: &Tally) -> Self {
        Self {
            success: true,
            message: Some(message),
            error: None,
            migrated_topics: Some(tally.topics),
            migrated_questions: Some(tally.questions),
        }
    }
}

/// What a seed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Course ids written, in descriptor order.
    pub created: Vec<String>,
    /// Course ids left alone because they already existed.
    pub skipped: Vec<String>,
}

/// Flat result of a seed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl SeedResult {
    pub fn from_report(report: SeedReport) -> Self {
        let message = if report.skipped.is_empty() {
            "Sample courses created successfully".to_string()
        } else {
            format!(
                "Created {} sample courses, skipped {} that already exist",
                report.created.len(),
                report.skipped.len()
            )
        };
        Self {
            success: true,
            message: Some(message),
            error: None,
            created: report.created,
            skipped: report.skipped,
        }
    }

    pub fn failed(error: &AppError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
            created: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

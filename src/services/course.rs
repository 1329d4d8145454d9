//! Course service driving migrations from configuration.

use std::sync::Arc;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::migrations::{
    CourseMigrator, CourseVerifier, MigrationResult, SampleCourseSeeder, SeedResult, VerifyReport,
};
use crate::store::backends::memory::InMemoryStore;

/// Service for the administrative course operations.
///
/// Reads legacy collection, course id, course metadata, policies and the
/// sample course list from [`Config`].
#[derive(FromContext, Clone)]
pub struct CourseService {
    store: InMemoryStore,
    config: Arc<Config>,
}

impl CourseService {
    /// Migrate the configured legacy collection into the configured course.
    pub async fn migrate(&self) -> MigrationResult {
        let migration = &self.config.migration;
        CourseMigrator::with_options(&self.store, migration.options())
            .migrate(
                &migration.legacy_collection,
                &migration.course_id,
                &migration.course,
            )
            .await
    }

    /// Create the configured sample courses.
    pub async fn seed(&self) -> SeedResult {
        let seed = &self.config.seed;
        SampleCourseSeeder::new(&self.store, seed.mode())
            .seed(&seed.courses)
            .await
    }

    /// Compare the configured legacy collection with its course.
    pub async fn verify(&self) -> Result<VerifyReport, AppError> {
        let migration = &self.config.migration;
        CourseVerifier::new(&self.store)
            .verify(&migration.legacy_collection, &migration.course_id)
            .await
    }
}

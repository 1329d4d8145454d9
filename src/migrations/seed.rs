//! Placeholder course seeding.

use crate::error::AppError;
use crate::migrations::result::{SeedReport, SeedResult};
use crate::migrations::COURSES;
use crate::models::{Course, CourseDescriptor, Timestamp};
use crate::store::{fields_of, CollectionPath, DocumentReader, DocumentWriter, SetOptions};

/// What to do when a course document already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Leave existing courses untouched.
    #[default]
    SkipExisting,
    /// Replace existing courses, resetting `topicCount` to `0`. This wipes
    /// the count of a course that already has migrated content.
    Overwrite,
}

impl SeedMode {
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            Self::Overwrite
        } else {
            Self::SkipExisting
        }
    }
}

/// Creates empty placeholder courses from a fixed list of descriptors.
pub struct SampleCourseSeeder<'a, S> {
    store: &'a S,
    mode: SeedMode,
}

impl<'a, S> SampleCourseSeeder<'a, S>
where
    S: DocumentReader + DocumentWriter,
{
    pub fn new(store: &'a S, mode: SeedMode) -> Self {
        Self { store, mode }
    }

    /// Seeds every descriptor, reporting failure in the returned result.
    pub async fn seed(&self, descriptors: &[CourseDescriptor]) -> SeedResult {
        tracing::info!(
            "Creating {} sample courses ({:?})",
            descriptors.len(),
            self.mode
        );
        match self.try_seed(descriptors).await {
            Ok(report) => SeedResult::from_report(report),
            Err(e) => {
                tracing::error!("Error creating courses: {}", e);
                SeedResult::failed(&e)
            }
        }
    }

    /// Seeds descriptors in order, stopping at the first failed write.
    pub async fn try_seed(&self, descriptors: &[CourseDescriptor]) -> Result<SeedReport, AppError> {
        let courses = CollectionPath::root(COURSES)?;
        let now = Timestamp::now();
        let mut report = SeedReport::default();

        for descriptor in descriptors {
            let path = courses.doc(&descriptor.id)?;

            if self.mode == SeedMode::SkipExisting
                && self.store.get_document(&path).await?.is_some()
            {
                tracing::info!("Course '{}' already exists, skipping", descriptor.id);
                report.skipped.push(descriptor.id.clone());
                continue;
            }

            let course = Course::placeholder(descriptor, now);
            self.store
                .set_document(&path, fields_of(&course)?, SetOptions::REPLACE)
                .await?;
            tracing::info!("Created course: {}", descriptor.name);
            report.created.push(descriptor.id.clone());
        }

        Ok(report)
    }
}

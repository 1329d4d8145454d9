//! Verify command handler.

use color_eyre::eyre::bail;
use color_eyre::Result;

use crate::di::FromRef;
use crate::services::CourseService;

use super::{print_json, App};

impl App {
    /// Run the verify command. Read-only; the store is not saved.
    pub async fn run_verify(&self, legacy: Option<&str>, course: Option<&str>) -> Result<()> {
        let ctx = self
            .load_context(|config| {
                if let Some(legacy) = legacy {
                    config.migration.legacy_collection = legacy.to_string();
                }
                if let Some(course) = course {
                    config.migration.course_id = course.to_string();
                }
            })
            .await?;

        let report = CourseService::from_ref(&ctx).verify().await?;

        print_json(&report)?;
        if !report.is_clean() {
            bail!("{} differences found", report.issues.len());
        }
        Ok(())
    }
}

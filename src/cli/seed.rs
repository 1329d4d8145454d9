//! Seed command handler.

use color_eyre::eyre::bail;
use color_eyre::Result;

use crate::di::FromRef;
use crate::services::CourseService;

use super::{print_json, App};

impl App {
    /// Run the seed command. `--overwrite` forces replacement even when the
    /// config says otherwise.
    pub async fn run_seed(&self, overwrite: bool) -> Result<()> {
        let ctx = self
            .load_context(|config| config.seed.overwrite |= overwrite)
            .await?;

        let result = CourseService::from_ref(&ctx).seed().await;
        self.save_store(&ctx).await?;

        print_json(&result)?;
        if !result.success {
            bail!("seeding did not complete");
        }
        Ok(())
    }
}

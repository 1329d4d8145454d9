//! Migrate command handler.

use color_eyre::eyre::bail;
use color_eyre::Result;

use crate::context::Context;
use crate::di::FromRef;
use crate::migrations::{TopicCountPolicy, WriteMode};
use crate::services::CourseService;

use super::{print_json, App};

impl App {
    /// Run the migrate command and save whatever it wrote.
    pub async fn run_migrate(
        &self,
        legacy: Option<&str>,
        course: Option<&str>,
        topic_count: Option<TopicCountPolicy>,
        mode: Option<WriteMode>,
    ) -> Result<()> {
        let ctx = self
            .load_context(|config| {
                let migration = &mut config.migration;
                if let Some(legacy) = legacy {
                    migration.legacy_collection = legacy.to_string();
                }
                if let Some(course) = course {
                    migration.course_id = course.to_string();
                }
                if let Some(policy) = topic_count {
                    migration.topic_count = policy;
                }
                if let Some(mode) = mode {
                    migration.write_mode = mode;
                }
            })
            .await?;

        self.migrate_in(&ctx).await
    }

    /// Migrates within an opened context, then saves the store unless the
    /// run was a dry run.
    async fn migrate_in(&self, ctx: &Context) -> Result<()> {
        let result = CourseService::from_ref(ctx).migrate().await;

        // Direct runs that fail part-way have still written documents
        if ctx.config.migration.write_mode != WriteMode::DryRun {
            self.save_store(ctx).await?;
        }

        print_json(&result)?;
        if !result.success {
            bail!("migration did not complete");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;
    use serial_test::serial;

    use super::*;
    use crate::cli::Command;
    use crate::config::Config;
    use crate::store::backends::memory::InMemoryStore;
    use crate::store::{snapshot, DocPath, DocumentWriter, Fields, SetOptions};

    fn app(dir: &Path) -> App {
        App {
            verbose: false,
            config: Some(dir.join("absent.toml")),
            store: Some(dir.join("store.json")),
            command: Command::Migrate {
                legacy: None,
                course: None,
                topic_count: None,
                mode: None,
            },
        }
    }

    async fn put(store: &InMemoryStore, path: &str, value: serde_json::Value) {
        let fields: Fields = serde_json::from_value(value).unwrap();
        store
            .set_document(&DocPath::parse(path).unwrap(), fields, SetOptions::REPLACE)
            .await
            .unwrap();
    }

    async fn legacy_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        put(&store, "legacy/t1", json!({"title": "Intro"})).await;
        put(
            &store,
            "legacy/t1/questions/q1",
            json!({"question": "What is X?", "answer": "X is Y"}),
        )
        .await;
        put(&store, "legacy/t2", json!({"title": "Advanced"})).await;
        store
    }

    fn context(store: InMemoryStore, dir: &Path, mode: WriteMode) -> Context {
        let mut config = Config::default();
        config.store.path = dir.join("store.json");
        config.migration.legacy_collection = "legacy".to_string();
        config.migration.write_mode = mode;
        Context::new(store, config)
    }

    async fn saved_paths(dir: &Path) -> Vec<String> {
        let store = snapshot::load(&dir.join("store.json")).unwrap();
        store
            .documents()
            .await
            .into_keys()
            .map(|p| p.to_string())
            .collect()
    }

    #[tokio::test]
    #[serial]
    async fn test_run_migrate_rewrites_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        snapshot::save(&legacy_store().await, &dir.path().join("store.json"))
            .await
            .unwrap();

        app(dir.path())
            .run_migrate(Some("legacy"), Some("java"), None, None)
            .await
            .unwrap();

        let paths = saved_paths(dir.path()).await;
        assert!(paths.contains(&"courses/java".to_string()));
        assert!(paths.contains(&"courses/java/topics/t1/questions/q1".to_string()));
        assert!(paths.contains(&"legacy/t1".to_string()));
    }

    #[tokio::test]
    #[serial]
    async fn test_run_migrate_fails_on_empty_source() {
        let dir = tempfile::tempdir().unwrap();

        let result = app(dir.path())
            .run_migrate(Some("legacy"), Some("java"), None, None)
            .await;

        assert!(result.is_err());
        assert!(saved_paths(dir.path()).await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_direct_run_saves_partial_tree() {
        let dir = tempfile::tempdir().unwrap();
        let store = legacy_store().await;
        store.deny_writes_under("courses/java/topics/t2").await.unwrap();
        let ctx = context(store, dir.path(), WriteMode::Direct);

        let result = app(dir.path()).migrate_in(&ctx).await;

        assert!(result.is_err());
        let paths = saved_paths(dir.path()).await;
        assert!(paths.contains(&"courses/java/topics/t1".to_string()));
        assert!(!paths.contains(&"courses/java/topics/t2".to_string()));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(legacy_store().await, dir.path(), WriteMode::DryRun);

        app(dir.path()).migrate_in(&ctx).await.unwrap();

        assert!(!dir.path().join("store.json").exists());
        assert_eq!(ctx.store.len().await, 3);
    }
}

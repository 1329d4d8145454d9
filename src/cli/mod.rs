//! CLI module for Curricula.
//!
//! Subcommands:
//! - `migrate`: Copy a legacy topic collection into a course
//! - `seed`: Create placeholder courses
//! - `verify`: Compare a legacy collection with its migrated course
//! - `ls`: List the documents of a collection

mod ls;
mod migrate;
mod seed;
mod verify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use serde::Serialize;

use crate::config::Config;
use crate::context::Context;
use crate::migrations::{TopicCountPolicy, WriteMode};
use crate::store::snapshot;

/// Curricula - course content migration
#[derive(Parser)]
#[command(name = "curricula")]
#[command(about = "Move flat topic collections into nested course trees")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project config file (default: .curricula.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Document snapshot file (overrides store.path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Migrate a legacy topic collection into a course
    Migrate {
        /// Legacy topic collection (overrides migration.legacy_collection)
        #[arg(long)]
        legacy: Option<String>,

        /// Destination course id (overrides migration.course_id)
        #[arg(long)]
        course: Option<String>,

        /// How the course topicCount is written
        #[arg(long, value_enum)]
        topic_count: Option<TopicCountPolicy>,

        /// How writes reach the store
        #[arg(long, value_enum)]
        mode: Option<WriteMode>,
    },

    /// Create the configured placeholder courses
    Seed {
        /// Replace courses that already exist
        #[arg(long)]
        overwrite: bool,
    },

    /// Check that a migrated course matches its legacy collection
    Verify {
        /// Legacy topic collection (overrides migration.legacy_collection)
        #[arg(long)]
        legacy: Option<String>,

        /// Course id (overrides migration.course_id)
        #[arg(long)]
        course: Option<String>,
    },

    /// List the documents in a collection
    Ls {
        /// Collection path, e.g. `courses` or `courses/java/topics`
        path: String,

        /// Order by this field
        #[arg(long)]
        order_by: Option<String>,

        /// Descending order (with --order-by)
        #[arg(long)]
        desc: bool,

        /// Maximum number of documents
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Migrate {
                ref legacy,
                ref course,
                topic_count,
                mode,
            } => {
                self.run_migrate(legacy.as_deref(), course.as_deref(), topic_count, mode)
                    .await
            }
            Command::Seed { overwrite } => self.run_seed(overwrite).await,
            Command::Verify {
                ref legacy,
                ref course,
            } => self.run_verify(legacy.as_deref(), course.as_deref()).await,
            Command::Ls {
                ref path,
                ref order_by,
                desc,
                limit,
            } => self.run_ls(path, order_by.as_deref(), desc, limit).await,
        }
    }

    /// Loads configuration, applies `overrides`, and opens the snapshot.
    async fn load_context(&self, overrides: impl FnOnce(&mut Config)) -> Result<Context> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(store) = &self.store {
            config.store.path = store.clone();
        }
        overrides(&mut config);

        tracing::info!("Opening store at {}", config.store.path.display());
        let store = snapshot::load(&config.store.path)?;
        Ok(Context::new(store, config))
    }

    /// Writes the context's store back to its snapshot file.
    async fn save_store(&self, ctx: &Context) -> Result<()> {
        snapshot::save(&ctx.store, &ctx.config.store.path).await?;
        tracing::info!("Saved store to {}", ctx.config.store.path.display());
        Ok(())
    }
}

/// Prints a result as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

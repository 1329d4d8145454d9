//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults (the original Java course and three sample courses)
//! 2. User config: `~/.config/curricula/config.toml` (XDG) or platform config dir
//! 3. Project config: `.curricula.toml`, or the file given with `--config`
//! 4. Environment variables: `CURRICULA_*`, nested keys separated by `__`
//!    (e.g. `CURRICULA_MIGRATION__COURSE_ID=kotlin`)
//!
//! # Example
//!
//! ```toml
//! [store]
//! path = "content.json"
//!
//! [migration]
//! legacy_collection = "kotlin_topics"
//! course_id = "kotlin"
//! topic_count = "written"
//! write_mode = "batched"
//!
//! [migration.course]
//! name = "Kotlin"
//! description = "Modern JVM development"
//! icon = "K"
//! color = "#7f52ff"
//!
//! [seed]
//! overwrite = false
//!
//! [[seed.courses]]
//! id = "go"
//! name = "Go"
//! description = "Concurrency made simple"
//! icon = "G"
//! color = "#00add8"
//! slug = "go"
//! ```

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::migrations::{MigrationOptions, SeedMode, TopicCountPolicy, WriteMode};
use crate::models::{CourseDescriptor, CourseMetadata};

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".curricula.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CURRICULA_";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub migration: MigrationConfig,
    pub seed: SeedConfig,
}

/// Where the document snapshot lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON snapshot file read before and written after each command.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("curricula.json"),
        }
    }
}

/// Source, destination and behavior of the course migration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Legacy flat topic collection.
    pub legacy_collection: String,
    /// Destination course slug.
    pub course_id: String,
    /// Display fields of the destination course.
    pub course: CourseMetadata,
    pub topic_count: TopicCountPolicy,
    pub write_mode: WriteMode,
}

impl MigrationConfig {
    pub fn options(&self) -> MigrationOptions {
        MigrationOptions {
            topic_count: self.topic_count,
            write_mode: self.write_mode,
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            legacy_collection: "java_topics".to_string(),
            course_id: "java".to_string(),
            course: CourseMetadata {
                name: "Java Programming".to_string(),
                description: "Master Java from basics to advanced concepts. Learn object-oriented programming, data structures, and build real-world applications.".to_string(),
                icon: "☕".to_string(),
                color: "#f89820".to_string(),
            },
            topic_count: TopicCountPolicy::default(),
            write_mode: WriteMode::default(),
        }
    }
}

/// Placeholder courses to create.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Replace courses that already exist.
    pub overwrite: bool,
    pub courses: Vec<CourseDescriptor>,
}

impl SeedConfig {
    pub fn mode(&self) -> SeedMode {
        SeedMode::from_overwrite(self.overwrite)
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        let course = |id: &str, name: &str, description: &str, icon: &str, color: &str| {
            CourseDescriptor {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                icon: icon.to_string(),
                color: color.to_string(),
                slug: id.to_string(),
            }
        };

        Self {
            overwrite: false,
            courses: vec![
                course(
                    "python",
                    "Python Programming",
                    "Learn Python from scratch. Master data science, web development, and automation with Python.",
                    "🐍",
                    "#3776ab",
                ),
                course(
                    "javascript",
                    "JavaScript Mastery",
                    "Become a JavaScript expert. Learn modern ES6+, React, Node.js, and build full-stack applications.",
                    "⚡",
                    "#f7df1e",
                ),
                course(
                    "data-structures",
                    "Data Structures & Algorithms",
                    "Master fundamental data structures and algorithms. Prepare for technical interviews and competitive programming.",
                    "🌳",
                    "#4caf50",
                ),
            ],
        }
    }
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    ///
    /// `project_config` replaces the default `.curricula.toml` lookup.
    pub fn load(project_config: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(project_config)
            .extract()
            .map_err(ConfigError::from)
    }

    /// The layered figment, before extraction.
    pub fn figment(project_config: Option<&Path>) -> Figment {
        let project = project_config
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));

        Figment::new()
            // Layer 1: User config (lowest priority, defaults come from serde)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(project))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// User config path: ~/.config/curricula/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("curricula").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("curricula").join("config.toml"))
            .unwrap_or_default()
    }
}

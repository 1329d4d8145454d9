//! Curricula - Course Content Migration
//!
//! Moves flat legacy topic collections into nested course trees in a
//! hierarchical document store, and seeds placeholder courses.

pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod migrations;
pub mod models;
pub mod services;
pub mod store;

// Re-export FromRef at crate root alongside the context it resolves from
pub use di::FromRef;

//! Backend implementations for document stores.
//!
//! Each backend implements the core traits from [`crate::store::traits`]:
//!
//! - [`DocumentReader`](crate::store::DocumentReader) - Required
//! - [`DocumentWriter`](crate::store::DocumentWriter) - Required
//! - [`Batch`](crate::store::Batch) - Required for the batch type
//! - [`DocumentClient`](crate::store::DocumentClient) - Required
//!
//! # Available Backends
//!
//! | Backend | Module | Status |
//! |---------|--------|--------|
//! | In-process map (+ JSON snapshots) | [`memory`] | Available |
//! | Hosted document database | `remote` | Future |

pub mod memory;

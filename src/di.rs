//! Dependency injection.
//!
//! Services resolve what they need from the application
//! [`Context`](crate::context::Context) through [`FromRef`]. The impls are
//! generated:
//!
//! - `#[derive(Context)]` on the root makes each of its fields a `FromRef`
//!   source
//! - `#[derive(FromContext)]` on a service fills every field from the
//!   context
//!
//! ```ignore
//! let ctx = Context::new(store, config);
//! let service = CourseService::from_ref(&ctx);
//! ```

/// Extracts a value from a reference to `T`.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// A cloneable value can always be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

pub use di_macros::{Context, FromContext};

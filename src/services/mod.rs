//! Business logic services.
//!
//! Services orchestrate the migration building blocks and are resolved from
//! the application context via `FromRef`.

mod course;

pub use course::CourseService;

//! Domain models for course content.

mod course;
mod timestamp;
mod topic;

pub use course::{Course, CourseDescriptor, CourseMetadata};
pub use timestamp::Timestamp;
pub use topic::{Question, Topic};

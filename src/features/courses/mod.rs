//! Course listing feature: API client, held collection and card view models.
//! The listing owns no presentation beyond the card policy: a course without
//! seats is flagged sold out and its action is disabled.

pub mod client;
pub mod listing;
pub mod types;

pub use client::{CourseSource, HttpCourseSource};
pub use listing::{CourseListing, Courses, ListingError};
pub use types::{CardStyle, CourseCard, CourseRecord};

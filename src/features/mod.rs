//! Domain features (registration, course listing) and their shared logic. The
//! CLI imports these modules so its actions stay focused on input and output.

pub mod auth;
pub mod courses;

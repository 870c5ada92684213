use crate::app::AppConfig;
use crate::features::courses::{CourseCard, CourseListing, HttpCourseSource};
use anyhow::{Context, Result};
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
}

/// Fetches the course list once and prints one card per course.
/// # Errors
/// Returns an error if the endpoint is invalid or the fetch fails.
pub async fn execute(args: Args) -> Result<()> {
    let endpoint = args
        .config
        .courses_endpoint()
        .context("invalid course endpoint")?;
    let listing = CourseListing::new(Arc::new(HttpCourseSource::new(endpoint)?));

    let courses = listing.load_courses().await?;
    let count = courses.len();
    if count == 0 {
        println!("No classes available.");
        return Ok(());
    }

    for course in courses {
        println!("{}\n", CourseCard::from(&course));
    }

    Ok(())
}

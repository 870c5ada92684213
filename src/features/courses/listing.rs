//! Held course collection for one listing view.
//!
//! Every activation performs exactly one fetch and replaces the collection
//! wholesale; there is no merge and no pagination. A failed fetch keeps the
//! previous contents. Activations are numbered so a slow response cannot
//! overwrite the result of a newer activation or repopulate a deactivated view.

use super::client::CourseSource;
use super::types::{CourseCard, CourseRecord};
use crate::app::AppError;
use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to fetch courses: {0}")]
    Fetch(AppError),
    #[error("course listing superseded by a newer activation")]
    Superseded,
}

impl ListingError {
    /// Fetch failures are only logged; the view keeps its previous state.
    #[must_use]
    pub fn is_unhandled(&self) -> bool {
        matches!(self, ListingError::Fetch(_))
    }
}

/// Finite, one-shot sequence of fetched courses. Consuming it does not refetch.
#[derive(Debug)]
pub struct Courses {
    inner: std::vec::IntoIter<CourseRecord>,
}

impl Iterator for Courses {
    type Item = CourseRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Courses {}

pub struct CourseListing {
    source: Arc<dyn CourseSource>,
    records: RwLock<Vec<CourseRecord>>,
    generation: AtomicU64,
}

impl CourseListing {
    #[must_use]
    pub fn new(source: Arc<dyn CourseSource>) -> Self {
        Self {
            source,
            records: RwLock::new(Vec::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetches once and replaces the held collection.
    ///
    /// # Errors
    /// Returns `Fetch` when the request fails (the collection is untouched) or
    /// `Superseded` when a newer activation or a deactivation happened first.
    pub async fn activate(&self) -> Result<usize, ListingError> {
        self.refresh().await.map(|fetched| fetched.len())
    }

    /// Activates and hands out the fetched courses as a one-shot sequence.
    ///
    /// # Errors
    /// Same as [`CourseListing::activate`].
    pub async fn load_courses(&self) -> Result<Courses, ListingError> {
        let fetched = self.refresh().await?;
        Ok(Courses {
            inner: fetched.into_iter(),
        })
    }

    /// Stores the response of this activation and returns it.
    async fn refresh(&self) -> Result<Vec<CourseRecord>, ListingError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let fetched = match self.source.fetch_courses().await {
            Ok(fetched) => fetched,
            Err(err) => {
                error!(error = %err, "Error fetching courses");
                return Err(ListingError::Fetch(err));
            }
        };

        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "dropping stale course response");
            return Err(ListingError::Superseded);
        }

        records.clone_from(&fetched);
        info!(count = fetched.len(), "course listing refreshed");
        Ok(fetched)
    }

    /// Drops the held collection and invalidates in-flight activations.
    pub fn deactivate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn records(&self) -> Vec<CourseRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn cards(&self) -> Vec<CourseCard> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(CourseCard::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::courses::types::CardStyle;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn record(name: &str, seats: u32) -> CourseRecord {
        CourseRecord {
            name: name.to_string(),
            instructor: "Jane".to_string(),
            available_seats: seats,
            price: 10.0,
            image: format!("http://img/{name}.png"),
        }
    }

    /// Serves queued responses in order and counts requests.
    #[derive(Default)]
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Vec<CourseRecord>, AppError>>>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Vec<CourseRecord>, AppError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl CourseSource for ScriptedSource {
        async fn fetch_courses(&self) -> Result<Vec<CourseRecord>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    #[tokio::test]
    async fn cards_follow_seat_policy() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![
            record("Yoga", 0),
            record("Chess", 5),
        ])]));
        let listing = CourseListing::new(source);

        assert!(matches!(listing.activate().await, Ok(2)));

        let cards = listing.cards();
        assert_eq!(cards[0].name, "Yoga");
        assert_eq!(cards[0].style, CardStyle::SoldOut);
        assert!(!cards[0].action_enabled);
        assert_eq!(cards[1].name, "Chess");
        assert_eq!(cards[1].style, CardStyle::Standard);
        assert!(cards[1].action_enabled);
    }

    #[tokio::test]
    async fn reactivation_fetches_once_and_replaces() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![record("Yoga", 0), record("Chess", 5)]),
            Ok(vec![record("Pottery", 3)]),
        ]));
        let listing = CourseListing::new(source.clone());

        assert!(listing.activate().await.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        assert!(listing.activate().await.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(listing.records(), vec![record("Pottery", 3)]);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_collection() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![record("Chess", 5)]),
            Err(AppError::Network("connection refused".to_string())),
        ]));
        let listing = CourseListing::new(source);

        assert!(listing.activate().await.is_ok());
        let result = listing.activate().await;

        let Err(err) = result else {
            panic!("expected fetch failure");
        };
        assert!(err.is_unhandled());
        assert_eq!(listing.records(), vec![record("Chess", 5)]);
    }

    #[tokio::test]
    async fn load_courses_yields_each_record_once() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![
            record("Yoga", 0),
            record("Chess", 5),
        ])]));
        let listing = CourseListing::new(source.clone());

        let Ok(mut courses) = listing.load_courses().await else {
            panic!("load should succeed");
        };
        assert_eq!(courses.len(), 2);
        assert_eq!(courses.next().map(|course| course.name), Some("Yoga".to_string()));
        assert_eq!(courses.next().map(|course| course.name), Some("Chess".to_string()));
        assert!(courses.next().is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn deactivated_listing_ignores_late_response() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(ScriptedSource {
            gate: Some(gate.clone()),
            ..ScriptedSource::new(vec![Ok(vec![record("Yoga", 0)])])
        });
        let listing = Arc::new(CourseListing::new(source.clone()));

        let pending = tokio::spawn({
            let listing = listing.clone();
            async move { listing.activate().await }
        });

        while source.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        listing.deactivate();
        gate.notify_one();

        assert!(matches!(pending.await, Ok(Err(ListingError::Superseded))));
        assert!(listing.records().is_empty());
    }

    #[tokio::test]
    async fn loaded_courses_are_owned_by_the_caller() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![record("Yoga", 0), record("Chess", 5)]),
            Ok(vec![record("Pottery", 3)]),
        ]));
        let listing = CourseListing::new(source);

        let Ok(courses) = listing.load_courses().await else {
            panic!("load should succeed");
        };
        listing.deactivate();
        assert!(listing.activate().await.is_ok());

        let names: Vec<String> = courses.map(|course| course.name).collect();
        assert_eq!(names, vec!["Yoga".to_string(), "Chess".to_string()]);
        assert_eq!(listing.records(), vec![record("Pottery", 3)]);
    }
}

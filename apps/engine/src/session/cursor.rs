#![allow(dead_code)]

//! Cursor over the ranked deck returned by the recommendation service.
//! The index only moves forward; once a job is passed it is never shown
//! again within the session.

use crate::models::job::Job;

#[derive(Debug, Default)]
pub struct JobCursor {
    jobs: Vec<Job>,
    index: usize,
}

impl JobCursor {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs, index: 0 }
    }

    /// The job currently presented, if the deck is not exhausted.
    pub fn current(&self) -> Option<&Job> {
        self.jobs.get(self.index)
    }

    /// Moves to the next job. Saturates at `len()`.
    pub fn advance(&mut self) {
        if self.index < self.jobs.len() {
            self.index += 1;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// True once every job in the deck has been decided.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.jobs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Vec<Job> {
        (0..n)
            .map(|i| {
                serde_json::from_str(&format!(
                    r#"{{"id": "j{i}", "title": "Job {i}", "company": "Acme"}}"#
                ))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_starts_at_first_job() {
        let cursor = JobCursor::new(deck(3));
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.current().unwrap().id, "j0");
        assert!(!cursor.is_exhausted());
    }

    #[test]
    fn test_advance_is_monotonic_and_saturates() {
        let mut cursor = JobCursor::new(deck(2));
        let mut last = cursor.index();
        for _ in 0..5 {
            cursor.advance();
            assert!(cursor.index() >= last);
            assert!(cursor.index() <= cursor.len());
            last = cursor.index();
        }
        assert_eq!(cursor.index(), 2);
        assert!(cursor.is_exhausted());
        assert!(cursor.current().is_none());
    }

    #[test]
    fn test_empty_deck_is_exhausted() {
        let cursor = JobCursor::new(Vec::new());
        assert!(cursor.is_empty());
        assert!(cursor.is_exhausted());
        assert!(cursor.current().is_none());
    }
}

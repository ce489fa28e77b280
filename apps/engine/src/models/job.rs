#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A job listing as served by the backend.
///
/// The backend is loose about shape: ids arrive as `id` or `_id`, and most
/// fields can be absent on older records, so everything past the identity
/// core is defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default, rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub posted: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Whole-percentage match surfaced to the UI. Present only on jobs that
    /// came through the recommendation service (see `ScoredJob::into_job`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_percentage: Option<u8>,
}

/// One recommendation result: the job plus the service's score in [0, 1].
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredJob {
    pub job: Job,
    pub match_score: f64,
}

impl ScoredJob {
    /// Folds the score into the job as a whole percentage.
    pub fn into_job(self) -> Job {
        let pct = (self.match_score * 100.0).round().clamp(0.0, 100.0) as u8;
        Job {
            match_percentage: Some(pct),
            ..self.job
        }
    }
}

/// An entry of the saved or liked list. The backend sometimes returns the
/// job inline and sometimes wrapped under `job_details`; `into_job` accepts
/// both and drops entries that carry neither.
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub job_details: Option<Job>,
    #[serde(flatten)]
    pub inline: serde_json::Value,
}

impl JobRecord {
    pub fn into_job(self) -> Option<Job> {
        match self.job_details {
            Some(job) => Some(job),
            None => serde_json::from_value(self.inline).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_job_rounds_to_percentage() {
        let raw = r#"{"job": {"id": "j1", "title": "Engineer", "company": "Acme"}, "match_score": 0.874}"#;
        let scored: ScoredJob = serde_json::from_str(raw).unwrap();
        let job = scored.into_job();
        assert_eq!(job.match_percentage, Some(87));
        assert_eq!(job.id, "j1");
    }

    #[test]
    fn test_job_accepts_mongo_style_id() {
        let raw = r#"{"_id": "abc123", "title": "Analyst", "company": "Initech"}"#;
        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.id, "abc123");
        assert!(job.requirements.is_empty());
    }

    #[test]
    fn test_record_prefers_job_details_wrapper() {
        let raw = r#"{"user_id": "u1", "job_id": "j2", "job_details": {"id": "j2", "title": "Designer", "company": "Hooli"}}"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        let job = record.into_job().unwrap();
        assert_eq!(job.title, "Designer");
    }

    #[test]
    fn test_record_falls_back_to_inline_job() {
        let raw = r#"{"id": "j3", "title": "Manager", "company": "Umbrella"}"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        let job = record.into_job().unwrap();
        assert_eq!(job.id, "j3");
    }

    #[test]
    fn test_record_without_job_is_dropped() {
        let raw = r#"{"user_id": "u1", "job_id": "j4"}"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        assert!(record.into_job().is_none());
    }
}

/// API client — the single point of entry for all backend calls in the engine.
///
/// ARCHITECTURAL RULE: no other module may issue HTTP requests directly.
/// Every remote interaction MUST go through this module so the error
/// taxonomy (and the 429 limit signal in particular) stays in one place.
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::job::{Job, JobRecord, ScoredJob};
use crate::models::swipe::{RemoveRequest, SwipeAck, SwipeAction, SwipeRequest};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Sentinel location meaning "do not filter by location".
pub const LOCATION_ALL: &str = "all";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP 429 from the swipe endpoint — the server's authoritative
    /// rate-limit signal.
    #[error("daily swipe limit reached")]
    DailyLimit,
}

/// The single backend client used by the whole engine.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    /// GET /api/recommend/{userId} — the ranked deck with match scores.
    pub async fn recommend(
        &self,
        user_id: &str,
        limit: u32,
        location: Option<&str>,
    ) -> Result<Vec<ScoredJob>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/recommend/{user_id}", self.base_url))
            .query(&recommend_params(limit, location))
            .send()
            .await?;
        let scored: Vec<ScoredJob> = parse_body(response).await?;
        debug!("recommend returned {} jobs for {user_id}", scored.len());
        Ok(scored)
    }

    /// POST /api/recommend/swipe — records a like, dislike, or save.
    /// A 429 maps to `ApiError::DailyLimit`.
    pub async fn swipe(
        &self,
        user_id: &str,
        action: SwipeAction,
        job: &Job,
    ) -> Result<SwipeAck, ApiError> {
        let body = SwipeRequest {
            user_id,
            job_id: &job.id,
            action,
            job_payload: job,
        };
        let response = self
            .client
            .post(format!("{}/api/recommend/swipe", self.base_url))
            .json(&body)
            .send()
            .await?;
        let ack: SwipeAck = parse_body(response).await?;
        debug!("swipe {:?} acknowledged for job {}", action, job.id);
        Ok(ack)
    }

    /// GET /api/recommend/saved/{userId} — the authoritative saved list.
    pub async fn saved(&self, user_id: &str) -> Result<Vec<Job>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/recommend/saved/{user_id}", self.base_url))
            .send()
            .await?;
        let records: Vec<JobRecord> = parse_body(response).await?;
        Ok(records.into_iter().filter_map(JobRecord::into_job).collect())
    }

    /// POST /api/recommend/saved/remove — unbookmarks a job.
    pub async fn remove_saved(&self, user_id: &str, job_id: &str) -> Result<SwipeAck, ApiError> {
        let body = RemoveRequest { user_id, job_id };
        let response = self
            .client
            .post(format!("{}/api/recommend/saved/remove", self.base_url))
            .json(&body)
            .send()
            .await?;
        parse_body(response).await
    }

    /// GET /api/recommend/liked/{userId} — jobs the user has applied to.
    pub async fn liked(&self, user_id: &str) -> Result<Vec<Job>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/recommend/liked/{user_id}", self.base_url))
            .send()
            .await?;
        let records: Vec<JobRecord> = parse_body(response).await?;
        Ok(records.into_iter().filter_map(JobRecord::into_job).collect())
    }

    /// POST /api/recommend/liked/remove — withdraws an application record.
    pub async fn remove_liked(&self, user_id: &str, job_id: &str) -> Result<SwipeAck, ApiError> {
        let body = RemoveRequest { user_id, job_id };
        let response = self
            .client
            .post(format!("{}/api/recommend/liked/remove", self.base_url))
            .json(&body)
            .send()
            .await?;
        parse_body(response).await
    }
}

/// Query parameters for the recommend call. The `all` sentinel means no
/// location filter is sent.
fn recommend_params(limit: u32, location: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", limit.to_string())];
    if let Some(loc) = location.filter(|l| *l != LOCATION_ALL && !l.is_empty()) {
        params.push(("location", loc.to_string()));
    }
    params
}

/// Triages a response: 429 and non-2xx become typed errors, success bodies
/// are decoded through serde so malformed JSON surfaces as `Parse`.
async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.as_u16() == 429 {
        return Err(ApiError::DailyLimit);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(ApiError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_params_with_location() {
        let params = recommend_params(40, Some("Berlin"));
        assert_eq!(
            params,
            vec![
                ("limit", "40".to_string()),
                ("location", "Berlin".to_string())
            ]
        );
    }

    #[test]
    fn test_recommend_params_all_sentinel_omits_location() {
        let params = recommend_params(40, Some("all"));
        assert_eq!(params, vec![("limit", "40".to_string())]);
    }

    #[test]
    fn test_recommend_params_without_location() {
        let params = recommend_params(10, None);
        assert_eq!(params, vec![("limit", "10".to_string())]);
    }
}

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::job::Job;

/// A user decision on a single job listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Dislike,
    Save,
}

/// Body of POST /api/recommend/swipe. The full job is carried along so the
/// backend can materialize listings it has not seen before.
#[derive(Debug, Serialize)]
pub struct SwipeRequest<'a> {
    pub user_id: &'a str,
    pub job_id: &'a str,
    pub action: SwipeAction,
    pub job_payload: &'a Job,
}

/// Body of POST /api/recommend/saved/remove and /api/recommend/liked/remove.
#[derive(Debug, Serialize)]
pub struct RemoveRequest<'a> {
    pub user_id: &'a str,
    pub job_id: &'a str,
}

/// Acknowledgement returned by the mutation endpoints. Fields are best
/// effort; callers only care that the body parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct SwipeAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

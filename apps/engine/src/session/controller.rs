#![allow(dead_code)]

//! SwipeSessionController — gates and records each swipe exactly once,
//! enforcing the local rolling-window limit while deferring to the server's
//! authoritative rate limit, and advancing the deck cursor.
//!
//! One controller exists per logged-in session and exclusively owns the
//! window, cursor, and saved mirror. Dropping it discards all of that
//! (logout); the persisted window is keyed by user id and picked up again
//! at the next login.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};
use crate::errors::{SaveOutcome, SwipeOutcome};
use crate::models::job::{Job, ScoredJob};
use crate::models::swipe::SwipeAction;
use crate::session::cursor::JobCursor;
use crate::session::window::{SwipeWindow, WindowPolicy};
use crate::store::{swipe_key, StateStore};

/// Current time in epoch milliseconds, the unit the persisted window uses.
fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct SwipeSessionController {
    user_id: String,
    session_id: Uuid,
    api: ApiClient,
    store: Arc<dyn StateStore>,
    policy: WindowPolicy,
    window: SwipeWindow,
    cursor: JobCursor,
    saved: HashSet<String>,
    recommend_limit: u32,
    location: String,
}

impl SwipeSessionController {
    pub fn new(
        user_id: String,
        api: ApiClient,
        store: Arc<dyn StateStore>,
        policy: WindowPolicy,
        recommend_limit: u32,
        location: String,
    ) -> Self {
        let session_id = Uuid::new_v4();
        info!("Session {session_id} opened for user {user_id}");
        Self {
            window: SwipeWindow::fresh(now_ms()),
            user_id,
            session_id,
            api,
            store,
            policy,
            cursor: JobCursor::default(),
            saved: HashSet::new(),
            recommend_limit,
            location,
        }
    }

    /// Reads the persisted window for this user, starting a fresh one if
    /// none exists, it cannot be parsed, or it has expired. The result is
    /// persisted back. Store failures fall back to a fresh in-memory window
    /// for the session (fail open — the server enforces the real limit).
    pub async fn load_state(&mut self) -> SwipeWindow {
        self.load_state_at(now_ms()).await
    }

    async fn load_state_at(&mut self, now: i64) -> SwipeWindow {
        let key = swipe_key(&self.user_id);
        let loaded = match self.store.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<SwipeWindow>(&raw) {
                Ok(window) if !window.expired(now, &self.policy) => Some(window),
                Ok(_) => None, // window elapsed; start over
                Err(e) => {
                    warn!("Discarding unparseable swipe window for {}: {e}", self.user_id);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Swipe window store unavailable, continuing in memory: {e}");
                None
            }
        };
        match loaded {
            Some(window) => self.window = window,
            None => {
                self.window = SwipeWindow::fresh(now);
                self.persist().await;
            }
        }
        debug!(
            "Swipe window for {}: {}/{} used",
            self.user_id, self.window.count, self.policy.limit
        );
        self.window
    }

    /// Gates and counts one swipe. Returns `false` when the window is
    /// blocked; the caller must not contact the swipe endpoint in that
    /// case. The updated window is persisted on every allowed swipe.
    pub async fn record_swipe(&mut self, now: i64) -> bool {
        let (window, allowed) = self.window.record(now, &self.policy);
        if allowed {
            self.window = window;
            self.persist().await;
            debug!(
                "Swipe {}/{} for user {}",
                self.window.count, self.policy.limit, self.user_id
            );
        }
        allowed
    }

    async fn persist(&self) {
        let raw = match serde_json::to_string(&self.window) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode swipe window: {e}");
                return;
            }
        };
        if let Err(e) = self.store.put(&swipe_key(&self.user_id), &raw).await {
            warn!("Failed to persist swipe window for {}: {e}", self.user_id);
        }
    }

    /// Right-swipe: count locally, POST the like, and advance only once the
    /// server has accepted it. On 429 the cursor holds and the local count
    /// keeps its increment — the server stays authoritative, the local
    /// window just short-circuits later attempts sooner.
    pub async fn apply_accept(&mut self) -> SwipeOutcome {
        self.apply_accept_at(now_ms()).await
    }

    async fn apply_accept_at(&mut self, now: i64) -> SwipeOutcome {
        let Some(job) = self.cursor.current().cloned() else {
            return SwipeOutcome::DeckExhausted;
        };
        if !self.record_swipe(now).await {
            info!("Local swipe window blocked for user {}", self.user_id);
            return SwipeOutcome::LimitReached;
        }
        match self.api.swipe(&self.user_id, SwipeAction::Like, &job).await {
            Ok(_) => {
                self.cursor.advance();
                info!("Applied to {} at {}", job.title, job.company);
                SwipeOutcome::Applied(job)
            }
            Err(err) => err.into(),
        }
    }

    /// Left-swipe: count locally and dispatch the dislike. The deck
    /// advances whether or not the remote call succeeds; failures are
    /// logged, not retried. A 429 still surfaces as `LimitReached` so the
    /// caller can disable further swiping.
    pub async fn apply_reject(&mut self) -> SwipeOutcome {
        self.apply_reject_at(now_ms()).await
    }

    async fn apply_reject_at(&mut self, now: i64) -> SwipeOutcome {
        let Some(job) = self.cursor.current().cloned() else {
            return SwipeOutcome::DeckExhausted;
        };
        if !self.record_swipe(now).await {
            info!("Local swipe window blocked for user {}", self.user_id);
            return SwipeOutcome::LimitReached;
        }
        let outcome = match self.api.swipe(&self.user_id, SwipeAction::Dislike, &job).await {
            Ok(_) => SwipeOutcome::Passed(job),
            Err(ApiError::DailyLimit) => {
                info!("Server reported the daily swipe limit");
                SwipeOutcome::LimitReached
            }
            Err(err) => {
                warn!("Failed to record dislike for {}: {err}", job.id);
                SwipeOutcome::Passed(job)
            }
        };
        self.cursor.advance();
        outcome
    }

    /// Toggles the bookmark on a job: save when absent, remove when
    /// present, then re-fetch the authoritative saved list so the mirror
    /// agrees with the server even when another device raced us.
    pub async fn toggle_save(&mut self, job: &Job) -> SaveOutcome {
        let currently_saved = self.saved.contains(&job.id);
        let mutation = if currently_saved {
            self.api
                .remove_saved(&self.user_id, &job.id)
                .await
                .map(|_| SaveOutcome::Removed)
        } else {
            self.api
                .swipe(&self.user_id, SwipeAction::Save, job)
                .await
                .map(|_| SaveOutcome::Saved)
        };
        match mutation {
            Ok(outcome) => {
                // Optimistic local flip, reconciled against server truth.
                if currently_saved {
                    self.saved.remove(&job.id);
                } else {
                    self.saved.insert(job.id.clone());
                }
                if let Err(err) = self.refresh_saved().await {
                    warn!("Saved-set reconciliation failed: {err}");
                }
                outcome
            }
            Err(err) => {
                warn!("Save toggle failed for {}: {err}", job.id);
                SaveOutcome::Failed
            }
        }
    }

    /// Fetches a fresh ranked deck and resets the cursor to its head.
    pub async fn refresh_recommendations(&mut self) -> Result<usize, ApiError> {
        let scored = self
            .api
            .recommend(&self.user_id, self.recommend_limit, Some(&self.location))
            .await?;
        let jobs: Vec<Job> = scored.into_iter().map(ScoredJob::into_job).collect();
        info!("Loaded {} recommendations for user {}", jobs.len(), self.user_id);
        self.cursor = JobCursor::new(jobs);
        Ok(self.cursor.len())
    }

    /// Fetches the authoritative saved list, refreshing the local mirror.
    pub async fn saved_jobs(&mut self) -> Result<Vec<Job>, ApiError> {
        let jobs = self.api.saved(&self.user_id).await?;
        self.saved = jobs.iter().map(|j| j.id.clone()).collect();
        Ok(jobs)
    }

    /// Replaces the saved mirror with the server's list.
    pub async fn refresh_saved(&mut self) -> Result<usize, ApiError> {
        Ok(self.saved_jobs().await?.len())
    }

    /// Jobs the user has applied to (the backend's liked list).
    pub async fn applied(&self) -> Result<Vec<Job>, ApiError> {
        self.api.liked(&self.user_id).await
    }

    /// Withdraws a job from the applied list.
    pub async fn remove_applied(&self, job_id: &str) -> Result<(), ApiError> {
        self.api.remove_liked(&self.user_id, job_id).await.map(|_| ())
    }

    pub fn current_job(&self) -> Option<&Job> {
        self.cursor.current()
    }

    pub fn is_saved(&self, job_id: &str) -> bool {
        self.saved.contains(job_id)
    }

    pub fn window(&self) -> SwipeWindow {
        self.window
    }

    pub fn blocked(&self) -> bool {
        self.window.blocked(&self.policy)
    }

    pub fn deck_remaining(&self) -> usize {
        self.cursor.len() - self.cursor.index()
    }
}

impl Drop for SwipeSessionController {
    fn drop(&mut self) {
        info!("Session {} closed for user {}", self.session_id, self.user_id);
    }
}

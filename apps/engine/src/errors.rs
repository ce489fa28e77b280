#![allow(dead_code)]

//! User-facing outcomes of engine operations.
//!
//! Remote-call failures are caught at the call site and converted into one
//! of these; none propagate as uncaught faults to the caller. The UI layer
//! renders each variant directly (blocked notice, card advance, saved badge
//! toggle).

use tracing::{info, warn};

use crate::api::ApiError;
use crate::models::job::Job;

/// Result of an accept or reject swipe.
#[derive(Debug, Clone, PartialEq)]
pub enum SwipeOutcome {
    /// The like was recorded remotely and the deck advanced.
    Applied(Job),
    /// The dislike was dispatched and the deck advanced. Reject advances
    /// whether or not the remote call succeeded.
    Passed(Job),
    /// The local window or the server's 429 refused the swipe. Swiping
    /// stays disabled until the window resets.
    LimitReached,
    /// Network or response failure; state is unchanged and the same action
    /// may be retried.
    RequestFailed,
    /// Every job in the current deck has been decided.
    DeckExhausted,
}

/// Result of a save/unsave toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Removed,
    /// The mutation failed; the local mirror is left as it was and the
    /// toggle may be retried.
    Failed,
}

impl From<ApiError> for SwipeOutcome {
    /// Collapses transport-level failures into the user-facing taxonomy:
    /// 429 is the authoritative limit signal, everything else is retryable.
    /// Malformed bodies are treated the same as failed requests.
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DailyLimit => {
                info!("Server reported the daily swipe limit");
                SwipeOutcome::LimitReached
            }
            ApiError::Http(e) => {
                warn!("Request failed: {e}");
                SwipeOutcome::RequestFailed
            }
            ApiError::Api { status, message } => {
                warn!("Backend error {status}: {message}");
                SwipeOutcome::RequestFailed
            }
            ApiError::Parse(e) => {
                warn!("Malformed response: {e}");
                SwipeOutcome::RequestFailed
            }
        }
    }
}

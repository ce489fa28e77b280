//! The local rolling-window swipe limiter.
//!
//! Pure state transitions — the caller passes timestamps in, so rollover is
//! directly testable. The window exists to short-circuit calls the server
//! would refuse anyway; the server's 429 stays authoritative and local
//! state must never be trusted as the sole enforcement (it can drift across
//! devices and reinstalls).

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

/// Limiter parameters, derived from configuration.
#[derive(Debug, Clone, Copy)]
pub struct WindowPolicy {
    pub limit: u32,
    pub window_ms: i64,
}

impl WindowPolicy {
    pub fn new(limit: u32, window_hours: i64) -> Self {
        Self {
            limit,
            window_ms: window_hours * 60 * 60 * 1000,
        }
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_WINDOW_HOURS)
    }
}

/// Per-user swipe counter for the current window.
/// Persisted as `swipe_{userId} -> {"count": n, "start": epoch-ms}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeWindow {
    pub count: u32,
    #[serde(rename = "start")]
    pub window_start: i64,
}

impl SwipeWindow {
    /// A fresh window starting now, with nothing counted.
    pub fn fresh(now: i64) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    /// Whether the window has elapsed and must roll over.
    pub fn expired(&self, now: i64, policy: &WindowPolicy) -> bool {
        now - self.window_start >= policy.window_ms
    }

    /// Whether further swipes are refused under this window.
    pub fn blocked(&self, policy: &WindowPolicy) -> bool {
        self.count >= policy.limit
    }

    /// Counts one swipe. Returns the successor window and whether the swipe
    /// is allowed.
    ///
    /// An elapsed window rolls over first and counts the triggering swipe as
    /// its first, regardless of the prior count — so a blocked window
    /// reopens at the moment of the attempt, never via a timer. Within the
    /// window, a blocked state is returned unchanged.
    pub fn record(self, now: i64, policy: &WindowPolicy) -> (SwipeWindow, bool) {
        if self.expired(now, policy) {
            return (
                SwipeWindow {
                    count: 1,
                    window_start: now,
                },
                true,
            );
        }
        if self.blocked(policy) {
            return (self, false);
        }
        (
            SwipeWindow {
                count: self.count + 1,
                window_start: self.window_start,
            },
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;
    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_fresh_window_is_open() {
        let policy = WindowPolicy::default();
        let window = SwipeWindow::fresh(NOW);
        assert_eq!(window.count, 0);
        assert!(!window.blocked(&policy));
    }

    #[test]
    fn test_count_tracks_swipes_below_limit() {
        let policy = WindowPolicy::default();
        let mut window = SwipeWindow::fresh(NOW);
        for n in 1..policy.limit {
            let (next, allowed) = window.record(NOW + n as i64, &policy);
            assert!(allowed);
            window = next;
            assert_eq!(window.count, n);
            assert!(!window.blocked(&policy));
        }
    }

    #[test]
    fn test_twentieth_swipe_blocks() {
        let policy = WindowPolicy::default();
        let window = SwipeWindow {
            count: 19,
            window_start: NOW - HOUR_MS,
        };
        let (window, allowed) = window.record(NOW, &policy);
        assert!(allowed);
        assert_eq!(window.count, 20);
        assert!(window.blocked(&policy));
    }

    #[test]
    fn test_blocked_attempt_does_not_mutate() {
        let policy = WindowPolicy::default();
        let window = SwipeWindow {
            count: 20,
            window_start: NOW - HOUR_MS,
        };
        let (after, allowed) = window.record(NOW, &policy);
        assert!(!allowed);
        assert_eq!(after, window);
    }

    #[test]
    fn test_rollover_resets_to_one() {
        let policy = WindowPolicy::default();
        let window = SwipeWindow {
            count: 5,
            window_start: NOW - 25 * HOUR_MS,
        };
        let (window, allowed) = window.record(NOW, &policy);
        assert!(allowed);
        assert_eq!(window.count, 1);
        assert_eq!(window.window_start, NOW);
        assert!(!window.blocked(&policy));
    }

    #[test]
    fn test_rollover_reopens_blocked_window() {
        let policy = WindowPolicy::default();
        let window = SwipeWindow {
            count: 20,
            window_start: NOW - 24 * HOUR_MS,
        };
        let (window, allowed) = window.record(NOW, &policy);
        assert!(allowed);
        assert_eq!(window.count, 1);
        assert_eq!(window.window_start, NOW);
    }

    #[test]
    fn test_persisted_shape() {
        let window = SwipeWindow {
            count: 3,
            window_start: 1000,
        };
        let raw = serde_json::to_string(&window).unwrap();
        assert_eq!(raw, r#"{"count":3,"start":1000}"#);
        let back: SwipeWindow = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, window);
    }

    #[test]
    fn test_custom_policy() {
        let policy = WindowPolicy::new(2, 1);
        let window = SwipeWindow::fresh(NOW);
        let (window, _) = window.record(NOW, &policy);
        let (window, _) = window.record(NOW, &policy);
        assert!(window.blocked(&policy));
        // one hour later the policy window has elapsed
        let (window, allowed) = window.record(NOW + HOUR_MS, &policy);
        assert!(allowed);
        assert_eq!(window.count, 1);
    }
}

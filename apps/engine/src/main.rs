mod api;
mod config;
mod errors;
mod models;
mod session;
mod store;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ApiClient;
use crate::config::Config;
use crate::errors::{SaveOutcome, SwipeOutcome};
use crate::models::job::Job;
use crate::session::controller::SwipeSessionController;
use crate::session::window::WindowPolicy;
use crate::store::{MemoryStore, RedisStore, StateStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobDeck engine v{}", env!("CARGO_PKG_VERSION"));

    // Swipe-window store: Redis, or an in-memory window for this session if
    // the client cannot be constructed (the server still enforces the
    // authoritative limit).
    let store: Arc<dyn StateStore> = match redis::Client::open(config.redis_url.clone()) {
        Ok(client) => {
            info!("Redis store initialized");
            Arc::new(RedisStore::new(client))
        }
        Err(e) => {
            warn!("Redis unavailable ({e}), swipe window will not survive restarts");
            Arc::new(MemoryStore::default())
        }
    };

    let api = ApiClient::new(config.api_base_url.clone());
    info!("API client initialized (base: {})", config.api_base_url);

    let policy = WindowPolicy::new(config.swipe_limit, config.swipe_window_hours);
    let mut session = SwipeSessionController::new(
        config.user_id.clone(),
        api,
        store,
        policy,
        config.recommend_limit,
        config.location.clone(),
    );

    let window = session.load_state().await;
    info!("Swipe window loaded: {}/{} used", window.count, policy.limit);

    match session.refresh_saved().await {
        Ok(n) => info!("{n} saved jobs"),
        Err(e) => warn!("Could not fetch saved jobs: {e}"),
    }
    match session.refresh_recommendations().await {
        Ok(n) => info!("{n} recommendations loaded"),
        Err(e) => warn!("Could not fetch recommendations: {e}"),
    }

    run_loop(&mut session).await
}

/// Interactive discover loop: one command per stdin line, mirroring the
/// swipe gestures of the mobile client.
async fn run_loop(session: &mut SwipeSessionController) -> Result<()> {
    println!("Commands: [a]pply  [p]ass  [s]ave  [j]ob  [l]ist saved  [A]pplied  [q]uit");
    show_current(session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "a" => {
                let outcome = session.apply_accept().await;
                render_swipe(session, outcome);
            }
            "p" => {
                let outcome = session.apply_reject().await;
                render_swipe(session, outcome);
            }
            "s" => match session.current_job().cloned() {
                Some(job) => match session.toggle_save(&job).await {
                    SaveOutcome::Saved => println!("Saved {}", job.title),
                    SaveOutcome::Removed => println!("Removed {} from saved", job.title),
                    SaveOutcome::Failed => println!("Could not update saved jobs, try again"),
                },
                None => println!("No job on screen"),
            },
            "j" => show_current(session),
            "l" => match session.saved_jobs().await {
                Ok(jobs) => print_jobs("Saved", &jobs),
                Err(e) => warn!("Could not fetch saved jobs: {e}"),
            },
            "A" => match session.applied().await {
                Ok(jobs) => print_jobs("Applied", &jobs),
                Err(e) => warn!("Could not fetch applied jobs: {e}"),
            },
            "q" => break,
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }

    Ok(())
}

fn show_current(session: &SwipeSessionController) {
    match session.current_job() {
        Some(job) => {
            let badge = if session.is_saved(&job.id) { " [saved]" } else { "" };
            let pct = job
                .match_percentage
                .map(|p| format!(" — {p}% match"))
                .unwrap_or_default();
            println!("{} at {} ({}){pct}{badge}", job.title, job.company, job.location);
        }
        None => println!("No more jobs to show!"),
    }
}

fn render_swipe(session: &SwipeSessionController, outcome: SwipeOutcome) {
    match outcome {
        SwipeOutcome::Applied(job) => {
            println!("Applied to {} at {}", job.title, job.company);
            show_current(session);
        }
        SwipeOutcome::Passed(job) => {
            println!("Passed on {}", job.title);
            show_current(session);
        }
        SwipeOutcome::LimitReached => {
            println!("You have reached your daily swipe limit. It will reset in 24 hours.");
        }
        SwipeOutcome::RequestFailed => {
            println!("Something went wrong, try again.");
        }
        SwipeOutcome::DeckExhausted => {
            println!("No more jobs to show!");
        }
    }
}

fn print_jobs(label: &str, jobs: &[Job]) {
    if jobs.is_empty() {
        println!("{label}: none yet");
        return;
    }
    for job in jobs {
        println!("{label}: {} at {} ({})", job.title, job.company, job.location);
    }
}

//! API Handlers
//!
//! Thin translators from requests to directory lookups to JSON responses.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::content::{
    normalize_episode_id, AboutContent, Episode, EpisodeDirectory, FaqContent, PageContent,
};
use crate::error::{ApiError, Result};
use crate::models::{HealthResponse, ReadinessResponse};
use crate::ratelimit::RateLimiter;
use crate::tasks::{spawn_sweeper, SweepTask};

/// Request deadline used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Application state shared across all handlers.
///
/// Every component is constructed once by the composition root and shared
/// by reference count; nothing here is a process-wide global.
#[derive(Clone)]
pub struct AppState {
    /// Episode listing
    pub episodes: Arc<EpisodeDirectory>,
    /// About and FAQ pages
    pub pages: Arc<PageContent>,
    /// Response cache used by the caching middleware
    pub cache: Arc<TtlCache>,
    /// Per-client admission control
    pub limiter: Arc<RateLimiter>,
    /// TTL applied to cached responses
    pub cache_ttl: Duration,
    /// Deadline for a single request
    pub request_timeout: Duration,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new AppState around the given content and rate limiter,
    /// with an empty response cache.
    pub fn new(
        episodes: EpisodeDirectory,
        pages: PageContent,
        limiter: RateLimiter,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            episodes: Arc::new(episodes),
            pages: Arc::new(pages),
            cache: Arc::new(TtlCache::new()),
            limiter: Arc::new(limiter),
            cache_ttl,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            started_at: Instant::now(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Loads content files from the configured directory, falling back to the
    /// built-in content for any file that cannot be used.
    pub fn from_config(config: &Config) -> Self {
        let episodes = EpisodeDirectory::load(config.episodes_path());
        let pages = PageContent::load(config.about_path(), config.faq_path());
        let limiter = RateLimiter::new(config.rate_limit, config.rate_limit_window());
        Self::new(episodes, pages, limiter, config.cache_ttl())
            .with_request_timeout(config.request_timeout())
    }

    /// Replaces the per-request deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Starts the background sweeps for the cache and the rate limiter.
    pub fn spawn_sweepers(&self, config: &Config) -> Vec<SweepTask> {
        vec![
            spawn_sweeper(
                &self.cache,
                Duration::from_secs(config.cache_sweep_interval),
            ),
            spawn_sweeper(
                &self.limiter,
                Duration::from_secs(config.rate_limit_sweep_interval),
            ),
        ]
    }
}

/// Handler for GET /api/episodes
///
/// Returns every episode, newest first.
pub async fn list_episodes(State(state): State<AppState>) -> Json<Vec<Episode>> {
    Json(state.episodes.list())
}

/// Handler for GET /api/episodes/featured
pub async fn featured_episode(State(state): State<AppState>) -> Result<Json<Episode>> {
    state
        .episodes
        .featured()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No featured episode available".to_string()))
}

/// Handler for GET /api/episodes/:id
///
/// Accepts canonical ids ("ep007") and bare episode numbers ("7").
pub async fn get_episode(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Episode>> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::BadRequest("Episode ID is required".to_string()));
    }

    let id = normalize_episode_id(id);
    state
        .episodes
        .get_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Episode not found".to_string()))
}

/// Handler for GET /api/about
pub async fn about_handler(State(state): State<AppState>) -> Json<AboutContent> {
    Json(state.pages.about().clone())
}

/// Handler for GET /api/faq
pub async fn faq_handler(State(state): State<AppState>) -> Json<FaqContent> {
    Json(state.pages.faq().clone())
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.started_at.elapsed()))
}

/// Handler for GET /ready
pub async fn ready_handler() -> Json<ReadinessResponse> {
    Json(ReadinessResponse::ready())
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

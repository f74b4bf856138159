//! HTTP site: router, server loop and page rendering.
//!
//! ## URL layout
//!
//! ```text
//! GET  /                     home
//! GET  /people               ?category=&tag=&q=&shown=
//! GET  /people/{slug}
//! GET  /projects             ?category=&shown=
//! GET  /projects/{slug}
//! GET  /news
//! GET  /news/{slug}
//! GET  /events               ?year=&month=&date=
//! GET  /events/calendar      widget fragment, same query string
//! GET  /events/{slug}
//! GET  /contact
//! GET  /api/health
//! GET  /favicon.ico          → 204
//! GET  /*                    → 404 page
//! ```

pub mod format;
mod handlers;
pub mod views;

use std::sync::Arc;

use axum::{Router, http::StatusCode, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::calendar::{CalendarSource, Zone};
use crate::config::Config;
use crate::content::ContentClient;
use crate::error::AppError;

use views::Ctx;

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone; the content and calendar clients share their HTTP pools.
#[derive(Debug, Clone)]
pub struct SiteState {
    pub site_name: Arc<str>,
    pub content: ContentClient,
    pub calendar: CalendarSource,
}

impl SiteState {
    pub fn new(site_name: &str, content: ContentClient, calendar: CalendarSource) -> Self {
        Self { site_name: Arc::from(site_name), content, calendar }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let content = ContentClient::from_config(&config.content)?;
        let calendar = CalendarSource::from_config(&config.calendar)?;
        info!(
            content_configured = content.is_configured(),
            calendar_configured = calendar.is_configured(),
            "site state ready"
        );
        Ok(Self::new(&config.site_name, content, calendar))
    }

    /// No content store and no calendar; every page renders its empty state.
    pub fn unconfigured(site_name: &str) -> Self {
        Self::new(site_name, ContentClient::unconfigured(), CalendarSource::disabled(Zone::Local))
    }

    pub(crate) fn ctx(&self) -> Ctx<'_> {
        Ctx {
            site_name: &self.site_name,
            content: &self.content,
            zone: self.calendar.zone(),
        }
    }
}

// ── Server loop ───────────────────────────────────────────────────────────────

/// Serve `state` on `bind_addr` until `shutdown` is cancelled.
pub async fn serve(state: SiteState, bind_addr: &str, shutdown: CancellationToken) -> Result<(), AppError> {
    let router = build_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "site listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("server error: {e}")))?;

    info!("site shut down");
    Ok(())
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: SiteState) -> Router {
    Router::new()
        .route("/",                 get(handlers::home))
        .route("/people",           get(handlers::people))
        .route("/people/{slug}",    get(handlers::person))
        .route("/projects",         get(handlers::projects))
        .route("/projects/{slug}",  get(handlers::project))
        .route("/news",             get(handlers::news))
        .route("/news/{slug}",      get(handlers::news_post))
        .route("/events",           get(handlers::events))
        .route("/events/calendar",  get(handlers::calendar_fragment))
        .route("/events/{slug}",    get(handlers::event))
        .route("/contact",          get(handlers::contact))
        .route("/api/health",       get(handlers::health))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .fallback(handlers::fallback)
        .with_state(state)
}

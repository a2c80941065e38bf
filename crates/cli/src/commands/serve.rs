//! Serve command - HTTP scheduling endpoint and hook library
//!
//! Routes:
//! - `POST /api/schedule` hands the tweet buffer to the configured scheduler
//! - `GET /api/hooks` returns the hook library as an ordered JSON mapping
//! - `GET /health` liveness probe

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tweet_scheduler_domain::Scheduler;
use tweet_scheduler_domain::usecases::HookLibrary;

use crate::args::ServeArgs;
use crate::config::AppConfig;
use crate::services::{build_script_scheduler, load_served_hooks};

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<dyn Scheduler>,
    pub hooks: Arc<HookLibrary>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleBody {
    #[serde(default)]
    pub tweets: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/schedule", post(handle_schedule))
        .route("/api/hooks", get(handle_hooks))
        .route("/health", get(handle_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn execute(args: ServeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let state = AppState {
        scheduler: build_script_scheduler(&config)?,
        hooks: Arc::new(load_served_hooks(&config).await),
    };
    let app = router(state);

    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    tracing::info!(bind = %bind, "Starting tweet-scheduler server");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({"error": message.into()}))).into_response()
}

async fn handle_schedule(
    State(state): State<AppState>,
    body: Result<Json<ScheduleBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected schedule request body");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    if body.tweets.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No tweets provided");
    }

    match state.scheduler.schedule(&body.tweets).await {
        Ok(receipt) => {
            tracing::info!("Scheduled tweets");
            (StatusCode::OK, Json(receipt)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Scheduling failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn handle_hooks(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.hooks.to_json())
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "service": "tweet-scheduler"}))
}

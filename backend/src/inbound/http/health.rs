//! Readiness and liveness probes.
//!
//! `GET /health/ready` answers 200 only after the server has mounted its
//! routes and while the todo store answers a ping, so a load balancer stops
//! routing to an instance whose database went away. `GET /health/live`
//! answers 200 until shutdown begins.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde_json::json;
use tracing::warn;

use crate::inbound::http::state::HttpState;

/// Lifecycle flags shared by the probes.
#[derive(Debug)]
pub struct HealthState {
    started: AtomicBool,
    draining: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthState {
    /// Not started and not draining.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
            draining: AtomicBool::new(false),
        }
    }

    /// Routes are mounted; readiness now depends on the store alone.
    pub fn mark_ready(&self) {
        self.started.store(true, Ordering::Release);
    }

    /// Shutdown began: both probes fail from now on.
    pub fn mark_unhealthy(&self) {
        self.draining.store(true, Ordering::Release);
    }

    /// Whether the process should still be considered alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.draining.load(Ordering::Acquire)
    }

    fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }
}

fn health_response(status: &'static str, ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(json!({ "status": status }))
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving, todo store reachable"),
        (status = 503, description = "Starting, draining, or todo store unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(health: web::Data<HealthState>, state: web::Data<HttpState>) -> HttpResponse {
    if !health.is_alive() {
        return health_response("draining", false);
    }
    if !health.is_started() {
        return health_response("starting", false);
    }
    match state.todos_query.check_store().await {
        Ok(()) => health_response("ready", true),
        Err(error) => {
            warn!(code = ?error.code(), detail = error.message(), "todo store unreachable");
            health_response("store unavailable", false)
        }
    }
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process alive"),
        (status = 503, description = "Shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(health: web::Data<HealthState>) -> HttpResponse {
    let alive = health.is_alive();
    health_response(if alive { "alive" } else { "draining" }, alive)
}

use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Version reported by `/healthz`
pub const HEALTH_VERSION: &str = "1.0";

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: Utc::now(),
        }
    }

    /// Whole seconds since start, never negative
    pub fn uptime_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.start_datetime).num_seconds().max(0) as u64
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    pub uptime: u64,
}

/// Health Service
///
/// Liveness only: it never touches the store.
pub struct HealthService;

impl HealthService {
    pub async fn health_check(app_start_time: web::Data<AppStartTime>) -> impl Responder {
        trace!("Received health check request");

        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(HealthResponse {
                ok: true,
                version: HEALTH_VERSION.to_string(),
                uptime: app_start_time.uptime_secs(Utc::now()),
            })
    }
}

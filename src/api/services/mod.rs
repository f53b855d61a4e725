//! HTTP services
//!
//! Routes are matched in registration order: fixed paths first, the
//! `/{code}` redirect last, then the catch-all 404.

pub mod dashboard;
pub mod error_code;
pub mod health;
pub mod helpers;
pub mod links;
pub mod redirect;
pub mod stats;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error::InternalError, web};

use crate::api::views::Views;

pub use dashboard::DashboardService;
pub use error_code::ErrorCode;
pub use health::{AppStartTime, HealthService};
pub use helpers::ApiResponse;
pub use links::links_routes;
pub use redirect::RedirectService;
pub use stats::StatsService;

/// Path segment accepted as a short code
const CODE_SEGMENT: &str = "{code:[A-Za-z0-9]{6,8}}";

/// Register every route plus the catch-all 404.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(links_routes().app_data(json_config()))
        .service(
            web::resource("/")
                .route(web::get().to(DashboardService::index))
                .route(web::post().to(DashboardService::create))
                .default_service(web::to(not_found_page)),
        )
        .service(
            web::resource("/healthz")
                .route(web::get().to(HealthService::health_check))
                .default_service(web::to(not_found_page)),
        )
        .service(
            web::resource(format!("/code/{}/delete", CODE_SEGMENT))
                .route(web::post().to(DashboardService::delete))
                .default_service(web::to(not_found_page)),
        )
        .service(
            web::resource(format!("/code/{}", CODE_SEGMENT))
                .route(web::get().to(StatsService::link_stats))
                .default_service(web::to(not_found_page)),
        )
        .service(
            web::resource(format!("/{}", CODE_SEGMENT))
                .route(web::get().to(RedirectService::handle_redirect))
                .route(web::head().to(RedirectService::handle_redirect))
                .default_service(web::to(not_found_page)),
        )
        .default_service(web::to(not_found_page));
}

/// Generic not-found page
pub async fn not_found_page(req: HttpRequest, views: web::Data<Views>) -> HttpResponse {
    tracing::trace!("No route for {} {}", req.method(), req.path());
    views.not_found("The page you are looking for does not exist.")
}

/// Malformed JSON bodies answer with the API envelope instead of plain text
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let resp = helpers::error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                &err.to_string(),
            );
            InternalError::from_response(err, resp).into()
        })
}

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::context;
use std::sync::Arc;
use tracing::error;

use crate::api::views::{LinkView, Views};
use crate::errors::LinkdashError;
use crate::services::LinkService;

use super::helpers::public_base_url;

pub struct StatsService;

impl StatsService {
    /// `GET /code/{code}`
    pub async fn link_stats(
        req: HttpRequest,
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
        views: web::Data<Views>,
    ) -> HttpResponse {
        let code = path.into_inner();

        match link_service.get_link(&code).await {
            Ok(link) => {
                let base = public_base_url(&req);
                views.page(
                    StatusCode::OK,
                    "stats.html",
                    context! { link => LinkView::new(&link, &base) },
                )
            }
            Err(LinkdashError::NotFound(msg)) => views.not_found(&msg),
            Err(e) => {
                error!("Failed to load stats for '{}': {}", code, e);
                views.error(&e)
            }
        }
    }
}

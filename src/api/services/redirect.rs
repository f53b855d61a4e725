use actix_web::http::header;
use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::api::views::Views;
use crate::errors::LinkdashError;
use crate::services::LinkService;

pub struct RedirectService;

impl RedirectService {
    /// `GET|HEAD /{code}`: record the click and answer 302
    pub async fn handle_redirect(
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
        views: web::Data<Views>,
    ) -> HttpResponse {
        let code = path.into_inner();
        trace!("Redirect request for '{}'", code);

        match link_service.track_click(&code).await {
            Ok(url) => HttpResponse::Found()
                .insert_header((header::LOCATION, url))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish(),
            Err(LinkdashError::NotFound(msg)) => {
                debug!("Redirect link not found: {}", code);
                views.not_found(&msg)
            }
            Err(e) => {
                error!("Store error during redirect of '{}': {}", code, e);
                views.error(&e)
            }
        }
    }
}

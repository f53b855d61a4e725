//! HTML dashboard: list, create form and delete buttons

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::context;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::views::{FormState, LinkView, ListingView, Views};
use crate::errors::LinkdashError;
use crate::services::{CreateLinkRequest, LinkService, ListOptions};

use super::helpers::public_base_url;

#[derive(Debug, Deserialize)]
pub struct CreateLinkForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// `GET /?q=&sort=&order=`
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

impl DashboardQuery {
    fn options(&self) -> ListOptions {
        ListOptions::from_params(
            self.q.as_deref(),
            self.sort.as_deref(),
            self.order.as_deref(),
        )
    }
}

pub struct DashboardService;

impl DashboardService {
    /// `GET /`
    pub async fn index(
        req: HttpRequest,
        query: web::Query<DashboardQuery>,
        link_service: web::Data<Arc<LinkService>>,
        views: web::Data<Views>,
    ) -> HttpResponse {
        Self::render(
            &req,
            &link_service,
            &views,
            &query.options(),
            StatusCode::OK,
            FormState::default(),
            None,
        )
        .await
    }

    /// `POST /`
    pub async fn create(
        req: HttpRequest,
        form: web::Form<CreateLinkForm>,
        link_service: web::Data<Arc<LinkService>>,
        views: web::Data<Views>,
    ) -> HttpResponse {
        let form = form.into_inner();
        let code = form.code.clone().filter(|c| !c.is_empty());

        match link_service
            .create_link(CreateLinkRequest::new(form.url.clone(), code))
            .await
        {
            Ok(result) => {
                info!("Dashboard: created '{}'", result.link.code);
                let created = LinkView::new(&result.link, &public_base_url(&req));
                Self::render(
                    &req,
                    &link_service,
                    &views,
                    &ListOptions::default(),
                    StatusCode::CREATED,
                    FormState::default(),
                    Some(created),
                )
                .await
            }
            Err(e) => {
                warn!("Dashboard: create rejected: {}", e);
                let state = FormState {
                    url: form.url,
                    code: form.code.unwrap_or_default(),
                    ..FormState::default()
                }
                .with_error(&e);
                Self::render(
                    &req,
                    &link_service,
                    &views,
                    &ListOptions::default(),
                    e.http_status(),
                    state,
                    None,
                )
                .await
            }
        }
    }

    /// `POST /code/{code}/delete`
    pub async fn delete(
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
        views: web::Data<Views>,
    ) -> HttpResponse {
        let code = path.into_inner();

        match link_service.delete_link(&code).await {
            Ok(()) => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .finish(),
            Err(LinkdashError::NotFound(msg)) => views.not_found(&msg),
            Err(e) => {
                error!("Dashboard: failed to delete '{}': {}", code, e);
                views.error(&e)
            }
        }
    }

    async fn render(
        req: &HttpRequest,
        link_service: &LinkService,
        views: &Views,
        options: &ListOptions,
        status: StatusCode,
        form: FormState,
        created: Option<LinkView>,
    ) -> HttpResponse {
        let links = match link_service.search_links(options).await {
            Ok(links) => links,
            Err(e) => {
                error!("Dashboard: failed to list links: {}", e);
                return views.error(&e);
            }
        };

        let base = public_base_url(req);
        let links: Vec<LinkView> = links.iter().map(|l| LinkView::new(l, &base)).collect();

        views.page(
            status,
            "dashboard.html",
            context! {
                links => links,
                listing => ListingView::new(options),
                form => form,
                created => created,
            },
        )
    }
}

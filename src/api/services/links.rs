//! JSON API 链接操作 `/api/links`

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, trace, warn};

use crate::services::{CreateLinkRequest, LinkService};
use crate::storage::ShortLink;

use super::helpers::{error_from_linkdash, public_base_url, success_response};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostNewLink {
    pub url: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub total_clicks: u64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    fn new(link: ShortLink, base_url: &str) -> Self {
        Self {
            short_url: link.short_url(base_url),
            code: link.code,
            url: link.url,
            total_clicks: link.total_clicks,
            last_clicked: link.last_clicked,
            created_at: link.created_at,
        }
    }
}

/// 获取所有链接（最新的在前）
pub async fn get_all_links(
    req: HttpRequest,
    link_service: web::Data<Arc<LinkService>>,
) -> HttpResponse {
    trace!("API: request to list all links");

    match link_service.list_links().await {
        Ok(links) => {
            let base = public_base_url(&req);
            let data: Vec<LinkResponse> = links
                .into_iter()
                .map(|l| LinkResponse::new(l, &base))
                .collect();
            info!("API: returning {} links", data.len());
            success_response(StatusCode::OK, data)
        }
        Err(e) => error_from_linkdash(&e),
    }
}

/// 创建新链接
pub async fn post_link(
    req: HttpRequest,
    body: web::Json<PostNewLink>,
    link_service: web::Data<Arc<LinkService>>,
) -> HttpResponse {
    let body = body.into_inner();
    info!(
        "API: create link request - code: {:?}, url: {}",
        body.code, body.url
    );

    match link_service
        .create_link(CreateLinkRequest::new(body.url, body.code))
        .await
    {
        Ok(result) => success_response(
            StatusCode::CREATED,
            LinkResponse::new(result.link, &public_base_url(&req)),
        ),
        Err(e) => {
            warn!("API: create link rejected: {}", e);
            error_from_linkdash(&e)
        }
    }
}

/// 获取单个链接
pub async fn get_link(
    req: HttpRequest,
    code: web::Path<String>,
    link_service: web::Data<Arc<LinkService>>,
) -> HttpResponse {
    match link_service.get_link(&code).await {
        Ok(link) => success_response(
            StatusCode::OK,
            LinkResponse::new(link, &public_base_url(&req)),
        ),
        Err(e) => error_from_linkdash(&e),
    }
}

/// 删除链接
pub async fn delete_link(
    code: web::Path<String>,
    link_service: web::Data<Arc<LinkService>>,
) -> HttpResponse {
    match link_service.delete_link(&code).await {
        Ok(()) => success_response(StatusCode::OK, serde_json::json!({ "code": code.as_str() })),
        Err(e) => error_from_linkdash(&e),
    }
}

/// 链接管理路由 `/api/links`
pub fn links_routes() -> actix_web::Scope {
    web::scope("/api/links")
        .route("", web::get().to(get_all_links))
        .route("", web::post().to(post_link))
        .route("/{code}", web::get().to(get_link))
        .route("/{code}", web::delete().to(delete_link))
}

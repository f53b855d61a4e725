//! Server-side HTML rendering
//!
//! Templates live in `templates/` and are embedded into the binary; names
//! ending in `.html` get HTML auto-escaping from minijinja.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use minijinja::{Environment, context};
use rust_embed::Embed;
use serde::Serialize;
use tracing::{debug, error};

use crate::errors::{LinkdashError, Result};
use crate::services::{ListOptions, SortField, SortOrder};
use crate::storage::ShortLink;

#[derive(Embed)]
#[folder = "templates/"]
struct TemplateAssets;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// A link as the templates see it
#[derive(Debug, Clone, Serialize)]
pub struct LinkView {
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub total_clicks: u64,
    pub last_clicked: Option<String>,
    pub created_at: String,
}

impl LinkView {
    pub fn new(link: &ShortLink, base_url: &str) -> Self {
        Self {
            code: link.code.clone(),
            url: link.url.clone(),
            short_url: link.short_url(base_url),
            total_clicks: link.total_clicks,
            last_clicked: link
                .last_clicked
                .map(|t| t.format(TIME_FORMAT).to_string()),
            created_at: link.created_at.format(TIME_FORMAT).to_string(),
        }
    }
}

/// Values echoed back into the create form after a submission
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormState {
    pub url: String,
    pub code: String,
    pub url_error: Option<String>,
    pub code_error: Option<String>,
    pub error: Option<String>,
}

impl FormState {
    /// Attach `err` to the field it is about.
    pub fn with_error(mut self, err: &LinkdashError) -> Self {
        let msg = Some(err.message().to_string());
        match err {
            LinkdashError::InvalidUrl(_) => self.url_error = msg,
            LinkdashError::InvalidFormat(_) | LinkdashError::Conflict(_) => {
                self.code_error = msg
            }
            _ => self.error = msg,
        }
        self
    }
}

/// Search box and sortable column headers of the dashboard table
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub search: String,
    pub sort: &'static str,
    pub order: &'static str,
    pub headers: SortHeaders,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortHeaders {
    pub code: SortHeader,
    pub url: SortHeader,
    pub total_clicks: SortHeader,
    pub last_clicked: SortHeader,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortHeader {
    pub href: String,
    /// ↑ / ↓ on the active column
    pub indicator: Option<&'static str>,
}

impl ListingView {
    pub fn new(options: &ListOptions) -> Self {
        let header = |field: SortField| SortHeader {
            href: dashboard_href(
                options.search.as_deref(),
                field,
                options.next_order_for(field),
            ),
            indicator: (options.sort == field).then_some(match options.order {
                SortOrder::Asc => "↑",
                SortOrder::Desc => "↓",
            }),
        };

        Self {
            search: options.search.clone().unwrap_or_default(),
            sort: options.sort.as_str(),
            order: options.order.as_str(),
            headers: SortHeaders {
                code: header(SortField::Code),
                url: header(SortField::Url),
                total_clicks: header(SortField::TotalClicks),
                last_clicked: header(SortField::LastClicked),
            },
        }
    }
}

/// `/?q=..&sort=..&order=..`, with the search term form-encoded
fn dashboard_href(search: Option<&str>, sort: SortField, order: SortOrder) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(q) = search {
        query.append_pair("q", q);
    }
    query.append_pair("sort", sort.as_str());
    query.append_pair("order", order.as_str());
    format!("/?{}", query.finish())
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn load() -> Result<Self> {
        let mut env = Environment::new();

        for name in TemplateAssets::iter() {
            let file = TemplateAssets::get(&name).ok_or_else(|| {
                LinkdashError::template(format!("Embedded template '{}' vanished", name))
            })?;
            let source = String::from_utf8(file.data.into_owned()).map_err(|e| {
                LinkdashError::template(format!("Template '{}' is not UTF-8: {}", name, e))
            })?;
            debug!("Registering template '{}'", name);
            env.add_template_owned(name.to_string(), source)?;
        }

        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(ctx)?)
    }

    /// Render `name` into a response with `status`; a rendering failure
    /// becomes a plain 500.
    pub fn page<S: Serialize>(&self, status: StatusCode, name: &str, ctx: S) -> HttpResponse {
        match self.render(name, ctx) {
            Ok(body) => html(status, body),
            Err(e) => {
                error!("Failed to render template '{}': {}", name, e);
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body(format!("Internal Server Error: {}", e))
            }
        }
    }

    pub fn not_found(&self, message: &str) -> HttpResponse {
        self.page(
            StatusCode::NOT_FOUND,
            "not_found.html",
            context! { message => message },
        )
    }

    /// 500 page showing the raw error text
    pub fn error(&self, err: &LinkdashError) -> HttpResponse {
        self.page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "error.html",
            context! { message => err.to_string() },
        )
    }
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

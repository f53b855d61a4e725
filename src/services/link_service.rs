//! Link management service
//!
//! The single facade used by the dashboard, the JSON API, the redirect
//! handler and the CLI.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::errors::{LinkdashError, Result};
use crate::services::allocator::CodeAllocator;
use crate::services::listing::ListOptions;
use crate::storage::{LinkStore, ShortLink};
use crate::utils::url_validator::{validate_url, validation_error_message};

/// 生成的 code 在 insert 时被抢占后，重新分配的最大次数
const MAX_INSERT_RACES: usize = 3;

// ============ Request/Response DTOs ============

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Target URL
    pub url: String,
    /// Short code (optional, will be generated if absent or empty)
    pub code: Option<String>,
}

impl CreateLinkRequest {
    pub fn new(url: impl Into<String>, code: Option<String>) -> Self {
        Self {
            url: url.into(),
            code,
        }
    }
}

/// Result of link creation
#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: ShortLink,
    /// Whether the code was auto-generated
    pub generated_code: bool,
}

// ============ LinkService Implementation ============

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    allocator: CodeAllocator,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self::with_allocator(store, CodeAllocator::default())
    }

    pub fn with_allocator(store: Arc<dyn LinkStore>, allocator: CodeAllocator) -> Self {
        Self { store, allocator }
    }

    pub fn backend_name(&self) -> &str {
        self.store.backend_name()
    }

    /// Create a new short link
    ///
    /// The URL is validated before the code; surrounding whitespace is
    /// trimmed first and the trimmed form is what gets stored. A generated
    /// code that loses the insert to a concurrent writer is re-allocated; a
    /// requested one is not.
    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<LinkCreateResult> {
        let url = req.url.trim();
        validate_url(url).map_err(|e| LinkdashError::invalid_url(validation_error_message(&e)))?;

        let mut races = 0;
        loop {
            let allocation = self
                .allocator
                .allocate(self.store.as_ref(), req.code.as_deref())
                .await?;

            let new_link = ShortLink::new(allocation.code, url.to_string(), Utc::now());

            match self.store.insert(&new_link).await {
                Ok(()) => {
                    info!(
                        "LinkService: created link '{}' -> '{}'",
                        new_link.code, new_link.url
                    );
                    return Ok(LinkCreateResult {
                        link: new_link,
                        generated_code: allocation.generated,
                    });
                }
                Err(LinkdashError::Conflict(msg))
                    if allocation.generated && races < MAX_INSERT_RACES =>
                {
                    races += 1;
                    warn!(
                        "LinkService: generated code lost insert race ({}), retry {}/{}",
                        msg, races, MAX_INSERT_RACES
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// All links, newest first
    pub async fn list_links(&self) -> Result<Vec<ShortLink>> {
        self.store.list().await
    }

    /// Links filtered and ordered for the dashboard table
    pub async fn search_links(&self, options: &ListOptions) -> Result<Vec<ShortLink>> {
        let links = self.store.list().await?;
        let total = links.len();
        let links = options.apply(links);
        debug!(
            "LinkService: {} of {} links match {:?}",
            links.len(),
            total,
            options
        );
        Ok(links)
    }

    pub async fn get_link(&self, code: &str) -> Result<ShortLink> {
        self.store
            .get(code)
            .await?
            .ok_or_else(|| LinkdashError::not_found(format!("Link '{}' not found", code)))
    }

    pub async fn delete_link(&self, code: &str) -> Result<()> {
        if !self.store.delete(code).await? {
            return Err(LinkdashError::not_found(format!(
                "Link '{}' not found",
                code
            )));
        }

        info!("LinkService: deleted '{}'", code);
        Ok(())
    }

    /// Record one click and return the target URL
    pub async fn track_click(&self, code: &str) -> Result<String> {
        match self.store.record_click(code, Utc::now()).await? {
            Some(url) => {
                debug!("LinkService: click on '{}' -> '{}'", code, url);
                Ok(url)
            }
            None => Err(LinkdashError::not_found(format!(
                "Link '{}' not found",
                code
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory store. `phantom_conflicts` makes the next N inserts fail with
    /// Conflict even though `exists` said the code was free.
    #[derive(Default)]
    struct MemoryStore {
        links: Mutex<HashMap<String, ShortLink>>,
        phantom_conflicts: AtomicUsize,
        inserts: AtomicUsize,
    }

    #[async_trait]
    impl LinkStore for MemoryStore {
        fn backend_name(&self) -> &str {
            "memory"
        }

        async fn exists(&self, code: &str) -> Result<bool> {
            Ok(self.links.lock().unwrap().contains_key(code))
        }

        async fn insert(&self, link: &ShortLink) -> Result<()> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            if self
                .phantom_conflicts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(LinkdashError::conflict("raced"));
            }
            let mut links = self.links.lock().unwrap();
            if links.contains_key(&link.code) {
                return Err(LinkdashError::conflict("exists"));
            }
            links.insert(link.code.clone(), link.clone());
            Ok(())
        }

        async fn get(&self, code: &str) -> Result<Option<ShortLink>> {
            Ok(self.links.lock().unwrap().get(code).cloned())
        }

        async fn list(&self) -> Result<Vec<ShortLink>> {
            let mut all: Vec<_> = self.links.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(all)
        }

        async fn delete(&self, code: &str) -> Result<bool> {
            Ok(self.links.lock().unwrap().remove(code).is_some())
        }

        async fn record_click(&self, code: &str, at: DateTime<Utc>) -> Result<Option<String>> {
            let mut links = self.links.lock().unwrap();
            Ok(links.get_mut(code).map(|link| {
                link.total_clicks += 1;
                link.last_clicked = Some(at);
                link.url.clone()
            }))
        }
    }

    fn service_with(store: Arc<MemoryStore>) -> LinkService {
        LinkService::new(store)
    }

    #[tokio::test]
    async fn test_generated_code_race_is_retried() {
        let store = Arc::new(MemoryStore::default());
        store.phantom_conflicts.store(2, Ordering::SeqCst);
        let service = service_with(store.clone());

        let result = service
            .create_link(CreateLinkRequest::new("https://example.com", None))
            .await
            .unwrap();

        assert!(result.generated_code);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_generated_code_race_gives_up() {
        let store = Arc::new(MemoryStore::default());
        store
            .phantom_conflicts
            .store(MAX_INSERT_RACES + 1, Ordering::SeqCst);
        let service = service_with(store.clone());

        let err = service
            .create_link(CreateLinkRequest::new("https://example.com", None))
            .await
            .unwrap_err();

        assert!(matches!(err, LinkdashError::Conflict(_)));
        assert_eq!(
            store.inserts.load(Ordering::SeqCst),
            MAX_INSERT_RACES + 1
        );
    }

    #[tokio::test]
    async fn test_requested_code_race_is_not_retried() {
        let store = Arc::new(MemoryStore::default());
        store.phantom_conflicts.store(1, Ordering::SeqCst);
        let service = service_with(store.clone());

        let err = service
            .create_link(CreateLinkRequest::new(
                "https://example.com",
                Some("Mine123".to_string()),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, LinkdashError::Conflict(_)));
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_url_checked_before_code() {
        let service = service_with(Arc::new(MemoryStore::default()));
        let err = service
            .create_link(CreateLinkRequest::new("not-a-url", Some("ab".to_string())))
            .await
            .unwrap_err();

        assert!(matches!(err, LinkdashError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_url_surrounding_whitespace_is_trimmed() {
        let service = service_with(Arc::new(MemoryStore::default()));
        let created = service
            .create_link(CreateLinkRequest::new("  https://example.com/pad \n", None))
            .await
            .unwrap();

        assert_eq!(created.link.url, "https://example.com/pad");
        assert_eq!(
            service.track_click(&created.link.code).await.unwrap(),
            "https://example.com/pad"
        );
    }

    #[tokio::test]
    async fn test_url_with_embedded_newline_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with(store.clone());

        let err = service
            .create_link(CreateLinkRequest::new("https://exa\nmple.com/", None))
            .await
            .unwrap_err();

        assert!(matches!(err, LinkdashError::InvalidUrl(_)));
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_click_then_delete() {
        let service = service_with(Arc::new(MemoryStore::default()));
        let created = service
            .create_link(CreateLinkRequest::new("https://example.com/a", None))
            .await
            .unwrap();
        let code = created.link.code;

        assert_eq!(service.track_click(&code).await.unwrap(), "https://example.com/a");
        let link = service.get_link(&code).await.unwrap();
        assert_eq!(link.total_clicks, 1);
        assert!(link.last_clicked.is_some());

        service.delete_link(&code).await.unwrap();
        assert!(matches!(
            service.delete_link(&code).await,
            Err(LinkdashError::NotFound(_))
        ));
        assert!(matches!(
            service.track_click(&code).await,
            Err(LinkdashError::NotFound(_))
        ));
    }
}

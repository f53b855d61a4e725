use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::views::Views;
use crate::config::get_config;
use crate::services::LinkService;
use crate::storage::{LinkStore, SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub views: Arc<Views>,
}

/// 准备服务器启动的上下文
/// 包括存储（含 migration）、LinkService 和模板
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();
    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let link_service = Arc::new(LinkService::new(storage.clone()));

    let views = Arc::new(Views::load().context("Failed to load HTML templates")?);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        link_service,
        views,
    })
}

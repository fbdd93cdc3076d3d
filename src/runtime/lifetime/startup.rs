use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::config::AppConfig;
use crate::ratelimit::TokenBucket;
use crate::services::LocationService;
use crate::storage::{GeoLookup, StorageFactory};

pub struct StartupContext {
    pub state: AppState,
    pub record_count: usize,
}

/// 准备服务器启动的上下文
/// 加载数据集、构建查询服务和限流器
///
/// 数据集加载失败时直接返回错误，服务不会以空数据启动。
pub fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StorageFactory::load_store(&config.datastore).with_context(|| {
        format!(
            "Failed to load {} dataset from {}",
            config.datastore.kind, config.datastore.file
        )
    })?;
    let record_count = store.len();
    if store.is_empty() {
        warn!("Dataset {} contains no records", config.datastore.file);
    }

    let store: Arc<dyn GeoLookup> = Arc::new(store);
    let service = LocationService::new(store);
    info!(
        "Using lookup backend: {} ({} records)",
        service.backend_name(),
        record_count
    );

    let limiter = Arc::new(TokenBucket::new(config.rate_limit.rps));
    if limiter.capacity() == 0.0 {
        warn!(
            "Rate limit is {}; every lookup request will be rejected",
            config.rate_limit.rps
        );
    } else {
        info!("Rate limit: {} requests/second", limiter.refill_rate());
    }

    let duration = start_time.elapsed();
    debug!("Pre-startup processing completed in {:?}", duration);

    Ok(StartupContext {
        state: AppState::new(service, limiter),
        record_count,
    })
}

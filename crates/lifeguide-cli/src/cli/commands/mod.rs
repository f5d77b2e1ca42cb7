//! CLI command handlers.

pub mod auth;
pub mod bookmarks;
pub mod catalog;
pub mod config;
pub mod theme;

use std::sync::Arc;

use anyhow::Result;
use lifeguide_core::api::ApiClient;
use lifeguide_core::cache::{CacheStore, DirCache};
use lifeguide_core::config::Config;
use lifeguide_core::session::{FileTokenStore, TokenStore};

/// API client over the on-disk session.
fn api_client(config: &Config) -> Result<ApiClient> {
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open_default());
    ApiClient::from_config(config, tokens)
}

fn offline_cache() -> Arc<dyn CacheStore> {
    Arc::new(DirCache::open_default())
}

const OFFLINE_MARK: &str = "(offline)";

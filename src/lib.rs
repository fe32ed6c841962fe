use std::sync::Arc;

use auth::{Authenticator, SessionManager, TokenCodec};
use cache::SessionStore;
use config::Config;

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod utils;

/// 应用状态
///
/// 认证器和会话管理器共享同一个编解码器和会话缓存；
/// 缓存是唯一的持久状态，两者在多次调用之间无状态。
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: Authenticator,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn SessionStore>) -> Self {
        let codec = TokenCodec::new(&config);

        Self {
            auth: Authenticator::new(codec.clone(), store.clone(), &config),
            sessions: SessionManager::new(codec, store, config.clone()),
            config,
        }
    }
}

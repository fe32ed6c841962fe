pub mod auth;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, middleware::require_auth};

/// 认证路由
///
/// 刷新是公开路由（凭证是请求体里的刷新令牌本身）；注销和令牌检查
/// 需要先通过认证中间件。宿主应用把整个 Router nest 到自己的路径下。
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/logout", post(auth::handler::logout))
        .route("/check-token", get(auth::handler::check_token))
        .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/refresh-token", post(auth::handler::refresh_token))
        .merge(protected_routes)
        .with_state(state)
}

//! 核心中间件模块

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// 请求日志中间件
///
/// 4xx/5xx 响应以 warn 级别记录，其余以 info 级别记录。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();

    if status.is_client_error() || status.is_server_error() {
        warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            user_agent = ?user_agent,
            "请求失败"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            user_agent = ?user_agent,
            "请求完成"
        );
    }

    response
}

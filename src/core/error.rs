//! 核心错误处理模块

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

/// 目录操作错误
///
/// 除 `IdExhausted` 外都属于调用方输入问题，所有变体都不会导致进程退出。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("参数 {name} 无效: {value}")]
    InvalidArgument { name: &'static str, value: String },
    #[error("缺少参数: {name}")]
    MissingArgument { name: &'static str },
    #[error("产品缺少必填字段: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
    #[error("{field} 已存在: {value}")]
    DuplicateKey { field: &'static str, value: String },
    #[error("{field} 格式无效: {value}")]
    InvalidFormat { field: &'static str, value: String },
    #[error("产品 id 已用尽，当前最大 id: {last_id}")]
    IdExhausted { last_id: i64 },
}

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::IdExhausted { .. } => {
                error!("无法分配产品 id: {}", err);
                CoreError::InternalServerError(err.to_string())
            }
            _ => {
                warn!("请求被拒绝: {}", err);
                CoreError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for CoreError {
    fn from(rejection: QueryRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message) = match self {
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            CoreError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                msg,
            ),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

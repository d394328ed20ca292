//! # 产品目录服务
//!
//! 基于 Axum 的小型 HTTP 服务，启动时从 JSON 文件加载产品目录，
//! 提供以下功能：
//! - 列出全部产品、按 id 查询、按价格筛选
//! - 校验并创建新产品（`code_value` 唯一，id 自增）
//! - 问候与健康检查端点

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use config::AppConfig;

//! 产品目录：模型、目录服务与 HTTP 处理器

pub mod handler;
pub mod model;
pub mod service;

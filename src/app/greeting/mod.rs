//! 问候与存活检查

pub mod handler;
pub mod model;

//! 基础设施层：日志与数据文件加载

pub mod logger;
pub mod storage;

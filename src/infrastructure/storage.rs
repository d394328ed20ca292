//! 产品数据文件加载

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::products::{model::Product, service::Catalog};
use crate::config::IdSeed;

/// 启动阶段的加载错误，任何一种都会导致服务无法启动
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("产品数据文件不存在: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("无法读取产品数据文件 {}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("产品数据文件 {} 不是有效的 JSON", .path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 读取并解析产品数据文件
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, LoadError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|source| LoadError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_slice(&content).map_err(|source| LoadError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// 从数据文件构建产品目录
pub fn load_catalog<P: AsRef<Path>>(path: P, seed: IdSeed) -> Result<Catalog, LoadError> {
    let products = load_products(path.as_ref())?;
    info!(
        path = %path.as_ref().display(),
        count = products.len(),
        "产品数据加载完成"
    );
    Ok(Catalog::from_products(products, seed))
}

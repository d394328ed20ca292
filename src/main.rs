use std::env;
use std::path::PathBuf;
use std::process;

use product_catalog::{
    config::{self, AppConfig},
    infrastructure::{logger::Logger, storage},
    router, AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // 可选参数：配置文件路径
    let explicit = env::args().nth(1).map(PathBuf::from);

    let config = match config::load_config(explicit.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Logger::init("info");
            error!("配置加载失败: {}", e);
            process::exit(1);
        }
    };

    Logger::init(&config.logging.level);
    match config::resolve_path(explicit.as_deref()) {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    if let Err(e) = run(config).await {
        error!("服务启动失败: {:#}", e);
        process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let catalog = storage::load_catalog(&config.catalog.data_path, config.catalog.id_seed)?;
    let app = router(AppState::new(catalog), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("🚀 产品目录服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET  /ping                  - 存活检查");
    info!("   POST /saludo                - 问候");
    info!("   GET  /health                - 健康检查");
    info!("   GET  /products              - 获取所有产品");
    info!("   GET  /products/:id          - 按 id 获取产品");
    info!("   GET  /products/search?price - 获取价格高于阈值的产品");
    info!("   POST /products              - 创建新产品");

    axum::serve(listener, app).await?;
    Ok(())
}

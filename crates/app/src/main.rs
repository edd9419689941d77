use std::sync::Arc;

use flowtrack_api::server::{AppState, start_server};
use flowtrack_core::common::time::RealTimeProvider;
use flowtrack_core::config::StoreBackend;
use flowtrack_core::flow::port::FlowStore;
use flowtrack_report::PdfReportRenderer;
use flowtrack_store::flow::SqliteFlowStore;
use flowtrack_store::memory::MemoryFlowStore;
use flowtrack_store::repository::FlowRepository;
use tracing::{error, info, warn};

mod settings;
mod telemetry;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化存储、仓储与渲染器，并通过 `Arc<dyn Trait>` 注入到 API 层。
///
/// # Logic
/// 1. 读取 `.env` 与配置。
/// 2. 初始化全局日志。
/// 3. 打开流水存储，失败则拒绝启动。
/// 4. 构造仓储与报表渲染器。
/// 5. 启动 HTTP 服务，收到 Ctrl-C 后优雅退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 读取配置
    let env_file = dotenvy::dotenv().ok();
    let config = settings::load()?;

    // 2. 初始化日志
    let _log_guard = telemetry::init(&config.log);
    info!("Flowtrack starting...");
    if let Some(path) = env_file {
        info!("Loaded environment from {}", path.display());
    }

    // 3. 实例化基础设施层
    let store: Arc<dyn FlowStore> = match config.database.backend {
        StoreBackend::Sqlite => Arc::new(SqliteFlowStore::new(&config.database.data_dir).await?),
        StoreBackend::Memory => {
            warn!("Using in-memory flow store, data will be lost on exit");
            Arc::new(MemoryFlowStore::new())
        }
    };

    // 4. 构造应用服务层
    let clock = Arc::new(RealTimeProvider);
    let repository = Arc::new(FlowRepository::new(store, clock.clone()));
    let renderer = Arc::new(PdfReportRenderer::new(&config.report, clock));
    let state = AppState { repository, renderer };

    // 5. 启动服务并挂起，等待外部退出信号
    start_server(state, &config.server.bind_addr(), shutdown_signal()).await?;

    info!("Flowtrack stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时不主动退出
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Exiting...");
}

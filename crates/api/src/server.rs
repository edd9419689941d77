//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 与请求追踪并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 组装依赖后调用。

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use flowtrack_core::report::port::ReportRenderer;
use flowtrack_store::repository::FlowRepository;

use crate::routes::{data, health, ingest, report};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 仓储与渲染器在服务启动前注入，生命周期与进程等同。
/// - 请求之间除存储本身外没有共享可变状态。
#[derive(Clone)]
pub struct AppState {
    /// 流水仓储
    pub repository: Arc<FlowRepository>,
    /// 报表渲染器
    pub renderer: Arc<dyn ReportRenderer>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flowtrack 出入库流水 API",
        version = "0.1.0",
        description = "记录入库 (采购) 与出库 (销售) 流水，按区间查询汇总、出入库关系分析并导出 PDF 报表。",
        license(name = "MIT")
    ),
    tags(
        (name = "录入 (Ingest)", description = "入库 / 出库流水录入"),
        (name = "查询 (Data)", description = "区间汇总、明细与关系分析"),
        (name = "报表 (Report)", description = "区间 PDF 报表下载"),
        (name = "系统 (System)", description = "存活探针")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI、CORS 与请求追踪)。
///
/// # Arguments
/// * `state` - 由外部注入的共享状态
pub fn build_router(state: AppState) -> Router {
    // 1. 业务路由，统一挂在 /api 下
    let api_router = OpenApiRouter::new()
        .routes(routes!(ingest::record_inflow))
        .routes(routes!(ingest::record_outflow))
        .routes(routes!(data::inflow_data))
        .routes(routes!(data::outflow_data))
        .routes(routes!(data::relationship_data))
        .routes(routes!(report::inflow_report))
        .routes(routes!(report::outflow_report))
        .routes(routes!(report::relationship_report));

    // 2. 合并路由与自动收集的 OpenAPI Doc
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(api_router)
        .routes(routes!(health::health))
        .with_state(state)
        .split_for_parts();

    // 3. 移动端跨域调用，允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 4. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// 绑定端口并启动 HTTP 服务，直到 `shutdown` 完成后优雅退出。
///
/// # Arguments
/// * `state` - 由外部注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:3000"`
/// * `shutdown` - 退出信号
///
/// # Returns
/// 端口绑定失败或服务异常时返回错误。
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Flowtrack API Server listening on {}", listener.local_addr()?);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    Ok(())
}

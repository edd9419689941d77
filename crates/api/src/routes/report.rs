//! # 报表路由控制器
//!
//! 报表以完整缓冲区一次性返回，附带 `Content-Disposition` 以触发下载。

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use flowtrack_core::common::DateRange;
use flowtrack_core::flow::entity::{FlowDirection, FlowEntry};

use crate::error::ApiError;
use crate::routes::parse_range;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, DateRangeQuery};

/// 渲染为 CPU 密集操作，移出异步运行时线程
async fn render_flow(
    state: &AppState,
    direction: FlowDirection,
    entries: Vec<FlowEntry>,
    range: DateRange,
) -> Result<Vec<u8>, ApiError> {
    let renderer = state.renderer.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        renderer.render_flow_report(direction, &entries, &range)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(bytes)
}

fn attachment(state: &AppState, filename: &str, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, state.renderer.content_type().to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename={}", filename)),
        ],
        bytes,
    )
        .into_response()
}

/// 下载区间内的入库报表 (PDF)
#[utoipa::path(
    get,
    path = "/api/inflow-report",
    tag = "报表 (Report)",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "PDF 文档", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "区间缺失或非法", body = ApiErrorResponse),
        (status = 500, description = "存储或渲染失败", body = ApiErrorResponse)
    )
)]
pub async fn inflow_report(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let range = parse_range(query)?;
    let entries = state.repository.query(FlowDirection::Inbound, &range).await?;
    let bytes = render_flow(&state, FlowDirection::Inbound, entries, range).await?;
    Ok(attachment(&state, "inflow-report.pdf", bytes))
}

/// 下载区间内的出库报表 (PDF)
#[utoipa::path(
    get,
    path = "/api/outflow-report",
    tag = "报表 (Report)",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "PDF 文档", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "区间缺失或非法", body = ApiErrorResponse),
        (status = 500, description = "存储或渲染失败", body = ApiErrorResponse)
    )
)]
pub async fn outflow_report(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let range = parse_range(query)?;
    let entries = state.repository.query(FlowDirection::Outbound, &range).await?;
    let bytes = render_flow(&state, FlowDirection::Outbound, entries, range).await?;
    Ok(attachment(&state, "outflow-report.pdf", bytes))
}

/// 下载区间内的出入库关系报表 (PDF)
#[utoipa::path(
    get,
    path = "/api/relationship-report",
    tag = "报表 (Report)",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "PDF 文档", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "区间缺失或非法", body = ApiErrorResponse),
        (status = 500, description = "存储或渲染失败", body = ApiErrorResponse)
    )
)]
pub async fn relationship_report(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let range = parse_range(query)?;
    let (inflow, outflow) = state.repository.query_both(&range).await?;

    let renderer = state.renderer.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        renderer.render_relationship_report(&inflow, &outflow, &range)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(attachment(&state, "relationship-report.pdf", bytes))
}

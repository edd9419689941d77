//! # 区间查询路由控制器
//!
//! 读取区间内的流水并在内存中即时汇总，每次请求都基于最新数据重新计算。

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use flowtrack_core::flow::entity::FlowDirection;

use crate::error::ApiError;
use crate::routes::parse_range;
use crate::server::AppState;
use crate::types::{
    ApiErrorResponse, DateRangeQuery, InflowDataResponse, OutflowDataResponse,
    RelationshipDataResponse,
};

/// 查询区间内的入库汇总与明细
#[utoipa::path(
    get,
    path = "/api/inflow-data",
    tag = "查询 (Data)",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "查询成功", body = InflowDataResponse),
        (status = 400, description = "区间缺失或非法", body = ApiErrorResponse),
        (status = 500, description = "存储失败或汇总溢出", body = ApiErrorResponse)
    )
)]
pub async fn inflow_data(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<InflowDataResponse>, ApiError> {
    let range = parse_range(query)?;
    let entries = state.repository.query(FlowDirection::Inbound, &range).await?;

    let summary = flowtrack_analytics::summarize(&entries)?.into();
    Ok(Json(InflowDataResponse {
        summary,
        details: entries.into_iter().map(Into::into).collect(),
    }))
}

/// 查询区间内的出库汇总与明细
#[utoipa::path(
    get,
    path = "/api/outflow-data",
    tag = "查询 (Data)",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "查询成功", body = OutflowDataResponse),
        (status = 400, description = "区间缺失或非法", body = ApiErrorResponse),
        (status = 500, description = "存储失败或汇总溢出", body = ApiErrorResponse)
    )
)]
pub async fn outflow_data(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<OutflowDataResponse>, ApiError> {
    let range = parse_range(query)?;
    let entries = state.repository.query(FlowDirection::Outbound, &range).await?;

    let summary = flowtrack_analytics::summarize(&entries)?.into();
    Ok(Json(OutflowDataResponse {
        summary,
        details: entries.into_iter().map(Into::into).collect(),
    }))
}

/// 查询区间内的出入库关系分析
///
/// 依次读取入库与出库两个分区，计算总体财务 / 库存指标与逐货品分析。
#[utoipa::path(
    get,
    path = "/api/relationship-data",
    tag = "查询 (Data)",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "查询成功", body = RelationshipDataResponse),
        (status = 400, description = "区间缺失或非法", body = ApiErrorResponse),
        (status = 500, description = "存储失败或汇总溢出", body = ApiErrorResponse)
    )
)]
pub async fn relationship_data(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<RelationshipDataResponse>, ApiError> {
    let range = parse_range(query)?;
    let (inflow, outflow) = state.repository.query_both(&range).await?;

    let summary = flowtrack_analytics::relationship_summary(&inflow, &outflow)?.into();
    let item_analysis = flowtrack_analytics::item_wise_analysis(&inflow, &outflow)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(RelationshipDataResponse {
        summary,
        in_flow_details: inflow.into_iter().map(Into::into).collect(),
        out_flow_details: outflow.into_iter().map(Into::into).collect(),
        item_analysis,
    }))
}

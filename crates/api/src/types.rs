//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向移动端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//!
//! 汇总字段沿用 camelCase，明细行保留录入时的 snake_case 字段名。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use flowtrack_core::analytics::entity::{
    FinancialSummary, FlowSummary, InventorySummary, ItemAnalysis, ItemMetrics, ItemTotals,
    RelationshipSummary,
};
use flowtrack_core::flow::entity::FlowEntry;

// ============================================================
//  录入 DTO
// ============================================================

/// 入库录入请求
///
/// 所有字段均为可选，缺失与否由处理器统一判定，以便返回固定的错误信息。
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InflowRequest {
    /// 业务发生时间 (`YYYY-MM-DD` 或 RFC 3339)
    #[schema(example = "2023-06-01")]
    pub datetime: Option<String>,
    /// 货品名称
    #[schema(example = "Widget")]
    pub item: Option<String>,
    /// 备注
    pub description: Option<String>,
    #[schema(example = 10)]
    pub quantity: Option<Decimal>,
    /// 总成本
    #[schema(example = 1000)]
    pub total_value: Option<Decimal>,
    /// 单位成本
    #[schema(example = 100)]
    pub unit_value: Option<Decimal>,
}

/// 出库录入请求
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OutflowRequest {
    #[schema(example = "2023-06-02")]
    pub datetime: Option<String>,
    #[schema(example = "Widget")]
    pub item: Option<String>,
    pub description: Option<String>,
    #[schema(example = 4)]
    pub quantity: Option<Decimal>,
    /// 总售价
    #[schema(example = 800)]
    pub total_price: Option<Decimal>,
    /// 单价
    #[schema(example = 200)]
    pub unit_price: Option<Decimal>,
}

/// 录入成功响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Data inserted successfully")]
    pub message: String,
}

// ============================================================
//  查询 DTO
// ============================================================

/// 区间查询参数，两端均包含
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// 起始日期 (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// 结束日期 (`YYYY-MM-DD`)
    pub end_date: Option<String>,
}

/// 入库汇总
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InflowSummaryResponse {
    pub total_quantity: Decimal,
    pub total_value: Decimal,
    pub average_unit_value: Decimal,
}

/// 出库汇总
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutflowSummaryResponse {
    pub total_quantity: Decimal,
    pub total_price: Decimal,
    pub average_unit_price: Decimal,
}

/// 入库明细行
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InflowDetail {
    pub datetime: DateTime<Utc>,
    pub item: String,
    pub description: String,
    pub quantity: Decimal,
    pub total_value: Decimal,
    pub unit_value: Decimal,
}

/// 出库明细行
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OutflowDetail {
    pub datetime: DateTime<Utc>,
    pub item: String,
    pub description: String,
    pub quantity: Decimal,
    pub total_price: Decimal,
    pub unit_price: Decimal,
}

/// `GET /api/inflow-data` 响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InflowDataResponse {
    pub summary: InflowSummaryResponse,
    pub details: Vec<InflowDetail>,
}

/// `GET /api/outflow-data` 响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OutflowDataResponse {
    pub summary: OutflowSummaryResponse,
    pub details: Vec<OutflowDetail>,
}

// ============================================================
//  关系分析 DTO
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialResponse {
    pub total_in_flow: Decimal,
    pub total_out_flow: Decimal,
    /// 产出减投入
    pub profit: Decimal,
    /// 百分比，投入为 0 时为 0
    pub profit_margin: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub total_in_quantity: Decimal,
    pub total_out_quantity: Decimal,
    /// 可为负 (超量出库)
    pub current_stock: Decimal,
    pub movement_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RelationshipSummaryResponse {
    pub financial: FinancialResponse,
    pub inventory: InventoryResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemTotalsResponse {
    pub quantity: Decimal,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetricsResponse {
    pub current_stock: Decimal,
    pub profit: Decimal,
    pub profit_margin: Decimal,
    pub movement_rate: Decimal,
}

/// 单个货品的出入库分析
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemAnalysisResponse {
    #[schema(example = "Widget")]
    pub item: String,
    pub in_flow: ItemTotalsResponse,
    pub out_flow: ItemTotalsResponse,
    pub analysis: ItemMetricsResponse,
}

/// `GET /api/relationship-data` 响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDataResponse {
    pub summary: RelationshipSummaryResponse,
    pub in_flow_details: Vec<InflowDetail>,
    pub out_flow_details: Vec<OutflowDetail>,
    pub item_analysis: Vec<ItemAnalysisResponse>,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 失败响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 错误描述信息
    #[schema(example = "Missing required fields")]
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// 存活探针响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

// ============================================================
//  领域模型 → DTO 惯用转换 (impl From<T>)
// ============================================================

impl From<FlowSummary> for InflowSummaryResponse {
    fn from(s: FlowSummary) -> Self {
        Self {
            total_quantity: s.total_quantity,
            total_value: s.total_amount,
            average_unit_value: s.average_unit_amount,
        }
    }
}

impl From<FlowSummary> for OutflowSummaryResponse {
    fn from(s: FlowSummary) -> Self {
        Self {
            total_quantity: s.total_quantity,
            total_price: s.total_amount,
            average_unit_price: s.average_unit_amount,
        }
    }
}

impl From<FlowEntry> for InflowDetail {
    fn from(e: FlowEntry) -> Self {
        Self {
            datetime: e.datetime,
            item: e.item,
            description: e.description,
            quantity: e.quantity,
            total_value: e.total_amount,
            unit_value: e.unit_amount,
        }
    }
}

impl From<FlowEntry> for OutflowDetail {
    fn from(e: FlowEntry) -> Self {
        Self {
            datetime: e.datetime,
            item: e.item,
            description: e.description,
            quantity: e.quantity,
            total_price: e.total_amount,
            unit_price: e.unit_amount,
        }
    }
}

impl From<FinancialSummary> for FinancialResponse {
    fn from(f: FinancialSummary) -> Self {
        Self {
            total_in_flow: f.total_in_flow,
            total_out_flow: f.total_out_flow,
            profit: f.profit,
            profit_margin: f.profit_margin,
        }
    }
}

impl From<InventorySummary> for InventoryResponse {
    fn from(i: InventorySummary) -> Self {
        Self {
            total_in_quantity: i.total_in_quantity,
            total_out_quantity: i.total_out_quantity,
            current_stock: i.current_stock,
            movement_rate: i.movement_rate,
        }
    }
}

impl From<RelationshipSummary> for RelationshipSummaryResponse {
    fn from(s: RelationshipSummary) -> Self {
        Self {
            financial: s.financial.into(),
            inventory: s.inventory.into(),
        }
    }
}

impl From<ItemTotals> for ItemTotalsResponse {
    fn from(t: ItemTotals) -> Self {
        Self {
            quantity: t.quantity,
            value: t.value,
        }
    }
}

impl From<ItemMetrics> for ItemMetricsResponse {
    fn from(m: ItemMetrics) -> Self {
        Self {
            current_stock: m.current_stock,
            profit: m.profit,
            profit_margin: m.profit_margin,
            movement_rate: m.movement_rate,
        }
    }
}

impl From<ItemAnalysis> for ItemAnalysisResponse {
    fn from(a: ItemAnalysis) -> Self {
        Self {
            item: a.item,
            in_flow: a.in_flow.into(),
            out_flow: a.out_flow.into(),
            analysis: a.analysis.into(),
        }
    }
}

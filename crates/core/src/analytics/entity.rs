use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单方向流水的汇总。
///
/// # Invariants
/// - `average_unit_amount = total_amount / total_quantity`；`total_quantity` 为 0 时取 0。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowSummary {
    pub total_quantity: Decimal,
    pub total_amount: Decimal,
    pub average_unit_amount: Decimal,
}

/// 财务汇总
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    // 入库总成本
    pub total_in_flow: Decimal,
    // 出库总收入
    pub total_out_flow: Decimal,
    // total_out_flow - total_in_flow，可为负
    pub profit: Decimal,
    // 百分比，total_in_flow 为 0 时取 0
    pub profit_margin: Decimal,
}

/// 库存汇总
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_in_quantity: Decimal,
    pub total_out_quantity: Decimal,
    // 入库数量 - 出库数量，超发时为负且不截断
    pub current_stock: Decimal,
    // 百分比，total_in_quantity 为 0 时取 0
    pub movement_rate: Decimal,
}

/// # Summary
/// 出入库关系汇总。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationshipSummary {
    pub financial: FinancialSummary,
    pub inventory: InventorySummary,
}

/// 单个货品某一方向的数量与金额
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemTotals {
    pub quantity: Decimal,
    pub value: Decimal,
}

/// 单个货品的派生指标
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemMetrics {
    pub current_stock: Decimal,
    pub profit: Decimal,
    // 以该货品的入库金额为分母
    pub profit_margin: Decimal,
    pub movement_rate: Decimal,
}

/// # Summary
/// 单个货品在查询区间内的出入库分析，只在请求内计算，不持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAnalysis {
    pub item: String,
    pub in_flow: ItemTotals,
    pub out_flow: ItemTotals,
    pub analysis: ItemMetrics,
}

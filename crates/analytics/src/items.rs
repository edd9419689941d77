use std::collections::HashMap;

use flowtrack_core::analytics::entity::{ItemAnalysis, ItemMetrics, ItemTotals};
use flowtrack_core::analytics::error::AnalyticsError;
use flowtrack_core::flow::entity::FlowEntry;

use crate::summary::{accumulate, difference, percent_of};

/// # Summary
/// 逐货品交叉分析入库与出库。
///
/// # Logic
/// 1. 按 "先入库、后出库" 的拼接顺序收集货品名称，保留首次出现的位置并去重。
/// 2. 对每个货品分别累加两个方向的数量与金额。
/// 3. 套用与总体汇总相同的公式，利润率以该货品的入库金额为分母。
///
/// # Arguments
/// * `inflow`: 入库流水。
/// * `outflow`: 出库流水。
///
/// # Returns
/// * `Ok(Vec<ItemAnalysis>)` - 恰好覆盖两侧货品名称的并集，无遗漏、无重复。
/// * `Err(AnalyticsError::Overflow)` - 某个货品的合计超出 `Decimal` 范围。
pub fn item_wise_analysis(
    inflow: &[FlowEntry],
    outflow: &[FlowEntry],
) -> Result<Vec<ItemAnalysis>, AnalyticsError> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (ItemTotals, ItemTotals)> = HashMap::new();

    for entry in inflow {
        let slot = totals.entry(entry.item.as_str()).or_insert_with(|| {
            order.push(entry.item.as_str());
            Default::default()
        });
        add_entry(&mut slot.0, entry)?;
    }

    for entry in outflow {
        let slot = totals.entry(entry.item.as_str()).or_insert_with(|| {
            order.push(entry.item.as_str());
            Default::default()
        });
        add_entry(&mut slot.1, entry)?;
    }

    let mut analyses = Vec::with_capacity(order.len());
    for item in order {
        let Some((in_flow, out_flow)) = totals.remove(item) else {
            continue;
        };
        let profit = difference(out_flow.value, in_flow.value, "item profit")?;
        let analysis = ItemMetrics {
            current_stock: difference(in_flow.quantity, out_flow.quantity, "item stock")?,
            profit,
            profit_margin: percent_of(profit, in_flow.value),
            movement_rate: percent_of(out_flow.quantity, in_flow.quantity),
        };
        analyses.push(ItemAnalysis {
            item: item.to_string(),
            in_flow,
            out_flow,
            analysis,
        });
    }
    Ok(analyses)
}

fn add_entry(totals: &mut ItemTotals, entry: &FlowEntry) -> Result<(), AnalyticsError> {
    totals.quantity = accumulate(totals.quantity, entry.quantity, "item quantity")?;
    totals.value = accumulate(totals.value, entry.total_amount, "item value")?;
    Ok(())
}

use flowtrack_core::analytics::entity::{
    FinancialSummary, FlowSummary, InventorySummary, RelationshipSummary,
};
use flowtrack_core::analytics::error::AnalyticsError;
use flowtrack_core::flow::entity::FlowEntry;
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// # Summary
/// 计算单方向流水的总数量、总金额与平均单位金额。
///
/// # Logic
/// 入库与出库共用此函数：入库时金额即 `total_value`，出库时即 `total_price`。
///
/// # Arguments
/// * `entries`: 任意顺序的流水序列，可以为空。
///
/// # Returns
/// * `Ok(FlowSummary)` - 总数量为 0 时平均值为 0。
/// * `Err(AnalyticsError::Overflow)` - 合计超出 `Decimal` 范围。
pub fn summarize(entries: &[FlowEntry]) -> Result<FlowSummary, AnalyticsError> {
    let total_quantity = sum_quantity(entries)?;
    let total_amount = sum_amount(entries)?;

    Ok(FlowSummary {
        total_quantity,
        total_amount,
        average_unit_amount: guarded_div(total_amount, total_quantity),
    })
}

/// # Summary
/// 计算出入库的财务与库存关系汇总。
///
/// # Logic
/// 1. 财务：利润 = 出库金额 - 入库金额，利润率以入库金额为分母。
/// 2. 库存：当前库存 = 入库数量 - 出库数量，动销率 = 出库数量 / 入库数量。
///
/// # Arguments
/// * `inflow`: 入库流水。
/// * `outflow`: 出库流水。
///
/// # Returns
/// * `Result<RelationshipSummary, AnalyticsError>` - 任一合计溢出时返回错误。
pub fn relationship_summary(
    inflow: &[FlowEntry],
    outflow: &[FlowEntry],
) -> Result<RelationshipSummary, AnalyticsError> {
    let total_in_flow = sum_amount(inflow)?;
    let total_out_flow = sum_amount(outflow)?;
    let profit = difference(total_out_flow, total_in_flow, "profit")?;

    let total_in_quantity = sum_quantity(inflow)?;
    let total_out_quantity = sum_quantity(outflow)?;
    let current_stock = difference(total_in_quantity, total_out_quantity, "current stock")?;

    Ok(RelationshipSummary {
        financial: FinancialSummary {
            total_in_flow,
            total_out_flow,
            profit,
            profit_margin: percent_of(profit, total_in_flow),
        },
        inventory: InventorySummary {
            total_in_quantity,
            total_out_quantity,
            current_stock,
            movement_rate: percent_of(total_out_quantity, total_in_quantity),
        },
    })
}

/// # Summary
/// 计算 `part / whole * 100`。
///
/// # Returns
/// * `whole` 不为正时返回 0。
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map(|pct| pct.normalize())
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn guarded_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .map(|v| v.normalize())
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn accumulate(
    acc: Decimal,
    value: Decimal,
    metric: &'static str,
) -> Result<Decimal, AnalyticsError> {
    acc.checked_add(value).ok_or(AnalyticsError::Overflow(metric))
}

pub(crate) fn difference(
    lhs: Decimal,
    rhs: Decimal,
    metric: &'static str,
) -> Result<Decimal, AnalyticsError> {
    lhs.checked_sub(rhs).ok_or(AnalyticsError::Overflow(metric))
}

fn sum_quantity(entries: &[FlowEntry]) -> Result<Decimal, AnalyticsError> {
    entries
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| accumulate(acc, e.quantity, "total quantity"))
}

fn sum_amount(entries: &[FlowEntry]) -> Result<Decimal, AnalyticsError> {
    entries
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| accumulate(acc, e.total_amount, "total amount"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_of_guards_zero_denominator() {
        assert_eq!(percent_of(dec!(50), dec!(0)), Decimal::ZERO);
        assert_eq!(percent_of(dec!(-200), dec!(1000)), dec!(-20));
        assert_eq!(percent_of(dec!(4), dec!(10)), dec!(40));
    }

    #[test]
    fn test_guarded_div() {
        assert_eq!(guarded_div(dec!(1000), dec!(0)), Decimal::ZERO);
        assert_eq!(guarded_div(dec!(1000), dec!(8)), dec!(125));
    }

    #[test]
    fn test_accumulate_reports_overflow() {
        assert_eq!(accumulate(dec!(1), dec!(2), "total amount"), Ok(dec!(3)));
        assert_eq!(
            accumulate(Decimal::MAX, Decimal::ONE, "total amount"),
            Err(AnalyticsError::Overflow("total amount"))
        );
        assert_eq!(
            difference(Decimal::MIN, Decimal::ONE, "profit"),
            Err(AnalyticsError::Overflow("profit"))
        );
    }
}

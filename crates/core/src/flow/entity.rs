use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 流水方向：入库 (采购) 或出库 (销售)。
///
/// # Invariants
/// - 每个方向对应存储中的一个独立分区 (bucket)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowDirection {
    Inbound,
    Outbound,
}

impl FlowDirection {
    /// 存储分区名称
    pub fn bucket(&self) -> &'static str {
        match self {
            FlowDirection::Inbound => "inFlow",
            FlowDirection::Outbound => "outFlow",
        }
    }
}

impl std::fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowDirection::Inbound => write!(f, "inbound"),
            FlowDirection::Outbound => write!(f, "outbound"),
        }
    }
}

/// # Summary
/// 一条出入库流水。
///
/// 入库时 `unit_amount` / `total_amount` 表示单位成本与总成本 (`unit_value` / `total_value`)，
/// 出库时表示单价与总售价 (`unit_price` / `total_price`)。
///
/// # Invariants
/// - `item` 非空。
/// - 数量与金额均非负。
/// - 系统不校验 `quantity * unit_amount == total_amount`，以调用方提交的总额为准。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEntry {
    // 业务发生时间
    pub datetime: DateTime<Utc>,
    // 货品名称
    pub item: String,
    // 备注，缺省为空串
    pub description: String,
    // 数量
    pub quantity: Decimal,
    // 单位金额
    pub unit_amount: Decimal,
    // 总金额
    pub total_amount: Decimal,
}

/// 流水记录的唯一标识 (UUID v4)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    /// 生成一个新的随机标识，与写入时间无关
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// # Summary
/// 追加式日志中的一条持久化记录。
///
/// # Invariants
/// - 记录只追加，不更新也不删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub id: EntryId,
    // 写入时间
    pub recorded_at: DateTime<Utc>,
    pub entry: FlowEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_bucket_names() {
        assert_eq!(FlowDirection::Inbound.bucket(), "inFlow");
        assert_eq!(FlowDirection::Outbound.bucket(), "outFlow");
        assert_eq!(FlowDirection::Outbound.to_string(), "outbound");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert_ne!(a, b);
    }
}

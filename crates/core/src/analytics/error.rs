use thiserror::Error;

/// # Summary
/// 分析计算错误。
///
/// # Invariants
/// - 累加或相减超出 `Decimal` 表示范围时返回，而不是 panic。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// 数值溢出，携带出错的指标名称
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

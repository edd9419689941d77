use super::error::ReportError;
use crate::common::DateRange;
use crate::flow::entity::{FlowDirection, FlowEntry};

/// # Summary
/// 报表渲染接口，将流水序列排版为完整的二进制文档。
///
/// # Invariants
/// - 返回的缓冲区是完整文档，不做流式交付。
/// - 渲染为纯 CPU 操作，不访问存储。
pub trait ReportRenderer: Send + Sync {
    /// # Summary
    /// 渲染单方向流水报表 (汇总 + 明细表)。
    ///
    /// # Arguments
    /// * `direction` - 决定标题、汇总标签与列名。
    /// * `entries` - 已按区间过滤的流水。
    /// * `period` - 报表区间，仅用于页眉展示。
    ///
    /// # Returns
    /// * `Result<Vec<u8>, ReportError>`
    fn render_flow_report(
        &self,
        direction: FlowDirection,
        entries: &[FlowEntry],
        period: &DateRange,
    ) -> Result<Vec<u8>, ReportError>;

    /// # Summary
    /// 渲染出入库关系报表 (总体汇总 + 逐货品分析)。
    ///
    /// # Arguments
    /// * `inflow` / `outflow` - 已按区间过滤的两方向流水。
    /// * `period` - 报表区间。
    ///
    /// # Returns
    /// * `Result<Vec<u8>, ReportError>`
    fn render_relationship_report(
        &self,
        inflow: &[FlowEntry],
        outflow: &[FlowEntry],
        period: &DateRange,
    ) -> Result<Vec<u8>, ReportError>;

    /// 生成文档的 MIME 类型
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }
}

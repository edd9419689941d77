//! # `flowtrack-report` - PDF 报表
//!
//! 将流水与分析结果排版为 US Letter 尺寸的 PDF：
//! - 单方向报表：页眉、汇总、分页明细表 (每页重复表头)。
//! - 关系报表：总体概览与逐货品分析块。
//!
//! 版面由 [`layout`] 声明式计算，[`canvas`] 只负责绘制与序列化。

pub mod canvas;
pub mod flow_report;
pub mod format;
pub mod header;
pub mod layout;
pub mod metrics;
pub mod relationship_report;
mod renderer;

pub use renderer::PdfReportRenderer;

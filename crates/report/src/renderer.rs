use crate::header::ReportHeader;
use crate::{flow_report, relationship_report};
use flowtrack_core::common::DateRange;
use flowtrack_core::common::time::TimeProvider;
use flowtrack_core::config::ReportConfig;
use flowtrack_core::flow::entity::{FlowDirection, FlowEntry};
use flowtrack_core::report::error::ReportError;
use flowtrack_core::report::port::ReportRenderer;
use std::sync::Arc;
use tracing::info;

/// # Summary
/// 基于内置 Helvetica 字体的 PDF 报表渲染器。
///
/// # Invariants
/// - 生成时间取自注入的时钟，测试中可固定。
/// - 无内部可变状态，可在请求间共享。
pub struct PdfReportRenderer {
    caption: String,
    clock: Arc<dyn TimeProvider>,
}

impl PdfReportRenderer {
    pub fn new(config: &ReportConfig, clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            caption: config.caption.clone(),
            clock,
        }
    }

    fn header<'a>(&'a self, title: &'a str, period: &'a DateRange) -> ReportHeader<'a> {
        ReportHeader {
            caption: &self.caption,
            title,
            period,
            generated_at: self.clock.now(),
        }
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render_flow_report(
        &self,
        direction: FlowDirection,
        entries: &[FlowEntry],
        period: &DateRange,
    ) -> Result<Vec<u8>, ReportError> {
        let header = self.header(flow_report::title(direction), period);
        let bytes = flow_report::render(direction, entries, &header)?;
        info!("Rendered {} flow report with {} entries", direction, entries.len());
        Ok(bytes)
    }

    fn render_relationship_report(
        &self,
        inflow: &[FlowEntry],
        outflow: &[FlowEntry],
        period: &DateRange,
    ) -> Result<Vec<u8>, ReportError> {
        let header = self.header(relationship_report::TITLE, period);
        let bytes = relationship_report::render(inflow, outflow, &header)?;
        info!(
            "Rendered relationship report with {} inflow / {} outflow entries",
            inflow.len(),
            outflow.len()
        );
        Ok(bytes)
    }
}

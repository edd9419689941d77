use chrono::{Duration, TimeZone, Utc};
use flowtrack_core::common::DateRange;
use flowtrack_core::common::time::FakeClockProvider;
use flowtrack_core::config::ReportConfig;
use flowtrack_core::flow::entity::{FlowDirection, FlowEntry};
use flowtrack_core::report::port::ReportRenderer;
use flowtrack_report::PdfReportRenderer;
use flowtrack_core::analytics::error::AnalyticsError;
use flowtrack_core::report::error::ReportError;
use lopdf::content::Content;
use lopdf::{Document, Object};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn renderer() -> PdfReportRenderer {
    let clock = Arc::new(FakeClockProvider::new(
        Utc.with_ymd_and_hms(2023, 6, 5, 15, 4, 0).unwrap(),
    ));
    PdfReportRenderer::new(&ReportConfig::default(), clock)
}

fn june() -> DateRange {
    DateRange::new(
        Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 6, 30, 0, 0, 0).unwrap(),
    )
}

fn entry(day_offset: i64, item: &str, quantity: Decimal, unit: Decimal) -> FlowEntry {
    FlowEntry {
        datetime: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap() + Duration::hours(day_offset),
        item: item.to_string(),
        description: "Delivered (pallet)".to_string(),
        quantity,
        unit_amount: unit,
        total_amount: quantity * unit,
    }
}

/// 解压后逐页取出内容流
fn page_contents(bytes: &[u8]) -> anyhow::Result<Vec<Vec<u8>>> {
    let mut doc = Document::load_mem(bytes)?;
    doc.decompress();
    let mut contents = Vec::new();
    for page_id in doc.get_pages().values() {
        contents.push(doc.get_page_content(*page_id)?);
    }
    Ok(contents)
}

/// 找到以 `prefix` 开头的首个文本，返回绘制它时生效的字体资源名
fn font_of(page: &[u8], prefix: &str) -> anyhow::Result<Option<Vec<u8>>> {
    let content = Content::decode(page)?;
    let mut font: Option<Vec<u8>> = None;
    for op in &content.operations {
        match (op.operator.as_str(), op.operands.first()) {
            ("Tf", Some(Object::Name(name))) => font = Some(name.clone()),
            ("Tj", Some(Object::String(text, _))) if text.starts_with(prefix.as_bytes()) => {
                return Ok(font);
            }
            _ => {}
        }
    }
    Ok(None)
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
}

#[test]
fn test_inflow_report_single_page() -> anyhow::Result<()> {
    let entries = vec![entry(0, "Widget", dec!(10), dec!(100))];
    let bytes = renderer().render_flow_report(FlowDirection::Inbound, &entries, &june())?;

    assert!(bytes.starts_with(b"%PDF"));
    let pages = page_contents(&bytes)?;
    assert_eq!(pages.len(), 1);

    let page = &pages[0];
    assert!(contains(page, "(Input Flow Report)"));
    assert!(contains(page, "(INVENTORY FLOW SYSTEM)"));
    assert!(contains(page, "(Report Period: June 1st, 2023 - June 30th, 2023)"));
    assert!(contains(page, "(Generated on: June 5th, 2023 3:04 PM)"));
    assert!(contains(page, "(Total Items Received: 10)"));
    assert!(contains(page, "(Total Value: $1,000.00)"));
    assert!(contains(page, "(Unit Value)"));
    assert!(contains(page, "(Jun 1, 2023)"));
    assert!(contains(page, "(Page 1 of 1)"));
    Ok(())
}

#[test]
fn test_outflow_report_paginates_and_numbers_every_page() -> anyhow::Result<()> {
    let entries: Vec<FlowEntry> = (0..60)
        .map(|i| entry(i, "Gadget", dec!(1), dec!(25)))
        .collect();
    let bytes = renderer().render_flow_report(FlowDirection::Outbound, &entries, &june())?;

    let pages = page_contents(&bytes)?;
    assert!(pages.len() >= 2);
    let total = pages.len();
    for (idx, page) in pages.iter().enumerate() {
        assert!(contains(page, &format!("(Page {} of {})", idx + 1, total)));
        // 每页都重绘表头
        assert!(contains(page, "(Unit Price)"));
    }
    assert!(contains(&pages[0], "(Output Flow Report)"));
    assert!(contains(&pages[0], "(Total Revenue: $1,500.00)"));
    Ok(())
}

#[test]
fn test_empty_report_renders() -> anyhow::Result<()> {
    let bytes = renderer().render_flow_report(FlowDirection::Inbound, &[], &june())?;
    let pages = page_contents(&bytes)?;
    assert_eq!(pages.len(), 1);
    assert!(contains(&pages[0], "(Average Unit Value: $0.00)"));
    Ok(())
}

#[test]
fn test_relationship_report_blocks_span_pages() -> anyhow::Result<()> {
    let inflow: Vec<FlowEntry> = (0..8)
        .map(|i| entry(i, &format!("Item {}", i), dec!(10), dec!(100)))
        .collect();
    let outflow = vec![entry(1, "Item 0", dec!(4), dec!(200))];

    let bytes = renderer().render_relationship_report(&inflow, &outflow, &june())?;
    let pages = page_contents(&bytes)?;
    assert!(pages.len() >= 2);

    let first = &pages[0];
    assert!(contains(first, "(Flow Relationship Report)"));
    assert!(contains(first, "(Total Input Value: $8,000.00)"));
    assert!(contains(first, "(Total Output Value: $800.00)"));
    assert!(contains(first, "(Balance: $7,200.00)"));
    assert!(contains(first, "(Profit Margin: -90.00%)"));
    assert!(contains(first, "(Remaining Items: 76)"));
    assert!(contains(first, "(Profit/Loss: -$200.00)"));

    let all: Vec<u8> = pages.concat();
    for i in 0..8 {
        assert!(contains(&all, &format!("(Item {})", i)));
    }
    let last = pages.last().unwrap();
    assert!(contains(last, &format!("(Page {} of {})", pages.len(), pages.len())));
    Ok(())
}

#[test]
fn test_item_grid_header_row_is_bold() -> anyhow::Result<()> {
    let inflow = vec![entry(0, "Widget", dec!(10), dec!(100))];
    let outflow = vec![entry(1, "Widget", dec!(4), dec!(200))];

    let bytes = renderer().render_relationship_report(&inflow, &outflow, &june())?;
    let pages = page_contents(&bytes)?;
    let page = &pages[0];

    assert_eq!(font_of(page, "Quantity Analysis")?, Some(b"F2".to_vec()));
    assert_eq!(font_of(page, "Value Analysis")?, Some(b"F2".to_vec()));
    assert_eq!(font_of(page, "Input:")?, Some(b"F1".to_vec()));
    assert_eq!(font_of(page, "Output:")?, Some(b"F1".to_vec()));
    assert_eq!(font_of(page, "Margin:")?, Some(b"F1".to_vec()));
    Ok(())
}

#[test]
fn test_overflowing_totals_fail_instead_of_panicking() {
    let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
    let big = FlowEntry {
        total_amount: huge,
        ..entry(0, "Bullion", dec!(1), dec!(1))
    };
    let entries = vec![big.clone(), big];

    let flow = renderer().render_flow_report(FlowDirection::Inbound, &entries, &june());
    assert!(matches!(flow, Err(ReportError::Analytics(AnalyticsError::Overflow(_)))));

    let relationship = renderer().render_relationship_report(&entries, &[], &june());
    assert!(matches!(relationship, Err(ReportError::Analytics(AnalyticsError::Overflow(_)))));
}

#[test]
fn test_content_type() {
    assert_eq!(renderer().content_type(), "application/pdf");
}

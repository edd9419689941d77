//! 出入库关系报表：总体财务与数量概览，以及逐货品分析块。

use crate::canvas::{Font, PdfCanvas};
use crate::format;
use crate::header::{ReportHeader, draw_header, draw_section_title, draw_summary_line};
use crate::layout::{PageFrame, TextCursor, stack_blocks};
use flowtrack_core::analytics::entity::ItemAnalysis;
use flowtrack_core::flow::entity::FlowEntry;
use flowtrack_core::report::error::ReportError;

pub const TITLE: &str = "Flow Relationship Report";

/// 单个货品块的高度 (标签 + 5 行网格)
const BLOCK_HEIGHT: f32 = 120.0;
const BLOCK_GAP: f32 = 20.0;
const GRID_ROW_HEIGHT: f32 = 20.0;
const GRID_COLUMNS: [f32; 2] = [50.0, 300.0];
const GRID_SIZE: f32 = 10.0;

/// # Summary
/// 渲染关系报表。
///
/// # Logic
/// 1. 页眉。
/// 2. 总体概览：`Balance` 为投入减产出，利润率取自分析引擎。
/// 3. 逐货品块：由 [`stack_blocks`] 定位，块放不下时整体换页。
pub fn render(
    inflow: &[FlowEntry],
    outflow: &[FlowEntry],
    header: &ReportHeader<'_>,
) -> Result<Vec<u8>, ReportError> {
    let frame = PageFrame::letter();
    let mut canvas = PdfCanvas::new(frame);
    let mut cursor = TextCursor::new(frame.top);

    draw_header(&mut canvas, &mut cursor, header);

    let summary = flowtrack_analytics::relationship_summary(inflow, outflow)?;
    let financial = &summary.financial;
    let inventory = &summary.inventory;

    draw_section_title(&mut canvas, &mut cursor, "Overall Summary");
    cursor.move_down(0.5, 12.0);

    canvas.text_underlined(Font::Regular, 12.0, frame.left, cursor.y, "Financial Overview:");
    cursor.move_down(1.0, 12.0);
    for (label, value) in [
        ("Total Input Value", format::currency(financial.total_in_flow)),
        ("Total Output Value", format::currency(financial.total_out_flow)),
        ("Balance", format::currency(-financial.profit)),
        ("Profit Margin", format::percent(financial.profit_margin)),
    ] {
        draw_summary_line(&mut canvas, &mut cursor, label, &value);
    }
    cursor.move_down(1.0, 12.0);

    canvas.text_underlined(Font::Regular, 12.0, frame.left, cursor.y, "Quantity Overview:");
    cursor.move_down(1.0, 12.0);
    for (label, value) in [
        ("Total Items Received", format::count(inventory.total_in_quantity)),
        ("Total Items Dispatched", format::count(inventory.total_out_quantity)),
        ("Remaining Items", format::count(inventory.current_stock)),
    ] {
        draw_summary_line(&mut canvas, &mut cursor, label, &value);
    }
    cursor.move_down(2.0, 12.0);

    draw_section_title(&mut canvas, &mut cursor, "Item-wise Analysis");
    cursor.move_down(1.0, 12.0);

    let items = flowtrack_analytics::item_wise_analysis(inflow, outflow)?;
    let heights = vec![BLOCK_HEIGHT; items.len()];
    let placements = stack_blocks(&frame, cursor.y, &heights, BLOCK_GAP);
    for (analysis, placement) in items.iter().zip(placements) {
        if placement.new_page {
            canvas.add_page();
        }
        draw_item_block(&mut canvas, analysis, placement.y);
    }

    canvas.finish(TITLE)
}

fn draw_item_block(canvas: &mut PdfCanvas, analysis: &ItemAnalysis, y: f32) {
    canvas.text_underlined(Font::Bold, 12.0, GRID_COLUMNS[0], y, &analysis.item);

    let mut row_y = y + GRID_ROW_HEIGHT;
    for (row_idx, row) in item_grid(analysis).iter().enumerate() {
        let font = if row_idx == 0 { Font::Bold } else { Font::Regular };
        for (x, cell) in GRID_COLUMNS.iter().zip(row.iter()) {
            if !cell.is_empty() {
                canvas.text(font, GRID_SIZE, *x, row_y, cell);
            }
        }
        row_y += GRID_ROW_HEIGHT;
    }
}

/// 5 行 2 列：数量分析 | 金额分析，首行为列标题
fn item_grid(analysis: &ItemAnalysis) -> [[String; 2]; 5] {
    [
        ["Quantity Analysis".to_string(), "Value Analysis".to_string()],
        [
            format!("Input: {}", format::count(analysis.in_flow.quantity)),
            format!("Input Value: {}", format::currency(analysis.in_flow.value)),
        ],
        [
            format!("Output: {}", format::count(analysis.out_flow.quantity)),
            format!("Output Value: {}", format::currency(analysis.out_flow.value)),
        ],
        [
            format!("Remaining: {}", format::count(analysis.analysis.current_stock)),
            format!("Profit/Loss: {}", format::currency(analysis.analysis.profit)),
        ],
        [
            String::new(),
            format!("Margin: {}", format::percent(analysis.analysis.profit_margin)),
        ],
    ]
}

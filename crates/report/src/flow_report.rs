//! 单方向流水报表：页眉、汇总与分页明细表。

use crate::canvas::{Font, PdfCanvas, Rgb};
use crate::format;
use crate::header::{ReportHeader, draw_header, draw_section_title, draw_summary_line};
use crate::layout::{Column, PageFrame, TableLayout, TextCursor};
use crate::metrics::fit_text;
use flowtrack_core::flow::entity::{FlowDirection, FlowEntry};
use flowtrack_core::report::error::ReportError;

/// 明细表字号
const CELL_SIZE: f32 = 10.0;
/// 单元格内边距
const CELL_PADDING: f32 = 5.0;

/// 报表标题
pub fn title(direction: FlowDirection) -> &'static str {
    match direction {
        FlowDirection::Inbound => "Input Flow Report",
        FlowDirection::Outbound => "Output Flow Report",
    }
}

/// 明细表版式，金额列名随方向变化
pub fn table_layout(direction: FlowDirection) -> TableLayout {
    let (unit, total) = match direction {
        FlowDirection::Inbound => ("Unit Value", "Total Value"),
        FlowDirection::Outbound => ("Unit Price", "Total Price"),
    };
    TableLayout::new(vec![
        Column::new("Date", 50.0, 100.0),
        Column::new("Item", 150.0, 100.0),
        Column::new("Description", 250.0, 100.0),
        Column::new("Quantity", 350.0, 70.0),
        Column::new(unit, 420.0, 70.0),
        Column::new(total, 490.0, 60.0),
    ])
}

/// # Summary
/// 渲染单方向流水报表。
///
/// # Logic
/// 1. 页眉。
/// 2. 汇总：数量、总额、均价 (分母为 0 时为 0)。
/// 3. 明细表：由 [`TableLayout::paginate`] 计算分页，每页重绘带底色的表头。
///
/// # Returns
/// * `Result<Vec<u8>, ReportError>` - 完整 PDF。
pub fn render(
    direction: FlowDirection,
    entries: &[FlowEntry],
    header: &ReportHeader<'_>,
) -> Result<Vec<u8>, ReportError> {
    let frame = PageFrame::letter();
    let mut canvas = PdfCanvas::new(frame);
    let mut cursor = TextCursor::new(frame.top);

    draw_header(&mut canvas, &mut cursor, header);

    let summary = flowtrack_analytics::summarize(entries)?;
    let (quantity_label, total_label, average_label) = match direction {
        FlowDirection::Inbound => ("Total Items Received", "Total Value", "Average Unit Value"),
        FlowDirection::Outbound => {
            ("Total Items Dispatched", "Total Revenue", "Average Unit Price")
        }
    };
    draw_section_title(&mut canvas, &mut cursor, "Summary");
    let total_quantity = format::count(summary.total_quantity);
    draw_summary_line(&mut canvas, &mut cursor, quantity_label, &total_quantity);
    let total_amount = format::currency(summary.total_amount);
    draw_summary_line(&mut canvas, &mut cursor, total_label, &total_amount);
    draw_summary_line(
        &mut canvas,
        &mut cursor,
        average_label,
        &format::currency(summary.average_unit_amount),
    );
    cursor.move_down(2.0, 12.0);

    draw_section_title(&mut canvas, &mut cursor, "Detailed Records");
    cursor.move_down(0.5, 12.0);

    let layout = table_layout(direction);
    for page in layout.paginate(&frame, cursor.y, entries.len()) {
        if page.new_page {
            canvas.add_page();
        }
        draw_table_header(&mut canvas, &layout, page.header_y);

        for row in &page.rows {
            let Some(entry) = entries.get(row.index) else {
                continue;
            };
            let band = if row.index % 2 == 0 { Rgb::WHITE } else { Rgb::BAND };
            canvas.fill_rect(layout.left(), row.y, layout.width(), layout.row_height, band);

            for (column, value) in layout.columns.iter().zip(row_cells(entry)) {
                let fitted = fit_text(&value, CELL_SIZE, column.width - 4.0);
                canvas.text(Font::Regular, CELL_SIZE, column.x, row.y + CELL_PADDING, &fitted);
            }
        }
    }

    canvas.finish(title(direction))
}

fn draw_table_header(canvas: &mut PdfCanvas, layout: &TableLayout, y: f32) {
    canvas.fill_rect(layout.left(), y, layout.width(), layout.header_height, Rgb::HEADER);
    for column in &layout.columns {
        let fitted = fit_text(&column.title, CELL_SIZE, column.width - 4.0);
        canvas.text(Font::Bold, CELL_SIZE, column.x, y + CELL_PADDING, &fitted);
    }
    let left = layout.left();
    canvas.line(left, left + layout.width(), y + layout.header_height, 1.0, Rgb::RULE);
}

fn row_cells(entry: &FlowEntry) -> [String; 6] {
    let description = if entry.description.trim().is_empty() {
        "-".to_string()
    } else {
        entry.description.clone()
    };
    [
        format::medium_date(&entry.datetime),
        entry.item.clone(),
        description,
        format::count(entry.quantity),
        format::currency(entry.unit_amount),
        format::currency(entry.total_amount),
    ]
}

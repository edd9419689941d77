use crate::canvas::{Align, Font, PdfCanvas};
use crate::format;
use crate::layout::TextCursor;
use chrono::{DateTime, Utc};
use flowtrack_core::common::DateRange;

/// 报表页眉所需的全部信息
pub struct ReportHeader<'a> {
    pub caption: &'a str,
    pub title: &'a str,
    pub period: &'a DateRange,
    pub generated_at: DateTime<Utc>,
}

/// # Summary
/// 绘制抬头、标题、报表区间与生成时间，游标停在页眉下方。
pub fn draw_header(canvas: &mut PdfCanvas, cursor: &mut TextCursor, header: &ReportHeader<'_>) {
    canvas.text_aligned(Font::Regular, 10.0, cursor.y, header.caption, Align::Right);
    cursor.move_down(1.0, 10.0);
    cursor.move_down(0.5, 10.0);

    canvas.text_aligned(Font::Bold, 24.0, cursor.y, header.title, Align::Center);
    cursor.move_down(1.0, 24.0);

    let period = format!(
        "Report Period: {} - {}",
        format::long_date(&header.period.start),
        format::long_date(&header.period.end)
    );
    canvas.text_aligned(Font::Regular, 12.0, cursor.y, &period, Align::Center);
    cursor.move_down(1.0, 12.0);
    cursor.move_down(1.0, 12.0);

    let generated = format!("Generated on: {}", format::timestamp(&header.generated_at));
    canvas.text_aligned(Font::Regular, 10.0, cursor.y, &generated, Align::Right);
    cursor.move_down(1.0, 10.0);
    cursor.move_down(1.0, 10.0);
}

/// 14pt 加粗带下划线的小节标题
pub fn draw_section_title(canvas: &mut PdfCanvas, cursor: &mut TextCursor, title: &str) {
    let left = canvas.frame().left;
    canvas.text_underlined(Font::Bold, 14.0, left, cursor.y, title);
    cursor.move_down(1.0, 14.0);
}

/// 12pt 的 `label: value` 汇总行
pub fn draw_summary_line(
    canvas: &mut PdfCanvas,
    cursor: &mut TextCursor,
    label: &str,
    value: &str,
) {
    let left = canvas.frame().left;
    canvas.text(Font::Regular, 12.0, left, cursor.y, &format!("{}: {}", label, value));
    cursor.move_down(1.0, 12.0);
}

//! 基于 lopdf 的极简绘图画布。
//!
//! 调用方以自顶向下的坐标绘制文本、矩形与线条，[`PdfCanvas::finish`] 统一盖页脚并序列化。

use crate::layout::{PAGE_HEIGHT, PAGE_WIDTH, PageFrame};
use crate::metrics::{ASCENT, encode_win_ansi, text_width};
use flowtrack_core::report::error::ReportError;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use tracing::debug;

/// 页脚字号
const FOOTER_SIZE: f32 = 8.0;
/// 页脚纵坐标 (自顶向下)
const FOOTER_Y: f32 = 750.0;

/// 内置字体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static [u8] {
        match self {
            Font::Regular => b"F1",
            Font::Bold => b"F2",
        }
    }
}

/// 水平对齐，相对页面内容区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// sRGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    /// 表头底色
    pub const HEADER: Rgb = Rgb(0xf3, 0xf4, 0xf6);
    /// 斑马纹浅色行
    pub const BAND: Rgb = Rgb(0xf9, 0xfa, 0xfb);
    pub const RULE: Rgb = Rgb(0xd1, 0xd5, 0xdb);

    fn operands(self) -> Vec<Object> {
        [self.0, self.1, self.2]
            .into_iter()
            .map(|c| Object::Real(f32::from(c) / 255.0))
            .collect()
    }
}

/// # Summary
/// 多页画布，按页累积内容流操作。
///
/// # Invariants
/// - 始终至少有一页 (当前页)。
/// - 坐标以页面顶端为原点向下，输出时换算为 PDF 坐标系。
pub struct PdfCanvas {
    frame: PageFrame,
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
}

impl PdfCanvas {
    pub fn new(frame: PageFrame) -> Self {
        Self {
            frame,
            finished: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn frame(&self) -> &PageFrame {
        &self.frame
    }

    /// 结束当前页并开始新页
    pub fn add_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.finished.push(page);
    }

    /// 在 (`x`, `y`) 处绘制一行文本，`y` 为文字顶端
    pub fn text(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        let baseline = PAGE_HEIGHT - (y + size * ASCENT);
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource().to_vec()), Object::Real(size)],
            ),
            Operation::new("Td", vec![Object::Real(x), Object::Real(baseline)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    /// 在内容区内按 `align` 对齐绘制文本，返回文本起点横坐标
    pub fn text_aligned(&mut self, font: Font, size: f32, y: f32, text: &str, align: Align) -> f32 {
        let width = text_width(text, size);
        let x = match align {
            Align::Left => self.frame.left,
            Align::Center => self.frame.left + (self.frame.width() - width) / 2.0,
            Align::Right => self.frame.right - width,
        };
        self.text(font, size, x, y, text);
        x
    }

    /// 带下划线的左对齐文本
    pub fn text_underlined(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        self.text(font, size, x, y, text);
        let underline_y = y + size * (ASCENT + 0.1);
        let thickness = (size / 20.0).max(0.5);
        self.line(x, x + text_width(text, size), underline_y, thickness, Rgb::BLACK);
    }

    /// 填充矩形，`y` 为矩形上沿
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let mut ops = vec![Operation::new("rg", color.operands())];
        ops.push(Operation::new(
            "re",
            vec![
                Object::Real(x),
                Object::Real(PAGE_HEIGHT - y - height),
                Object::Real(width),
                Object::Real(height),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("rg", Rgb::BLACK.operands()));
        self.current.extend(ops);
    }

    /// 水平线
    pub fn line(&mut self, x1: f32, x2: f32, y: f32, thickness: f32, color: Rgb) {
        let pdf_y = PAGE_HEIGHT - y;
        self.current.extend([
            Operation::new("RG", color.operands()),
            Operation::new("w", vec![Object::Real(thickness)]),
            Operation::new("m", vec![Object::Real(x1), Object::Real(pdf_y)]),
            Operation::new("l", vec![Object::Real(x2), Object::Real(pdf_y)]),
            Operation::new("S", vec![]),
            Operation::new("RG", Rgb::BLACK.operands()),
        ]);
    }

    /// # Summary
    /// 为每页盖上 `Page N of M` 页脚并序列化为完整 PDF。
    ///
    /// # Arguments
    /// * `title` - 写入文档信息字典的标题。
    ///
    /// # Returns
    /// * `Result<Vec<u8>, ReportError>` - 完整的 PDF 字节。
    pub fn finish(mut self, title: &str) -> Result<Vec<u8>, ReportError> {
        self.add_page();
        let total = self.finished.len();
        let pages = std::mem::take(&mut self.finished);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font_dictionary("Helvetica"));
        let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(total);
        for (idx, operations) in pages.into_iter().enumerate() {
            self.current = operations;
            let footer = format!("Page {} of {}", idx + 1, total);
            self.text_aligned(Font::Regular, FOOTER_SIZE, FOOTER_Y, &footer, Align::Center);

            let content = Content {
                operations: std::mem::take(&mut self.current),
            };
            let encoded = content.encode().map_err(|e| ReportError::Render(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = i64::try_from(total).map_err(|e| ReportError::Render(e.to_string()))?;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = info_dictionary(&mut doc, title);
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| ReportError::Serialize(e.to_string()))?;

        debug!("Rendered '{}': {} page(s), {} bytes", title, total, buffer.len());
        Ok(buffer)
    }
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn info_dictionary(doc: &mut Document, title: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal("flowtrack"),
    })
}

//! 声明式版面：页面内容区、表格分页与定高块堆叠。
//!
//! 所有纵坐标均为自页面顶端向下的距离 (pt)，由画布在输出时换算为 PDF 坐标。

use crate::metrics::LINE_HEIGHT;

/// US Letter 宽度
pub const PAGE_WIDTH: f32 = 612.0;
/// US Letter 高度
pub const PAGE_HEIGHT: f32 = 792.0;
/// 四周页边距
pub const MARGIN: f32 = 50.0;

/// 页面内容区
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    pub top: f32,
    /// 行底不得越过此线
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl PageFrame {
    /// Letter 纸张，内容区底部为 720，为页脚留出空间
    pub fn letter() -> Self {
        Self {
            top: MARGIN,
            bottom: 720.0,
            left: MARGIN,
            right: PAGE_WIDTH - MARGIN,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// 表格列
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: String,
    pub x: f32,
    pub width: f32,
}

impl Column {
    pub fn new(title: impl Into<String>, x: f32, width: f32) -> Self {
        Self {
            title: title.into(),
            x,
            width,
        }
    }
}

/// # Summary
/// 表格版式：列定义、表头高度与行高只声明一次，分页由 [`TableLayout::paginate`] 计算。
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub columns: Vec<Column>,
    pub header_height: f32,
    /// 表头与首行之间的间隔
    pub header_gap: f32,
    pub row_height: f32,
}

/// 已定位的数据行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedRow {
    /// 数据行下标
    pub index: usize,
    pub y: f32,
}

/// 表格在某一页上的片段
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage {
    /// 绘制前是否需要另起一页
    pub new_page: bool,
    pub header_y: f32,
    pub rows: Vec<PlacedRow>,
}

impl TableLayout {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            header_height: 20.0,
            header_gap: 5.0,
            row_height: 20.0,
        }
    }

    /// 表格总宽 (首列左缘到末列右缘)
    pub fn width(&self) -> f32 {
        let left = self.columns.first().map(|c| c.x).unwrap_or(0.0);
        let right = self.columns.last().map(|c| c.x + c.width).unwrap_or(0.0);
        right - left
    }

    pub fn left(&self) -> f32 {
        self.columns.first().map(|c| c.x).unwrap_or(MARGIN)
    }

    /// # Summary
    /// 计算 `row_count` 行数据的分页方案。
    ///
    /// # Logic
    /// 1. 若表头连同首行放不进当前页剩余空间，表头整体移到下一页顶端。
    /// 2. 行底超过 `frame.bottom` 时换页，并在新页顶端重复表头。
    /// 3. 每页至少放置一行，内容区再小也不会死循环。
    ///
    /// # Arguments
    /// * `frame` - 页面内容区。
    /// * `start_y` - 表头在当前页的起始纵坐标。
    /// * `row_count` - 数据行数，可为 0 (只绘制表头)。
    ///
    /// # Returns
    /// * `Vec<TablePage>` - 至少一个片段。
    pub fn paginate(&self, frame: &PageFrame, start_y: f32, row_count: usize) -> Vec<TablePage> {
        let lead = self.header_height + self.header_gap;
        let mut page = if start_y > frame.top && start_y + lead + self.row_height > frame.bottom {
            self.fresh_page(frame)
        } else {
            TablePage {
                new_page: false,
                header_y: start_y,
                rows: Vec::new(),
            }
        };

        let mut pages = Vec::new();
        let mut y = page.header_y + lead;
        for index in 0..row_count {
            if y + self.row_height > frame.bottom && !page.rows.is_empty() {
                pages.push(std::mem::replace(&mut page, self.fresh_page(frame)));
                y = frame.top + lead;
            }
            page.rows.push(PlacedRow { index, y });
            y += self.row_height;
        }
        pages.push(page);
        pages
    }

    fn fresh_page(&self, frame: &PageFrame) -> TablePage {
        TablePage {
            new_page: true,
            header_y: frame.top,
            rows: Vec::new(),
        }
    }
}

/// 定高块的位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockPlacement {
    pub new_page: bool,
    pub y: f32,
}

/// # Summary
/// 自 `start_y` 起纵向堆叠定高块，块间留 `gap`。
///
/// # Logic
/// 块底越过 `frame.bottom` 时该块移到下一页顶端；已在页顶的块不再换页。
pub fn stack_blocks(
    frame: &PageFrame,
    start_y: f32,
    heights: &[f32],
    gap: f32,
) -> Vec<BlockPlacement> {
    let mut y = start_y;
    heights
        .iter()
        .map(|height| {
            let new_page = y > frame.top && y + height > frame.bottom;
            if new_page {
                y = frame.top;
            }
            let placement = BlockPlacement { new_page, y };
            y += height + gap;
            placement
        })
        .collect()
}

/// 文本游标，只记录当前纵坐标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextCursor {
    pub y: f32,
}

impl TextCursor {
    pub fn new(y: f32) -> Self {
        Self { y }
    }

    /// 以 `size` 字号的行高下移 `lines` 行
    pub fn move_down(&mut self, lines: f32, size: f32) {
        self.y += lines * size * LINE_HEIGHT;
    }
}

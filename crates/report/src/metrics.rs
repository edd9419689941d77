//! Helvetica 字宽表与 WinAnsi 编码。

/// Helvetica 字形上沿占字号的比例
pub const ASCENT: f32 = 0.718;

/// 行高占字号的比例
pub const LINE_HEIGHT: f32 = 1.16;

/// 未收录字符的默认字宽 (千分之一字号)
const DEFAULT_WIDTH: u16 = 556;

/// ASCII 32..=126 的 Helvetica 字宽 (千分之一字号)
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

fn glyph_width(ch: char) -> u16 {
    let code = u32::from(ch);
    if (32..=126).contains(&code) {
        usize::try_from(code - 32)
            .ok()
            .and_then(|idx| HELVETICA_WIDTHS.get(idx).copied())
            .unwrap_or(DEFAULT_WIDTH)
    } else {
        DEFAULT_WIDTH
    }
}

/// 以 `size` 字号排版 `text` 所占的水平宽度 (pt)
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c))).sum();
    units_as_f32(units) * size / 1000.0
}

fn units_as_f32(units: u32) -> f32 {
    // u32 -> f32 以 u16 分段累加，避免有损强转
    let high = u16::try_from(units >> 16).unwrap_or(u16::MAX);
    let low = u16::try_from(units & 0xFFFF).unwrap_or(u16::MAX);
    f32::from(high) * 65536.0 + f32::from(low)
}

/// # Summary
/// 将文本裁剪到不超过 `max_width`，超出部分以 `...` 结尾。
///
/// # Returns
/// 宽度足够时原样返回。
pub fn fit_text(text: &str, size: f32, max_width: f32) -> String {
    if text_width(text, size) <= max_width {
        return text.to_string();
    }

    const ELLIPSIS: &str = "...";
    let budget = max_width - text_width(ELLIPSIS, size);
    let mut fitted = String::new();
    let mut used = 0.0;
    for ch in text.chars() {
        let w = f32::from(glyph_width(ch)) * size / 1000.0;
        if used + w > budget {
            break;
        }
        used += w;
        fitted.push(ch);
    }
    fitted.push_str(ELLIPSIS);
    fitted
}

/// # Summary
/// 将 UTF-8 文本编码为 WinAnsi 字节，供内置 Type1 字体使用。
///
/// # Logic
/// ASCII 与 Latin-1 补充区原样映射，常见排版符号映射到 0x80..0x9F 区段，
/// 控制字符替换为空格，其余字符替换为 `?`。
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if c.is_control() => b' ',
            c => u8::try_from(u32::from(c))
                .ok()
                .filter(|b| *b < 0x80 || *b >= 0xA0)
                .unwrap_or(b'?'),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Date" = 722 + 556 + 278 + 556
        let w = text_width("Date", 10.0);
        assert!((w - 21.12).abs() < 0.001);
        assert_eq!(text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_fit_text_clips_with_ellipsis() {
        assert_eq!(fit_text("Widget", 10.0, 100.0), "Widget");

        let long = "A very long description that cannot possibly fit in the column";
        let fitted = fit_text(long, 10.0, 96.0);
        assert!(fitted.ends_with("..."));
        assert!(text_width(&fitted, 10.0) <= 96.0 + 0.01);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Caf\u{e9}"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{20AC}5"), vec![0x80, b'5']);
        assert_eq!(encode_win_ansi("\u{4E2D}"), vec![b'?']);
        assert_eq!(encode_win_ansi("a\tb"), vec![b'a', b' ', b'b']);
    }
}

//! 报表中的数字与日期格式 (en-US 习惯)。

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// 美元金额，如 `$1,234.56`、`-$200.00`，两位小数，四舍五入 (远离零)
pub fn currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(2);
    let sign = if negative { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&rounded.to_string()))
}

/// 数量，千分位分隔，最多保留三位小数
pub fn count(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }
    let negative = rounded.is_sign_negative();
    let digits = rounded.abs().to_string();
    let sign = if negative { "-" } else { "" };
    format!("{}{}", sign, group_thousands(&digits))
}

/// 百分比，固定两位小数，如 `-20.00%`
pub fn percent(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    format!("{}%", rounded)
}

/// 长日期，如 `June 1st, 2023`
pub fn long_date(at: &DateTime<Utc>) -> String {
    format!("{} {}, {}", at.format("%B"), ordinal(at.day()), at.year())
}

/// 中日期，如 `Jun 1, 2023`
pub fn medium_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// 长日期加时刻，如 `June 1st, 2023 3:04 PM`
pub fn timestamp(at: &DateTime<Utc>) -> String {
    format!("{} {}", long_date(at), at.format("%-I:%M %p"))
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

/// 为非负数字串的整数部分插入千分位逗号
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

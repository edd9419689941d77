//! # 路由控制器
//!
//! - `ingest`: 入库 / 出库流水录入
//! - `data`: 区间查询与分析 (JSON)
//! - `report`: 区间报表 (PDF)
//! - `health`: 存活探针

pub mod data;
pub mod health;
pub mod ingest;
pub mod report;

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use flowtrack_core::common::{DateRange, parse_datetime};

use crate::error::{ApiError, INVALID_DATE, MISSING_DATES};
use crate::types::DateRangeQuery;

/// # Summary
/// 从查询参数解析闭区间。
///
/// # Logic
/// 1. 查询串本身无法解析时返回提取器的错误信息。
/// 2. 任一端缺失或为空白 → `Start and end dates are required`。
/// 3. 任一端无法解析 → `Invalid date format...`。
/// 4. 起点晚于终点不视为错误，查询结果为空。
pub(crate) fn parse_range(
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<DateRange, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(start), Some(end)) = (present(query.start_date), present(query.end_date)) else {
        return Err(ApiError::BadRequest(MISSING_DATES.to_string()));
    };

    let start = parse_datetime(&start).map_err(|_| ApiError::BadRequest(INVALID_DATE.to_string()))?;
    let end = parse_datetime(&end).map_err(|_| ApiError::BadRequest(INVALID_DATE.to_string()))?;
    Ok(DateRange::new(start, end))
}

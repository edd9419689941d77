use thiserror::Error;

use crate::analytics::error::AnalyticsError;

/// # Summary
/// 报表生成错误。
#[derive(Error, Debug)]
pub enum ReportError {
    /// 页面内容编码失败
    #[error("Render error: {0}")]
    Render(String),
    /// 文档序列化失败
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// 汇总数据无法计算
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

//! # `flowtrack-analytics` - 流水分析引擎
//!
//! 对内存中的流水序列做汇总计算：总量、均价、利润、利润率、库存与动销率。
//! 全部为无副作用的纯函数，每次请求基于最新读取的数据重新计算。
//!
//! 所有比率在分母为 0 时返回 0，不会产生错误或非数值结果。

mod items;
mod summary;

pub use items::item_wise_analysis;
pub use summary::{percent_of, relationship_summary, summarize};

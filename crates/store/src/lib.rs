//! # `flowtrack-store` - 流水存储适配器
//!
//! 提供 `FlowStore` 端口的两种实现 (SQLite 落盘、进程内存)，
//! 以及在其之上负责分配 ID 与按日期过滤的 `FlowRepository`。

pub mod flow;
pub mod memory;
pub mod repository;

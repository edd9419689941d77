//! # `flowtrack-core` - 领域内核
//!
//! 存放出入库流水系统的实体、端口 (trait) 与错误类型。
//! 本 crate 不包含任何 I/O 实现，具体适配器由 `flowtrack-store`、
//! `flowtrack-report` 等下游 crate 提供，并在 `flowtrack-app` 中组装。

pub mod common;
pub mod config;

pub mod flow {
    pub mod entity;
    pub mod port;
}

pub mod analytics {
    pub mod entity;
    pub mod error;
}

pub mod store {
    pub mod error;
}

pub mod report {
    pub mod error;
    pub mod port;
}

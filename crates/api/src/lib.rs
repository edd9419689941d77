//! # `flowtrack-api` - HTTP API
//!
//! 出入库流水系统的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收移动端的录入、查询与报表请求
//! - 校验字段与日期区间，调用 `FlowRepository` 读写流水
//! - 调用分析引擎与 `ReportRenderer` 生成 JSON 或 PDF
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;

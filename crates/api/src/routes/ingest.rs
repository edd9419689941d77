//! # 流水录入路由控制器
//!
//! 实现 `POST /api/inflow` 与 `POST /api/outflow`。

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use rust_decimal::Decimal;

use flowtrack_core::common::parse_datetime;
use flowtrack_core::flow::entity::{FlowDirection, FlowEntry};

use crate::error::{ApiError, INVALID_DATETIME, MISSING_FIELDS, NEGATIVE_VALUES};
use crate::server::AppState;
use crate::types::{ApiErrorResponse, InflowRequest, MessageResponse, OutflowRequest};

/// 两个方向共用的未校验字段
struct RawEntry {
    datetime: Option<String>,
    item: Option<String>,
    description: Option<String>,
    quantity: Option<Decimal>,
    unit_amount: Option<Decimal>,
    total_amount: Option<Decimal>,
}

impl From<InflowRequest> for RawEntry {
    fn from(r: InflowRequest) -> Self {
        Self {
            datetime: r.datetime,
            item: r.item,
            description: r.description,
            quantity: r.quantity,
            unit_amount: r.unit_value,
            total_amount: r.total_value,
        }
    }
}

impl From<OutflowRequest> for RawEntry {
    fn from(r: OutflowRequest) -> Self {
        Self {
            datetime: r.datetime,
            item: r.item,
            description: r.description,
            quantity: r.quantity,
            unit_amount: r.unit_price,
            total_amount: r.total_price,
        }
    }
}

impl RawEntry {
    /// # Summary
    /// 校验并转换为领域流水。
    ///
    /// # Logic
    /// 1. `datetime`、`item` 缺失或为空白，或任一数值缺失 → `Missing required fields`。
    /// 2. `datetime` 无法解析 → `Invalid datetime format`。
    /// 3. 数量或金额为负 → `Quantity and values must be non-negative`。数量为 0 允许。
    fn validate(self) -> Result<FlowEntry, ApiError> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let (Some(datetime), Some(item), Some(quantity), Some(unit_amount), Some(total_amount)) = (
            present(self.datetime),
            present(self.item),
            self.quantity,
            self.unit_amount,
            self.total_amount,
        ) else {
            return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
        };

        let datetime = parse_datetime(&datetime)
            .map_err(|_| ApiError::BadRequest(INVALID_DATETIME.to_string()))?;

        if [quantity, unit_amount, total_amount].iter().any(|v| *v < Decimal::ZERO) {
            return Err(ApiError::BadRequest(NEGATIVE_VALUES.to_string()));
        }

        Ok(FlowEntry {
            datetime,
            item,
            description: self.description.unwrap_or_default(),
            quantity,
            unit_amount,
            total_amount,
        })
    }
}

async fn record(
    state: &AppState,
    direction: FlowDirection,
    raw: RawEntry,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let entry = raw.validate()?;
    state.repository.insert(direction, entry).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Data inserted successfully".to_string(),
        }),
    ))
}

/// 录入一条入库流水
#[utoipa::path(
    post,
    path = "/api/inflow",
    tag = "录入 (Ingest)",
    request_body = InflowRequest,
    responses(
        (status = 201, description = "写入成功", body = MessageResponse),
        (status = 400, description = "字段缺失或非法", body = ApiErrorResponse),
        (status = 500, description = "存储失败", body = ApiErrorResponse)
    )
)]
pub async fn record_inflow(
    State(state): State<AppState>,
    payload: Result<Json<InflowRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    record(&state, FlowDirection::Inbound, req.into()).await
}

/// 录入一条出库流水
#[utoipa::path(
    post,
    path = "/api/outflow",
    tag = "录入 (Ingest)",
    request_body = OutflowRequest,
    responses(
        (status = 201, description = "写入成功", body = MessageResponse),
        (status = 400, description = "字段缺失或非法", body = ApiErrorResponse),
        (status = 500, description = "存储失败", body = ApiErrorResponse)
    )
)]
pub async fn record_outflow(
    State(state): State<AppState>,
    payload: Result<Json<OutflowRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    record(&state, FlowDirection::Outbound, req.into()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn widget() -> InflowRequest {
        InflowRequest {
            datetime: Some("2023-06-01".to_string()),
            item: Some("Widget".to_string()),
            description: None,
            quantity: Some(dec!(10)),
            total_value: Some(dec!(1000)),
            unit_value: Some(dec!(100)),
        }
    }

    fn rejection(req: InflowRequest) -> String {
        RawEntry::from(req).validate().err().map(|e| e.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_valid_entry() {
        let entry = RawEntry::from(widget()).validate().unwrap();
        assert_eq!(entry.item, "Widget");
        assert_eq!(entry.description, "");
        assert_eq!(entry.unit_amount, dec!(100));
        assert_eq!(entry.total_amount, dec!(1000));
    }

    #[test]
    fn test_missing_fields() {
        let blank_item = Some("  ".to_string());
        assert_eq!(rejection(InflowRequest { quantity: None, ..widget() }), MISSING_FIELDS);
        assert_eq!(rejection(InflowRequest { item: blank_item, ..widget() }), MISSING_FIELDS);
        assert_eq!(rejection(InflowRequest { datetime: None, ..widget() }), MISSING_FIELDS);
        assert_eq!(rejection(InflowRequest::default()), MISSING_FIELDS);
    }

    #[test]
    fn test_zero_quantity_accepted_negative_rejected() {
        let zero = InflowRequest { quantity: Some(dec!(0)), ..widget() };
        assert!(RawEntry::from(zero).validate().is_ok());
        let negative = InflowRequest { unit_value: Some(dec!(-1)), ..widget() };
        assert_eq!(rejection(negative), NEGATIVE_VALUES);
    }

    #[test]
    fn test_invalid_datetime() {
        assert_eq!(
            rejection(InflowRequest { datetime: Some("yesterday".to_string()), ..widget() }),
            INVALID_DATETIME
        );
    }
}

use chrono::{TimeZone, Utc};
use flowtrack_api::server::{AppState, build_router};
use flowtrack_core::common::time::FakeClockProvider;
use flowtrack_core::config::ReportConfig;
use flowtrack_report::PdfReportRenderer;
use flowtrack_store::memory::MemoryFlowStore;
use flowtrack_store::repository::FlowRepository;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

// 帮助函数：在随机端口启动基于内存存储的测试服务器
async fn spawn_test_server() -> String {
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        tracing::debug!("rustls provider already installed");
    }

    let clock = Arc::new(FakeClockProvider::new(
        Utc.with_ymd_and_hms(2023, 6, 5, 12, 0, 0).unwrap(),
    ));
    let repository = Arc::new(FlowRepository::new(Arc::new(MemoryFlowStore::new()), clock.clone()));
    let renderer = Arc::new(PdfReportRenderer::new(&ReportConfig::default(), clock));
    let state = AppState { repository, renderer };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let router = build_router(state);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

fn as_f64(v: &Value) -> f64 {
    v.as_f64().unwrap()
}

#[tokio::test]
async fn test_full_api_workflow() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();

    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();

    // ============================================
    // Case 1: 录入入库与出库流水
    // ============================================
    let res = client
        .post(format!("{}/api/inflow", base_url))
        .json(&json!({
            "datetime": "2023-06-01",
            "item": "Widget",
            "description": "Pallet from supplier A",
            "quantity": 10,
            "total_value": 1000,
            "unit_value": 100
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Data inserted successfully");

    let res = client
        .post(format!("{}/api/outflow", base_url))
        .json(&json!({
            "datetime": "2023-06-02",
            "item": "Widget",
            "quantity": 4,
            "total_price": 800,
            "unit_price": 200
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // ============================================
    // Case 2: 入库区间查询
    // ============================================
    let res = client
        .get(format!("{}/api/inflow-data?startDate=2023-06-01&endDate=2023-06-03", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(as_f64(&body["summary"]["totalQuantity"]), 10.0);
    assert_eq!(as_f64(&body["summary"]["totalValue"]), 1000.0);
    assert_eq!(as_f64(&body["summary"]["averageUnitValue"]), 100.0);
    assert_eq!(body["details"].as_array().unwrap().len(), 1);
    assert_eq!(body["details"][0]["item"], "Widget");
    assert_eq!(body["details"][0]["description"], "Pallet from supplier A");
    assert_eq!(as_f64(&body["details"][0]["unit_value"]), 100.0);

    // 区间之外无结果
    let res = client
        .get(format!("{}/api/outflow-data?startDate=2023-06-03&endDate=2023-06-30", base_url))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body["details"].as_array().unwrap().is_empty());
    assert_eq!(as_f64(&body["summary"]["averageUnitPrice"]), 0.0);

    // ============================================
    // Case 3: 出入库关系分析
    // ============================================
    let res = client
        .get(format!("{}/api/relationship-data?startDate=2023-06-01&endDate=2023-06-03", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();

    let financial = &body["summary"]["financial"];
    assert_eq!(as_f64(&financial["totalInFlow"]), 1000.0);
    assert_eq!(as_f64(&financial["totalOutFlow"]), 800.0);
    assert_eq!(as_f64(&financial["profit"]), -200.0);
    assert_eq!(as_f64(&financial["profitMargin"]), -20.0);

    let inventory = &body["summary"]["inventory"];
    assert_eq!(as_f64(&inventory["totalInQuantity"]), 10.0);
    assert_eq!(as_f64(&inventory["totalOutQuantity"]), 4.0);
    assert_eq!(as_f64(&inventory["currentStock"]), 6.0);
    assert_eq!(as_f64(&inventory["movementRate"]), 40.0);

    assert_eq!(body["inFlowDetails"].as_array().unwrap().len(), 1);
    assert_eq!(as_f64(&body["outFlowDetails"][0]["total_price"]), 800.0);

    let items = body["itemAnalysis"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item"], "Widget");
    assert_eq!(as_f64(&items[0]["inFlow"]["value"]), 1000.0);
    assert_eq!(as_f64(&items[0]["outFlow"]["quantity"]), 4.0);
    assert_eq!(as_f64(&items[0]["analysis"]["profitMargin"]), -20.0);
    assert_eq!(as_f64(&items[0]["analysis"]["movementRate"]), 40.0);

    // ============================================
    // Case 4: PDF 报表
    // ============================================
    for (path, filename) in [
        ("inflow-report", "inflow-report.pdf"),
        ("outflow-report", "outflow-report.pdf"),
        ("relationship-report", "relationship-report.pdf"),
    ] {
        let res = client
            .get(format!("{}/api/{}?startDate=2023-06-01&endDate=2023-06-03", base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "application/pdf");
        assert_eq!(
            res.headers()["content-disposition"],
            format!("attachment; filename={}", filename).as_str()
        );
        let bytes = res.bytes().await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    // ============================================
    // Case 5: 存活探针与 OpenAPI 文档
    // ============================================
    let res = client.get(format!("{}/health", base_url)).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let res = client
        .get(format!("{}/api-docs/openapi.json", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await.unwrap();
    assert!(doc["paths"]["/api/relationship-report"].is_object());
}

#[tokio::test]
async fn test_validation_errors() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();

    // 缺少 quantity
    let res = client
        .post(format!("{}/api/inflow", base_url))
        .json(&json!({
            "datetime": "2023-06-01",
            "item": "Widget",
            "total_value": 1000,
            "unit_value": 100
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Missing required fields" }));

    // 负数金额
    let res = client
        .post(format!("{}/api/outflow", base_url))
        .json(&json!({
            "datetime": "2023-06-02",
            "item": "Widget",
            "quantity": 4,
            "total_price": -800,
            "unit_price": 200
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Quantity and values must be non-negative");

    // 非法 JSON
    let res = client
        .post(format!("{}/api/inflow", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());

    // 缺少起始日期
    let res = client
        .get(format!("{}/api/inflow-report?endDate=2023-06-03", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Start and end dates are required" }));

    // 无法解析的日期
    let res = client
        .get(format!("{}/api/relationship-data?startDate=june&endDate=2023-06-03", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid date format. Please use YYYY-MM-DD format.");

    // 从未写入的分区视为空
    let res = client
        .get(format!("{}/api/relationship-data?startDate=2023-01-01&endDate=2023-12-31", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(as_f64(&body["summary"]["financial"]["profitMargin"]), 0.0);
    assert!(body["itemAnalysis"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_overflowing_totals_return_internal_error() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();

    // 单条合法，但两条之和超出 Decimal 范围
    for _ in 0..2 {
        let res = client
            .post(format!("{}/api/inflow", base_url))
            .json(&json!({
                "datetime": "2023-06-01",
                "item": "Bullion",
                "quantity": 1,
                "total_value": 5e28,
                "unit_value": 5e28
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    for path in ["inflow-data", "relationship-data", "inflow-report", "relationship-report"] {
        let res = client
            .get(format!("{}/api/{}?startDate=2023-06-01&endDate=2023-06-03", base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = res.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("overflow"));
    }

    // 服务在错误之后仍可用
    let res = client.get(format!("{}/health", base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

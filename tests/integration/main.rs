//! HTTP 接口集成测试（内存存储）

#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;
#[path = "../mocks/mod.rs"]
mod mocks;

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, HttpRequest, HttpResponse, HttpServer};
use helpers::*;
use serde_json::{json, Value};
use sitemaster::middleware::RequestLogger;
use sitemaster::models::{EquipmentStatus, StockSource};
use sitemaster::repositories::{storage_keys, KeyValueStore};
use sitemaster::routes;
use sitemaster::services::StockApiClient;

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestLogger::new())
                .configure(|cfg| $ctx.register(cfg))
                .configure(routes::configure),
        )
        .await
    };
}

mod health_api {
    use super::*;

    #[actix_web::test]
    async fn test_health_detailed_reports_backend() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get().uri("/health/detailed").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["storage"]["backend"], "memory");
        assert_eq!(body["equipment_count"], ctx.store.len().await);
    }

    #[actix_web::test]
    async fn test_request_id_is_echoed() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header(("X-Request-ID", "req-abc-123"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("x-request-id").unwrap().to_str().unwrap(),
            "req-abc-123"
        );
    }
}

mod equipment_api {
    use super::*;

    #[actix_web::test]
    async fn test_list_with_query_filter() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/equipment?zone=Convenience%20Store")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["fridge-1", "cam-1", "coffee-1"]);
    }

    #[actix_web::test]
    async fn test_get_unknown_is_not_found() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/equipment/does-not-exist")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::patch()
            .uri("/api/v1/equipment/does-not-exist")
            .set_json(json!({ "status": "offline" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_patch_updates_record() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::patch()
            .uri("/api/v1/equipment/wash-1")
            .set_json(json!({ "status": "offline", "location": "Bay 2" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["status"], "offline");
        assert_eq!(body["data"]["location"], "Bay 2");
        let stored = ctx.store.get_by_id("wash-1").await.unwrap();
        assert_eq!(stored.status, EquipmentStatus::Offline);
    }

    #[actix_web::test]
    async fn test_alert_lifecycle() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/equipment/pump-1/alerts")
            .set_json(json!({ "message": "Leak at nozzle", "severity": "critical" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "critical");
        assert_eq!(body["data"]["alerts"][0]["message"], "Leak at nozzle");

        let req = test::TestRequest::delete()
            .uri("/api/v1/equipment/pump-1/alerts")
            .set_json(json!({ "message": "Leak at nozzle" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "operational");
        assert_eq!(body["data"]["alerts"], json!([]));
    }

    #[actix_web::test]
    async fn test_empty_alert_rejected() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/equipment/pump-1/alerts")
            .set_json(json!({ "message": "", "severity": "warning" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_resolve_all_endpoint() {
        let start = with_alerts(
            equipment("p", EquipmentStatus::Critical),
            vec![sitemaster::models::Alert::critical("Pump failure")],
        );
        let ctx = TestContext::with_equipment(vec![start]).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/equipment/p/alerts/resolve-all")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "operational");
        assert_eq!(body["data"]["alerts"], json!([]));
    }

    #[actix_web::test]
    async fn test_replace_rejects_duplicates() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let dup = vec![
            equipment("x", EquipmentStatus::Operational),
            equipment("x", EquipmentStatus::Operational),
        ];
        let req = test::TestRequest::put()
            .uri("/api/v1/equipment")
            .set_json(&dup)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ctx.store.len().await, mixed_collection().len());
    }
}

mod csv_api {
    use super::*;

    #[actix_web::test]
    async fn test_export_download_headers() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/equipment/export")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type.to_str().unwrap(), "text/csv; charset=utf-8");
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("Retail_Assets_Maintenance_Mapping.csv"));

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(text.lines().count(), ctx.store.len().await + 1);
    }

    #[actix_web::test]
    async fn test_export_then_import_equipment_format() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);
        let before = ctx.store.list().await;

        let req = test::TestRequest::get()
            .uri("/api/v1/equipment/export")
            .to_request();
        let exported = test::call_and_read_body(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/equipment/import?format=equipment")
            .insert_header((header::CONTENT_TYPE, "text/csv"))
            .set_payload(exported.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let after = ctx.store.list().await;
        assert_eq!(after.len(), before.len());
        let ids: Vec<_> = after.iter().map(|e| e.id.clone()).collect();
        let expected: Vec<_> = before.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, expected);

        let req = test::TestRequest::get()
            .uri("/api/v1/equipment/export")
            .to_request();
        let again = test::call_and_read_body(&app, req).await;
        assert_eq!(again, exported);
    }

    #[actix_web::test]
    async fn test_import_asset_mapping() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let sheet = "Asset,Category,Criticality,Maintenance Mode,Typical Service Frequency,Typical Replacement Cycle,Compliance,Primary KPIs\n\
                     Walk-in Cooler,Refrigeration,T1,Preventive,Quarterly,10 years,Food Safety,Temperature stability\n\
                     CCTV Cameras,Security,T3,Reactive,Annual,5 years,,Uptime\n";
        let req = test::TestRequest::post()
            .uri("/api/v1/equipment/import")
            .set_payload(sheet)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let list = body["data"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["id"], "ASSET-001");
        assert_eq!(list[0]["type"], "refrigerator");
        assert_eq!(list[0]["targetTemp"], 4.0);
        assert_eq!(list[1]["id"], "ASSET-002");
        assert_eq!(list[1]["type"], "security-camera");
        assert_eq!(ctx.store.len().await, 2);
    }

    #[actix_web::test]
    async fn test_import_missing_column_rejected() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/equipment/import?format=equipment")
            .set_payload("Asset ID,Asset Name\nx,y\n")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ctx.store.len().await, mixed_collection().len());
    }
}

mod selection_api {
    use super::*;

    #[actix_web::test]
    async fn test_selection_drives_list_and_summary() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::put()
            .uri("/api/v1/selection")
            .set_json(json!({ "zone": "Fuel Station" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["zone"], "Fuel Station");
        assert_eq!(body["data"]["category"], "All Categories");

        let req = test::TestRequest::get().uri("/api/v1/equipment").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard/summary")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let summary = &body["data"];
        assert_eq!(summary["total"], mixed_collection().len());
        assert_eq!(summary["equipment"].as_array().unwrap().len(), 2);
        // 统计覆盖整个集合，不受区域筛选影响
        assert_eq!(summary["statusCounts"]["operational"], mixed_collection().len());
        assert_eq!(summary["zones"][0], "All Zones");
        assert_eq!(summary["zones"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn test_select_unknown_equipment_rejected() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::put()
            .uri("/api/v1/selection")
            .set_json(json!({ "selectedEquipmentId": "ghost" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_replacing_collection_clears_stale_selection() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::put()
            .uri("/api/v1/selection")
            .set_json(json!({ "selectedEquipmentId": "pump-1" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["selectedEquipmentId"], "pump-1");

        let req = test::TestRequest::put()
            .uri("/api/v1/equipment")
            .set_json(vec![equipment_in("wash-9", "Car Wash", "car-wash")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/v1/selection").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["selectedEquipmentId"], Value::Null);
    }

    #[actix_web::test]
    async fn test_view_preferences_persist() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let req = test::TestRequest::put()
            .uri("/api/v1/selection/view-mode")
            .set_json(json!({ "viewMode": "2d" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["viewMode"], "2d");

        let req = test::TestRequest::put()
            .uri("/api/v1/selection/visible-asset-types")
            .set_json(json!({ "visibleAssetTypes": ["fuel", "security"] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["visibleAssetTypes"], json!(["fuel", "security"]));

        assert!(ctx.kv.get(storage_keys::VIEW_MODE).await.unwrap().is_some());
        assert!(ctx
            .kv
            .get(storage_keys::VISIBLE_ASSET_TYPES)
            .await
            .unwrap()
            .is_some());

        // 重新加载后偏好保持
        let restarted = TestContext::build(ctx.kv.clone(), None, None).await;
        let state = restarted.selection.state().await;
        assert_eq!(state.preferences.visible_asset_types.len(), 2);
    }
}

mod dashboard_api {
    use super::*;

    #[actix_web::test]
    async fn test_compliance_counts_endpoint() {
        let ctx = TestContext::with_equipment(vec![
            equipment_due_in("soon", 10, EquipmentStatus::Operational),
            equipment_due_in("late", -3, EquipmentStatus::Operational),
        ])
        .await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard/compliance")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["compliant"], 1);
        assert_eq!(body["data"]["nonCompliant"], 1);
        assert_eq!(body["data"]["maintenanceDueSoon"], 1);
        assert_eq!(body["data"]["indeterminate"], 0);
    }

    #[actix_web::test]
    async fn test_seed_status_counts() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard/status-counts")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["critical"], 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/dashboard/categories")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0], "All Categories");
    }
}

mod simulator_api {
    use super::*;

    #[actix_web::test]
    async fn test_brew_accepted_then_conflict() {
        let ctx = TestContext::with_equipment(vec![coffee_machine("coffee-1")]).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/simulator/coffee-1/brew")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let req = test::TestRequest::post()
            .uri("/api/v1/simulator/coffee-1/brew")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        actix_web::rt::time::sleep(TEST_BREW_DELAY * 10).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/simulator/coffee-1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["state"]["brewing"], false);
        assert_eq!(body["data"]["state"]["waterLevel"], 80);
    }

    #[actix_web::test]
    async fn test_trigger_issue_updates_equipment() {
        let ctx = TestContext::with_equipment(vec![coffee_machine("coffee-1")]).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/simulator/coffee-1/issues")
            .set_json(json!({ "kind": "temp-issue" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["equipment"]["status"], "critical");
        assert_eq!(body["data"]["state"]["temperature"], 65);

        let req = test::TestRequest::post()
            .uri("/api/v1/simulator/coffee-1/resolve-all")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["equipment"]["status"], "operational");
        assert_eq!(body["data"]["state"]["temperature"], 92);
    }

    #[actix_web::test]
    async fn test_simulator_rejects_other_equipment() {
        let ctx = TestContext::with_equipment(mixed_collection()).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/simulator/pump-1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

mod stock_api {
    use super::*;

    #[actix_web::test]
    async fn test_positions_default_to_mock_data() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/v1/stock/positions")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["siteId"], "10441");
        assert_eq!(body["data"]["source"], "MOCK_DATA");
        assert_eq!(body["data"]["recordCount"], 6);

        let positions = body["data"]["positions"].as_array().unwrap();
        let level_of = |id: &str| {
            positions
                .iter()
                .find(|p| p["productId"] == id)
                .map(|p| p["level"].clone())
                .unwrap()
        };
        assert_eq!(level_of("CONV002"), "critical");
        assert_eq!(level_of("CONV004"), "critical");
        assert_eq!(level_of("BP001"), "healthy");
    }

    #[actix_web::test]
    async fn test_all_category_selection_is_unfiltered() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let req = test::TestRequest::put()
            .uri("/api/v1/stock/selection")
            .set_json(json!({ "siteId": "10441", "category": "All" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["recordCount"], 6);
        assert_eq!(body["data"]["category"], Value::Null);

        let req = test::TestRequest::get()
            .uri("/api/v1/stock/current")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["selection"]["category"], Value::Null);
    }

    #[actix_web::test]
    async fn test_selection_change_returns_filtered_snapshot() {
        let ctx = TestContext::new().await;
        let app = init_app!(ctx);

        let req = test::TestRequest::put()
            .uri("/api/v1/stock/selection")
            .set_json(json!({ "siteId": "200", "category": "Fuel" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["siteId"], "200");
        assert_eq!(body["data"]["recordCount"], 2);

        let req = test::TestRequest::get()
            .uri("/api/v1/stock/current")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["selection"]["siteId"], "200");
        assert_eq!(body["data"]["snapshot"]["category"], "Fuel");
    }

    #[actix_web::test]
    async fn test_retry_surfaces_error() {
        let fetcher = Arc::new(mocks::StaticFetcher::failing("timeout"));
        let ctx = TestContext::with_stock_fetcher(fetcher).await;
        let app = init_app!(ctx);

        let req = test::TestRequest::post().uri("/api/v1/stock/retry").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["source"], "FALLBACK_MOCK_DATA");
        assert!(body["data"]["error"].is_string());
    }
}

mod stock_upstream {
    use super::*;
    use secrecy::SecretString;
    use sitemaster::config::StockApiSettings;
    use sitemaster::services::{StockFetcher, StockService};

    async fn token(form: web::Form<HashMap<String, String>>) -> HttpResponse {
        let valid = form.get("grant_type").map(String::as_str) == Some("client_credentials")
            && form.get("client_secret").map(String::as_str) == Some("s3cret");
        if !valid {
            return HttpResponse::Unauthorized().finish();
        }
        HttpResponse::Ok().json(json!({ "access_token": "test-token", "expires_in": 3600 }))
    }

    async fn positions(
        req: HttpRequest,
        query: web::Query<HashMap<String, String>>,
    ) -> HttpResponse {
        let auth = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if auth != Some("Bearer test-token") || !req.headers().contains_key("x-bp-consumer") {
            return HttpResponse::Unauthorized().finish();
        }
        let site = query.get("siteId").cloned().unwrap_or_default();
        HttpResponse::Ok().json(json!({
            "siteId": site,
            "positions": [
                {
                    "productId": "D1",
                    "productName": "Diesel",
                    "category": "Fuel Products",
                    "currentLevel": 4000.0,
                    "capacity": 20000.0,
                    "minimumLevel": 2000.0,
                    "unit": "L",
                    "tank": "Tank 3"
                },
                {
                    "productId": "S1",
                    "productName": "Crisps",
                    "category": "Snacks",
                    "currentStock": 3.0,
                    "maxStock": 40.0,
                    "minStock": 5.0
                }
            ]
        }))
    }

    fn spawn_upstream() -> (String, actix_web::dev::ServerHandle) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(|| {
            App::new()
                .route("/oauth2/token", web::post().to(token))
                .route("/stock/position", web::get().to(positions))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{}", addr), handle)
    }

    fn settings(base: &str) -> StockApiSettings {
        StockApiSettings {
            use_real_api: true,
            auth_url: format!("{}/oauth2/token", base),
            api_url: base.to_string(),
            client_id: "sitemaster-test".to_string(),
            request_timeout_seconds: 2,
            ..Default::default()
        }
    }

    fn secret() -> Option<SecretString> {
        Some(SecretString::new("s3cret".to_string()))
    }

    #[actix_web::test]
    async fn test_client_fetches_and_normalises() {
        let (base, handle) = spawn_upstream();
        let client = StockApiClient::new(settings(&base), secret()).unwrap();

        let positions = client.fetch_positions("777").await.unwrap();
        assert_eq!(positions.len(), 2);

        let diesel = &positions[0];
        assert_eq!(diesel.site_id.as_deref(), Some("777"));
        assert_eq!(diesel.category_id, "FUEL_PRODUCTS");
        assert_eq!(diesel.current_stock, 4000.0);
        assert_eq!(diesel.unit_of_measure, "L");
        assert_eq!(diesel.location.as_deref(), Some("Tank 3"));

        let crisps = &positions[1];
        assert_eq!(crisps.unit_of_measure, "units");
        assert_eq!(crisps.min_stock, 5.0);

        // 令牌已缓存，第二次直接复用
        let again = client.fetch_positions("777").await.unwrap();
        assert_eq!(again.len(), 2);

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_service_uses_upstream_when_available() {
        let (base, handle) = spawn_upstream();
        let client = StockApiClient::new(settings(&base), secret()).unwrap();
        let service = StockService::new(Some(Arc::new(client)), "10441");

        let snapshot = service.positions("10441", Some("snacks")).await;
        assert_eq!(snapshot.source, StockSource::BpApi);
        assert_eq!(snapshot.record_count, 1);
        assert_eq!(snapshot.positions[0].product_id, "S1");

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_missing_secret_falls_back() {
        let (base, handle) = spawn_upstream();
        let client = StockApiClient::new(settings(&base), None).unwrap();
        let service = StockService::new(Some(Arc::new(client)), "10441");

        let snapshot = service.positions("10441", None).await;
        assert_eq!(snapshot.source, StockSource::FallbackMockData);
        assert_eq!(snapshot.record_count, 6);

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_unreachable_upstream_falls_back() {
        // 绑定后立即释放，得到一个无人监听的端口
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base = format!("http://127.0.0.1:{}", port);
        let client = StockApiClient::new(settings(&base), secret()).unwrap();
        let service = StockService::new(Some(Arc::new(client)), "10441");

        let snapshot = service.positions("10441", None).await;
        assert_eq!(snapshot.source, StockSource::FallbackMockData);
        assert!(snapshot.error.is_none());

        let retried = service.retry("10441", None).await;
        assert!(retried.error.is_some());
    }
}

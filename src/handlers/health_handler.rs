//! 健康检查 API 处理器

use crate::models::{HealthCheckResponse, ServiceStatus};
use crate::repositories::KeyValueStore;
use crate::services::EquipmentStore;
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use std::time::Instant;

/// 应用启动时间
static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

/// 简单健康检查（用于负载均衡器）
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    }))
}

/// 详细健康检查
pub async fn health_detailed(store: web::Data<Arc<EquipmentStore>>) -> HttpResponse {
    let backend = store.repository().store();

    let start = Instant::now();
    let storage = match backend.health_check().await {
        Ok(_) => ServiceStatus::healthy(backend.backend_name(), start.elapsed().as_millis() as u64),
        Err(e) => {
            tracing::warn!(backend = backend.backend_name(), error = %e, "存储健康检查失败");
            ServiceStatus::unhealthy(backend.backend_name())
        }
    };

    let response = HealthCheckResponse {
        status: if storage.is_healthy() {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
        equipment_count: store.len().await,
        uptime_seconds: START_TIME.elapsed().as_secs(),
    };

    HttpResponse::Ok().json(response)
}

/// 就绪检查（存储可用且设备集合已加载）
pub async fn ready(store: web::Data<Arc<EquipmentStore>>) -> HttpResponse {
    let storage_ok = store.repository().store().health_check().await.is_ok();
    let loaded = !store.is_empty().await;

    if storage_ok && loaded {
        HttpResponse::Ok().json(serde_json::json!({
            "ready": true
        }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "ready": false,
            "storage": storage_ok,
            "equipment_loaded": loaded
        }))
    }
}

/// 存活检查
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "alive": true
    }))
}

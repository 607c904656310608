//! 通用数据结构

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 统一 API 响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
            timestamp: Utc::now(),
            request_id: None,
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_message(message: &str) -> ApiResponse<()> {
        ApiResponse {
            code: 200,
            message: message.to_string(),
            data: None,
            timestamp: Utc::now(),
            request_id: None,
        }
    }

    /// 设置请求 ID
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub storage: ServiceStatus,
    pub equipment_count: usize,
    pub uptime_seconds: u64,
}

/// 服务状态
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub backend: String,
    pub status: String,
    pub latency_ms: Option<u64>,
}

impl ServiceStatus {
    pub fn healthy(backend: &str, latency_ms: u64) -> Self {
        Self {
            backend: backend.to_string(),
            status: "healthy".to_string(),
            latency_ms: Some(latency_ms),
        }
    }

    pub fn unhealthy(backend: &str) -> Self {
        Self {
            backend: backend.to_string(),
            status: "unhealthy".to_string(),
            latency_ms: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

//! 统一错误类型定义

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// 应用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 上游认证失败 (401)
    #[error("认证失败: {0}")]
    Unauthorized(String),

    // 资源不存在 (404)
    #[error("资源不存在: {0}")]
    NotFound(String),

    // 请求验证错误 (400)
    #[error("请求参数无效: {0}")]
    ValidationError(String),

    // 冲突错误 (409)
    #[error("资源冲突: {0}")]
    Conflict(String),

    // 上游服务错误 (502)
    #[error("上游服务错误: {0}")]
    UpstreamError(String),

    // 持久化存储错误 (500)
    #[error("存储错误: {0}")]
    StorageError(String),

    // Redis 错误 (500)
    #[error("缓存服务错误")]
    RedisError(#[from] redis::RedisError),

    // CSV 解析/生成错误 (400)
    #[error("CSV 处理错误: {0}")]
    CsvError(#[from] csv::Error),

    // 内部错误 (500)
    #[error("内部服务错误: {0}")]
    InternalError(String),

    // 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// API 错误响应结构
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::CsvError(_) => StatusCode::BAD_REQUEST,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RedisError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // 内部错误不向客户端暴露细节
        let message = match self {
            AppError::Unauthorized(_) => "认证失败".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::CsvError(e) => format!("CSV 格式错误: {}", e),
            AppError::UpstreamError(_) => "上游服务暂时不可用".to_string(),
            AppError::StorageError(_) => "服务暂时不可用".to_string(),
            AppError::RedisError(_) => "服务暂时不可用".to_string(),
            AppError::InternalError(_) => "服务内部错误".to_string(),
            AppError::ConfigError(_) => "服务配置错误".to_string(),
        };

        // 记录详细错误日志（内部）
        tracing::error!(
            error = %self,
            status = %status,
            "请求处理错误"
        );

        HttpResponse::build(status).json(ErrorResponse {
            code: status.as_u16(),
            message,
        })
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::StorageError(format!("JSON 序列化失败: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

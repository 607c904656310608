//! 咖啡机模拟器 API 处理器

use crate::errors::AppError;
use crate::models::{ApiResponse, ResolveAlertRequest, TriggerIssueRequest};
use crate::services::SimulatorService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

pub async fn get_simulator(
    simulator: web::Data<Arc<SimulatorService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = simulator.view(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

/// 触发模拟故障
pub async fn trigger_issue(
    simulator: web::Data<Arc<SimulatorService>>,
    path: web::Path<String>,
    body: web::Json<TriggerIssueRequest>,
) -> Result<HttpResponse, AppError> {
    let view = simulator.trigger_issue(&path, body.kind).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

/// 开始冲泡（后台完成，返回 202）
pub async fn brew(
    simulator: web::Data<Arc<SimulatorService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let simulator = simulator.get_ref();
    let view = simulator.start_brew(&path).await?;
    Ok(HttpResponse::Accepted().json(ApiResponse::success(view)))
}

pub async fn resolve_alert(
    simulator: web::Data<Arc<SimulatorService>>,
    path: web::Path<String>,
    body: web::Json<ResolveAlertRequest>,
) -> Result<HttpResponse, AppError> {
    let view = simulator.resolve_alert(&path, &body.message).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn resolve_all(
    simulator: web::Data<Arc<SimulatorService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = simulator.resolve_all(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

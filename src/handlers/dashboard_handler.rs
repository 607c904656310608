//! 仪表盘 API 处理器

use crate::errors::AppError;
use crate::models::ApiResponse;
use crate::services::DashboardService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 汇总数据
pub async fn get_summary(
    dashboard: web::Data<Arc<DashboardService>>,
) -> Result<HttpResponse, AppError> {
    let summary = dashboard.summary().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}

pub async fn get_status_counts(
    dashboard: web::Data<Arc<DashboardService>>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard.status_counts().await)))
}

pub async fn get_compliance(
    dashboard: web::Data<Arc<DashboardService>>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard.compliance().await)))
}

pub async fn get_zones(
    dashboard: web::Data<Arc<DashboardService>>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard.zones().await)))
}

pub async fn get_categories(
    dashboard: web::Data<Arc<DashboardService>>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard.categories().await)))
}

//! 库存位置 API 处理器

use crate::errors::AppError;
use crate::models::{ApiResponse, StockQuery, StockSelection};
use crate::services::{StockFeed, StockService};
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 查询指定站点的库存（不影响当前订阅）
pub async fn get_positions(
    stock: web::Data<Arc<StockService>>,
    query: web::Query<StockQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let site_id = query
        .site_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| stock.default_site_id().to_string());

    let snapshot = stock.positions(&site_id, query.category.as_deref()).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

/// 切换订阅的站点和类别
pub async fn update_selection(
    feed: web::Data<Arc<StockFeed>>,
    body: web::Json<StockSelection>,
) -> Result<HttpResponse, AppError> {
    let selection = body.into_inner();
    if selection.site_id.trim().is_empty() {
        return Err(AppError::ValidationError("siteId 不能为空".to_string()));
    }

    let snapshot = match feed.select(selection).await {
        Some(snapshot) => Some(snapshot),
        // 期间选择又被修改，返回最新结果
        None => feed.current().await,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

/// 当前订阅的最新结果
pub async fn get_current(feed: web::Data<Arc<StockFeed>>) -> Result<HttpResponse, AppError> {
    let snapshot = match feed.current().await {
        Some(snapshot) => Some(snapshot),
        None => feed.refresh().await,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "selection": feed.selection().await,
        "snapshot": snapshot,
    }))))
}

/// 用户主动重试，失败时响应中带错误信息
pub async fn retry(feed: web::Data<Arc<StockFeed>>) -> Result<HttpResponse, AppError> {
    let snapshot = match feed.retry().await {
        Some(snapshot) => Some(snapshot),
        None => feed.current().await,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}

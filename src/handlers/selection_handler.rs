//! 筛选选择 API 处理器

use crate::errors::AppError;
use crate::models::{
    ApiResponse, UpdateSelectionRequest, UpdateViewModeRequest, UpdateVisibleAssetTypesRequest,
};
use crate::services::{EquipmentStore, SelectionService};
use actix_web::{web, HttpResponse};
use std::sync::Arc;

pub async fn get_selection(
    selection: web::Data<Arc<SelectionService>>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(selection.state().await)))
}

/// 更新区域、类别或选中设备
pub async fn update_selection(
    selection: web::Data<Arc<SelectionService>>,
    store: web::Data<Arc<EquipmentStore>>,
    body: web::Json<UpdateSelectionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();

    // 只能选中已存在的设备
    if let Some(Some(id)) = request.selected_equipment_id.as_ref() {
        if store.get_by_id(id).await.is_none() {
            return Err(AppError::NotFound(format!("设备不存在: {}", id)));
        }
    }

    let state = selection.update(request).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(state)))
}

pub async fn update_view_mode(
    selection: web::Data<Arc<SelectionService>>,
    body: web::Json<UpdateViewModeRequest>,
) -> Result<HttpResponse, AppError> {
    let state = selection.set_view_mode(body.view_mode).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(state)))
}

pub async fn update_visible_asset_types(
    selection: web::Data<Arc<SelectionService>>,
    body: web::Json<UpdateVisibleAssetTypesRequest>,
) -> Result<HttpResponse, AppError> {
    let types = body.into_inner().visible_asset_types;
    let state = selection.set_visible_asset_types(types).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(state)))
}

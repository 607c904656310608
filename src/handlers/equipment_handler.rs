//! 设备管理 API 处理器

use crate::errors::AppError;
use crate::middleware::request_id;
use crate::models::{
    AddAlertRequest, ApiResponse, Equipment, EquipmentListQuery, ImportFormat, ImportQuery,
    ResolveAlertRequest, UpdateEquipmentRequest,
};
use crate::services::{
    derived, export_equipment_csv, import_asset_mapping, parse_equipment_csv, EquipmentStore,
    SelectionService, EXPORT_FILE_NAME,
};
use crate::utils::today;
use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use validator::Validate;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("设备不存在: {}", id))
}

/// 获取设备列表
///
/// 未指定 zone/category 时使用当前筛选选择。
pub async fn list_equipment(
    store: web::Data<Arc<EquipmentStore>>,
    selection: web::Data<Arc<SelectionService>>,
    query: web::Query<EquipmentListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let filter = selection.filter().await;
    let zone = query.zone.unwrap_or(filter.zone);
    let category = query.category.unwrap_or(filter.category);

    let list = derived::filter_equipment(&store.list().await, &zone, &category);

    Ok(HttpResponse::Ok().json(ApiResponse::success(list)))
}

/// 整体替换设备集合
pub async fn replace_equipment(
    store: web::Data<Arc<EquipmentStore>>,
    selection: web::Data<Arc<SelectionService>>,
    body: web::Json<Vec<Equipment>>,
) -> Result<HttpResponse, AppError> {
    let list = body.into_inner();
    let count = store.set_equipment(list).await?;

    let current = store.list().await;
    selection
        .clear_selection_if_missing(|id| current.iter().any(|e| e.id == id))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "count": count }))))
}

/// 获取设备详情
pub async fn get_equipment(
    store: web::Data<Arc<EquipmentStore>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let eq = store.get_by_id(&id).await.ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(eq)))
}

/// 局部更新设备
pub async fn update_equipment(
    store: web::Data<Arc<EquipmentStore>>,
    path: web::Path<String>,
    body: web::Json<UpdateEquipmentRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let eq = store
        .update_equipment(&id, body.into_inner())
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(eq)))
}

/// 导出 CSV
pub async fn export_equipment(
    store: web::Data<Arc<EquipmentStore>>,
) -> Result<HttpResponse, AppError> {
    let csv = export_equipment_csv(&store.list().await)?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EXPORT_FILE_NAME.to_string())],
        })
        .body(csv))
}

/// 导入 CSV 并替换设备集合
pub async fn import_equipment(
    req: HttpRequest,
    store: web::Data<Arc<EquipmentStore>>,
    selection: web::Data<Arc<SelectionService>>,
    query: web::Query<ImportQuery>,
    body: String,
) -> Result<HttpResponse, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::ValidationError("导入内容为空".to_string()));
    }

    let list = match query.format {
        ImportFormat::Mapping => import_asset_mapping(&body, today(), &mut rand::thread_rng())?,
        ImportFormat::Equipment => parse_equipment_csv(&body)?,
    };
    let count = store.set_equipment(list).await?;

    let current = store.list().await;
    selection
        .clear_selection_if_missing(|id| current.iter().any(|e| e.id == id))
        .await;

    tracing::info!(count = count, format = ?query.format, "设备集合已从 CSV 导入");

    let mut response = ApiResponse::success(current);
    if let Some(id) = request_id(&req) {
        response = response.with_request_id(id);
    }
    Ok(HttpResponse::Ok().json(response))
}

/// 添加告警
pub async fn add_alert(
    store: web::Data<Arc<EquipmentStore>>,
    path: web::Path<String>,
    body: web::Json<AddAlertRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let eq = store
        .add_alert(&id, body.into_inner().into_alert())
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(eq)))
}

/// 移除单条告警
pub async fn resolve_alert(
    store: web::Data<Arc<EquipmentStore>>,
    path: web::Path<String>,
    body: web::Json<ResolveAlertRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let eq = store
        .resolve_alert(&id, &body.message)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(eq)))
}

/// 清除全部告警
pub async fn resolve_all_alerts(
    store: web::Data<Arc<EquipmentStore>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let eq = store
        .resolve_all(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(eq)))
}

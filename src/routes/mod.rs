//! 路由配置模块

use crate::handlers;
use actix_web::web;

/// 配置所有路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // 健康检查路由
        .service(
            web::scope("/health")
                .route("", web::get().to(handlers::health))
                .route("/detailed", web::get().to(handlers::health_detailed))
                .route("/ready", web::get().to(handlers::ready))
                .route("/live", web::get().to(handlers::live)),
        )
        // API v1 路由
        .service(
            web::scope("/api/v1")
                // 设备（固定路径需在 /{id} 之前注册）
                .service(
                    web::scope("/equipment")
                        .route("", web::get().to(handlers::list_equipment))
                        .route("", web::put().to(handlers::replace_equipment))
                        .route("/export", web::get().to(handlers::export_equipment))
                        .route("/import", web::post().to(handlers::import_equipment))
                        .route("/{id}", web::get().to(handlers::get_equipment))
                        .route("/{id}", web::patch().to(handlers::update_equipment))
                        .route("/{id}/alerts", web::post().to(handlers::add_alert))
                        .route("/{id}/alerts", web::delete().to(handlers::resolve_alert))
                        .route(
                            "/{id}/alerts/resolve-all",
                            web::post().to(handlers::resolve_all_alerts),
                        ),
                )
                // 仪表盘
                .service(
                    web::scope("/dashboard")
                        .route("/summary", web::get().to(handlers::get_summary))
                        .route("/status-counts", web::get().to(handlers::get_status_counts))
                        .route("/compliance", web::get().to(handlers::get_compliance))
                        .route("/zones", web::get().to(handlers::get_zones))
                        .route("/categories", web::get().to(handlers::get_categories)),
                )
                // 筛选与视图偏好
                .service(
                    web::scope("/selection")
                        .route("", web::get().to(handlers::get_selection))
                        .route("", web::put().to(handlers::update_selection))
                        .route("/view-mode", web::put().to(handlers::update_view_mode))
                        .route(
                            "/visible-asset-types",
                            web::put().to(handlers::update_visible_asset_types),
                        ),
                )
                // 咖啡机模拟器
                .service(
                    web::scope("/simulator/{id}")
                        .route("", web::get().to(handlers::simulator::get_simulator))
                        .route("/issues", web::post().to(handlers::simulator::trigger_issue))
                        .route("/brew", web::post().to(handlers::simulator::brew))
                        .route("/alerts", web::delete().to(handlers::simulator::resolve_alert))
                        .route("/resolve-all", web::post().to(handlers::simulator::resolve_all)),
                )
                // 库存位置
                .service(
                    web::scope("/stock")
                        .route("/positions", web::get().to(handlers::stock::get_positions))
                        .route("/selection", web::put().to(handlers::stock::update_selection))
                        .route("/current", web::get().to(handlers::stock::get_current))
                        .route("/retry", web::post().to(handlers::stock::retry)),
                ),
        );
}

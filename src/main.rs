//! SiteMaster - 零售站点设施运营后端

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitemaster::{
    config::{LoggingSettings, Settings, StorageBackend},
    db::RedisPool,
    middleware::RequestLogger,
    repositories::{
        EquipmentRepository, FileStore, KeyValueStore, MemoryStore, PreferenceRepository,
        RedisStore,
    },
    routes,
    services::{
        DashboardService, EquipmentStore, SelectionService, SimulatorService, StockApiClient,
        StockFeed, StockFetcher, StockService,
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let settings = Settings::load().expect("配置加载失败");

    // 初始化日志
    init_tracing(&settings.logging);

    info!("🏪 SiteMaster 服务启动中...");
    info!("✅ 配置加载完成");

    // 选择持久化后端
    let kv_store: Arc<dyn KeyValueStore> = match settings.storage.backend {
        StorageBackend::Redis => {
            let redis_pool = Arc::new(
                RedisPool::new(&settings)
                    .await
                    .expect("Redis 连接失败"),
            );
            Arc::new(RedisStore::new(redis_pool, settings.storage.key_prefix.clone()))
        }
        StorageBackend::File => Arc::new(FileStore::new(settings.storage.path.clone())),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    info!(backend = kv_store.backend_name(), "✅ 存储后端就绪");

    // 初始化服务
    let equipment_store = Arc::new(EquipmentStore::new(EquipmentRepository::new(
        kv_store.clone(),
    )));
    let count = equipment_store
        .initialize()
        .await
        .expect("设备数据初始化失败");
    info!(count = count, "✅ 设备数据加载完成");

    let selection_service = Arc::new(SelectionService::new(PreferenceRepository::new(
        kv_store.clone(),
    )));
    selection_service.load().await.expect("视图偏好加载失败");

    let dashboard_service = Arc::new(DashboardService::new(
        equipment_store.clone(),
        selection_service.clone(),
    ));
    let simulator_service = Arc::new(SimulatorService::new(
        equipment_store.clone(),
        Duration::from_millis(settings.simulator.brew_delay_ms),
    ));

    // 库存 API（未启用时使用本地模拟数据）
    let fetcher: Option<Arc<dyn StockFetcher>> = if settings.stock_api.use_real_api {
        let client = StockApiClient::new(
            settings.stock_api.clone(),
            Settings::stock_api_client_secret(),
        )
        .expect("库存 API 客户端初始化失败");
        Some(Arc::new(client))
    } else {
        info!("库存 API 未启用，使用模拟数据");
        None
    };
    let stock_service = Arc::new(StockService::new(
        fetcher,
        settings.stock_api.default_site_id.clone(),
    ));
    let stock_feed = Arc::new(StockFeed::new(stock_service.clone()));
    let refresh_task = stock_feed.clone().spawn_refresh_loop(Duration::from_secs(
        settings.stock_api.refresh_interval_seconds,
    ));

    let server_addr = settings.server_addr();
    let workers = if settings.server.workers == 0 {
        num_cpus::get()
    } else {
        settings.server.workers
    };

    info!("🚀 服务启动在 http://{}", server_addr);
    info!("📊 工作线程数: {}", workers);

    // 启动 HTTP 服务器
    let result = HttpServer::new(move || {
        // 配置 CORS
        let cors = Cors::default()
            .allowed_origin_fn(|origin, _req_head| {
                origin.as_bytes().starts_with(b"http://localhost")
                    || origin.as_bytes().starts_with(b"https://")
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allowed_headers(vec!["Content-Type", "X-Request-ID"])
            .expose_headers(vec!["Content-Disposition", "X-Request-ID"])
            .max_age(3600);

        App::new()
            // 全局中间件
            .wrap(cors)
            .wrap(RequestLogger::new())
            .wrap(middleware::Compress::default())
            // 注入服务
            .app_data(web::Data::new(equipment_store.clone()))
            .app_data(web::Data::new(selection_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            .app_data(web::Data::new(simulator_service.clone()))
            .app_data(web::Data::new(stock_service.clone()))
            .app_data(web::Data::new(stock_feed.clone()))
            // CSV 导入可能较大
            .app_data(web::PayloadConfig::new(4 * 1024 * 1024))
            // 配置 HTTP 路由
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&server_addr)?
    .run()
    .await;

    refresh_task.abort();
    info!("SiteMaster 服务已停止");

    result
}

/// 初始化日志系统
fn init_tracing(logging: &LoggingSettings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("{},sitemaster=debug", logging.level))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

//! 测试辅助工具

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use sitemaster::models::{Alert, Criticality, Equipment, EquipmentStatus, EquipmentType};
use sitemaster::repositories::{
    EquipmentRepository, KeyValueStore, MemoryStore, PreferenceRepository,
};
use sitemaster::services::{
    DashboardService, EquipmentStore, SelectionService, SimulatorService, StockFeed,
    StockFetcher, StockService,
};
use sitemaster::utils::{days_from_today, format_date};

/// 测试用冲泡延时
pub const TEST_BREW_DELAY: Duration = Duration::from_millis(20);

/// 构造测试设备
pub fn equipment(id: &str, status: EquipmentStatus) -> Equipment {
    Equipment {
        id: id.to_string(),
        name: format!("Test {}", id),
        kind: EquipmentType::FuelPump,
        location: "Forecourt".to_string(),
        zone: "Fuel Station".to_string(),
        status,
        alerts: Vec::new(),
        last_maintenance: format_date(days_from_today(-30)),
        next_maintenance: format_date(days_from_today(90)),
        temperature: None,
        target_temp: None,
        category: Some("fuel".to_string()),
        criticality: Some(Criticality::T2),
        maintenance_mode: None,
        service_frequency: None,
        replacement_cycle: None,
        compliance: None,
        kpis: None,
    }
}

/// 指定区域和类别的设备
pub fn equipment_in(id: &str, zone: &str, category: &str) -> Equipment {
    let mut eq = equipment(id, EquipmentStatus::Operational);
    eq.zone = zone.to_string();
    eq.category = Some(category.to_string());
    eq
}

/// 下次维护在 `days` 天后的设备
pub fn equipment_due_in(id: &str, days: i64, status: EquipmentStatus) -> Equipment {
    let mut eq = equipment(id, status);
    eq.next_maintenance = format_date(days_from_today(days));
    eq
}

/// 咖啡机
pub fn coffee_machine(id: &str) -> Equipment {
    let mut eq = equipment_in(id, "Convenience Store", "food-service");
    eq.kind = EquipmentType::CoffeeMachine;
    eq.name = "Barista Coffee Machine".to_string();
    eq
}

pub fn with_alerts(mut eq: Equipment, alerts: Vec<Alert>) -> Equipment {
    eq.alerts = alerts;
    eq
}

/// 一组覆盖多个区域和类别的设备
pub fn mixed_collection() -> Vec<Equipment> {
    vec![
        equipment_in("pump-1", "Fuel Station", "fuel"),
        equipment_in("pump-2", "Fuel Station", "fuel"),
        equipment_in("fridge-1", "Convenience Store", "refrigeration"),
        equipment_in("cam-1", "Convenience Store", "security"),
        equipment_in("wash-1", "Car Wash", "car-wash"),
        coffee_machine("coffee-1"),
    ]
}

/// 组装好的服务集合（内存存储）
pub struct TestContext {
    pub kv: Arc<dyn KeyValueStore>,
    pub store: Arc<EquipmentStore>,
    pub selection: Arc<SelectionService>,
    pub dashboard: Arc<DashboardService>,
    pub simulator: Arc<SimulatorService>,
    pub stock: Arc<StockService>,
    pub feed: Arc<StockFeed>,
}

impl TestContext {
    /// 以种子数据初始化
    pub async fn new() -> Self {
        Self::build(Arc::new(MemoryStore::new()), None, None).await
    }

    /// 以指定设备集合初始化
    pub async fn with_equipment(list: Vec<Equipment>) -> Self {
        Self::build(Arc::new(MemoryStore::new()), Some(list), None).await
    }

    /// 指定库存数据源
    pub async fn with_stock_fetcher(fetcher: Arc<dyn StockFetcher>) -> Self {
        Self::build(Arc::new(MemoryStore::new()), None, Some(fetcher)).await
    }

    pub async fn build(
        kv: Arc<dyn KeyValueStore>,
        equipment: Option<Vec<Equipment>>,
        fetcher: Option<Arc<dyn StockFetcher>>,
    ) -> Self {
        let store = Arc::new(EquipmentStore::new(EquipmentRepository::new(kv.clone())));
        store.initialize().await.expect("初始化失败");
        if let Some(list) = equipment {
            store.set_equipment(list).await.expect("写入设备失败");
        }

        let selection = Arc::new(SelectionService::new(PreferenceRepository::new(kv.clone())));
        selection.load().await.expect("加载偏好失败");

        let dashboard = Arc::new(DashboardService::new(store.clone(), selection.clone()));
        let simulator = Arc::new(SimulatorService::new(store.clone(), TEST_BREW_DELAY));
        let stock = Arc::new(StockService::new(fetcher, "10441"));
        let feed = Arc::new(StockFeed::new(stock.clone()));

        Self {
            kv,
            store,
            selection,
            dashboard,
            simulator,
            stock,
            feed,
        }
    }

    /// 注入所有服务
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.store.clone()))
            .app_data(web::Data::new(self.selection.clone()))
            .app_data(web::Data::new(self.dashboard.clone()))
            .app_data(web::Data::new(self.simulator.clone()))
            .app_data(web::Data::new(self.stock.clone()))
            .app_data(web::Data::new(self.feed.clone()));
    }
}

/// 断言结果是成功的
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// 断言结果是错误的
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?}", val),
            Err(e) => e,
        }
    };
}

//! 业务逻辑层（Service）

pub mod alert_policy;
mod asset_import;
mod csv_service;
mod dashboard_service;
pub mod derived;
mod equipment_store;
mod seed_data;
mod selection_service;
mod simulator_service;
mod stock_client;
mod stock_service;

pub use asset_import::import_asset_mapping;
pub use csv_service::{
    export_equipment_csv, parse_equipment_csv, ALERT_SEPARATOR, CSV_HEADERS, EXPORT_FILE_NAME,
};
pub use dashboard_service::DashboardService;
pub use equipment_store::EquipmentStore;
pub use seed_data::seed_equipment;
pub use selection_service::SelectionService;
pub use simulator_service::SimulatorService;
pub use stock_client::{category_id_for, generate_request_id, normalize_position, StockApiClient};
pub use stock_service::{
    category_filter, fallback_positions, filter_positions, StockFeed, StockFetcher, StockService,
};

//! SiteMaster - 零售站点设施运营后端
//!
//! 加油站/便利店设备资产管理，支持：
//! - 设备集合持久化与种子数据
//! - 告警与设备状态联动
//! - 维护合规统计与筛选
//! - CSV 导入导出
//! - 咖啡机模拟器
//! - 库存位置查询（带离线回退）

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

pub use errors::AppError;

//! HTTP 处理器模块

mod dashboard_handler;
mod equipment_handler;
mod health_handler;
mod selection_handler;
mod simulator_handler;
mod stock_handler;

pub use dashboard_handler::*;
pub use equipment_handler::*;
pub use health_handler::*;
pub use selection_handler::*;

pub mod simulator {
    pub use super::simulator_handler::*;
}

pub mod stock {
    pub use super::stock_handler::*;
}

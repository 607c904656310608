//! 数据模型模块

mod alert;
mod common;
mod dashboard;
mod equipment;
mod selection;
mod simulator;
mod stock;

pub use alert::*;
pub use common::*;
pub use dashboard::*;
pub use equipment::*;
pub use selection::*;
pub use simulator::*;
pub use stock::*;

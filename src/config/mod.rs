//! 配置管理模块

mod settings;

pub use settings::{
	Settings,
	ServerSettings,
	StorageBackend,
	StorageSettings,
	RedisSettings,
	StockApiSettings,
	SimulatorSettings,
	LoggingSettings,
};

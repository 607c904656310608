//! 外部存储连接模块

mod redis_client;

pub use redis_client::RedisPool;

//! Mock 对象

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sitemaster::errors::AppError;
use sitemaster::models::StockPosition;
use sitemaster::repositories::KeyValueStore;
use sitemaster::services::{fallback_positions, StockFetcher};

/// 可切换写入失败的存储
#[derive(Debug, Default)]
pub struct FlakyStore {
    data: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::StorageError("磁盘已满".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.put_raw(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}

/// 固定返回或固定失败的库存数据源
pub struct StaticFetcher {
    result: Result<Vec<StockPosition>, String>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn ok(positions: Vec<StockPosition>) -> Self {
        Self {
            result: Ok(positions),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StockFetcher for StaticFetcher {
    async fn fetch_positions(&self, _site_id: &str) -> Result<Vec<StockPosition>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map_err(AppError::UpstreamError)
    }
}

/// 上游返回的一条库存记录
pub fn upstream_position(site_id: &str, product_id: &str, category: &str) -> StockPosition {
    let mut position = fallback_positions(site_id).remove(0);
    position.product_id = product_id.to_string();
    position.category_name = category.to_string();
    position
}

//! 本地 JSON 文件键值存储
//!
//! 整个文件是一个 `{key: value}` 对象。写入先落临时文件再重命名，
//! 进程崩溃时不会留下半写的文件。

use super::KeyValueStore;
use crate::errors::AppError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub struct FileStore {
    path: PathBuf,
    cache: Mutex<Option<HashMap<String, String>>>,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_from_disk(&self) -> Result<HashMap<String, String>, AppError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(AppError::StorageError(format!("读取存储文件失败: {}", e))),
        };

        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "存储文件格式损坏，按空存储处理"
                );
                Ok(HashMap::new())
            }
        }
    }

    async fn write_to_disk(&self, map: &HashMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(map)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, serialized).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load_from_disk().await?);
        }
        Ok(cache.as_ref().and_then(|m| m.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut cache = self.cache.lock().await;
        let mut map = match cache.take() {
            Some(map) => map,
            None => self.load_from_disk().await?,
        };
        let previous = map.insert(key.to_string(), value.to_string());

        // 写盘失败时回滚缓存，保持与磁盘一致
        if let Err(e) = self.write_to_disk(&map).await {
            match previous {
                Some(old) => map.insert(key.to_string(), old),
                None => map.remove(key),
            };
            *cache = Some(map);
            return Err(e);
        }

        *cache = Some(map);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let mut cache = self.cache.lock().await;
        let mut map = match cache.take() {
            Some(map) => map,
            None => self.load_from_disk().await?,
        };
        let removed = map.remove(key);

        if removed.is_some() {
            if let Err(e) = self.write_to_disk(&map).await {
                if let Some(old) = removed {
                    map.insert(key.to_string(), old);
                }
                *cache = Some(map);
                return Err(e);
            }
        }

        *cache = Some(map);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageError(e.to_string())),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

//! 站点库存 API 客户端
//!
//! 使用 OAuth2 client credentials 获取访问令牌，令牌在过期前 60 秒内视为失效。

use std::time::{Duration, Instant};

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::StockApiSettings;
use crate::errors::AppError;
use crate::models::{RawStockEnvelope, RawStockPosition, StockPosition};

pub const USER_AGENT: &str = "BP-Digital-Twin-SiteMaster-Consumer/1.0";
pub const CONSUMER_NAME: &str = "SiteMaster";
/// 令牌提前失效的缓冲时间
const TOKEN_EXPIRY_BUFFER_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// 上游两种响应格式
#[derive(Deserialize)]
#[serde(untagged)]
enum StockPayload {
    Envelope(RawStockEnvelope),
    Positions(Vec<StockPosition>),
}

/// 生成请求追踪 ID：`req_{毫秒时间戳}_{9 位随机字符}`
pub fn generate_request_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!("req_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// 类别名转为类别 ID（大写，空白替换为下划线）
pub fn category_id_for(category: &str) -> String {
    category
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// 规范化上游原始记录
pub fn normalize_position(raw: RawStockPosition, site_id: &str) -> StockPosition {
    let category = raw.category.filter(|c| !c.trim().is_empty());
    StockPosition {
        site_id: Some(site_id.to_string()),
        product_id: raw.product_id,
        product_name: raw.product_name,
        category_id: category
            .as_deref()
            .map(category_id_for)
            .unwrap_or_else(|| "UNKNOWN".to_string()),
        category_name: category.unwrap_or_else(|| "Unknown".to_string()),
        current_stock: raw.current_level.or(raw.current_stock).unwrap_or(0.0),
        max_stock: raw.capacity.or(raw.max_stock).unwrap_or(0.0),
        min_stock: raw.minimum_level.or(raw.min_stock).unwrap_or(0.0),
        last_updated: raw.last_updated.unwrap_or_else(|| Utc::now().to_rfc3339()),
        unit_of_measure: raw
            .unit
            .or(raw.unit_of_measure)
            .unwrap_or_else(|| "units".to_string()),
        location: raw.location.or(raw.tank),
        shelf_zone: raw.zone.or(raw.shelf_zone),
        level: None,
    }
}

/// 库存 API 客户端
pub struct StockApiClient {
    client: Client,
    settings: StockApiSettings,
    client_secret: Option<SecretString>,
    token: Mutex<Option<CachedToken>>,
}

impl StockApiClient {
    pub fn new(
        settings: StockApiSettings,
        client_secret: Option<SecretString>,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::ConfigError(format!("HTTP 客户端初始化失败: {}", e)))?;

        Ok(Self {
            client,
            settings,
            client_secret,
            token: Mutex::new(None),
        })
    }

    /// 获取访问令牌，缓存有效时直接复用
    pub async fn access_token(&self) -> Result<String, AppError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let secret = self
            .client_secret
            .as_ref()
            .ok_or_else(|| AppError::ConfigError("STOCK_API_CLIENT_SECRET 未设置".to_string()))?;

        tracing::debug!("请求新的库存 API 访问令牌");
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", secret.expose_secret().as_str()),
            ("scope", self.settings.scope.as_str()),
        ];

        let response = self
            .client
            .post(&self.settings.auth_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("认证请求失败: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(format!(
                "认证失败: {} - {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("认证响应解析失败: {}", e)))?;

        let ttl = token.expires_in.saturating_sub(TOKEN_EXPIRY_BUFFER_SECS);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(ttl),
        });

        tracing::info!(expires_in = token.expires_in, "已获取库存 API 访问令牌");
        Ok(token.access_token)
    }

    /// 清除缓存的令牌
    pub async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    /// 查询站点库存位置
    pub async fn request_positions(&self, site_id: &str) -> Result<Vec<StockPosition>, AppError> {
        let token = self.access_token().await?;
        let request_id = generate_request_id();
        let url = format!(
            "{}/stock/position",
            self.settings.api_url.trim_end_matches('/')
        );

        tracing::debug!(site_id = site_id, request_id = %request_id, "请求库存数据");
        let response = self
            .client
            .get(&url)
            .query(&[("siteId", site_id)])
            .bearer_auth(&token)
            .header(reqwest::header::ACCEPT, "application/json")
            .header("X-BP-Consumer", CONSUMER_NAME)
            .header("X-Request-ID", &request_id)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("库存接口请求失败: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.invalidate_token().await;
            }
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(format!(
                "库存接口错误: {} - {}",
                status, body
            )));
        }

        let payload: StockPayload = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("库存响应解析失败: {}", e)))?;

        let positions = match payload {
            StockPayload::Positions(list) => list,
            StockPayload::Envelope(envelope) => {
                let site = envelope.site_id.unwrap_or_else(|| site_id.to_string());
                envelope
                    .positions
                    .into_iter()
                    .map(|raw| normalize_position(raw, &site))
                    .collect()
            }
        };

        tracing::info!(site_id = site_id, count = positions.len(), "库存数据获取成功");
        Ok(positions)
    }
}

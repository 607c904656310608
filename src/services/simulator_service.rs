//! 咖啡机模拟器服务
//!
//! 传感器读数只保存在内存中，告警和状态变化通过 [`EquipmentStore`] 持久化。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::{alert_policy, EquipmentStore};
use crate::errors::AppError;
use crate::models::{Equipment, EquipmentType, IssueKind, SimulatorState, SimulatorView};

/// 每次冲泡消耗的水量
const WATER_PER_BREW: u32 = 20;
/// 每次冲泡消耗的咖啡豆
const BEANS_PER_BREW: u32 = 5;
const WATER_LOW_THRESHOLD: u32 = 20;
const BEANS_LOW_THRESHOLD: u32 = 10;
/// 低于该水位时拒绝冲泡
const MIN_WATER_TO_BREW: u32 = 10;

pub struct SimulatorService {
    store: Arc<EquipmentStore>,
    states: Mutex<HashMap<String, SimulatorState>>,
    brew_delay: Duration,
}

impl SimulatorService {
    pub fn new(store: Arc<EquipmentStore>, brew_delay: Duration) -> Self {
        Self {
            store,
            states: Mutex::new(HashMap::new()),
            brew_delay,
        }
    }

    async fn coffee_machine(&self, id: &str) -> Result<Equipment, AppError> {
        let eq = self
            .store
            .get_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound("设备不存在".to_string()))?;
        if eq.kind != EquipmentType::CoffeeMachine {
            return Err(AppError::ValidationError(format!(
                "设备 {} 不是咖啡机",
                id
            )));
        }
        Ok(eq)
    }

    async fn state_of(&self, id: &str) -> SimulatorState {
        self.states
            .lock()
            .await
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    async fn update_state<F>(&self, id: &str, f: F) -> SimulatorState
    where
        F: FnOnce(&mut SimulatorState),
    {
        let mut states = self.states.lock().await;
        let state = states.entry(id.to_string()).or_default();
        f(state);
        *state
    }

    fn missing() -> AppError {
        AppError::NotFound("设备不存在".to_string())
    }

    /// 模拟器当前读数与设备记录
    pub async fn view(&self, id: &str) -> Result<SimulatorView, AppError> {
        let equipment = self.coffee_machine(id).await?;
        Ok(SimulatorView {
            state: self.state_of(id).await,
            equipment,
        })
    }

    /// 触发一个故障
    pub async fn trigger_issue(
        &self,
        id: &str,
        kind: IssueKind,
    ) -> Result<SimulatorView, AppError> {
        self.coffee_machine(id).await?;

        let equipment = self
            .store
            .add_alert(id, kind.into())
            .await?
            .ok_or_else(Self::missing)?;
        let state = self.update_state(id, |s| s.apply_issue(kind)).await;

        tracing::info!(equipment_id = id, issue = ?kind, "已触发模拟故障");
        Ok(SimulatorView { state, equipment })
    }

    /// 移除单条告警并恢复对应读数
    pub async fn resolve_alert(&self, id: &str, message: &str) -> Result<SimulatorView, AppError> {
        let current = self.coffee_machine(id).await?;
        let kind = current
            .alerts
            .iter()
            .find(|a| a.message == message)
            .and_then(|a| a.issue_kind());

        let equipment = self
            .store
            .resolve_alert(id, message)
            .await?
            .ok_or_else(Self::missing)?;
        let state = match kind {
            Some(kind) => self.update_state(id, |s| s.restore(kind)).await,
            None => self.state_of(id).await,
        };

        Ok(SimulatorView { state, equipment })
    }

    /// 清除全部告警并重置所有读数
    pub async fn resolve_all(&self, id: &str) -> Result<SimulatorView, AppError> {
        self.coffee_machine(id).await?;

        let equipment = self
            .store
            .resolve_all(id)
            .await?
            .ok_or_else(Self::missing)?;
        let state = self
            .update_state(id, |s| *s = SimulatorState::default())
            .await;

        tracing::info!(equipment_id = id, "模拟器已全部复位");
        Ok(SimulatorView { state, equipment })
    }

    /// 开始冲泡，返回冲泡中的状态
    pub async fn begin_brew(&self, id: &str) -> Result<SimulatorView, AppError> {
        let equipment = self.coffee_machine(id).await?;

        let mut states = self.states.lock().await;
        let state = states.entry(id.to_string()).or_default();
        if state.brewing {
            return Err(AppError::Conflict("正在冲泡中".to_string()));
        }
        if state.coffee_beans_level == 0 || state.water_level < MIN_WATER_TO_BREW {
            return Err(AppError::ValidationError(
                "水或咖啡豆不足，无法冲泡".to_string(),
            ));
        }
        state.brewing = true;

        Ok(SimulatorView {
            state: *state,
            equipment,
        })
    }

    /// 冲泡结束：扣减水和咖啡豆，并按剩余量添加告警
    pub async fn finish_brew(&self, id: &str) -> Result<SimulatorView, AppError> {
        let state = self
            .update_state(id, |s| {
                s.brewing = false;
                s.water_level = s.water_level.saturating_sub(WATER_PER_BREW);
                s.coffee_beans_level = s.coffee_beans_level.saturating_sub(BEANS_PER_BREW);
            })
            .await;

        let equipment = self
            .store
            .mutate(id, |eq| apply_brew_alerts(eq, &state))
            .await?
            .ok_or_else(Self::missing)?;

        tracing::debug!(
            equipment_id = id,
            water = state.water_level,
            beans = state.coffee_beans_level,
            "冲泡完成"
        );
        Ok(SimulatorView { state, equipment })
    }

    /// 完整冲泡一次（等待冲泡延时）
    pub async fn brew(&self, id: &str) -> Result<SimulatorView, AppError> {
        self.begin_brew(id).await?;
        tokio::time::sleep(self.brew_delay).await;
        self.finish_brew(id).await
    }

    /// 开始冲泡并在后台完成，立即返回冲泡中的状态
    pub async fn start_brew(self: &Arc<Self>, id: &str) -> Result<SimulatorView, AppError> {
        let view = self.begin_brew(id).await?;

        let this = Arc::clone(self);
        let id = id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(this.brew_delay).await;
            if let Err(e) = this.finish_brew(&id).await {
                tracing::error!(equipment_id = %id, error = %e, "冲泡结束处理失败");
            }
        });

        Ok(view)
    }
}

/// 按冲泡后的余量联动告警，返回是否有变化
fn apply_brew_alerts(eq: &mut Equipment, state: &SimulatorState) -> bool {
    let mut changed = false;

    if state.water_level < WATER_LOW_THRESHOLD {
        changed |= alert_policy::add_alert(eq, IssueKind::WaterLow.into());
    }

    let beans_empty = IssueKind::BeansEmpty.message();
    if state.coffee_beans_level == 0 && !eq.has_alert(beans_empty) {
        // 豆仓清空时以缺豆告警代替缺水告警
        eq.alerts
            .retain(|a| a.message != IssueKind::WaterLow.message());
        alert_policy::add_alert(eq, IssueKind::BeansEmpty.into());
        changed = true;
    } else if state.coffee_beans_level > 0
        && state.coffee_beans_level < BEANS_LOW_THRESHOLD
        && !eq.has_alert(beans_empty)
    {
        changed |= alert_policy::add_alert(eq, IssueKind::BeansLow.into());
    }

    changed
}

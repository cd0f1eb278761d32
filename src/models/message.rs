//! 控制消息
//!
//! 跨上下文通知通道的消息契约，与原始扩展保持一致的 JSON 形状：
//! `{"action": "toggle"}` / `{"action": "settingsUpdated", "settings": {...}}`

use crate::models::settings::Settings;
use serde::Deserialize;

/// 控制消息
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action")]
pub enum ControlMessage {
    /// 切换启用/禁用状态
    #[serde(rename = "toggle")]
    Toggle,
    /// 推送完整的设置快照
    #[serde(rename = "settingsUpdated")]
    SettingsUpdated { settings: Settings },
    /// 打开设置页（由被排除的设置界面消费，本进程忽略）
    #[serde(rename = "openOptions")]
    OpenOptions,
    /// 滚动到 API 配置区（由被排除的设置界面消费，本进程忽略）
    #[serde(rename = "scrollToApiSection")]
    ScrollToApiSection,
    /// 结束进程（相当于页面卸载时的统一清理）
    #[serde(rename = "shutdown")]
    Shutdown,
}

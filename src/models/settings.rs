//! 用户设置
//!
//! 与原始存储保持相同的键名和编码：`hideDelay` / `opacity` 以字符串存储，
//! 布尔值以布尔存储。所有字段都有默认值，部分填充的存储文件总能解析为
//! 完整的设置。

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 用户设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 是否启用检测
    pub enabled: bool,
    /// 是否自动隐藏指示器
    #[serde(rename = "autoHide")]
    pub auto_hide: bool,
    /// 自动隐藏延迟（秒，字符串编码）
    #[serde(rename = "hideDelay")]
    pub hide_delay: String,
    /// 指示器位置
    pub position: String,
    /// 指示器大小
    pub size: String,
    /// Gemini API 密钥
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// 指示器不透明度（0-100，字符串编码）
    pub opacity: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_hide: true,
            hide_delay: "3".to_string(),
            position: "top-right".to_string(),
            size: "medium".to_string(),
            api_key: String::new(),
            opacity: "100".to_string(),
        }
    }
}

impl Settings {
    /// 解析自动隐藏延迟，无效值回退到默认 3 秒
    pub fn hide_delay_duration(&self) -> Duration {
        let secs = self.hide_delay.trim().parse::<u64>().unwrap_or(3);
        Duration::from_secs(secs)
    }

    /// 解析不透明度为 0.0-1.0，无效值回退到 1.0
    pub fn opacity_level(&self) -> f64 {
        let percent = self.opacity.trim().parse::<f64>().unwrap_or(100.0);
        (percent / 100.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.enabled);
        assert!(s.auto_hide);
        assert_eq!(s.hide_delay, "3");
        assert_eq!(s.position, "top-right");
        assert_eq!(s.size, "medium");
        assert_eq!(s.api_key, "");
        assert_eq!(s.opacity, "100");
    }

    #[test]
    fn test_partial_toml_resolves_to_complete_settings() {
        // 部分填充的存储必须能解析为完整设置
        let s: Settings = toml::from_str(r#"position = "bottom-left""#).unwrap();
        assert_eq!(s.position, "bottom-left");
        assert!(s.enabled);
        assert_eq!(s.opacity, "100");
    }

    #[test]
    fn test_hide_delay_duration() {
        let mut s = Settings::default();
        assert_eq!(s.hide_delay_duration(), Duration::from_secs(3));

        s.hide_delay = "5".to_string();
        assert_eq!(s.hide_delay_duration(), Duration::from_secs(5));

        // 无效值回退到 3 秒
        s.hide_delay = "abc".to_string();
        assert_eq!(s.hide_delay_duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_opacity_level() {
        let mut s = Settings::default();
        assert_eq!(s.opacity_level(), 1.0);

        s.opacity = "50".to_string();
        assert_eq!(s.opacity_level(), 0.5);

        s.opacity = "0".to_string();
        assert_eq!(s.opacity_level(), 0.0);

        // 无效值回退到 1.0
        s.opacity = "很多".to_string();
        assert_eq!(s.opacity_level(), 1.0);

        // 超出范围的值被钳制
        s.opacity = "250".to_string();
        assert_eq!(s.opacity_level(), 1.0);
    }
}

//! 设置文件加载/保存
//!
//! 设置以 TOML 文件持久化。文件不存在或缺少字段时按默认值补全，
//! 因此读取总能得到完整的设置。

use crate::models::settings::Settings;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载设置
///
/// 文件不存在时返回默认设置（首次安装场景）。
pub async fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        tracing::info!("设置文件不存在，使用默认设置: {}", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取设置文件: {}", path.display()))?;

    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("无法解析设置文件: {}", path.display()))?;

    Ok(settings)
}

/// 保存设置到 TOML 文件
pub async fn save_settings(path: impl AsRef<Path>, settings: &Settings) -> Result<()> {
    let path = path.as_ref();

    let content = toml::to_string_pretty(settings).context("无法序列化设置")?;

    fs::write(path, content)
        .await
        .with_context(|| format!("无法写入设置文件: {}", path.display()))?;

    tracing::debug!("设置已保存至: {}", path.display());

    Ok(())
}

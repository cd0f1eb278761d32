//! 生命周期协调器 - 编排层
//!
//! 两状态（启用/禁用）的状态机：
//! - 启用：创建指示器 + 启动轮询（检测器实例随之重建，状态清零）
//! - 禁用：停止轮询 + 移除指示器
//! - 设置更新：只替换内存配置并重新应用几何，不重启轮询
//! - 退出（shutdown / stdin 关闭 / ctrl-c）：无条件清理
//!
//! 每轮轮询的检测与去重同步完成；推理 + 展示以 fire-and-forget
//! 任务执行，慢速的远程调用不会阻塞下一轮检测。去重键在检测时
//! 同步更新，同一题不会触发第二次推理；不同题目允许并发推理，
//! 结果按完成顺序应用（不保证与题目变化顺序一致）。

use crate::browser;
use crate::config::Config;
use crate::models::loaders::settings_file::{load_settings, save_settings};
use crate::models::message::ControlMessage;
use crate::models::settings::Settings;
use crate::services::{GeminiClient, Indicator, QuestionDetector};
use crate::utils::logging::truncate_text;
use crate::JsExecutor;
use anyhow::Result;
use chromiumoxide::Browser;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    settings: Settings,
    executor: JsExecutor,
    indicator: Indicator,
    gemini: GeminiClient,
    /// 检测器实例；`Some` 即启用状态，系统内同时最多一个
    detector: Option<QuestionDetector>,
    control_rx: mpsc::Receiver<ControlMessage>,
    // 保持浏览器连接存活
    _browser: Browser,
}

impl App {
    /// 初始化应用：加载设置、连接浏览器、按启用状态建立指示器
    pub async fn initialize(
        config: Config,
        control_rx: mpsc::Receiver<ControlMessage>,
    ) -> Result<Self> {
        let settings = load_settings(&config.settings_file).await?;
        log_startup(&config, &settings);

        let (browser, page) = browser::connect_to_browser_and_page(
            config.browser_debug_port,
            &config.target_url_hint,
            &config.target_url,
        )
        .await?;

        let executor = JsExecutor::new(page);
        let indicator = Indicator::new(executor.clone());
        let gemini = GeminiClient::new(&config);

        let detector = if settings.enabled {
            info!("✓ 检测已启用，创建悬浮指示器");
            indicator.create(&settings).await?;
            Some(QuestionDetector::new(executor.clone()))
        } else {
            info!("检测当前为禁用状态");
            None
        };

        Ok(Self {
            config,
            settings,
            executor,
            indicator,
            gemini,
            detector,
            control_rx,
            _browser: browser,
        })
    }

    /// 运行主循环：轮询 + 控制消息 + 退出信号
    pub async fn run(mut self) -> Result<()> {
        let mut ticker = interval(Duration::from_millis(self.config.poll_interval_ms));

        loop {
            tokio::select! {
                msg = self.control_rx.recv() => {
                    match msg {
                        Some(ControlMessage::Shutdown) | None => {
                            // 控制通道关闭等同于页面卸载，统一清理
                            info!("收到退出信号，开始清理");
                            break;
                        }
                        Some(msg) => self.handle_message(msg).await,
                    }
                }
                _ = ticker.tick(), if self.detector.is_some() => {
                    self.run_detection_cycle().await;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("收到 ctrl-c，开始清理");
                    break;
                }
            }
        }

        self.cleanup().await;
        Ok(())
    }

    /// 处理单条控制消息
    async fn handle_message(&mut self, msg: ControlMessage) {
        match msg {
            ControlMessage::Toggle => self.toggle().await,
            ControlMessage::SettingsUpdated { settings } => {
                self.apply_settings_update(settings).await
            }
            // 这两条消息由设置界面消费，本进程只记录后忽略
            ControlMessage::OpenOptions | ControlMessage::ScrollToApiSection => {
                debug!("忽略面向设置界面的消息");
            }
            // Shutdown 在主循环中提前匹配，不会到达这里
            ControlMessage::Shutdown => {}
        }
    }

    /// 切换启用/禁用状态
    async fn toggle(&mut self) {
        self.settings.enabled = !self.settings.enabled;
        info!(
            "检测已{}",
            if self.settings.enabled { "启用" } else { "禁用" }
        );

        if let Err(e) = save_settings(&self.config.settings_file, &self.settings).await {
            warn!("⚠️ 保存设置失败: {}", e);
        }

        if self.settings.enabled {
            if let Err(e) = self.indicator.create(&self.settings).await {
                warn!("⚠️ 创建指示器失败: {}", e);
            }
            // 新检测器从零开始，上一题缓存随旧实例丢弃
            self.detector = Some(QuestionDetector::new(self.executor.clone()));
        } else {
            self.detector = None;
            if let Err(e) = self.indicator.destroy().await {
                warn!("⚠️ 移除指示器失败: {}", e);
            }
        }
    }

    /// 应用设置快照
    ///
    /// 设置界面推送的快照不包含启用状态，保持当前值；
    /// 已启用时重新应用几何，不重启轮询。
    async fn apply_settings_update(&mut self, mut settings: Settings) {
        info!("设置已更新: 位置 {}, 大小 {}", settings.position, settings.size);
        settings.enabled = self.settings.enabled;
        self.settings = settings;

        if self.detector.is_some() {
            if let Err(e) = self.indicator.apply_geometry(&self.settings).await {
                warn!("⚠️ 更新指示器几何失败: {}", e);
            }
        }
    }

    /// 执行一轮检测
    ///
    /// 检测错误只记录不中断；检测到新题目后推理与展示在独立任务中
    /// 完成，本轮立即返回。
    async fn run_detection_cycle(&mut self) {
        let Some(detector) = self.detector.as_mut() else {
            return;
        };

        match detector.poll().await {
            Ok(Some(detected)) => {
                info!("🆕 检测到新题目: {}", truncate_text(&detected.question, 80));
                debug!("答案列表: {:?}", detected.answers);

                let gemini = self.gemini.clone();
                let indicator = self.indicator.clone();
                let settings = self.settings.clone();

                tokio::spawn(async move {
                    let result = gemini
                        .infer(&detected.question, &detected.answers, &settings.api_key)
                        .await;

                    if let Err(e) = indicator
                        .show_result(detected.answers.len(), result, &settings)
                        .await
                    {
                        warn!("⚠️ 指示器更新失败: {}", e);
                    }
                });
            }
            Ok(None) => {}
            Err(e) => {
                // 本轮跳过，轮询继续
                warn!("⚠️ 本轮检测失败: {}", e);
            }
        }
    }

    /// 统一清理：停止轮询并移除指示器（幂等）
    async fn cleanup(&mut self) {
        self.detector = None;
        if let Err(e) = self.indicator.destroy().await {
            debug!("清理指示器时出错（可忽略）: {}", e);
        }
        info!("✓ 清理完成");
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config, settings: &Settings) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Kahoot 答案指示器");
    info!("📊 轮询间隔: {} ms", config.poll_interval_ms);
    info!("📍 指示器位置: {}, 大小: {}", settings.position, settings.size);
    info!("{}", "=".repeat(60));
}

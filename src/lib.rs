//! # Kahoot Viewer
//!
//! 一个用于 Kahoot 答题辅助的 Rust 应用程序：通过 CDP 附着到浏览器，
//! 轮询页面中的题目，调用 Gemini 判断最可能的答案，并在页面上注入
//! 一个彩色悬浮指示器显示结果。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单次检测
//! - `QuestionDetector` - 页面题目检测 + 去重能力
//! - `GeminiClient` - Gemini 推理能力
//! - `Indicator` - 悬浮指示器展示能力
//!
//! ### ③ 编排层（App）
//! - `app` - 生命周期协调器：启停轮询、响应控制消息、统一清理
//!
//! ## 模块结构

pub mod app;
pub mod bridge;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use browser::connect_to_browser_and_page;
pub use config::Config;
pub use error::{DetectionError, InferenceError, PresentationError};
pub use infrastructure::JsExecutor;
pub use models::message::ControlMessage;
pub use models::question::{DetectedQuestion, InferenceResult};
pub use models::settings::Settings;
pub use services::{GeminiClient, Indicator, QuestionDetector};
pub use utils::logging as logger;

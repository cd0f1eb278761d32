//! 数据模型模块
//!
//! 包含设置、控制消息、题目快照等核心数据结构

pub mod loaders;
pub mod message;
pub mod question;
pub mod settings;

pub use loaders::settings_file::{load_settings, save_settings};
pub use message::ControlMessage;
pub use question::{DetectedQuestion, InferenceResult};
pub use settings::Settings;

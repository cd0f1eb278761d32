//! 业务能力层
//!
//! 每个服务只描述"我能做什么"，不关心流程顺序

pub mod detector;
pub mod gemini;
pub mod indicator;

pub use detector::QuestionDetector;
pub use gemini::GeminiClient;
pub use indicator::Indicator;

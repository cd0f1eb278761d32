/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标URL（找不到 Kahoot 标签页时导航到这里）
    pub target_url: String,
    /// 查找标签页时匹配的 URL 片段
    pub target_url_hint: String,
    /// 设置文件路径
    pub settings_file: String,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- Gemini 配置 ---
    pub gemini_api_base: String,
    pub gemini_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: "https://kahoot.it/".to_string(),
            target_url_hint: "kahoot".to_string(),
            settings_file: "viewer_settings.toml".to_string(),
            poll_interval_ms: 1000,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            gemini_api_base: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            target_url_hint: std::env::var("TARGET_URL_HINT").unwrap_or(default.target_url_hint),
            settings_file: std::env::var("SETTINGS_FILE").unwrap_or(default.settings_file),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            gemini_api_base: std::env::var("GEMINI_API_BASE").unwrap_or(default.gemini_api_base),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(default.gemini_model),
        }
    }
}

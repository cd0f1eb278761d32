//! 悬浮指示器 - 业务能力层
//!
//! 持有页面内唯一的指示器元素（`#kahoot-viewer` + 子元素
//! `#kahoot-content`），负责：
//! - 答案序号 → 颜色的确定性映射
//! - 更新时的脉冲动画、不透明度设置、自动隐藏定时
//! - 悬停显示/离开隐藏（由注入的页面侧监听器处理）
//! - 尺寸/位置几何的解析与应用
//!
//! 自动隐藏定时器不做取消：过期定时器晚触发只会再次把不透明度
//! 置零，效果幂等。悬停与定时器竞争时后写者生效。

use crate::error::PresentationError;
use crate::infrastructure::JsExecutor;
use crate::models::question::InferenceResult;
use crate::models::settings::Settings;
use serde::Deserialize;
use tracing::{debug, info};

/// 4 选项题的颜色表（按 1-based 答案序号 - 1 索引）
pub const FOUR_ANSWER_COLORS: [&str; 4] = ["#e33f3c", "#1368ce", "#d89f2c", "#4e8b12"];

/// 2 选项题：第一个答案的颜色
pub const TWO_ANSWER_FIRST: &str = "#1368ce";
/// 2 选项题：第二个答案的颜色
pub const TWO_ANSWER_SECOND: &str = "#e33f3c";

/// 根据答案数量和推理结果解析指示器颜色
///
/// - 4 个答案：查颜色表，序号越界回退白色
/// - 2 个答案：序号 1 → 蓝，其余 → 红
/// - 其他数量或无结果：白色
pub fn resolve_color(answer_count: usize, result: Option<InferenceResult>) -> &'static str {
    match (answer_count, result) {
        (4, Some(r)) => r
            .likely_answer
            .checked_sub(1)
            .and_then(|i| FOUR_ANSWER_COLORS.get(i))
            .copied()
            .unwrap_or("white"),
        (2, Some(r)) => {
            if r.likely_answer == 1 {
                TWO_ANSWER_FIRST
            } else {
                TWO_ANSWER_SECOND
            }
        }
        _ => "white",
    }
}

/// 将尺寸选项解析为像素值
pub fn size_in_pixels(size: &str) -> u32 {
    match size {
        "small" => 10,
        "medium" => 20,
        "large" => 30,
        _ => 20,
    }
}

/// 生成位置样式赋值语句
///
/// 四个角固定 10px 偏移；居中位置用 left:50% + translateX(-50%)。
/// 未设置的方向显式清空，保证位置切换后不残留旧偏移。
fn position_statements(position: &str) -> &'static str {
    match position {
        "top-left" => {
            "win.style.top='10px';win.style.left='10px';win.style.right='';win.style.bottom='';"
        }
        "top-center" => {
            "win.style.top='10px';win.style.left='50%';win.style.right='';win.style.bottom='';win.style.transform='translateX(-50%)';"
        }
        "bottom-right" => {
            "win.style.bottom='10px';win.style.right='10px';win.style.top='';win.style.left='';"
        }
        "bottom-left" => {
            "win.style.bottom='10px';win.style.left='10px';win.style.top='';win.style.right='';"
        }
        "bottom-center" => {
            "win.style.bottom='10px';win.style.left='50%';win.style.right='';win.style.top='';win.style.transform='translateX(-50%)';"
        }
        // 默认 top-right
        _ => "win.style.top='10px';win.style.right='10px';win.style.left='';win.style.bottom='';",
    }
}

/// 生成创建指示器的脚本
///
/// 先移除已存在的实例再新建，保证页面内最多一个指示器。
fn build_create_script(settings: &Settings) -> String {
    let size_px = size_in_pixels(&settings.size);
    let opacity = settings.opacity_level();
    let position = position_statements(&settings.position);

    format!(
        r#"
(() => {{
    const prev = document.getElementById('kahoot-viewer');
    if (prev) prev.remove();

    const win = document.createElement('div');
    win.id = 'kahoot-viewer';
    Object.assign(win.style, {{
        position: 'fixed',
        width: '{size_px}px',
        height: '{size_px}px',
        backgroundColor: 'white',
        borderRadius: '50%',
        zIndex: '9999',
        opacity: '{opacity}',
        transition: 'all 0.3s ease',
        transform: 'scale(1)',
        cursor: 'pointer'
    }});
    win.dataset.lastColor = 'white';
    win.dataset.opacityLevel = '{opacity}';
    {position}

    win.addEventListener('mouseenter', () => {{
        win.style.opacity = win.dataset.opacityLevel || '1';
        win.style.backgroundColor = win.dataset.lastColor || 'white';
    }});
    win.addEventListener('mouseleave', () => {{
        win.style.opacity = '0';
    }});

    const content = document.createElement('div');
    content.id = 'kahoot-content';
    Object.assign(content.style, {{
        width: '100%',
        height: '100%',
        display: 'flex',
        alignItems: 'center',
        justifyContent: 'center',
        fontSize: '16px',
        fontWeight: 'bold',
        color: '#fff'
    }});
    win.appendChild(content);

    document.body.appendChild(win);
    return true;
}})()
"#
    )
}

/// 生成更新指示器的脚本
///
/// 设置背景色与 lastColor，触发 200ms 的脉冲动画（scale 1 → 1.2 → 1），
/// 恢复配置的不透明度并清空内容；启用自动隐藏时安排延迟置零。
/// 延迟置零在页面侧执行，即使本进程随后被禁用也照常生效（幂等）。
fn build_update_script(
    color: &str,
    opacity: f64,
    auto_hide: bool,
    hide_delay_ms: u64,
) -> String {
    format!(
        r#"
(() => {{
    const win = document.getElementById('kahoot-viewer');
    if (!win) return {{ status: 'no-indicator' }};
    const content = document.getElementById('kahoot-content');
    if (!content) return {{ status: 'no-content' }};

    win.dataset.lastColor = '{color}';
    win.style.backgroundColor = '{color}';

    win.style.transform = 'scale(1.2)';
    setTimeout(() => {{ win.style.transform = 'scale(1)'; }}, 200);

    win.style.opacity = '{opacity}';
    win.dataset.opacityLevel = '{opacity}';
    content.innerHTML = '';

    if ({auto_hide}) {{
        setTimeout(() => {{
            const w = document.getElementById('kahoot-viewer');
            if (w) {{ w.style.opacity = '0'; }}
        }}, {hide_delay_ms});
    }}

    return {{ status: 'applied' }};
}})()
"#
    )
}

/// 生成几何更新脚本（设置变更时调用，不重建元素）
fn build_geometry_script(settings: &Settings) -> String {
    let size_px = size_in_pixels(&settings.size);
    let opacity = settings.opacity_level();
    let position = position_statements(&settings.position);

    format!(
        r#"
(() => {{
    const win = document.getElementById('kahoot-viewer');
    if (!win) return false;
    win.style.width = '{size_px}px';
    win.style.height = '{size_px}px';
    win.dataset.opacityLevel = '{opacity}';
    {position}
    return true;
}})()
"#
    )
}

/// 移除指示器的脚本
const DESTROY_SCRIPT: &str = r#"
(() => {
    const win = document.getElementById('kahoot-viewer');
    if (win) win.remove();
    return true;
})()
"#;

/// 更新脚本的返回值
#[derive(Debug, Deserialize)]
struct UpdateOutcome {
    status: String,
}

/// 悬浮指示器
///
/// 职责：
/// - 创建/销毁页面内唯一的指示器元素（幂等）
/// - 把推理结果映射为颜色并应用到元素上
/// - 不检测题目，不调用 LLM
#[derive(Clone)]
pub struct Indicator {
    executor: JsExecutor,
}

impl Indicator {
    /// 创建新的指示器服务
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    /// 在页面中创建指示器元素
    ///
    /// 已存在的旧实例会先被移除，保证单实例。
    pub async fn create(&self, settings: &Settings) -> Result<(), PresentationError> {
        info!("正在创建悬浮指示器");
        self.executor
            .eval(build_create_script(settings))
            .await
            .map_err(|e| PresentationError::ScriptFailed(e.to_string()))?;
        Ok(())
    }

    /// 从页面中移除指示器元素（元素不存在时为空操作）
    pub async fn destroy(&self) -> Result<(), PresentationError> {
        info!("正在移除悬浮指示器");
        self.executor
            .eval(DESTROY_SCRIPT)
            .await
            .map_err(|e| PresentationError::ScriptFailed(e.to_string()))?;
        Ok(())
    }

    /// 根据推理结果更新指示器
    pub async fn show_result(
        &self,
        answer_count: usize,
        result: Option<InferenceResult>,
        settings: &Settings,
    ) -> Result<(), PresentationError> {
        let color = resolve_color(answer_count, result);
        debug!("指示器颜色: {} (答案数: {})", color, answer_count);

        let script = build_update_script(
            color,
            settings.opacity_level(),
            settings.auto_hide,
            settings.hide_delay_duration().as_millis() as u64,
        );

        let outcome: UpdateOutcome = self
            .executor
            .eval_as(script)
            .await
            .map_err(|e| PresentationError::ScriptFailed(e.to_string()))?;

        match outcome.status.as_str() {
            "applied" => Ok(()),
            // 指示器在推理期间被销毁：按空操作处理
            "no-indicator" => {
                debug!("指示器已不存在，跳过本次更新");
                Ok(())
            }
            _ => Err(PresentationError::ContentMissing),
        }
    }

    /// 重新应用尺寸/位置（设置变更时调用，不重启轮询）
    pub async fn apply_geometry(&self, settings: &Settings) -> Result<(), PresentationError> {
        debug!(
            "更新指示器几何: 位置 {}, 大小 {}",
            settings.position, settings.size
        );
        self.executor
            .eval(build_geometry_script(settings))
            .await
            .map_err(|e| PresentationError::ScriptFailed(e.to_string()))?;
        Ok(())
    }
}

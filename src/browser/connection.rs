use anyhow::Result;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 连接到浏览器并获取 Kahoot 页面
///
/// 优先查找 URL 包含 `url_hint` 的已打开标签页；找不到时创建新页面
/// 并导航到 `target_url`。
pub async fn connect_to_browser_and_page(
    port: u16,
    url_hint: &str,
    target_url: &str,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);
    debug!("URL 片段: {:?}, 目标 URL: {:?}", url_hint, target_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        e
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    // 查找 URL 匹配的标签页
    let hint = url_hint.to_lowercase();
    for p in pages.iter() {
        if let Ok(Some(page_url)) = p.url().await {
            debug!("检查页面 URL: {}", page_url);
            if page_url.to_lowercase().contains(&hint) {
                info!("✓ 找到目标页面: {}", page_url);
                return Ok((browser, p.clone()));
            }
        }
    }

    // 没有找到匹配的页面，创建新页面并导航
    debug!("未找到匹配的页面，创建新页面并导航到: {}", target_url);
    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建新页面失败: {}", e);
        e
    })?;
    page.goto(target_url).await.map_err(|e| {
        error!("导航到 {} 失败: {}", target_url, e);
        e
    })?;
    info!("已导航到: {}", target_url);

    Ok((browser, page))
}

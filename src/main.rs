use anyhow::Result;
use kahoot_viewer::app::App;
use kahoot_viewer::bridge;
use kahoot_viewer::config::Config;
use kahoot_viewer::logger;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();
    logger::init_log_file(&config.output_log_file)?;

    // 控制消息通道（stdin JSON 桥）
    let (tx, rx) = mpsc::channel(16);
    bridge::spawn_stdin_bridge(tx);

    // 初始化并运行应用
    App::initialize(config, rx).await?.run().await?;

    Ok(())
}

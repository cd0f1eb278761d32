//! stdin 控制桥
//!
//! 从 stdin 逐行读取 JSON 控制消息并投递到应用的控制通道，
//! 对应扩展环境下的跨上下文消息通道。stdin 关闭时发送端随任务
//! 结束而丢弃，主循环据此执行统一清理。
//!
//! 所有诊断输出走 tracing，stdin 只承载 JSON 协议。

use crate::models::message::ControlMessage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// 启动 stdin 控制桥后台任务
pub fn spawn_stdin_bridge(tx: mpsc::Sender<ControlMessage>) {
    tokio::spawn(async move {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<ControlMessage>(line) {
                        Ok(msg) => {
                            debug!("收到控制消息: {:?}", msg);
                            if tx.send(msg).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("⚠️ 无法解析控制消息: {} ({})", line, e),
                    }
                }
                Ok(None) => {
                    debug!("stdin 已关闭，控制桥退出");
                    break;
                }
                Err(e) => {
                    warn!("⚠️ 读取 stdin 失败: {}", e);
                    break;
                }
            }
        }
    });
}

//! 日志初始化

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// 初始化全局 tracing 订阅者
///
/// 优先使用 `RUST_LOG`，未设置或无法解析时退回到 `default_level`。
/// 已存在全局订阅者时保留原订阅者。
pub fn init_tracing(default_level: &str) {
    let (filter, env_error) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(default_level), Some(err)),
    };

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        debug!("全局日志订阅者已存在，忽略本次初始化: {}", err);
    }

    if let Some(err) = env_error {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            warn!("{} 无法解析，使用默认日志级别 {}: {}", EnvFilter::DEFAULT_ENV, default_level, err);
        }
    }
}

/// 日志工具模块
///
/// 提供 tracing 初始化和日志格式化的辅助函数
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅器
///
/// 默认 info 级别，可用 RUST_LOG 环境变量覆盖。
/// 重复调用是安全的（测试里各用例都会尝试初始化）。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

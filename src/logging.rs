//! 日志初始化
//!
//! 级别只来自配置文件，不读取环境变量；日志写到 stderr，
//! 不会混入菜单输出。

use tracing_subscriber::EnvFilter;

/// 将配置中的级别规范化，无法识别时退回 "warn"
pub fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" => "error",
        "off" => "off",
        _ => "warn",
    }
}

/// 安装全局 tracing subscriber（重复调用时忽略）
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(normalize_level(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("DEBUG"), "debug");
        assert_eq!(normalize_level(" info "), "info");
        assert_eq!(normalize_level("warning"), "warn");
        assert_eq!(normalize_level("verbose"), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("error");
        init("debug");
    }
}

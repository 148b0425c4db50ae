//! 应用配置持久化（~/.task-manager/config.toml，可选）

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{app_dir, load_toml};
use crate::error::{Result, TaskError};

/// 默认任务文件（相对当前工作目录）
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// 任务文件路径
    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,
    /// 日志级别: "trace"/"debug"/"info"/"warn"/"error"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否允许添加空标题的任务
    #[serde(default)]
    pub allow_empty_title: bool,
}

fn default_tasks_file() -> String {
    DEFAULT_TASKS_FILE.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: default_tasks_file(),
            log_level: default_log_level(),
            allow_empty_title: false,
        }
    }
}

impl Config {
    /// 任务文件路径
    pub fn tasks_path(&self) -> PathBuf {
        PathBuf::from(&self.tasks_file)
    }
}

/// 获取配置文件路径
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join("config.toml"))
}

/// 从指定路径加载配置；文件不存在时返回默认值
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    load_toml(path).map_err(|e| TaskError::config(format!("{}: {}", path.display(), e)))
}

/// 加载配置
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

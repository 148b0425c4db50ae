//! 统一错误类型定义
//!
//! 使用 `thiserror` 提供统一的错误处理。校验类错误只影响当前菜单操作，
//! 只有保存时的 I/O 错误会终止会话。

use std::io;
use thiserror::Error;

/// Task manager 错误类型
#[derive(Debug, Error)]
pub enum TaskError {
    /// I/O 错误（读写任务文件、配置文件等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON 解析/序列化错误
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// 日期不是合法的 YYYY-MM-DD
    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// 优先级不在 Low/Medium/High 之内
    #[error("Invalid priority: {0:?} (expected Low, Medium or High)")]
    InvalidPriority(String),

    /// 任务 ID 不是数字
    #[error("Invalid task ID: {0:?}")]
    InvalidId(String),

    /// 标题为空
    #[error("Task title cannot be empty")]
    EmptyTitle,

    /// 任务不存在
    #[error("Task not found: {0}")]
    NotFound(u64),

    /// 已无可分配的任务 ID（next_id 达到 u64 上限）
    #[error("No task IDs left to assign")]
    IdsExhausted,
}

/// Task manager Result 类型别名
pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    /// 创建 Config 错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 创建 InvalidDate 错误
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate(input.into())
    }

    /// 创建 InvalidPriority 错误
    pub fn invalid_priority(input: impl Into<String>) -> Self {
        Self::InvalidPriority(input.into())
    }

    /// 创建 InvalidId 错误
    pub fn invalid_id(input: impl Into<String>) -> Self {
        Self::InvalidId(input.into())
    }

    /// 是否属于可恢复的用户输入错误
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate(_) | Self::InvalidPriority(_) | Self::InvalidId(_) | Self::EmptyTitle
        )
    }
}

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::save_json;
use crate::error::{Result, TaskError};

/// 用户输入的日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 任务优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 大小写不敏感，忽略首尾空白
impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(TaskError::invalid_priority(s.trim())),
        }
    }
}

/// 解析 YYYY-MM-DD 日期（4 位年份，1-2 位月和日，不接受正负号）
pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if !has_date_shape(input) {
        return Err(TaskError::invalid_date(input));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| TaskError::invalid_date(input))
}

fn has_date_shape(input: &str) -> bool {
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    let mut parts = input.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            digits(year, 4, 4) && digits(month, 1, 2) && digits(day, 1, 2)
        }
        _ => false,
    }
}

/// 任务数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 任务 ID
    pub id: u64,
    /// 任务标题
    pub title: String,
    /// 截止日期（序列化为 YYYY-MM-DD）
    pub due_date: NaiveDate,
    /// 优先级
    pub priority: Priority,
}

/// 内存中的任务列表，保持插入顺序
///
/// `next_id` 与列表长度无关，删除任务后不会复用已分配的 ID。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStore {
    #[serde(default)]
    next_id: u64,
    tasks: Vec<Task>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由已有任务构造，next_id 取最大 ID + 1
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self> {
        let mut store = Self { next_id: 0, tasks };
        store.normalize()?;
        Ok(store)
    }

    /// 保证 next_id 大于所有已存在的 ID；最大 ID 已是 u64::MAX 时报错
    fn normalize(&mut self) -> Result<()> {
        let max_id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let floor = max_id.checked_add(1).ok_or(TaskError::IdsExhausted)?;
        self.next_id = self.next_id.max(floor);
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// 按 ID 查找第一个匹配的任务
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// 分配 ID 并追加到末尾；ID 用尽时不做任何修改
    pub(crate) fn push_new(
        &mut self,
        title: String,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Result<&Task> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(TaskError::IdsExhausted)?;
        self.tasks.push(Task {
            id,
            title,
            due_date,
            priority,
        });
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// 移除第一个匹配 ID 的任务，其余任务保持原 ID
    pub(crate) fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }
}

/// 解析任务文件内容
///
/// 支持当前格式 `{"next_id": N, "tasks": [...]}` 和旧格式 `[...]`。
pub fn parse_tasks(content: &str) -> Result<TaskStore> {
    let value: Value = serde_json::from_str(content)?;
    let mut store = if value.is_array() {
        TaskStore::from_tasks(serde_json::from_value(value)?)?
    } else {
        serde_json::from_value::<TaskStore>(value)?
    };
    store.normalize()?;
    Ok(store)
}

/// 加载任务列表
///
/// 文件不存在或内容无法解析时返回空列表，不向调用方报错。
pub fn load_tasks(path: &Path) -> TaskStore {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "tasks file not found, starting empty");
            return TaskStore::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read tasks file, starting empty");
            return TaskStore::new();
        }
    };

    match parse_tasks(&content) {
        Ok(store) => {
            debug!(path = %path.display(), count = store.len(), "loaded tasks");
            store
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "tasks file is not valid, starting empty");
            TaskStore::new()
        }
    }
}

/// 保存任务列表（覆盖原文件，4 空格缩进）
pub fn save_tasks(path: &Path, store: &TaskStore) -> Result<()> {
    save_json(path, store)?;
    debug!(path = %path.display(), count = store.len(), "saved tasks");
    Ok(())
}

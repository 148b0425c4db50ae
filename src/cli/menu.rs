//! 交互式菜单循环
//!
//! 对任意 `BufRead` / `Write` 工作，便于在测试中用内存缓冲驱动。

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, TaskError};
use crate::operations::tasks::{self as ops, AddOptions, FieldRejection, TaskUpdate};
use crate::storage::tasks::{save_tasks, TaskStore};

const MENU: &str = "\nTask Manager Menu:\n1. Add Task\n2. View Tasks\n3. Update Task\n4. Delete Task\n5. Exit";
const INVALID_ID_MESSAGE: &str = "Invalid input. Please enter a valid task ID.";
const NOT_FOUND_MESSAGE: &str = "Task not found.";
const INPUT_CLOSED_MESSAGE: &str = "Input closed. Changes were not saved.";

/// 会话结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// 用户选择退出，任务已保存
    Saved,
    /// 输入流结束，未保存
    InputClosed,
}

/// 单个菜单动作之后的去向
enum Step {
    Continue,
    Closed,
}

pub struct Menu<R, W> {
    input: R,
    output: W,
    options: AddOptions,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, options: AddOptions) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    /// 运行菜单直到退出；只有退出动作会写回任务文件
    pub fn run(&mut self, store: &mut TaskStore, path: &Path) -> Result<MenuExit> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return self.input_closed();
            };

            let step = match choice.as_str() {
                "1" => self.add(store)?,
                "2" => self.view(store)?,
                "3" => self.update(store)?,
                "4" => self.delete(store)?,
                "5" => {
                    save_tasks(path, store)?;
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(MenuExit::Saved);
                }
                other => {
                    debug!(choice = other, "invalid menu choice");
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Step::Continue
                }
            };

            if let Step::Closed = step {
                return self.input_closed();
            }
        }
    }

    /// 输出提示并读取一行（去除首尾空白）；输入结束时返回 None
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn input_closed(&mut self) -> Result<MenuExit> {
        warn!("input closed before exit, unsaved changes discarded");
        writeln!(self.output)?;
        writeln!(self.output, "{}", INPUT_CLOSED_MESSAGE)?;
        Ok(MenuExit::InputClosed)
    }

    fn add(&mut self, store: &mut TaskStore) -> Result<Step> {
        let Some(title) = self.prompt("Enter task title: ")? else {
            return Ok(Step::Closed);
        };
        let Some(due_date) = self.prompt("Enter due date (YYYY-MM-DD): ")? else {
            return Ok(Step::Closed);
        };
        let Some(priority) = self.prompt("Enter priority (Low, Medium, High): ")? else {
            return Ok(Step::Closed);
        };

        let message = match ops::add_task(store, &title, &due_date, &priority, self.options) {
            Ok(_) => "Task added successfully!",
            Err(TaskError::InvalidDate(_)) => "Invalid date format. Task not added.",
            Err(TaskError::InvalidPriority(_)) => "Invalid priority level. Task not added.",
            Err(TaskError::EmptyTitle) => "Task title cannot be empty. Task not added.",
            Err(TaskError::IdsExhausted) => "No task IDs left to assign. Task not added.",
            Err(e) => return Err(e),
        };
        writeln!(self.output, "{}", message)?;
        Ok(Step::Continue)
    }

    fn view(&mut self, store: &TaskStore) -> Result<Step> {
        writeln!(self.output, "{}", ops::view_tasks(store))?;
        Ok(Step::Continue)
    }

    /// 读取任务 ID；输入无效时输出提示并返回 Ok(None)
    fn read_task_id(&mut self, text: &str) -> Result<Option<Option<u64>>> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };
        match ops::parse_task_id(&raw) {
            Ok(id) => Ok(Some(Some(id))),
            Err(e) if e.is_validation() => {
                debug!(error = %e, "rejected task id");
                writeln!(self.output, "{}", INVALID_ID_MESSAGE)?;
                Ok(Some(None))
            }
            Err(e) => Err(e),
        }
    }

    fn update(&mut self, store: &mut TaskStore) -> Result<Step> {
        let id = match self.read_task_id("Enter the ID of the task to update: ")? {
            None => return Ok(Step::Closed),
            Some(None) => return Ok(Step::Continue),
            Some(Some(id)) => id,
        };

        let Some(task) = store.get(id) else {
            writeln!(self.output, "{}", NOT_FOUND_MESSAGE)?;
            return Ok(Step::Continue);
        };
        writeln!(self.output, "Updating Task: {}", task.title)?;

        let Some(title) = self.prompt("Enter new title (leave blank to keep current): ")? else {
            return Ok(Step::Closed);
        };
        let Some(due_date) =
            self.prompt("Enter new due date (YYYY-MM-DD, leave blank to keep current): ")?
        else {
            return Ok(Step::Closed);
        };
        let Some(priority) =
            self.prompt("Enter new priority (Low, Medium, High, leave blank to keep current): ")?
        else {
            return Ok(Step::Closed);
        };

        let update = TaskUpdate {
            title: &title,
            due_date: &due_date,
            priority: &priority,
        };
        let report = match ops::update_task(store, id, update) {
            Ok(report) => report,
            Err(TaskError::NotFound(_)) => {
                writeln!(self.output, "{}", NOT_FOUND_MESSAGE)?;
                return Ok(Step::Continue);
            }
            Err(e) => return Err(e),
        };

        for rejection in &report.rejected {
            debug!(
                id = report.task_id,
                field = ?rejection.field(),
                error = %rejection.error(),
                "field not updated"
            );
            let message = match rejection {
                FieldRejection::DueDate(_) => "Invalid date format. Date not updated.",
                FieldRejection::Priority(_) => "Invalid priority level. Priority not updated.",
            };
            writeln!(self.output, "{}", message)?;
        }
        writeln!(self.output, "Task updated successfully!")?;
        Ok(Step::Continue)
    }

    fn delete(&mut self, store: &mut TaskStore) -> Result<Step> {
        let id = match self.read_task_id("Enter the ID of the task to delete: ")? {
            None => return Ok(Step::Closed),
            Some(None) => return Ok(Step::Continue),
            Some(Some(id)) => id,
        };

        let message = match ops::delete_task(store, id) {
            Ok(_) => "Task deleted successfully!",
            Err(TaskError::NotFound(_)) => NOT_FOUND_MESSAGE,
            Err(e) => return Err(e),
        };
        writeln!(self.output, "{}", message)?;
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tasks::load_tasks;
    use std::io::Cursor;

    /// 用脚本输入运行一次会话，返回 (退出方式, 输出文本)
    fn run_script(store: &mut TaskStore, path: &Path, script: &str) -> (MenuExit, String) {
        let mut output = Vec::new();
        let exit = Menu::new(Cursor::new(script.as_bytes()), &mut output, AddOptions::default())
            .run(store, path)
            .unwrap();
        (exit, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_add_view_and_exit_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::new();

        let script = "1\nWrite report\n2024-01-01\nhigh\n2\n5\n";
        let (exit, output) = run_script(&mut store, &path, script);

        assert_eq!(exit, MenuExit::Saved);
        assert!(output.contains("Task added successfully!"));
        assert!(output.contains("|    1 | Write report | 2024-01-01 | High       |"));
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(load_tasks(&path), store);
    }

    #[test]
    fn test_add_rejections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::new();

        let script = "1\nX\n2024-13-40\nlow\n1\nX\n2024-01-01\nurgent\n1\n \n2024-01-01\nlow\n5\n";
        let (_, output) = run_script(&mut store, &path, script);

        assert!(output.contains("Invalid date format. Task not added."));
        assert!(output.contains("Invalid priority level. Task not added."));
        assert!(output.contains("Task title cannot be empty. Task not added."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_reports_exhausted_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store =
            crate::storage::tasks::parse_tasks(r#"{"next_id": 18446744073709551615, "tasks": []}"#)
                .unwrap();

        let (exit, output) = run_script(&mut store, &path, "1
X
2024-01-01
low
5
");
        assert_eq!(exit, MenuExit::Saved);
        assert!(output.contains("No task IDs left to assign. Task not added."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_view_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::new();

        let (_, output) = run_script(&mut store, &path, "2\n5\n");
        assert!(output.contains("No tasks available."));
        assert!(!output.contains("+----"));
    }

    #[test]
    fn test_update_partial_apply_messages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::new();
        ops::add_task(&mut store, "Old", "2024-01-01", "low", AddOptions::default()).unwrap();

        let script = "3\n1\nNew\nnot-a-date\nextreme\n5\n";
        let (_, output) = run_script(&mut store, &path, script);

        assert!(output.contains("Updating Task: Old"));
        assert!(output.contains("Invalid date format. Date not updated."));
        assert!(output.contains("Invalid priority level. Priority not updated."));
        assert!(output.contains("Task updated successfully!"));

        let task = store.get(1).unwrap();
        assert_eq!(task.title, "New");
        assert_eq!(task.due_date.to_string(), "2024-01-01");
    }

    #[test]
    fn test_invalid_and_missing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::new();
        ops::add_task(&mut store, "Only", "2024-01-01", "low", AddOptions::default()).unwrap();
        let before = store.clone();

        let script = "3\nabc\n4\nabc\n3\n9\n4\n9\n5\n";
        let (exit, output) = run_script(&mut store, &path, script);

        assert_eq!(exit, MenuExit::Saved);
        assert_eq!(output.matches(INVALID_ID_MESSAGE).count(), 2);
        assert_eq!(output.matches(NOT_FOUND_MESSAGE).count(), 2);
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete_keeps_remaining_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::new();
        for title in ["A", "B", "C"] {
            ops::add_task(&mut store, title, "2024-01-01", "low", AddOptions::default()).unwrap();
        }

        let (_, output) = run_script(&mut store, &path, "4\n2\n4\n2\n5\n");
        assert!(output.contains("Task deleted successfully!"));
        assert!(output.contains(NOT_FOUND_MESSAGE));

        let ids: Vec<u64> = load_tasks(&path).tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_invalid_choice_redisplays_menu() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::new();

        let (_, output) = run_script(&mut store, &path, "9\nhello\n5\n");
        assert_eq!(output.matches("Invalid choice. Please try again.").count(), 2);
        assert_eq!(output.matches("Task Manager Menu:").count(), 3);
    }

    #[test]
    fn test_input_closed_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::new();

        let (exit, output) = run_script(&mut store, &path, "1\nHalf typed\n");
        assert_eq!(exit, MenuExit::InputClosed);
        assert!(output.contains(INPUT_CLOSED_MESSAGE));
        assert!(!path.exists());
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        // 目录本身不能作为文件写入
        let path = dir.path().to_path_buf();
        let mut store = TaskStore::new();

        let mut output = Vec::new();
        let result = Menu::new(Cursor::new(&b"5\n"[..]), &mut output, AddOptions::default())
            .run(&mut store, &path);
        assert!(matches!(result, Err(TaskError::Io(_))));
    }
}

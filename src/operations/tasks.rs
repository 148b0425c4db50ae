//! Core task operations used by the interactive menu
//!
//! Every operation takes the store explicitly by reference and works on raw
//! user input. Validation failures are returned as `TaskError` values and
//! leave the store untouched; printing messages is the caller's job.

use tracing::info;

use crate::error::{Result, TaskError};
use crate::storage::tasks::{parse_due_date, Priority, Task, TaskStore};
use crate::ui::table;

/// Options that affect how `add_task` validates input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Accept a title that is blank after trimming
    pub allow_empty_title: bool,
}

/// Editable task fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    DueDate,
    Priority,
}

/// Raw update input; a blank value keeps the current field
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskUpdate<'a> {
    pub title: &'a str,
    pub due_date: &'a str,
    pub priority: &'a str,
}

/// A field whose new value was rejected during an update
///
/// Titles are never rejected: a non-blank title always applies.
#[derive(Debug)]
pub enum FieldRejection {
    DueDate(TaskError),
    Priority(TaskError),
}

impl FieldRejection {
    pub fn field(&self) -> TaskField {
        match self {
            FieldRejection::DueDate(_) => TaskField::DueDate,
            FieldRejection::Priority(_) => TaskField::Priority,
        }
    }

    pub fn error(&self) -> &TaskError {
        match self {
            FieldRejection::DueDate(error) | FieldRejection::Priority(error) => error,
        }
    }
}

/// Outcome of a successful lookup in `update_task`
#[derive(Debug)]
pub struct UpdateReport {
    pub task_id: u64,
    pub applied: Vec<TaskField>,
    pub rejected: Vec<FieldRejection>,
}

/// Parse a task ID typed by the user
pub fn parse_task_id(input: &str) -> Result<u64> {
    let input = input.trim();
    input
        .parse::<u64>()
        .map_err(|_| TaskError::invalid_id(input))
}

/// Add a new task to the end of the store
///
/// # Steps
///
/// 1. Validate the due date (`YYYY-MM-DD`)
/// 2. Validate the priority (case-insensitive Low/Medium/High)
/// 3. Validate the trimmed title unless empty titles are allowed
/// 4. Assign the next ID and append (fails once IDs run out)
///
/// Nothing is mutated when any step fails.
pub fn add_task<'s>(
    store: &'s mut TaskStore,
    title: &str,
    due_date: &str,
    priority: &str,
    options: AddOptions,
) -> Result<&'s Task> {
    let due_date = parse_due_date(due_date)?;
    let priority: Priority = priority.parse()?;
    let title = title.trim();
    if title.is_empty() && !options.allow_empty_title {
        return Err(TaskError::EmptyTitle);
    }

    let task = store.push_new(title.to_string(), due_date, priority)?;
    info!(id = task.id, title = %task.title, "task added");
    Ok(task)
}

/// Render the store for display
pub fn view_tasks(store: &TaskStore) -> String {
    if store.is_empty() {
        return table::NO_TASKS_MESSAGE.to_string();
    }
    table::render_tasks(store.tasks())
}

/// Update the first task with a matching ID
///
/// Fields are applied independently: a rejected due date or priority keeps
/// its old value while the other fields still change.
pub fn update_task(store: &mut TaskStore, id: u64, update: TaskUpdate<'_>) -> Result<UpdateReport> {
    let task = store.get_mut(id).ok_or(TaskError::NotFound(id))?;
    let mut report = UpdateReport {
        task_id: id,
        applied: Vec::new(),
        rejected: Vec::new(),
    };

    let title = update.title.trim();
    if !title.is_empty() {
        task.title = title.to_string();
        report.applied.push(TaskField::Title);
    }

    if !update.due_date.trim().is_empty() {
        match parse_due_date(update.due_date) {
            Ok(date) => {
                task.due_date = date;
                report.applied.push(TaskField::DueDate);
            }
            Err(error) => report.rejected.push(FieldRejection::DueDate(error)),
        }
    }

    if !update.priority.trim().is_empty() {
        match update.priority.parse::<Priority>() {
            Ok(priority) => {
                task.priority = priority;
                report.applied.push(TaskField::Priority);
            }
            Err(error) => report.rejected.push(FieldRejection::Priority(error)),
        }
    }

    info!(
        id,
        applied = report.applied.len(),
        rejected = report.rejected.len(),
        "task updated"
    );
    Ok(report)
}

/// Remove the first task with a matching ID; other tasks keep their IDs
pub fn delete_task(store: &mut TaskStore, id: u64) -> Result<Task> {
    let task = store.remove(id).ok_or(TaskError::NotFound(id))?;
    info!(id, title = %task.title, "task deleted");
    Ok(task)
}

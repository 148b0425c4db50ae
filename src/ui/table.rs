//! Grid 表格渲染（查看任务列表）

use unicode_width::UnicodeWidthStr;

use crate::storage::tasks::Task;

/// 任务列表为空时的提示
pub const NO_TASKS_MESSAGE: &str = "No tasks available.";

const HEADERS: [&str; 4] = ["ID", "Title", "Due Date", "Priority"];

/// 表头与列内容之间的最小留白
const MIN_HEADER_PADDING: usize = 2;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

const ALIGNS: [Align; 4] = [Align::Right, Align::Left, Align::Left, Align::Left];

/// 渲染任务表格；空列表返回提示文字
pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return NO_TASKS_MESSAGE.to_string();
    }

    let rows: Vec<[String; 4]> = tasks
        .iter()
        .map(|t| {
            [
                t.id.to_string(),
                t.title.clone(),
                t.due_date.to_string(),
                t.priority.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| display_width(h) + MIN_HEADER_PADDING);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(display_width(cell));
        }
    }

    let headers = HEADERS.map(str::to_string);
    let mut lines = Vec::with_capacity(rows.len() * 2 + 3);
    lines.push(separator(&widths, '-'));
    lines.push(row_line(&headers, &widths));
    lines.push(separator(&widths, '='));
    for row in &rows {
        lines.push(row_line(row, &widths));
        lines.push(separator(&widths, '-'));
    }
    lines.join("\n")
}

/// 终端显示宽度（全角字符占两列）
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn separator(widths: &[usize; 4], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat(fill).take(width + 2));
        line.push('+');
    }
    line
}

fn row_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::from("|");
    for ((cell, width), align) in cells.iter().zip(widths).zip(ALIGNS) {
        let pad = width.saturating_sub(display_width(cell));
        let padded = match align {
            Align::Left => format!("{}{}", cell, " ".repeat(pad)),
            Align::Right => format!("{}{}", " ".repeat(pad), cell),
        };
        line.push(' ');
        line.push_str(&padded);
        line.push_str(" |");
    }
    line
}

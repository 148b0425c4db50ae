//! CLI 模块

pub mod menu;

use clap::Parser;

/// 不接受任何参数，只提供 --help / --version
#[derive(Parser)]
#[command(name = "task-manager")]
#[command(version)]
#[command(about = "Interactive task list manager backed by a local JSON file")]
pub struct Cli {}

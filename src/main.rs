mod cli;
mod error;
mod logging;
mod operations;
mod storage;
mod ui;

use std::io;

use clap::Parser;
use tracing::{info, warn};

use cli::menu::{Menu, MenuExit};
use cli::Cli;
use operations::tasks::AddOptions;
use storage::config::{self, Config};

/// 加载配置 → 初始化日志 → 加载任务 → 运行菜单（退出时保存）
fn run() -> error::Result<()> {
    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    logging::init(&config.log_level);
    if let Some(e) = config_error {
        warn!(error = %e, "failed to load config, using defaults");
    }

    let path = config.tasks_path();
    let mut store = storage::tasks::load_tasks(&path);
    info!(
        path = %path.display(),
        count = store.len(),
        next_id = store.next_id(),
        "session started"
    );

    let options = AddOptions {
        allow_empty_title: config.allow_empty_title,
    };
    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout(), options);

    match menu.run(&mut store, &path)? {
        MenuExit::Saved => info!(count = store.len(), "tasks saved, session ended"),
        MenuExit::InputClosed => info!("session ended without saving"),
    }
    Ok(())
}

fn main() {
    let _cli = Cli::parse();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! # uvvis - UV-Vis 吸收光谱工具
//!
//! 从 ORCA 输出中提取电偶极跃迁吸收光谱，做 Gaussian 展宽，
//! 并将原始谱线与展宽曲线绘制成图像。
//!
//! ## 用法
//! ```text
//! uvvis <ORCA_OUTPUT> <OUTPUT_IMAGE> [OPTIONS]
//! ```
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (ORCA 输出解析)
//!   │     ├── spectrum/  (展宽、绘图、导出)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod spectrum;
mod utils;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let detail = e.to_string();
                utils::output::print_error(detail.lines().next().unwrap_or_default());
                utils::output::print_usage(&Cli::command().render_usage().to_string());
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

//! # 解析器模块
//!
//! 提供量子化学输出的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: orca

pub mod orca;

pub use orca::parse_orca_output;

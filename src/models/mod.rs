//! # 数据模型模块
//!
//! 定义吸收光谱的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `spectrum/` 和 `commands/` 使用
//! - 子模块: spectrum

pub mod spectrum;

pub use spectrum::{BroadenedCurve, SpectralLine, Spectrum};

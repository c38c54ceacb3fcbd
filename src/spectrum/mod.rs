//! # 吸收光谱计算模块
//!
//! 提供谱线展宽、绘图与数据导出功能。
//!
//! ## 子模块
//! - `broadening`: Gaussian 展宽
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/absorption.rs` 使用
//! - 使用 `models/spectrum.rs`

pub mod broadening;
pub mod export;
pub mod plot;

pub use broadening::{BroadeningConfig, GaussianBroadener};
pub use plot::PlotConfig;

//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 命令结构
//! `uvvis <INPUT> <OUTPUT> [OPTIONS]`
//! - `INPUT`: ORCA 输出文件
//! - `OUTPUT`: 图像文件（格式由扩展名决定）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/absorption.rs`

use crate::spectrum::broadening::{DEFAULT_FWHM_NM, DEFAULT_SAMPLE_POINTS};
use crate::spectrum::plot::{DEFAULT_BAR_WIDTH, DEFAULT_HEIGHT, DEFAULT_WIDTH};

use clap::Parser;
use std::path::PathBuf;

/// uvvis - UV-Vis 吸收光谱提取与绘图
#[derive(Parser, Debug)]
#[command(name = "uvvis")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Extract, broaden and plot the UV-Vis absorption spectrum from an ORCA output file", long_about = None)]
pub struct Cli {
    /// Path to the ORCA output file
    pub input: PathBuf,

    /// Output image file (format from extension: png, jpg, bmp, svg)
    pub output: PathBuf,

    /// Full Width at Half Maximum of the Gaussian broadening, in nm
    #[arg(long, default_value_t = DEFAULT_FWHM_NM, value_parser = parse_positive)]
    pub fwhm: f64,

    /// Number of points on the resampled wavelength axis
    #[arg(long, default_value_t = DEFAULT_SAMPLE_POINTS, value_parser = parse_sample_points)]
    pub points: usize,

    /// Width of the stick bars, in nm
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH, value_parser = parse_positive)]
    pub bar_width: f64,

    /// Figure width in pixels (for bitmaps) or points (for SVG)
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Figure height in pixels (for bitmaps) or points (for SVG)
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Title for the plot (default: none)
    #[arg(long)]
    pub title: Option<String>,

    /// Also write the stick lines with their broadened values to a CSV file
    #[arg(long)]
    pub export_lines: Option<PathBuf>,

    /// Also write the broadened curve to a data file (.csv or .xy/.dat/.txt)
    #[arg(long)]
    pub export_curve: Option<PathBuf>,

    /// Do not print the table of transitions
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

/// 解析正的有限实数
pub fn parse_positive(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|_| format!("Invalid number '{}'", input))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("'{}' must be a positive number", input));
    }
    Ok(value)
}

/// 解析重采样点数（至少两个点才能覆盖区间两端）
pub fn parse_sample_points(input: &str) -> Result<usize, String> {
    let value: usize = input
        .parse()
        .map_err(|_| format!("Invalid point count '{}'", input))?;
    if value < 2 {
        return Err(format!("'{}' must be at least 2", input));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positionals_with_defaults() {
        let cli = Cli::try_parse_from(["uvvis", "job.out", "spectrum.png"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("job.out"));
        assert_eq!(cli.output, PathBuf::from("spectrum.png"));
        assert_eq!(cli.fwhm, 60.0);
        assert_eq!(cli.points, 70);
        assert_eq!(cli.bar_width, 2.0);
        assert!(cli.export_lines.is_none());
    }

    #[test]
    fn test_wrong_positional_count() {
        assert!(Cli::try_parse_from(["uvvis"]).is_err());
        assert!(Cli::try_parse_from(["uvvis", "job.out"]).is_err());
        assert!(Cli::try_parse_from(["uvvis", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("45.5"), Ok(45.5));
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-3").is_err());
        assert!(parse_positive("inf").is_err());
        assert!(parse_positive("wide").is_err());
    }

    #[test]
    fn test_parse_sample_points() {
        assert_eq!(parse_sample_points("200"), Ok(200));
        assert!(parse_sample_points("1").is_err());
    }
}

//! # 吸收光谱图表生成
//!
//! 使用 `plotters` 库绘制 UV-Vis 吸收光谱。
//!
//! ## 功能
//! - 原始谱线以竖条（stick）表示，左边缘对齐到波长
//! - 展宽曲线以连续折线叠加
//! - 根据扩展名选择 PNG/JPEG/BMP 或 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/absorption.rs` 调用
//! - 使用 `models/spectrum.rs` 的 Spectrum, BroadenedCurve 结构
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, UvVisError};
use crate::models::{BroadenedCurve, Spectrum};

use plotters::prelude::*;
use std::path::Path;

/// 默认竖条宽度 (nm)
pub const DEFAULT_BAR_WIDTH: f64 = 2.0;

/// 默认图像宽度 (px)
pub const DEFAULT_WIDTH: u32 = 1000;

/// 默认图像高度 (px)
pub const DEFAULT_HEIGHT: u32 = 600;

const X_LABEL: &str = "Wavelength (nm)";
const Y_LABEL: &str = "Oscillator Strength (fosc)";

/// 图像输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// 位图 (png, jpg, bmp)，具体编码由扩展名决定
    Bitmap,
    /// SVG 矢量图
    Svg,
}

/// 绘图参数
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    /// 竖条宽度 (nm)
    pub bar_width: f64,
    pub title: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bar_width: DEFAULT_BAR_WIDTH,
            title: None,
        }
    }
}

/// 从文件扩展名推断图像格式
pub fn image_format_from_path(path: &Path) -> Result<ImageFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => Ok(ImageFormat::Svg),
        Some("png") | Some("jpg") | Some("jpeg") | Some("bmp") => Ok(ImageFormat::Bitmap),
        _ => Err(UvVisError::UnsupportedFormat(format!(
            "Cannot infer image format from '{}' (use .png, .jpg, .bmp or .svg)",
            path.display()
        ))),
    }
}

/// 计算坐标轴范围，返回 ((x_min, x_max), (y_min, y_max))
pub fn axis_ranges(
    spectrum: &Spectrum,
    curve: &BroadenedCurve,
    bar_width: f64,
) -> ((f64, f64), (f64, f64)) {
    let (min, max) = spectrum.wavelength_range();
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { 10.0 };

    let y_peak = spectrum.max_strength().max(curve.max_intensity());
    let y_max = if y_peak > 0.0 { y_peak * 1.1 } else { 1.0 };

    ((min - pad, max + bar_width + pad), (0.0, y_max))
}

/// 生成吸收光谱图（竖条 + 展宽曲线）
pub fn generate_spectrum_plot(
    spectrum: &Spectrum,
    curve: &BroadenedCurve,
    output_path: &Path,
    config: &PlotConfig,
) -> Result<()> {
    let size = (config.width, config.height);

    match image_format_from_path(output_path)? {
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_spectrum_chart(&root, spectrum, curve, config)?;
            root.present()
                .map_err(|e| UvVisError::PlotError(e.to_string()))?;
        }
        ImageFormat::Bitmap => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_spectrum_chart(&root, spectrum, curve, config)?;
            root.present()
                .map_err(|e| UvVisError::PlotError(e.to_string()))?;
        }
    }

    Ok(())
}

/// 绘制图表的核心逻辑
fn draw_spectrum_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spectrum: &Spectrum,
    curve: &BroadenedCurve,
    config: &PlotConfig,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| UvVisError::PlotError(format!("{:?}", e)))?;

    let ((x_min, x_max), (y_min, y_max)) = axis_ranges(spectrum, curve, config.bar_width);

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70);
    if let Some(title) = &config.title {
        builder.caption(title, ("sans-serif", 28).into_font());
    }

    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| UvVisError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| UvVisError::PlotError(format!("{:?}", e)))?;

    // 原始谱线
    let bar_style = BLACK.mix(0.7).filled();
    chart
        .draw_series(spectrum.lines().iter().map(|line| {
            Rectangle::new(
                [
                    (line.wavelength, 0.0),
                    (line.wavelength + config.bar_width, line.oscillator_strength),
                ],
                bar_style,
            )
        }))
        .map_err(|e| UvVisError::PlotError(format!("{:?}", e)))?;

    // 展宽曲线
    let curve_color = RGBColor(128, 128, 128);
    chart
        .draw_series(LineSeries::new(
            curve.points().iter().copied(),
            curve_color.stroke_width(2),
        ))
        .map_err(|e| UvVisError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

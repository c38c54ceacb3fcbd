//! # UV-Vis 吸收光谱命令实现
//!
//! 从 ORCA 输出中提取吸收光谱，做 Gaussian 展宽并绘图。
//!
//! ## 流程
//! 读取 → 提取 → 展宽（原始波长处 + 重采样轴） → 打印 → 绘图 → 可选导出
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的 Cli
//! - 使用 `parsers/orca.rs` 读取光谱
//! - 使用 `spectrum/` 模块进行展宽、绘图与导出

use crate::cli::Cli;
use crate::error::{Result, UvVisError};
use crate::models::{BroadenedCurve, Spectrum};
use crate::parsers;
use crate::spectrum::{export, plot, BroadeningConfig, GaussianBroadener, PlotConfig};
use crate::utils::output;

use std::fs;
use std::path::PathBuf;

/// 执行吸收光谱分析
pub fn execute(args: Cli) -> Result<()> {
    output::print_header("UV-Vis Absorption Spectrum");

    if !args.input.is_file() {
        return Err(UvVisError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    // 在读取输入之前检查输出格式，失败时不产生任何文件
    plot::image_format_from_path(&args.output)?;
    if let Some(path) = &args.export_curve {
        export::curve_format_from_path(path)?;
    }

    let spectrum = match parsers::parse_orca_output(&args.input) {
        Ok(s) => s,
        Err(e @ UvVisError::SpectrumNotFound { .. }) => {
            output::print_warning(&e.to_string());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let (min, max) = spectrum.wavelength_range();
    output::print_success(&format!(
        "Extracted {} transitions ({:.1} - {:.1} nm)",
        spectrum.len(),
        min,
        max
    ));

    output::print_info(&format!(
        "Total oscillator strength: {:.6}",
        spectrum.total_strength()
    ));

    let config = BroadeningConfig {
        fwhm: args.fwhm,
        sample_points: args.points,
    };
    let broadener = GaussianBroadener::from_fwhm(config.fwhm);
    output::print_info(&format!(
        "Applying Gaussian broadening (FWHM = {:.2} nm, sigma = {:.4} nm)",
        config.fwhm,
        broadener.sigma()
    ));

    let convolved = broadener.at_lines(&spectrum);
    let curve = broadener.resampled(&spectrum, config.sample_points);

    if !args.quiet {
        print_line_table(&spectrum, &convolved);
    }

    let plot_config = PlotConfig {
        width: args.width,
        height: args.height,
        bar_width: args.bar_width,
        title: args.title.clone(),
    };

    // 任一输出失败时删除本次已写入的文件
    let mut written: Vec<PathBuf> = Vec::new();
    if let Err(e) = write_outputs(
        &args,
        &spectrum,
        &convolved,
        &curve,
        &plot_config,
        &mut written,
    ) {
        for path in &written {
            if fs::remove_file(path).is_ok() {
                log::debug!("removed partial output '{}'", path.display());
            }
        }
        return Err(e);
    }

    output::print_success(&format!("Figure saved to {}", args.output.display()));

    Ok(())
}

/// 写出图像与可选的数据文件，成功写入的路径记录到 `written`
fn write_outputs(
    args: &Cli,
    spectrum: &Spectrum,
    convolved: &BroadenedCurve,
    curve: &BroadenedCurve,
    plot_config: &PlotConfig,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    plot::generate_spectrum_plot(spectrum, curve, &args.output, plot_config)?;
    written.push(args.output.clone());

    if let Some(path) = &args.export_lines {
        export::lines_to_csv(spectrum, convolved, path)?;
        written.push(path.clone());
        output::print_success(&format!("Transitions saved to '{}'", path.display()));
    }
    if let Some(path) = &args.export_curve {
        export::export_curve(curve, args.fwhm, path)?;
        written.push(path.clone());
        output::print_success(&format!("Broadened curve saved to '{}'", path.display()));
    }

    Ok(())
}

/// 打印谱线表格
fn print_line_table(spectrum: &Spectrum, convolved: &BroadenedCurve) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct LineRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "λ (nm)")]
        wavelength: String,
        #[tabled(rename = "fosc")]
        fosc: String,
        #[tabled(rename = "fosc (broadened)")]
        convolved: String,
    }

    let rows: Vec<LineRow> = spectrum
        .lines()
        .iter()
        .zip(convolved.points())
        .enumerate()
        .map(|(i, (line, (_, value)))| LineRow {
            index: i + 1,
            wavelength: format!("{:.1}", line.wavelength),
            fosc: format!("{:.6}", line.oscillator_strength),
            convolved: format!("{:.6}", value),
        })
        .collect();

    output::print_header(&format!("{} Transitions", rows.len()));
    let table = Table::new(&rows);
    println!("{}", table);
}

//! # 光谱数据导出
//!
//! 导出谱线与展宽曲线到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 谱线 (wavelength_nm, fosc, fosc_convolved)，或展宽曲线 (wavelength_nm, intensity)
//! - XY: 带注释头的制表符分隔数据（展宽曲线）
//!
//! ## 依赖关系
//! - 被 `commands/absorption.rs` 调用
//! - 使用 `models/spectrum.rs` 的 Spectrum, BroadenedCurve 结构
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, UvVisError};
use crate::models::{BroadenedCurve, Spectrum};

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 曲线导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFormat {
    Csv,
    Xy,
}

/// 谱线导出行
#[derive(Debug, Serialize)]
struct LineRecord {
    wavelength_nm: f64,
    fosc: f64,
    fosc_convolved: f64,
}

/// 从文件扩展名推断曲线导出格式
pub fn curve_format_from_path(path: &Path) -> Result<CurveFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("csv") => Ok(CurveFormat::Csv),
        Some("xy") | Some("dat") | Some("txt") => Ok(CurveFormat::Xy),
        _ => Err(UvVisError::UnsupportedFormat(format!(
            "Cannot infer data format from '{}' (use .csv, .xy, .dat or .txt)",
            path.display()
        ))),
    }
}

/// 导出谱线及其在原始波长处的展宽值
pub fn lines_to_csv(
    spectrum: &Spectrum,
    convolved: &BroadenedCurve,
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (line, (_, value)) in spectrum.lines().iter().zip(convolved.points()) {
        wtr.serialize(LineRecord {
            wavelength_nm: line.wavelength,
            fosc: line.oscillator_strength,
            fosc_convolved: *value,
        })?;
    }

    wtr.flush().map_err(|e| UvVisError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 按格式导出展宽曲线
pub fn export_curve(curve: &BroadenedCurve, fwhm: f64, output_path: &Path) -> Result<()> {
    match curve_format_from_path(output_path)? {
        CurveFormat::Csv => curve_to_csv(curve, output_path),
        CurveFormat::Xy => curve_to_xy(curve, fwhm, output_path),
    }
}

/// 导出展宽曲线为 CSV 格式
pub fn curve_to_csv(curve: &BroadenedCurve, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["wavelength_nm", "intensity"])?;
    for (x, y) in curve.points() {
        wtr.write_record(&[format!("{:.4}", x), format!("{:.6}", y)])?;
    }

    wtr.flush().map_err(|e| UvVisError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出展宽曲线为 XY 格式
pub fn curve_to_xy(curve: &BroadenedCurve, fwhm: f64, output_path: &Path) -> Result<()> {
    let write_err = |e| UvVisError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let mut file = BufWriter::new(File::create(output_path).map_err(write_err)?);

    writeln!(file, "# UV-Vis absorption spectrum (Gaussian broadened)").map_err(write_err)?;
    writeln!(file, "# FWHM: {:.4} nm", fwhm).map_err(write_err)?;
    writeln!(file, "# Columns: wavelength (nm), intensity (fosc)").map_err(write_err)?;
    writeln!(file, "#").map_err(write_err)?;

    for (x, y) in curve.points() {
        writeln!(file, "{:.4}\t{:.6}", x, y).map_err(write_err)?;
    }

    file.flush().map_err(write_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpectralLine;
    use std::fs;

    fn spectrum() -> Spectrum {
        Spectrum::new(vec![
            SpectralLine::new(300.0, 0.05),
            SpectralLine::new(400.0, 0.12),
        ])
        .unwrap()
    }

    #[test]
    fn test_lines_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        let convolved = BroadenedCurve::new(&[300.0, 400.0], &[0.06, 0.13]);

        lines_to_csv(&spectrum(), &convolved, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows[0], "wavelength_nm,fosc,fosc_convolved");
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("300.0,0.05,"));
    }

    #[test]
    fn test_curve_export_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let curve = BroadenedCurve::new(&[300.0, 350.0, 400.0], &[0.1, 0.2, 0.1]);

        let csv_path = dir.path().join("curve.csv");
        export_curve(&curve, 60.0, &csv_path).unwrap();
        let content = fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.lines().next(), Some("wavelength_nm,intensity"));
        assert_eq!(content.lines().count(), 4);

        let xy_path = dir.path().join("curve.xy");
        export_curve(&curve, 60.0, &xy_path).unwrap();
        let content = fs::read_to_string(&xy_path).unwrap();
        let data: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(
            data,
            vec![
                "300.0000\t0.100000",
                "350.0000\t0.200000",
                "400.0000\t0.100000"
            ]
        );

        assert!(export_curve(&curve, 60.0, &dir.path().join("curve.json")).is_err());
    }
}

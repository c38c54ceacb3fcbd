//! # Gaussian 谱线展宽
//!
//! 将离散的跃迁谱线卷积为连续的吸收曲线。
//!
//! ## 算法
//! 对每个采样点 x_i：
//! ```text
//! I(x_i) = Σ_j f_j · exp(-((λ_j - x_i) / σ)²)
//! ```
//! 不做归一化，曲线保持振子强度的量纲。σ 由 FWHM 换算：
//! `σ = FWHM / (2·sqrt(2·ln2))`。
//!
//! ## 依赖关系
//! - 被 `commands/absorption.rs` 调用
//! - 使用 `models/spectrum.rs` 的 Spectrum, BroadenedCurve 结构

use crate::models::{BroadenedCurve, Spectrum};

/// 默认展宽半高宽 (nm)
pub const DEFAULT_FWHM_NM: f64 = 60.0;

/// 默认重采样点数
pub const DEFAULT_SAMPLE_POINTS: usize = 70;

/// 展宽参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BroadeningConfig {
    /// 半高宽 (nm)
    pub fwhm: f64,
    /// 重采样轴的点数
    pub sample_points: usize,
}

impl Default for BroadeningConfig {
    fn default() -> Self {
        BroadeningConfig {
            fwhm: DEFAULT_FWHM_NM,
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }
}

/// FWHM 换算为 Gaussian σ
pub fn sigma_from_fwhm(fwhm: f64) -> f64 {
    fwhm / (2.0 * (2.0 * 2.0_f64.ln()).sqrt())
}

/// 在 [start, end] 上生成 n 个等间距点（包含两端）
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// 在每个采样点上对所有谱线求 Gaussian 核之和
pub fn gaussian_broadening(xs: &[f64], ys: &[f64], sigma: f64, samples: &[f64]) -> Vec<f64> {
    samples
        .iter()
        .map(|&xi| {
            xs.iter()
                .zip(ys)
                .map(|(&xj, &yj)| {
                    let u = (xj - xi) / sigma;
                    yj * (-u * u).exp()
                })
                .sum()
        })
        .collect()
}

/// Gaussian 展宽器
pub struct GaussianBroadener {
    sigma: f64,
}

impl GaussianBroadener {
    /// 由 σ 直接创建
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }

    /// 由 FWHM 创建
    pub fn from_fwhm(fwhm: f64) -> Self {
        Self::new(sigma_from_fwhm(fwhm))
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// 在任意采样点上计算展宽强度
    pub fn evaluate(&self, spectrum: &Spectrum, samples: &[f64]) -> Vec<f64> {
        gaussian_broadening(
            &spectrum.wavelengths(),
            &spectrum.oscillator_strengths(),
            self.sigma,
            samples,
        )
    }

    /// 在原始谱线波长处计算展宽强度
    pub fn at_lines(&self, spectrum: &Spectrum) -> BroadenedCurve {
        let xs = spectrum.wavelengths();
        let intensities = self.evaluate(spectrum, &xs);
        BroadenedCurve::new(&xs, &intensities)
    }

    /// 在 [min λ, max λ] 的等间距重采样轴上计算展宽曲线
    pub fn resampled(&self, spectrum: &Spectrum, n_points: usize) -> BroadenedCurve {
        let (min, max) = spectrum.wavelength_range();
        let xs = linspace(min, max, n_points);
        let intensities = self.evaluate(spectrum, &xs);
        BroadenedCurve::new(&xs, &intensities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpectralLine;

    fn sample_spectrum() -> Spectrum {
        Spectrum::new(vec![
            SpectralLine::new(300.0, 0.05),
            SpectralLine::new(400.0, 0.12),
            SpectralLine::new(250.0, 0.30),
        ])
        .unwrap()
    }

    #[test]
    fn test_sigma_from_default_fwhm() {
        let sigma = sigma_from_fwhm(DEFAULT_FWHM_NM);
        assert!((sigma - 25.479654).abs() < 1e-5, "sigma = {}", sigma);
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(250.0, 400.0, DEFAULT_SAMPLE_POINTS);
        assert_eq!(xs.len(), 70);
        assert_eq!(xs[0], 250.0);
        assert_eq!(xs[69], 400.0);
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_linspace_small_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert_eq!(linspace(1.0, 2.0, 3), vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_huge_sigma_sums_all_strengths() {
        let spectrum = sample_spectrum();
        let broadener = GaussianBroadener::new(1e9);
        let samples = [200.0, 300.0, 500.0];
        for value in broadener.evaluate(&spectrum, &samples) {
            assert!((value - spectrum.total_strength()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tiny_sigma_picks_single_line() {
        let spectrum = sample_spectrum();
        let broadener = GaussianBroadener::new(1e-3);
        let curve = broadener.at_lines(&spectrum);
        let values: Vec<f64> = curve.points().iter().map(|(_, y)| *y).collect();
        assert_eq!(values.len(), 3);
        assert!((values[0] - 0.05).abs() < 1e-12);
        assert!((values[1] - 0.12).abs() < 1e-12);
        assert!((values[2] - 0.30).abs() < 1e-12);
    }

    #[test]
    fn test_kernel_is_not_normalized() {
        // 单条谱线在自身位置处的强度等于其振子强度
        let value = gaussian_broadening(&[300.0], &[0.5], 25.0, &[300.0]);
        assert_eq!(value, vec![0.5]);

        // 偏离 σ 处衰减为 e^-1
        let value = gaussian_broadening(&[300.0], &[0.5], 25.0, &[325.0]);
        assert!((value[0] - 0.5 * (-1.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_resampled_axis_spans_range() {
        let spectrum = sample_spectrum();
        let curve = GaussianBroadener::from_fwhm(DEFAULT_FWHM_NM)
            .resampled(&spectrum, DEFAULT_SAMPLE_POINTS);

        assert_eq!(curve.points().len(), 70);
        assert_eq!(curve.points()[0].0, 250.0);
        assert_eq!(curve.points()[69].0, 400.0);
        assert!(curve.points().iter().all(|(_, y)| *y > 0.0));
    }

    #[test]
    fn test_degenerate_range_collapses() {
        let spectrum = Spectrum::new(vec![
            SpectralLine::new(300.0, 0.1),
            SpectralLine::new(300.0, 0.2),
        ])
        .unwrap();
        let curve = GaussianBroadener::from_fwhm(60.0).resampled(&spectrum, 70);

        assert_eq!(curve.points().len(), 70);
        for (x, y) in curve.points() {
            assert_eq!(*x, 300.0);
            assert!((y - 0.3).abs() < 1e-12);
        }
    }

    #[test]
    fn test_default_config() {
        let config = BroadeningConfig::default();
        assert_eq!(config.fwhm, 60.0);
        assert_eq!(config.sample_points, 70);
    }
}

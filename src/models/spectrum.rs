//! # 吸收光谱数据模型
//!
//! 存储从 ORCA 输出中提取的跃迁谱线，以及展宽后的连续曲线。
//!
//! ## 依赖关系
//! - 被 `parsers/orca.rs` 构造
//! - 被 `spectrum/broadening.rs`, `spectrum/plot.rs`, `spectrum/export.rs` 使用

/// 单条吸收谱线
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralLine {
    /// 波长 (nm)
    pub wavelength: f64,
    /// 振子强度 (无量纲)
    pub oscillator_strength: f64,
}

impl SpectralLine {
    pub fn new(wavelength: f64, oscillator_strength: f64) -> Self {
        SpectralLine {
            wavelength,
            oscillator_strength,
        }
    }
}

/// 吸收光谱（按文件中出现的顺序，至少包含一条谱线）
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    lines: Vec<SpectralLine>,
}

#[allow(clippy::len_without_is_empty)]
impl Spectrum {
    /// 空谱线列表不构成有效光谱
    pub fn new(lines: Vec<SpectralLine>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(Spectrum { lines })
        }
    }

    pub fn lines(&self) -> &[SpectralLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn wavelengths(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.wavelength).collect()
    }

    pub fn oscillator_strengths(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.oscillator_strength).collect()
    }

    /// 波长范围 (min, max)
    pub fn wavelength_range(&self) -> (f64, f64) {
        let min = self
            .lines
            .iter()
            .map(|l| l.wavelength)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .lines
            .iter()
            .map(|l| l.wavelength)
            .fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }

    /// 最大振子强度
    pub fn max_strength(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.oscillator_strength)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// 振子强度之和
    pub fn total_strength(&self) -> f64 {
        self.lines.iter().map(|l| l.oscillator_strength).sum()
    }
}

/// 展宽曲线，x 可以是重采样网格，也可以是原始波长
#[derive(Debug, Clone, PartialEq)]
pub struct BroadenedCurve {
    points: Vec<(f64, f64)>,
}

impl BroadenedCurve {
    /// 由平行的 x 与强度序列构造
    pub fn new(xs: &[f64], intensities: &[f64]) -> Self {
        BroadenedCurve {
            points: xs.iter().copied().zip(intensities.iter().copied()).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn max_intensity(&self) -> f64 {
        self.points
            .iter()
            .map(|(_, y)| *y)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spectrum_is_rejected() {
        assert!(Spectrum::new(Vec::new()).is_none());
    }

    #[test]
    fn test_spectrum_accessors_keep_file_order() {
        let spectrum = Spectrum::new(vec![
            SpectralLine::new(400.0, 0.12),
            SpectralLine::new(300.0, 0.05),
            SpectralLine::new(350.0, 0.0),
        ])
        .unwrap();

        assert_eq!(spectrum.len(), 3);
        assert_eq!(spectrum.wavelengths(), vec![400.0, 300.0, 350.0]);
        assert_eq!(spectrum.oscillator_strengths(), vec![0.12, 0.05, 0.0]);
        assert_eq!(spectrum.wavelength_range(), (300.0, 400.0));
        assert!((spectrum.total_strength() - 0.17).abs() < 1e-12);
        assert_eq!(spectrum.max_strength(), 0.12);
    }

    #[test]
    fn test_broadened_curve_pairs() {
        let curve = BroadenedCurve::new(&[1.0, 2.0, 3.0], &[0.5, 1.5, 0.25]);
        assert_eq!(curve.points().len(), 3);
        assert_eq!(curve.points()[1], (2.0, 1.5));
        assert_eq!(curve.max_intensity(), 1.5);
    }
}

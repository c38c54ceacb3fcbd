//! # ORCA 输出吸收光谱解析器
//!
//! 从 ORCA TD-DFT/CIS 输出中提取电偶极跃迁吸收光谱（波长与振子强度）。
//!
//! ## 格式说明
//! ```text
//! -----------------------------------------------------------------------------
//!          ABSORPTION SPECTRUM VIA TRANSITION ELECTRIC DIPOLE MOMENTS
//! -----------------------------------------------------------------------------
//! State   Energy    Wavelength  fosc         T2        TX        TY        TZ
//!         (cm-1)    (nm)                   (au**2)    (au**2)   (au**2)   (au**2)
//! -----------------------------------------------------------------------------
//!    1   27564.9    362.8   0.000000002   0.00000  -0.00002  -0.00000   0.00021
//!    2   30021.3    333.1   0.012345678   0.13532   0.36700   0.01000   0.00000
//!
//! ```
//! 另一种布局以 `1-0A  ->  2-0A` 形式的跃迁标签代替单个态编号，其后依次为
//! 能量 (cm-1)、波长、fosc。ORCA 6 的表格在 cm-1 之前还有一列 eV 能量，
//! 该布局按此规则会把 cm-1 列读作波长，这里不做区分。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `commands/absorption.rs` 使用
//! - 使用 `models/spectrum.rs`

use crate::error::{Result, UvVisError};
use crate::models::{SpectralLine, Spectrum};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 吸收光谱段标记
pub const ABSORPTION_MARKER: &str = "ABSORPTION SPECTRUM VIA TRANSITION ELECTRIC DIPOLE MOMENTS";

/// 次级表头标记
const HEADER_MARKER: &str = "Wavelength";

/// 单位标签，出现在数值列位置时跳过该行
const UNIT_LABEL: &str = "au**2";

/// 提取状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractState {
    /// 寻找段标记
    Seeking,
    /// 跳过标记后的分隔行
    SkipHeaderLine,
    /// 读取数据行
    ReadingRows,
    /// 段结束，不再读取
    Done,
}

/// 单行的处理结果
#[derive(Debug, PartialEq)]
enum RowOutcome {
    Line(SpectralLine),
    Skipped(&'static str),
}

/// 解析 ORCA 输出文件
pub fn parse_orca_output(path: &Path) -> Result<Spectrum> {
    let file = File::open(path).map_err(|e| UvVisError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    extract_spectrum(BufReader::new(file), &path.display().to_string())
}

/// 逐行扫描，提取吸收光谱段
pub fn extract_spectrum<R: BufRead>(reader: R, source_name: &str) -> Result<Spectrum> {
    let mut state = ExtractState::Seeking;
    let mut lines: Vec<SpectralLine> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| UvVisError::FileReadError {
            path: source_name.to_string(),
            source: e,
        })?;
        let line_no = idx + 1;

        state = match state {
            ExtractState::Seeking => {
                if line.contains(ABSORPTION_MARKER) {
                    log::debug!("absorption section found at line {}", line_no);
                    ExtractState::SkipHeaderLine
                } else {
                    ExtractState::Seeking
                }
            }
            ExtractState::SkipHeaderLine => ExtractState::ReadingRows,
            ExtractState::ReadingRows => {
                if line.contains(ABSORPTION_MARKER) {
                    ExtractState::SkipHeaderLine
                } else if line.trim().is_empty() {
                    log::debug!("absorption section ends at line {}", line_no);
                    ExtractState::Done
                } else {
                    match parse_row(&line, line_no)? {
                        RowOutcome::Line(l) => lines.push(l),
                        RowOutcome::Skipped(reason) => {
                            log::debug!("line {} skipped ({}): {}", line_no, reason, line.trim())
                        }
                    }
                    ExtractState::ReadingRows
                }
            }
            ExtractState::Done => ExtractState::Done,
        };

        if state == ExtractState::Done {
            break;
        }
    }

    Spectrum::new(lines).ok_or_else(|| UvVisError::SpectrumNotFound {
        source_name: source_name.to_string(),
    })
}

/// 解析数据段中的一行
fn parse_row(line: &str, line_no: usize) -> Result<RowOutcome> {
    if line.contains(HEADER_MARKER) {
        return Ok(RowOutcome::Skipped("header"));
    }

    let parts: Vec<&str> = line.split_whitespace().collect();

    // `1-0A -> 2-0A` 形式的跃迁标签多占两列，其后只假定一列能量
    let offset = if parts.get(1) == Some(&"->") { 2 } else { 0 };
    if parts.len() < 4 + offset {
        return Ok(RowOutcome::Skipped("too few columns"));
    }

    let wavelength = parts[2 + offset];
    let fosc = parts[3 + offset];

    if wavelength.contains(UNIT_LABEL) || fosc.contains(UNIT_LABEL) {
        return Ok(RowOutcome::Skipped("unit row"));
    }

    Ok(RowOutcome::Line(SpectralLine::new(
        parse_number(wavelength, line_no)?,
        parse_number(fosc, line_no)?,
    )))
}

fn parse_number(token: &str, line_no: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| UvVisError::MalformedNumber {
        line: line_no,
        token: token.to_string(),
    })
}

//! Line-oriented header scan.
//!
//! A STAR header is a sequence of `data_` blocks. Files written by RELION
//! 3.1 and later carry a `data_optics` block followed by a `data_particles`
//! block; older files carry a single unnamed `data_` block. Inside the
//! particle block, `loop_` introduces a run of `_rlnName #N` column
//! declarations, and the first line after them that is neither a declaration
//! nor a comment starts the data region.

use std::collections::HashSet;

use crate::schema::StarVersion;

use super::ReadError;

/// Header facts needed to load the rest of the file.
#[derive(Debug)]
pub(super) struct RawHeader {
    /// Format revision implied by the block layout
    pub(super) version: StarVersion,
    /// Verbatim lines of the optics block, `data_optics` line included;
    /// empty for legacy files
    pub(super) optics_lines: Vec<String>,
    /// Declared column names in order, stripped of the leading underscore
    /// and the `#N` ordinal
    pub(super) column_names: Vec<String>,
    /// 0-based index of the first data row; `lines.len()` when the table
    /// has no rows
    pub(super) data_start: usize,
}

enum Section {
    Preamble,
    Optics,
    Particles,
}

/// Scan the header out of the full line buffer.
pub(super) fn parse_header(lines: &[String]) -> Result<RawHeader, ReadError> {
    let mut section = Section::Preamble;
    let mut saw_optics = false;
    let mut optics_lines: Vec<String> = Vec::new();
    let mut column_names: Vec<String> = Vec::new();
    let mut declared: HashSet<String> = HashSet::new();
    let mut data_start = lines.len();

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with("data_") {
            if !column_names.is_empty() {
                return Err(ReadError::MalformedHeader {
                    line: idx + 1,
                    reason: "unexpected data block after column declarations".to_string(),
                });
            }
            if trimmed.contains("optics") {
                saw_optics = true;
                section = Section::Optics;
                optics_lines.push(line.clone());
            } else {
                section = Section::Particles;
            }
            continue;
        }

        match section {
            Section::Preamble => {
                // Comments and blank lines may precede the first block.
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    return Err(ReadError::MalformedHeader {
                        line: idx + 1,
                        reason: format!("unexpected content before first data block: '{trimmed}'"),
                    });
                }
            }
            Section::Optics => optics_lines.push(line.clone()),
            Section::Particles => {
                if trimmed.is_empty()
                    || trimmed.starts_with("loop_")
                    || trimmed.starts_with('#')
                {
                    continue;
                }
                if let Some(declaration) = trimmed.strip_prefix('_') {
                    let name = declaration
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string();
                    if !declared.insert(name.clone()) {
                        return Err(ReadError::MalformedHeader {
                            line: idx + 1,
                            reason: format!("duplicate column declaration: {name}"),
                        });
                    }
                    column_names.push(name);
                    continue;
                }
                if column_names.is_empty() {
                    return Err(ReadError::MalformedHeader {
                        line: idx + 1,
                        reason: "data row before any column declaration".to_string(),
                    });
                }
                data_start = idx;
                break;
            }
        }
    }

    if matches!(section, Section::Preamble | Section::Optics) {
        return Err(ReadError::MalformedHeader {
            line: lines.len(),
            reason: "no particle data block found".to_string(),
        });
    }
    if column_names.is_empty() {
        return Err(ReadError::MalformedHeader {
            line: lines.len(),
            reason: "particle block declares no columns".to_string(),
        });
    }

    while optics_lines.last().is_some_and(|line| line.trim().is_empty()) {
        optics_lines.pop();
    }

    Ok(RawHeader {
        version: if saw_optics {
            StarVersion::Relion31
        } else {
            StarVersion::Relion30
        },
        optics_lines,
        column_names,
        data_start,
    })
}

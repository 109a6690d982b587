// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flat-text ensemble snapshots.
//!
//! One line per replicate, pipe-delimited `previous|current` values (four decimals) for
//! every tracked variable in network order. One file per saved time step.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::error::{InfoDynError, Result};

/// File holding the snapshot taken at `time`.
pub fn snapshot_path(directory: &Path, time: usize) -> PathBuf {
    directory.join(format!("at_time{time:03}.txt"))
}

/// Format one replicate row.
pub fn format_snapshot_row(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.4}"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Write all replicate rows of one time step, replacing any previous file.
pub fn write_snapshot<'a, I>(path: &Path, rows: I) -> Result<()>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        writeln!(writer, "{}", format_snapshot_row(row))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a snapshot into an `N x ncols` matrix.
///
/// With `rows = Some(n)` exactly the first `n` lines are read and a shorter file is an
/// error; with `None` every non-empty line is read.
pub fn read_snapshot(path: &Path, ncols: usize, rows: Option<usize>) -> Result<Array2<f64>> {
    let reader = BufReader::new(File::open(path)?);
    let mut values: Vec<f64> = Vec::new();
    let mut n_rows = 0usize;
    for line in reader.lines() {
        if rows.is_some_and(|n| n_rows == n) {
            break;
        }
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields = line
            .split('|')
            .map(|field| {
                field.trim().parse::<f64>().map_err(|e| {
                    InfoDynError::Configuration(format!(
                        "{}: malformed value `{field}`: {e}",
                        path.display()
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if fields.len() != ncols {
            return Err(InfoDynError::dimension(
                format!("snapshot {}", path.display()),
                ncols,
                fields.len(),
            ));
        }
        values.extend(fields);
        n_rows += 1;
    }
    if let Some(n) = rows {
        if n_rows < n {
            return Err(InfoDynError::Configuration(format!(
                "{}: expected {n} replicates, found {n_rows}",
                path.display()
            )));
        }
    }
    Array2::from_shape_vec((n_rows, ncols), values)
        .map_err(|e| InfoDynError::Configuration(format!("{}: {e}", path.display())))
}

// src/slices.rs
//
// Readers for the lattice simulator's slice output:
//   slicetimes_0.dat      one timestamp per line
//   slices<field>_0.dat   nbox*nbox values per timestep, row-major
//
// Blank lines are skipped; every other line must hold a single number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Result, SliceError};

pub const SLICE_TIMES_FILE: &str = "slicetimes_0.dat";

/// File name of the slice data for field index `field`.
pub fn slice_data_file(field: usize) -> String {
    format!("slices{}_0.dat", field)
}

pub fn slice_times_path(dir: &Path) -> PathBuf {
    dir.join(SLICE_TIMES_FILE)
}

pub fn slice_data_path(dir: &Path, field: usize) -> PathBuf {
    dir.join(slice_data_file(field))
}

/// Parse every non-blank line of `path` as an `f64`, in file order.
pub fn read_values(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path).map_err(|e| SliceError::io(path, e))?;
    read_values_from(BufReader::new(file), path)
}

/// Same as [`read_values`] but over any buffered reader; `path` is only used
/// in error messages.
pub fn read_values_from<R: BufRead>(reader: R, path: &Path) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SliceError::io(path, e))?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let v = text.parse::<f64>().map_err(|_| SliceError::Parse {
            path: path.to_path_buf(),
            line: n + 1,
            text: text.to_string(),
        })?;
        values.push(v);
    }
    Ok(values)
}

/// Read the slice timestamps from `dir/slicetimes_0.dat`.
pub fn read_slice_times(dir: &Path) -> Result<Vec<f64>> {
    let path = slice_times_path(dir);
    let times = read_values(&path)?;
    if times.is_empty() {
        return Err(SliceError::EmptyTimes { path });
    }
    info!(
        "read {} slice times from {} (last t = {})",
        times.len(),
        path.display(),
        times[times.len() - 1]
    );
    Ok(times)
}

/// Read the flat sample buffer for `field` from `dir/slices<field>_0.dat`.
pub fn read_slice_data(dir: &Path, field: usize) -> Result<Vec<f64>> {
    let path = slice_data_path(dir, field);
    let data = read_values(&path)?;
    debug!("read {} samples from {}", data.len(), path.display());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<Vec<f64>> {
        read_values_from(Cursor::new(text), Path::new("test.dat"))
    }

    #[test]
    fn blank_lines_are_ignored() {
        let with_blanks = parse("1.5\n\n-2\n\n\n3e-2\n   \n").unwrap();
        let without = parse("1.5\n-2\n3e-2\n").unwrap();
        assert_eq!(with_blanks, without);
        assert_eq!(without, vec![1.5, -2.0, 0.03]);
    }

    #[test]
    fn crlf_and_padding_are_trimmed() {
        assert_eq!(parse(" 4.0 \r\n5\r\n").unwrap(), vec![4.0, 5.0]);
    }

    #[test]
    fn bad_line_reports_its_line_number() {
        match parse("1\n\nabc\n2\n").unwrap_err() {
            SliceError::Parse { line, text, .. } => {
                assert_eq!(line, 3);
                assert_eq!(text, "abc");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn data_file_name_includes_field_index() {
        assert_eq!(slice_data_file(0), "slices0_0.dat");
        assert_eq!(slice_data_file(3), "slices3_0.dat");
    }
}

use super::CoverageMatrix;
use anyhow::{anyhow, Result};
use std::{fs, path::Path};

impl CoverageMatrix {
    /// Parses rows of `0`/`1` characters. Blank lines are ignored, interior
    /// spaces and tabs are stripped, and lines holding any other character are
    /// skipped. All kept rows must have the same length.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        let mut width: Option<(usize, usize)> = None;
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let clean: String = line.chars().filter(|&c| c != ' ' && c != '\t').collect();
            if !clean.chars().all(|c| c == '0' || c == '1') {
                tracing::debug!(line = line_no + 1, "skipping non-binary line");
                continue;
            }
            match width {
                None => width = Some((clean.len(), line_no + 1)),
                Some((expected, first_line)) if expected != clean.len() => {
                    return Err(anyhow!(
                        "Line {} has {} columns, but line {} has {}",
                        line_no + 1,
                        clean.len(),
                        first_line,
                        expected
                    ));
                }
                Some(_) => {}
            }
            rows.push(clean.chars().map(|c| c == '1').collect());
        }
        Self::from_rows(rows)
    }
}

/// Loads a matrix file. With `transpose` set, the file is read as
/// requirements x tests and flipped into the tests x requirements layout.
pub fn load_matrix<P: AsRef<Path>>(path: P, transpose: bool) -> Result<CoverageMatrix> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read matrix file {}: {}", path.display(), e))?;
    let mut matrix = CoverageMatrix::from_text(&text)?;
    if transpose {
        matrix = matrix.transpose();
    }
    tracing::debug!(
        path = %path.display(),
        tests = matrix.num_tests(),
        requirements = matrix.num_requirements(),
        transpose,
        "loaded coverage matrix"
    );
    Ok(matrix)
}

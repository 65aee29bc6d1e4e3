use crate::Experiment;
use anyhow::{anyhow, Result};
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};
use tsm_challenges::tsm::CoverageMatrix;
use tsm_structs::{config::ExperimentConfig, core::ExperimentReport};
use tsm_utils::{compress_obj, jsonify};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub reduced_matrix: PathBuf,
    pub report: PathBuf,
    pub json_report: Option<PathBuf>,
}

/// Output files are named after the matrix file and reduction mode, e.g.
/// `matrix_7_60_1_reduced_C.txt`, and placed in `output_dir` or next to the
/// matrix.
pub fn output_paths(config: &ExperimentConfig) -> Result<OutputPaths> {
    let stem = config
        .matrix_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            anyhow!(
                "Cannot derive output names from {}",
                config.matrix_path.display()
            )
        })?;
    let dir = match config.output_dir() {
        Some(dir) => dir.clone(),
        None => config
            .matrix_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let mode = config.mode;
    let json_report = config.json_report.then(|| {
        let ext = if config.compress { "json.zlib" } else { "json" };
        dir.join(format!("{}_report_{}.{}", stem, mode, ext))
    });
    Ok(OutputPaths {
        reduced_matrix: dir.join(format!("{}_reduced_{}.txt", stem, mode)),
        report: dir.join(format!("{}_report_{}.txt", stem, mode)),
        json_report,
    })
}

fn one_based(indices: impl IntoIterator<Item = usize>) -> Vec<usize> {
    indices.into_iter().map(|i| i + 1).collect()
}

/// Human readable report. Test and requirement numbers are 1-based, as in
/// the matrix file.
pub fn render_report(report: &ExperimentReport, original: &CoverageMatrix) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Matrix: {} (mode {}, alpha {})",
        report.matrix_path.display(),
        report.mode,
        report.alpha
    );
    let _ = writeln!(
        out,
        "Original: {} tests x {} requirements | Reduced: {} tests x {} requirements",
        report.original_tests,
        report.original_requirements,
        report.reduced_tests,
        report.reduced_requirements
    );
    let _ = writeln!(out, "Greedy baseline: {} tests", report.greedy_baseline_size);

    for run in &report.runs {
        let _ = writeln!(
            out,
            "\nSeed {}: S = {:?}",
            run.seed,
            one_based(run.selected.iter().copied())
        );
        for &test in &run.selected {
            let covered = (0..original.num_requirements()).filter(|&r| original.covers(test, r));
            let _ = writeln!(out, "  - Test {} covers: {:?}", test + 1, one_based(covered));
        }
    }

    let s = &report.summary;
    let _ = writeln!(out, "\n--- FINAL STATISTICS ({} seeds) ---", report.runs.len());
    let _ = writeln!(
        out,
        "TSSR    -> Mean: {:.4} | Min: {:.4} | Max: {:.4} | Std: {:.4}",
        s.tssr.mean, s.tssr.min, s.tssr.max, s.tssr.std_dev
    );
    let _ = writeln!(
        out,
        "FDCLOSS -> Mean: {:.4} (target: 0.0000)",
        s.fdcloss.mean
    );
    let _ = writeln!(out, "Size S  -> Mean: {:.1} tests", s.size.mean);
    let _ = writeln!(out, "Time    -> Mean: {:.6}s", s.time_secs.mean);
    out
}

pub fn write_outputs(config: &ExperimentConfig, experiment: &Experiment) -> Result<OutputPaths> {
    let paths = output_paths(config)?;
    if let Some(dir) = paths.report.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    fs::write(&paths.reduced_matrix, experiment.reduced.to_text())?;
    fs::write(
        &paths.report,
        render_report(&experiment.report, &experiment.original),
    )?;
    if let Some(path) = &paths.json_report {
        if config.compress {
            fs::write(path, compress_obj(&experiment.report)?)?;
        } else {
            fs::write(path, jsonify(&experiment.report)?)?;
        }
    }
    tracing::info!(
        reduced_matrix = %paths.reduced_matrix.display(),
        report = %paths.report.display(),
        "wrote outputs"
    );
    Ok(paths)
}

use anyhow::{anyhow, Result};
use rayon::prelude::*;
use tsm_algorithms::GraspSolver;
use tsm_challenges::tsm::{
    apply_reductions, calculate_metrics, load_matrix, CoverageMatrix, TranslationTable,
};
use tsm_structs::{
    config::ExperimentConfig,
    core::{ExperimentReport, ExperimentSummary, RunRecord},
};

/// Everything produced by one experiment: the matrices involved and the report.
#[derive(Debug, Clone)]
pub struct Experiment {
    pub original: CoverageMatrix,
    pub reduced: CoverageMatrix,
    pub mapping: TranslationTable,
    pub report: ExperimentReport,
}

/// Solves `reduced` with one seed and scores the result against `original`.
pub fn run_seed(
    original: &CoverageMatrix,
    reduced: &CoverageMatrix,
    mapping: &TranslationTable,
    seed: u64,
    alpha: f64,
) -> Result<RunRecord> {
    let result = GraspSolver::new(reduced, seed).solve(alpha)?;

    let mut selected = mapping.translate(&result.selected)?;
    selected.sort_unstable();
    let metrics = calculate_metrics(original.num_tests(), selected.len(), original, &selected)?;

    tracing::info!(
        seed,
        size = selected.len(),
        constructed_size = result.constructed_size,
        tssr = metrics.tssr,
        fdcloss = metrics.fdcloss,
        "seed finished"
    );
    Ok(RunRecord {
        seed,
        size: selected.len(),
        selected,
        constructed_size: result.constructed_size,
        tssr: metrics.tssr,
        fdcloss: metrics.fdcloss,
        time_secs: result.elapsed_secs(),
    })
}

/// Loads and reduces the matrix, then solves it once per configured seed.
/// Seeds are independent of each other; with `parallel` set they run on the
/// rayon pool, otherwise one after another. Records keep the seed order.
pub fn run_experiment(config: &ExperimentConfig) -> Result<Experiment> {
    config.validate()?;

    let original = load_matrix(&config.matrix_path, config.transpose)?;
    if original.is_empty() {
        return Err(anyhow!(
            "Matrix {} is empty",
            config.matrix_path.display()
        ));
    }
    let (reduced, mapping) = apply_reductions(&original, config.mode);
    tracing::info!(
        path = %config.matrix_path.display(),
        mode = %config.mode,
        alpha = config.alpha,
        tests = original.num_tests(),
        requirements = original.num_requirements(),
        reduced_tests = reduced.num_tests(),
        reduced_requirements = reduced.num_requirements(),
        "starting experiment"
    );

    let runs = if config.parallel {
        config
            .seeds
            .par_iter()
            .map(|&seed| run_seed(&original, &reduced, &mapping, seed, config.alpha))
            .collect::<Result<Vec<_>>>()?
    } else {
        config
            .seeds
            .iter()
            .map(|&seed| run_seed(&original, &reduced, &mapping, seed, config.alpha))
            .collect::<Result<Vec<_>>>()?
    };

    let summary = ExperimentSummary::from_runs(&runs)
        .ok_or_else(|| anyhow!("Experiment produced no runs"))?;
    let greedy_baseline_size = reduced.compute_greedy_baseline().tests.len();

    let report = ExperimentReport {
        matrix_path: config.matrix_path.clone(),
        mode: config.mode,
        alpha: config.alpha,
        original_tests: original.num_tests(),
        original_requirements: original.num_requirements(),
        reduced_tests: reduced.num_tests(),
        reduced_requirements: reduced.num_requirements(),
        greedy_baseline_size,
        runs,
        summary,
    };
    Ok(Experiment {
        original,
        reduced,
        mapping,
        report,
    })
}

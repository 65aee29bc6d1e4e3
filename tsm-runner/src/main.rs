use anyhow::{anyhow, Result};
use clap::{arg, Arg, ArgAction, ArgMatches, Command};
use std::{fs, path::PathBuf};
use tsm_challenges::tsm::{apply_reductions, load_matrix, CoverageMatrix, ReductionMode, Solution, Track};
use tsm_runner::{init_tracing, render_report, run_experiment, write_outputs};
use tsm_structs::config::ExperimentConfig;
use tsm_utils::{jsonify, load_json_arg};

fn cli() -> Command {
    Command::new("tsm-runner")
        .about("Minimises test suites with GRASP")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run_experiment")
                .about("Reduces a coverage matrix and solves it once per seed")
                .arg(
                    arg!([MATRIX] "Path to a 0/1 coverage matrix file (rows = tests)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--config [CONFIG] "Experiment config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--mode [MODE] "Reduction mode: A (tests), B (requirements) or C (both)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--alpha [ALPHA] "Candidate list width between 0 (greedy) and 1 (random)")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--seeds [SEEDS] "Comma separated list of seeds")
                        .value_delimiter(',')
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(arg!(--transpose "Read the matrix as requirements x tests").action(ArgAction::SetTrue))
                .arg(arg!(--parallel "Solve the seeds concurrently").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("output_dir")
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directory for the reduced matrix and report files")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--json "Also write the report as json").action(ArgAction::SetTrue))
                .arg(
                    arg!(--compress "If the json report is written, compress it as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("reduce_matrix")
                .about("Applies a reduction mode and prints the reduced matrix")
                .arg(
                    arg!(<MATRIX> "Path to a 0/1 coverage matrix file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--mode [MODE] "Reduction mode: A, B or C")
                        .default_value("C")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(--transpose "Read the matrix as requirements x tests").action(ArgAction::SetTrue))
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the reduced matrix is written to this file")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies that a selection of tests covers every coverable requirement")
                .arg(
                    arg!(<MATRIX> "Path to a 0/1 coverage matrix file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(--transpose "Read the matrix as requirements x tests").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("generate_matrix")
                .about("Generates a random coverage matrix")
                .arg(arg!(<NUM_TESTS> "Number of tests").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(<NUM_REQUIREMENTS> "Number of requirements")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--density [DENSITY] "Percentage of covered cells")
                        .default_value("20")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for the generator")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the matrix is written to this file")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    init_tracing();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("run_experiment", sub_m)) => experiment_cmd(sub_m),
        Some(("reduce_matrix", sub_m)) => reduce_matrix(
            sub_m.get_one::<PathBuf>("MATRIX").cloned(),
            sub_m.get_one::<String>("mode").cloned(),
            sub_m.get_flag("transpose"),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<PathBuf>("MATRIX").cloned(),
            sub_m.get_one::<String>("SOLUTION").cloned(),
            sub_m.get_flag("transpose"),
        ),
        Some(("generate_matrix", sub_m)) => generate_matrix(
            sub_m.get_one::<usize>("NUM_TESTS").copied(),
            sub_m.get_one::<usize>("NUM_REQUIREMENTS").copied(),
            sub_m.get_one::<u32>("density").copied(),
            sub_m.get_one::<u64>("seed").copied(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("Missing argument {}", name))
}

fn parse_mode(mode: Option<String>) -> Result<ReductionMode> {
    mode.as_deref().unwrap_or("C").parse()
}

fn experiment_config(sub_m: &ArgMatches) -> Result<ExperimentConfig> {
    let matrix = sub_m.get_one::<PathBuf>("MATRIX").cloned();
    let mut config = match (sub_m.get_one::<String>("config"), matrix.clone()) {
        (Some(config), _) => load_json_arg::<ExperimentConfig>(config)?,
        (None, Some(matrix)) => ExperimentConfig::new(matrix),
        (None, None) => return Err(anyhow!("Either MATRIX or --config is required")),
    };

    if let Some(matrix) = matrix {
        config.matrix_path = matrix;
    }
    if let Some(mode) = sub_m.get_one::<String>("mode") {
        config.mode = mode.parse()?;
    }
    if let Some(alpha) = sub_m.get_one::<f64>("alpha") {
        config.alpha = *alpha;
    }
    if let Some(seeds) = sub_m.get_many::<u64>("seeds") {
        config.seeds = seeds.copied().collect();
    }
    if let Some(dir) = sub_m.get_one::<PathBuf>("output_dir") {
        config.output_dir = Some(dir.clone());
    }
    config.transpose |= sub_m.get_flag("transpose");
    config.parallel |= sub_m.get_flag("parallel");
    config.json_report |= sub_m.get_flag("json");
    config.compress |= sub_m.get_flag("compress");
    config.validate()?;
    Ok(config)
}

fn experiment_cmd(sub_m: &ArgMatches) -> Result<()> {
    let config = experiment_config(sub_m)?;
    let experiment = run_experiment(&config)?;
    let paths = write_outputs(&config, &experiment)?;
    print!("{}", render_report(&experiment.report, &experiment.original));
    println!("\nReduced matrix written to {}", paths.reduced_matrix.display());
    println!("Report written to {}", paths.report.display());
    if let Some(json) = paths.json_report {
        println!("Json report written to {}", json.display());
    }
    Ok(())
}

fn reduce_matrix(
    matrix_path: Option<PathBuf>,
    mode: Option<String>,
    transpose: bool,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let matrix = load_matrix(required(matrix_path, "MATRIX")?, transpose)?;
    let mode = parse_mode(mode)?;
    let (reduced, mapping) = apply_reductions(&matrix, mode);
    let original_tests: Vec<usize> = mapping
        .translate(&(0..mapping.len()).collect::<Vec<_>>())?
        .into_iter()
        .map(|i| i + 1)
        .collect();

    match output_file {
        Some(path) => {
            fs::write(&path, reduced.to_text())?;
            println!("Reduced matrix written to {}", path.display());
        }
        None => print!("{}", reduced.to_text()),
    }
    println!(
        "Kept {} of {} tests and {} of {} requirements",
        reduced.num_tests(),
        matrix.num_tests(),
        reduced.num_requirements(),
        matrix.num_requirements()
    );
    println!("Original tests: {:?}", original_tests);
    Ok(())
}

fn verify_solution(
    matrix_path: Option<PathBuf>,
    solution: Option<String>,
    transpose: bool,
) -> Result<()> {
    let matrix = load_matrix(required(matrix_path, "MATRIX")?, transpose)?;
    let solution = load_json_arg::<Solution>(&required(solution, "SOLUTION")?)?;
    matrix
        .verify_solution(&solution)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    println!("Solution is valid");
    Ok(())
}

fn generate_matrix(
    num_tests: Option<usize>,
    num_requirements: Option<usize>,
    density_percent: Option<u32>,
    seed: Option<u64>,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let track = Track {
        num_tests: required(num_tests, "NUM_TESTS")?,
        num_requirements: required(num_requirements, "NUM_REQUIREMENTS")?,
        density_percent: density_percent.unwrap_or(20),
    };
    let mut seed_bytes = [0u8; 32];
    seed_bytes[..8].copy_from_slice(&seed.unwrap_or(0).to_le_bytes());
    let matrix = CoverageMatrix::generate_instance(&seed_bytes, &track)?;

    match output_file {
        Some(path) => {
            fs::write(&path, matrix.to_text())?;
            println!("Matrix written to {}", path.display());
            println!("{}", jsonify(&track)?);
        }
        None => print!("{}", matrix.to_text()),
    }
    Ok(())
}

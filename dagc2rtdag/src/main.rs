use clap::Parser;
use lib::dag_model::load_dag_set_model;
use lib::error::{ConvertError, Result};
use lib::output_log::dump_rtdag_set_to_yaml;
use lib::rtdag::{generate_rtdag_set, RunLength};
use lib::solution::load_solution;
use lib::tables::Tables;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[clap(
    name = "dagc2rtdag",
    version = "1.0",
    about = "About:
    Converts the DAG model and the placement solution of the power optimization tools
    into rt-dag configuration files, one per DAG, since rt-dag launches a single DAG."
)]
struct ArgParser {
    ///Input YAML file with the DAG model.
    in_yaml: PathBuf,
    ///Output YAML file of the optimizer with the task placement.
    sol_yaml: PathBuf,
    ///Directory where to place the output files (one per dag).
    outdir: PathBuf,
    ///The number of times the DAG is executed.
    #[clap(short = 'n', long = "num-iters", default_value = "10")]
    num_iters: u64,
    ///The minimum time in seconds a DAG gets executed; overrides --num-iters when that is not enough.
    #[clap(short = 'S', long = "min-seconds", default_value = "0")]
    min_seconds: u64,
    ///YAML file overriding the task type and FRED id tables.
    #[clap(short = 't', long = "tables")]
    tables: Option<PathBuf>,
}

fn run(arg: &ArgParser) -> Result<usize> {
    let dag_set = load_dag_set_model(&arg.in_yaml)?;
    let solution = load_solution(&arg.sol_yaml)?;
    let tables = match &arg.tables {
        Some(file_path) => Tables::from_yaml(file_path)?,
        None => Tables::default(),
    };

    let run_length = RunLength::new(&dag_set, arg.num_iters, arg.min_seconds)?;
    let rtdag_set = generate_rtdag_set(&dag_set, &solution, &tables, run_length)?;
    let file_paths = dump_rtdag_set_to_yaml(&arg.outdir, &rtdag_set)?;
    Ok(file_paths.len())
}

/// 1 for unreadable input documents, 2 for data the tool refuses to convert.
fn exit_code(err: &ConvertError) -> u8 {
    if err.is_input_document_error() {
        1
    } else {
        2
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let arg: ArgParser = ArgParser::parse();

    match run(&arg) {
        Ok(n_dags) => {
            info!("Generated {} rt-dag files in {}", n_dags, arg.outdir.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use curvescore::runner::{
    RunConfig, RunEvent, Runner, DEFAULT_REFERENCE_COLUMN, DEFAULT_SAMPLE_COUNT,
};

const USAGE: &str = "usage: curvescore <charts.{json,csv}> <kinetic.csv> <steady.csv> \
[-n COUNT] [--column NAME] [--out DIR]";

fn main() -> ExitCode {
    env_logger::init();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let runner = Runner::new();
    let handle = match runner.submit(config) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Drain worker events until the terminal one arrives.
    let mut outcome = ExitCode::FAILURE;
    for event in handle.events.iter() {
        match event {
            RunEvent::Info(message) => println!("{message}"),
            RunEvent::Completed(summary) => {
                println!(
                    "done: {} chart series, {} rows; wrote {:?}",
                    summary.charts, summary.rows, summary.outputs
                );
                outcome = ExitCode::SUCCESS;
            }
            RunEvent::Failed(message) => {
                eprintln!("error: {message}");
            }
        }
    }
    handle.join();
    outcome
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<RunConfig> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut sample_count = DEFAULT_SAMPLE_COUNT;
    let mut reference_column = DEFAULT_REFERENCE_COLUMN.to_string();
    let mut out_dir = PathBuf::from(".");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" | "--samples" => {
                let value = args.next().context("-n requires a value")?;
                sample_count = value
                    .parse::<usize>()
                    .with_context(|| format!("invalid sample count '{value}'"))?;
                if sample_count == 0 {
                    bail!("sample count must be positive");
                }
            }
            "--column" => {
                reference_column = args.next().context("--column requires a value")?;
            }
            "--out" => {
                out_dir = PathBuf::from(args.next().context("--out requires a value")?);
            }
            other if other.starts_with('-') => bail!("unknown option '{other}'"),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let [charts_path, kinetic, steady]: [PathBuf; 3] = positional
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected exactly three input files"))?;

    Ok(RunConfig {
        charts_path,
        reference_paths: [kinetic, steady],
        sample_count,
        reference_column,
        out_dir,
    })
}

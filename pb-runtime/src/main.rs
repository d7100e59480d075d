mod records;
mod termination;

use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use log::{debug, error, info, warn, LevelFilter};
use pb_algorithms::Algorithm;
use pb_knapsack::{total_weight, verify_selection, Item};
use pb_structs::{
    config::{BenchmarkSettings, SolveSettings},
    core::PbInstance,
    reduction::reduce,
};
use pb_utils::{
    compress_obj, dejsonify, jsonify, reader,
    sink::{ConsoleSink, CsvSink, DataSink},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use records::{BenchmarkRecord, SolveRecord};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    io::Write,
    path::PathBuf,
    time::{Duration, Instant},
};
use termination::OsSignal;

fn cli() -> Command {
    Command::new("pb-runtime")
        .about("Selects participatory budgeting projects with exact knapsack solvers")
        .arg_required_else_help(true)
        .arg(arg!(-v --verbose "Log solver progress and search statistics").action(ArgAction::SetTrue))
        .subcommand(
            Command::new("solve")
                .about("Solves a PABULIB file or every file of a directory")
                .arg(
                    arg!(<PATH> "Path to a PABULIB file or a directory of them")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--algorithm [ALGORITHM] "Algorithm to use (default primal_dual)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"profit-rule" [RULE] "approvals or cost_weighted (default approvals)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--settings [SETTINGS] "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--timeout [SECS] "Cancels a solve after this many seconds")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--csv [CSV_FILE] "If set, records are written to this csv file instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Compares algorithms on generated items")
                .arg(
                    arg!(<SETTINGS> "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--csv [CSV_FILE] "If set, records are written to this csv file instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, all records are also saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress "If output file is set, the records will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("algorithms").about("Lists the available algorithms"))
}

fn main() {
    let matches = cli().get_matches();
    configure_logging(matches.get_flag("verbose"));

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<PathBuf>("PATH").unwrap().clone(),
            sub_m.get_one::<String>("settings").cloned(),
            sub_m.get_one::<String>("algorithm").cloned(),
            sub_m.get_one::<String>("profit-rule").cloned(),
            sub_m.get_one::<u64>("timeout").copied(),
            sub_m.get_one::<PathBuf>("csv").cloned(),
        ),
        Some(("benchmark", sub_m)) => benchmark(
            sub_m.get_one::<String>("SETTINGS").unwrap().clone(),
            sub_m.get_one::<PathBuf>("csv").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_flag("compress"),
        ),
        Some(("algorithms", _)) => list_algorithms(),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries records. `RUST_LOG` overrides the
/// default `info` level; `--verbose` forces `debug`.
fn configure_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info).parse_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .target(env_logger::Target::Stderr)
        .init();
}

pub fn solve(
    path: PathBuf,
    settings: Option<String>,
    algorithm: Option<String>,
    profit_rule: Option<String>,
    timeout: Option<u64>,
    csv_file: Option<PathBuf>,
) -> Result<()> {
    let mut settings = match settings {
        Some(settings) => load_settings::<SolveSettings>(&settings)?,
        None => SolveSettings::default(),
    };
    if let Some(algorithm) = algorithm {
        settings.algorithm = algorithm.parse()?;
    }
    if let Some(profit_rule) = profit_rule {
        settings.profit_rule = profit_rule.parse()?;
    }
    if timeout.is_some() {
        settings.timeout_secs = timeout;
    }

    let instances = if path.is_dir() {
        let scan = reader::read_dir(&path)?;
        if !scan.failures.is_empty() {
            warn!(
                "Skipped {} of {} files in {}",
                scan.failures.len(),
                scan.failures.len() + scan.instances.len(),
                path.display()
            );
        }
        scan.instances
    } else {
        vec![reader::read_file(&path)?]
    };

    let sink = open_sink::<SolveRecord>(csv_file)?;
    let signal = OsSignal::install(settings.timeout_secs.map(Duration::from_secs))?;
    let mut failed = 0;
    for instance in &instances {
        if signal.received() {
            return Err(anyhow!("Interrupted"));
        }
        match solve_instance(instance, &settings, &signal) {
            Ok(record) => sink.write_record(&record)?,
            Err(e) => {
                error!("{}: {}", instance.meta.file_name, e);
                failed += 1;
            }
        }
    }
    if signal.received() {
        return Err(anyhow!("Interrupted"));
    }
    if failed > 0 {
        return Err(anyhow!(
            "{} of {} instances could not be solved",
            failed,
            instances.len()
        ));
    }
    Ok(())
}

fn solve_instance(
    instance: &PbInstance,
    settings: &SolveSettings,
    signal: &OsSignal,
) -> Result<SolveRecord> {
    let capacity = instance.capacity()?;
    let items = reduce(instance, settings.profit_rule);
    let mut working = items.clone();

    let start = Instant::now();
    let selected = settings
        .algorithm
        .solve(&mut working, capacity, &signal.for_solve())?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let profit = verify_selection(&items, &selected, capacity)?;
    debug!(
        "{}: {} selected {} of {} projects in {:.3}ms",
        instance.meta.file_name,
        settings.algorithm,
        selected.len(),
        items.len(),
        elapsed_ms
    );
    Ok(SolveRecord {
        file: instance.meta.file_name.clone(),
        algorithm: settings.algorithm,
        num_items: items.len(),
        capacity,
        weight: total_weight(&selected),
        profit,
        elapsed_ms,
        selected: selected.iter().map(|item| item.id().to_string()).collect(),
    })
}

pub fn benchmark(
    settings: String,
    csv_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    compress: bool,
) -> Result<()> {
    let settings = load_settings::<BenchmarkSettings>(&settings)?;
    settings.validate()?;

    let sink = open_sink::<BenchmarkRecord>(csv_file)?;
    let signal = OsSignal::install(settings.timeout_secs.map(Duration::from_secs))?;
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut records = Vec::new();

    for run in 0..settings.runs {
        let seed: [u8; 32] = rng.gen();
        let items = settings.generate_items(&seed)?;
        let capacity = total_weight(&items) / 2;

        let mut profits = Vec::new();
        for &algorithm in &settings.algorithms {
            if signal.received() {
                return Err(anyhow!("Interrupted"));
            }
            let record = run_algorithm(run, algorithm, &items, capacity, &signal);
            if let Some(profit) = record.profit {
                profits.push((algorithm, profit));
            }
            sink.write_record(&record)?;
            records.push(record);
        }

        if let Some((&(reference, expected), rest)) = profits.split_first() {
            for &(algorithm, profit) in rest {
                if profit != expected {
                    error!(
                        "Run {}: {} found profit {} but {} found {}",
                        run, algorithm, profit, reference, expected
                    );
                }
            }
        }
    }

    if let Some(path) = output_file {
        if compress {
            fs::write(&path, compress_obj(&records)?)?;
        } else {
            fs::write(&path, jsonify(&records)?)?;
        }
        info!("records written to: {:?}", path);
    }
    Ok(())
}

/// Solves an independent copy of `items`, so reordering solvers cannot affect
/// the next algorithm of the run.
fn run_algorithm(
    run: usize,
    algorithm: Algorithm,
    items: &[Item],
    capacity: u64,
    signal: &OsSignal,
) -> BenchmarkRecord {
    let mut working = items.to_vec();
    let start = Instant::now();
    let outcome = algorithm
        .solve(&mut working, capacity, &signal.for_solve())
        .map_err(anyhow::Error::from)
        .and_then(|selected| -> Result<(u64, u64)> {
            let profit = verify_selection(items, &selected, capacity)?;
            Ok((total_weight(&selected), profit))
        });
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let mut record = BenchmarkRecord {
        run,
        algorithm,
        num_items: items.len(),
        capacity,
        weight: None,
        profit: None,
        elapsed_ms,
        error: None,
    };
    match outcome {
        Ok((weight, profit)) => {
            record.weight = Some(weight);
            record.profit = Some(profit);
        }
        Err(e) => {
            warn!("Run {}: {} failed: {}", run, algorithm, e);
            record.error = Some(e.to_string());
        }
    }
    record
}

fn list_algorithms() -> Result<()> {
    for algorithm in Algorithm::ALL {
        println!("{}", algorithm);
    }
    Ok(())
}

fn open_sink<T: Serialize + 'static>(csv_file: Option<PathBuf>) -> Result<Box<dyn DataSink<T>>> {
    let sink: Box<dyn DataSink<T>> = match csv_file {
        Some(path) => Box::new(CsvSink::create(&path)?),
        None => Box::new(ConsoleSink::new()),
    };
    Ok(sink)
}

fn load_settings<T: DeserializeOwned>(settings: &str) -> Result<T> {
    let settings = if settings.ends_with(".json") {
        fs::read_to_string(settings)
            .map_err(|e| anyhow!("Failed to read settings file {}: {}", settings, e))?
    } else {
        settings.to_string()
    };

    dejsonify::<T>(&settings).map_err(|e| anyhow!("Failed to parse settings: {}", e))
}

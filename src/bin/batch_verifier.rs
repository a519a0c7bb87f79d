use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::bail;
use log::info;
use rayon::prelude::*;
use structopt::StructOpt;
use tww::{
    batch::*,
    graph::NumNodes,
    log::{LogLevel, build_batch_logger, parse_level_name},
    utils::signal_handling,
};

/// Runs a twin-width solver on many instances and verifies each answer
#[derive(Debug, StructOpt)]
struct Opts {
    /// Input files or directories (contributing their *.gr files)
    #[structopt(parse(from_os_str), required = true)]
    paths: Vec<PathBuf>,

    #[structopt(long, parse(from_os_str), default_value = "dist/exact-solver")]
    solver: PathBuf,

    /// Expected twin-width of all instances; guessed from the file names if omitted
    #[structopt(long)]
    tww: Option<NumNodes>,

    /// One of none, success, crit, error, warn, info, debug, trace, all
    #[structopt(long, default_value = "info", parse(try_from_str = parse_level_name))]
    log_level: LogLevel,

    #[structopt(long)]
    no_color: bool,

    /// Number of worker threads; all cores if omitted
    #[structopt(short, long)]
    cores: Option<usize>,

    /// Print one JSON report per instance to stdout
    #[structopt(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_batch_logger(opts.log_level, !opts.no_color);
    signal_handling::initialize();

    info!("Using solver: {}", opts.solver.display());

    let inputs = discover_inputs(&opts.paths)?;
    let total = inputs.len();
    let tasks: Vec<_> = inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| Task {
            index,
            total,
            input,
            solver: opts.solver.clone(),
            expected_tww: opts.tww,
        })
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.cores.unwrap_or(0))
        .build()?;
    let reports: Vec<Report> = pool.install(|| tasks.par_iter().map(verify_instance).collect());

    if opts.json {
        let mut writer = BufWriter::new(std::io::stdout().lock());
        for report in &reports {
            serde_json::to_writer(&mut writer, report)?;
            writeln!(writer)?;
        }
        writer.flush()?;
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    info!("{} of {total} instances OK", total - failed);

    if failed > 0 {
        bail!("{failed} of {total} instances failed or were skipped");
    }

    Ok(())
}

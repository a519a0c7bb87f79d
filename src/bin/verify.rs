use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, bail};
use log::{LevelFilter, info};
use structopt::StructOpt;
use tww::{log::build_pace_logger_for_verbosity, prelude::*};

/// Checks a contraction sequence for a graph and prints its twin-width
#[derive(Debug, StructOpt)]
struct Opts {
    /// Graph in the PACE format; read from stdin if omitted
    #[structopt(short, long, parse(from_os_str))]
    graph: Option<PathBuf>,

    /// Contraction sequence as written by a solver
    #[structopt(short, long, parse(from_os_str))]
    sequence: PathBuf,

    /// Recompute the width from the recursive definition and compare
    #[structopt(long)]
    oracle: bool,

    /// Largest number of nodes the recursive definition is evaluated for
    #[structopt(long, default_value = "64")]
    oracle_limit: NumNodes,

    /// Also report the degeneracy of the graph
    #[structopt(long)]
    degeneracy: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn load_graph(path: &Option<PathBuf>) -> anyhow::Result<AdjArray> {
    if let Some(path) = path {
        AdjArray::try_read_pace_file(path).with_context(|| format!("Cannot load {}", path.display()))
    } else {
        let stdin = std::io::stdin().lock();
        Ok(AdjArray::try_read_pace(stdin)?)
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_pace_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let graph = load_graph(&opts.graph)?;
    info!(
        "Graph has {} nodes and {} edges",
        graph.number_of_nodes(),
        graph.number_of_edges()
    );

    let reader = BufReader::new(
        File::open(&opts.sequence)
            .with_context(|| format!("Cannot open {}", opts.sequence.display()))?,
    );
    let seq = ContractionSequence::pace_reader(reader, graph.number_of_nodes())?;

    let twin_width = seq.verify(&graph)?;
    info!("Sequence with {} merges is valid", seq.len());

    if opts.oracle {
        if graph.number_of_nodes() > opts.oracle_limit {
            bail!(
                "Graph has {} nodes; the recursive definition is limited to {}",
                graph.number_of_nodes(),
                opts.oracle_limit
            );
        }

        let recursive = recursive_twin_width(&graph, seq.merges())?;
        if recursive != twin_width {
            bail!("Recursive definition yields {recursive} but the trigraph {twin_width}");
        }
        info!("Recursive definition agrees");
    }

    if opts.degeneracy {
        println!("c degeneracy {}", graph.degeneracy_ordering().degeneracy);
    }

    println!("{twin_width}");

    Ok(())
}

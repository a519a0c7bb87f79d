//! Building blocks of the batch verifier: find instances, run an external solver on each of
//! them, and check its contraction sequence against the expected twin-width.
//!
//! Every failure of an instance ends up in the [`Report`] of that instance; nothing here
//! aborts the batch.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{Context, anyhow, bail};
use glob::{Pattern, glob};
use log::{error, info, warn};
use serde::Serialize;

use crate::{
    graph::*,
    io::GraphPaceReader,
    log::SUCCESS_TARGET,
    utils::{ContractionSequence, signal_handling},
};

/// Expands directories into their `*.gr` files (sorted by path); other paths are kept
/// as given. Fails if no input remains.
pub fn discover_inputs<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            inputs.push(path.to_path_buf());
            continue;
        }

        let dir = path
            .to_str()
            .ok_or_else(|| anyhow!("Path {} is not valid UTF-8", path.display()))?;
        let pattern = format!("{}/*.gr", Pattern::escape(dir));

        let mut files = glob(&pattern)?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Cannot list {}", path.display()))?;
        files.retain(|f| f.is_file());
        files.sort();
        inputs.extend(files);
    }

    if inputs.is_empty() {
        bail!("No input files found");
    }

    Ok(inputs)
}

/// Extracts the expected twin-width from file names like `instance_tww3.gr`: the stem is
/// split at `_` and the first token starting with `tww` (any case) has to continue with
/// the width.
pub fn guess_expected_tww(path: &Path) -> Option<NumNodes> {
    let stem = path.file_stem()?.to_str()?;
    let token = stem
        .split('_')
        .find(|t| t.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("tww")))?;
    token[3..].parse().ok()
}

/// Runs `solver <input>` and returns everything it wrote to stdout
pub fn run_solver(solver: &Path, input: &Path) -> anyhow::Result<String> {
    let child = Command::new(solver)
        .arg(input)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("Cannot start solver {}", solver.display()))?;

    let output = child.wait_with_output()?;
    if !output.status.success() {
        warn!(
            "Solver {} exited with {} on {}",
            solver.display(),
            output.status,
            input.display()
        );
    }

    Ok(String::from_utf8(output.stdout).context("Solver output is not valid UTF-8")?)
}

/// Parses the solver's output and returns the twin-width of the contained sequence
pub fn check_solution<G: AdjacencyList>(graph: &G, solver_output: &str) -> anyhow::Result<NumNodes> {
    let seq = ContractionSequence::pace_reader(solver_output.as_bytes(), graph.number_of_nodes())
        .context("Cannot parse solver output")?;
    Ok(seq.verify(graph)?)
}

#[derive(Clone, Debug)]
pub struct Task {
    /// 0-based position within the batch
    pub index: usize,
    pub total: usize,
    pub input: PathBuf,
    pub solver: PathBuf,
    /// Overrides the width guessed from the file name
    pub expected_tww: Option<NumNodes>,
}

impl Task {
    fn log_prefix(&self) -> String {
        let name = self
            .input
            .file_stem()
            .map_or_else(|| self.input.display().to_string(), |s| s.to_string_lossy().into_owned());
        format!("({}/{}) {name}: ", self.index + 1, self.total)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Ok { expected: NumNodes, actual: NumNodes },
    Mismatch { expected: NumNodes, actual: NumNodes },
    Error { reason: String },
    /// Not started since Ctrl-C was received before
    Skipped,
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub input: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok { .. })
    }
}

/// Runs the solver on the task's input and checks its answer. Instances that have not
/// started when Ctrl-C arrives are skipped; running ones complete.
pub fn verify_instance(task: &Task) -> Report {
    let prefix = task.log_prefix();

    let outcome = if signal_handling::received_ctrl_c() {
        Outcome::Skipped
    } else {
        check_instance(task, &prefix).unwrap_or_else(|e| Outcome::Error {
            reason: format!("{e:#}"),
        })
    };

    match &outcome {
        Outcome::Ok { expected, actual } => {
            info!(target: SUCCESS_TARGET, "{prefix}OK (expected={expected}, actual={actual})")
        }
        Outcome::Mismatch { expected, actual } => {
            error!("{prefix}FAILED (expected={expected}, actual={actual})")
        }
        Outcome::Error { reason } => error!("{prefix}{reason}"),
        Outcome::Skipped => warn!("{prefix}Skipped"),
    }

    Report {
        input: task.input.clone(),
        outcome,
    }
}

fn check_instance(task: &Task, prefix: &str) -> anyhow::Result<Outcome> {
    let Some(expected) = task
        .expected_tww
        .or_else(|| guess_expected_tww(&task.input))
    else {
        bail!("Failed to guess expected tww from filename");
    };

    info!("{prefix}Computing (expect={expected})");
    let output = run_solver(&task.solver, &task.input)?;

    let graph = AdjArray::try_read_pace_file(&task.input)
        .with_context(|| format!("Cannot load {}", task.input.display()))?;
    let actual = check_solution(&graph, &output)?;

    Ok(if actual == expected {
        Outcome::Ok { expected, actual }
    } else {
        Outcome::Mismatch { expected, actual }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{errors::SequenceError, io::PaceWriter};
    use itertools::Itertools;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn guess_tww() {
        assert_eq!(guess_expected_tww(Path::new("tiny001_tww2.gr")), Some(2));
        assert_eq!(guess_expected_tww(Path::new("dir/foo_TWW10_bar.gr")), Some(10));
        assert_eq!(guess_expected_tww(Path::new("tww0.gr")), Some(0));
        assert_eq!(guess_expected_tww(Path::new("foo.gr")), None);
        assert_eq!(guess_expected_tww(Path::new("foo_twwx.gr")), None);
        assert_eq!(guess_expected_tww(Path::new("tww3_dir/foo.gr")), None);
    }

    #[test]
    fn discover() {
        let dir = tempfile::tempdir().unwrap();
        let b = write_file(dir.path(), "b.gr", "");
        let a = write_file(dir.path(), "a.gr", "");
        write_file(dir.path(), "c.txt", "");
        let other = write_file(dir.path(), "d.graph", "");

        let found = discover_inputs(&[dir.path().to_path_buf(), other.clone()]).unwrap();
        assert_eq!(found, [a, b, other]);

        let empty = tempfile::tempdir().unwrap();
        assert!(discover_inputs(&[empty.path()]).is_err());
        assert!(discover_inputs::<PathBuf>(&[]).is_err());
    }

    #[test]
    fn solution() {
        let graph = AdjArray::test_only_from([(0, 1), (0, 2), (0, 3)]);
        assert_eq!(check_solution(&graph, "2 3\n2 4\n1 2\n").unwrap(), 0);
        assert_eq!(check_solution(&graph, "1 2\n1 3\n1 4\n").unwrap(), 2);
        assert_eq!(check_solution(&graph, "2 1\n2 3\n2 4\n").unwrap(), 2);

        let err = check_solution(&graph, "1 2\n1 2\n1 4\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<SequenceError>(),
            Some(&SequenceError::UnknownVertex { step: 1, node: 1 })
        );

        assert!(check_solution(&graph, "1 2\nfoo\n").is_err());
    }

    #[test]
    fn error_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("star.gr");
        AdjArray::test_only_from([(0, 1), (0, 2), (0, 3)])
            .try_write_pace_file(&input)
            .unwrap();

        let mut task = Task {
            index: 0,
            total: 1,
            input,
            solver: dir.path().join("does-not-exist"),
            expected_tww: None,
        };

        let report = verify_instance(&task);
        assert!(!report.is_ok());
        assert!(
            matches!(&report.outcome, Outcome::Error { reason } if reason.contains("guess")),
            "{report:?}"
        );

        task.expected_tww = Some(0);
        let report = verify_instance(&task);
        assert!(
            matches!(&report.outcome, Outcome::Error { reason } if reason.contains("solver")),
            "{report:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn solver_output_is_captured() {
        let output = run_solver(Path::new("echo"), Path::new("some/graph.gr")).unwrap();
        assert_eq!(output.lines().collect_vec(), ["some/graph.gr"]);
    }

    #[test]
    fn report_json() {
        let report = Report {
            input: PathBuf::from("a_tww1.gr"),
            outcome: Outcome::Mismatch {
                expected: 1,
                actual: 2,
            },
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"input":"a_tww1.gr","status":"mismatch","expected":1,"actual":2}"#
        );

        let report = Report {
            input: PathBuf::from("b.gr"),
            outcome: Outcome::Skipped,
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"input":"b.gr","status":"skipped"}"#
        );
    }
}

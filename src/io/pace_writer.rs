//! Graph output in the PACE format: a `p tww n m` header followed by one 1-indexed line
//! `u v` per edge with `u < v`. Colors are not part of the format and get dropped.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::graph::*;

pub trait PaceWriter {
    fn try_write_pace<W: Write>(&self, writer: W) -> std::io::Result<()>;

    fn try_write_pace_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_pace(&mut writer)?;
        writer.flush()
    }
}

impl<G: AdjacencyList + GraphEdgeOrder> PaceWriter for G {
    fn try_write_pace<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let (n, m) = (self.number_of_nodes(), self.number_of_edges());
        writeln!(writer, "p tww {n} {m}")?;
        self.ordered_edges()
            .try_for_each(|Edge(u, v)| writeln!(writer, "{} {}", u + 1, v + 1))
    }
}

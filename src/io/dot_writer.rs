use std::io::Write;

use super::super::graph::*;

/// produces a minimalistic DOT representation of the graph; red edges are colored
pub trait DotWriter {
    fn try_write_dot<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
}

impl<T> DotWriter for T
where
    T: ColoredAdjacencyList,
{
    fn try_write_dot<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        write!(writer, "graph G {{")?;
        for ColoredEdge(u, v, c) in self.ordered_colored_edges() {
            if c.is_red() {
                write!(writer, "v{u}--v{v}[color=red]; ")?;
            } else {
                write!(writer, "v{u}--v{v}; ")?;
            }
        }
        write!(writer, r"}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn colored_edges() {
        let mut graph = AdjArray::new(3);
        graph.add_edge(0, 1, EdgeColor::Black);
        graph.add_edge(2, 1, EdgeColor::Red);

        assert_eq!(
            format!("{graph:?}"),
            "graph G {v0--v1; v1--v2[color=red]; }"
        );
    }
}

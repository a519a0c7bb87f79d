use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

use crate::{
    errors::FormatError,
    graph::{ColorQuery, Edge, EdgeColor, EdgeOps, GraphEdgeEditing, GraphNew, NumEdges, NumNodes},
};

type Result<T> = std::result::Result<T, FormatError>;

pub trait GraphPaceReader: Sized {
    fn try_read_pace<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_pace_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl<G> GraphPaceReader for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn try_read_pace<R: BufRead>(reader: R) -> Result<Self> {
        let mut pace_reader = PaceReader::try_new(reader)?;
        let mut graph = Self::new(pace_reader.number_of_nodes());

        // duplicates are stored once and hence do not count towards the declared edges
        let mut found: NumEdges = 0;
        for edge in &mut pace_reader {
            let Edge(u, v) = edge?;
            found += graph.try_add_edge(u, v, EdgeColor::Black).is_none() as NumEdges;
        }

        if found != pace_reader.number_of_edges() {
            return Err(FormatError::EdgeCountMismatch {
                declared: pace_reader.number_of_edges(),
                found,
            });
        }

        Ok(graph)
    }

    fn try_read_pace_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_pace(buf_reader)
    }
}

/// Streams the 0-indexed node pairs of a PACE file. For graph files the header
/// `p <tag> n m` is parsed on construction and endpoints are checked against `1..=n`;
/// contraction sequences carry no header and are only checked to be 1-indexed.
pub struct PaceReader<R> {
    lines: Lines<R>,
    line_number: usize,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
    has_header: bool,
}

impl<R: BufRead> PaceReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut pace_reader = Self {
            lines: reader.lines(),
            line_number: 0,
            number_of_nodes: 0,
            number_of_edges: 0,
            has_header: true,
        };

        (pace_reader.number_of_nodes, pace_reader.number_of_edges) = pace_reader.parse_header()?;
        Ok(pace_reader)
    }

    pub fn new_contraction_sequence(reader: R, number_of_nodes: NumNodes) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            number_of_nodes,
            number_of_edges: number_of_nodes.saturating_sub(1) as NumEdges,
            has_header: false,
        }
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }
}

impl<R: BufRead> Iterator for PaceReader<R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_edge_line()
            .transpose()
            .map(|res| res.map(|Edge(u, v)| Edge(u - 1, v - 1)))
    }
}

macro_rules! raise_error_unless {
    ($cond : expr, $line : expr, $info : expr) => {
        if !($cond) {
            return Err(FormatError::InvalidData {
                line: $line,
                reason: $info.into(),
            });
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $line : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            $line,
            format!("Premature end of line when parsing {}.", $name)
        );

        match next.unwrap_or_default().parse() {
            Ok(value) => value,
            Err(_) => {
                return Err(FormatError::InvalidData {
                    line: $line,
                    reason: format!("Invalid value found. Cannot parse {}.", $name),
                })
            }
        }
    }};
}

impl<R: BufRead> PaceReader<R> {
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            self.line_number += 1;
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x.into()),
                Some(Ok(line)) if line.trim().is_empty() => continue,
                Some(Ok(line)) if line.trim_start().starts_with('c') => continue,
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn parse_header(&mut self) -> Result<(NumNodes, NumEdges)> {
        let Some(line) = self.next_non_comment_line()? else {
            return Err(FormatError::MissingHeader);
        };
        let line_number = self.line_number;

        let mut parts = line.split_whitespace();

        raise_error_unless!(
            parts.next() == Some("p"),
            line_number,
            "Invalid header found; line should start with p"
        );

        raise_error_unless!(
            parts.next().is_some(),
            line_number,
            "Invalid header found; file type is missing"
        );

        let number_of_nodes = parse_next_value!(parts, line_number, "Header>Number of nodes");
        let number_of_edges = parse_next_value!(parts, line_number, "Header>Number of edges");

        raise_error_unless!(
            parts.next().is_none(),
            line_number,
            "Invalid header found; expected end of line"
        );

        Ok((number_of_nodes, number_of_edges))
    }

    fn parse_edge_line(&mut self) -> Result<Option<Edge>> {
        let Some(line) = self.next_non_comment_line()? else {
            return Ok(None);
        };
        let line_number = self.line_number;

        let mut parts = line.split_whitespace();

        let from: NumNodes = parse_next_value!(parts, line_number, "Source node");
        let dest: NumNodes = parse_next_value!(parts, line_number, "Target node");

        raise_error_unless!(
            parts.next().is_none(),
            line_number,
            "Expected exactly two nodes per line"
        );

        raise_error_unless!(
            from > 0 && dest > 0,
            line_number,
            "Nodes are 1-indexed; found 0"
        );

        if self.has_header {
            raise_error_unless!(
                from <= self.number_of_nodes && dest <= self.number_of_nodes,
                line_number,
                format!("Node out of range 1..={}", self.number_of_nodes)
            );

            raise_error_unless!(
                !Edge(from, dest).is_loop(),
                line_number,
                "Self-loops are not supported"
            );
        }

        Ok(Some(Edge(from, dest)))
    }
}

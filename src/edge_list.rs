//! Reader for the plain-text road list.
//!
//! ```text
//! 4
//! A B 1
//! B C 2.5
//! ```
//!
//! The first non-blank line is the number of vertices. It sizes the graph
//! but is otherwise advisory. Every other non-blank line names two vertices
//! and the non-negative length of the road between them.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::error::ParseError;

/// One road from the input.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    /// Name of the first endpoint.
    pub from: String,
    /// Name of the second endpoint.
    pub to: String,
    /// Length of the road.
    pub weight: f64,
    /// 1-based line the record came from.
    pub line: usize,
}

/// A parsed edge list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeList {
    /// The vertex count from the header line.
    pub declared_vertices: usize,
    /// Roads in input order.
    pub edges: Vec<EdgeRecord>,
}

impl EdgeList {
    /// Parses an edge list held in memory.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::from_reader(text.as_bytes())
    }

    /// Parses an edge list from any buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ParseError> {
        let mut declared = None;
        let mut edges = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if declared.is_none() {
                let count = trimmed
                    .parse::<usize>()
                    .map_err(|_| ParseError::InvalidVertexCount {
                        line: line_no,
                        token: trimmed.to_string(),
                    })?;
                declared = Some(count);
                continue;
            }

            edges.push(parse_record(trimmed, line_no)?);
        }

        let declared_vertices = declared.ok_or(ParseError::MissingVertexCount)?;
        tracing::debug!(declared_vertices, edges = edges.len(), "parsed edge list");

        Ok(Self {
            declared_vertices,
            edges,
        })
    }

    /// Reads and parses the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "loading edge list");
        Self::from_reader(BufReader::new(file))
    }

    /// Number of roads.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the list holds no roads.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromStr for EdgeList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_record(line: &str, line_no: usize) -> Result<EdgeRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [from, to, weight] = fields[..] else {
        return Err(ParseError::WrongFieldCount {
            line: line_no,
            found: fields.len(),
        });
    };

    let invalid_weight = || ParseError::InvalidWeight {
        line: line_no,
        token: weight.to_string(),
    };
    let weight = weight.parse::<f64>().map_err(|_| invalid_weight())?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(invalid_weight());
    }

    Ok(EdgeRecord {
        from: from.to_string(),
        to: to.to_string(),
        weight,
        line: line_no,
    })
}

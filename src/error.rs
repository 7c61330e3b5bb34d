//! Error types for every structure in the crate.
//!
//! Each component reports its own failures through a small enum so callers
//! can match on exactly what went wrong. [`Error`] collects them for the
//! layers that compose several components ([`RoadMap`], [`TravelSession`]).
//!
//! Absence is not an error: lookups such as [`HashMap::get`] or
//! [`IndexedPriorityQueue::get_priority`] return `Option`.
//!
//! [`RoadMap`]: crate::road_map::RoadMap
//! [`TravelSession`]: crate::travel::TravelSession
//! [`HashMap::get`]: crate::hash_map::HashMap::get
//! [`IndexedPriorityQueue::get_priority`]: crate::priority_queue::IndexedPriorityQueue::get_priority

use std::io;

use thiserror::Error;

/// Failures reported by [`HashMap`](crate::hash_map::HashMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The hash function can only be replaced while the map is empty.
    #[error("cannot change the hash function of a non-empty map ({len} entries)")]
    NotEmpty {
        /// Number of entries present when the change was attempted.
        len: usize,
    },

    /// No built-in hash function has this identifier.
    #[error("invalid hash function id {0}")]
    UnknownHashFunction(i32),
}

/// Failures reported by
/// [`IndexedPriorityQueue`](crate::priority_queue::IndexedPriorityQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Ids must lie in `0..capacity`.
    #[error("id {id} out of range for capacity {capacity}")]
    IdOutOfRange {
        /// The rejected id.
        id: usize,
        /// Capacity of the queue.
        capacity: usize,
    },

    /// Each id may be queued at most once.
    #[error("id {0} is already in the queue")]
    DuplicateId(usize),

    /// Every slot is occupied.
    #[error("priority queue is full (capacity {capacity})")]
    Full {
        /// Capacity of the queue.
        capacity: usize,
    },

    /// The id is in range but not currently queued.
    #[error("id {0} is not in the queue")]
    Absent(usize),

    /// Nothing to remove.
    #[error("priority queue is empty")]
    Empty,
}

/// Failures reported by [`Graph`](crate::graph::Graph) and the shortest
/// path search.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GraphError {
    /// Every vertex slot is taken. The graph was sized too small for its
    /// input.
    #[error("graph capacity of {capacity} vertices exceeded")]
    CapacityExceeded {
        /// Capacity the graph was created with.
        capacity: usize,
    },

    /// No vertex has this id.
    #[error("vertex id {0} does not exist")]
    UnknownVertex(usize),

    /// Edge weights must be non-negative numbers.
    #[error("invalid edge weight {0}")]
    InvalidWeight(f64),
}

/// Failures reported while reading an edge list.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the input failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input has no non-blank line.
    #[error("edge list is empty; expected a vertex count on the first line")]
    MissingVertexCount,

    /// The first non-blank line is not a non-negative integer.
    #[error("line {line}: invalid vertex count {token:?}")]
    InvalidVertexCount {
        /// Line of the offending token.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// An edge line does not have exactly three fields.
    #[error("line {line}: expected `<from> <to> <weight>`, found {found} fields")]
    WrongFieldCount {
        /// Line of the malformed edge.
        line: usize,
        /// Number of whitespace separated fields found.
        found: usize,
    },

    /// The weight is not a finite, non-negative number.
    #[error("line {line}: invalid weight {token:?}")]
    InvalidWeight {
        /// Line of the malformed edge.
        line: usize,
        /// The offending token.
        token: String,
    },
}

/// Errors from the composed layers of the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// See [`MapError`].
    #[error(transparent)]
    Map(#[from] MapError),

    /// See [`GraphError`].
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No vertex has this name.
    #[error("vertex {0:?} does not exist")]
    UnknownLocation(String),

    /// No path connects the two vertices.
    #[error("cannot go from {from} to {to}")]
    Unreachable {
        /// Name of the start vertex.
        from: String,
        /// Name of the destination vertex.
        to: String,
    },

    /// A travel choice outside `0..=available`.
    #[error("invalid move {choice}; choose 0 to {available}")]
    InvalidMove {
        /// The rejected choice.
        choice: usize,
        /// Number of moves on offer.
        available: usize,
    },
}

/// Result alias used by the composed layers.
pub type Result<T, E = Error> = std::result::Result<T, E>;

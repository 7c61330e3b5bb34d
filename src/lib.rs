#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod error;

/// String hash functions for [`HashMap`].
///
/// Three built-ins are addressable by id through [`hash_fn::BuiltinHash`];
/// any `fn(&str) -> u32` can be wrapped with
/// [`hash_fn::HashFunction::custom`].
pub mod hash_fn;

/// A string-keyed HashMap using separate chaining.
///
/// This module provides a `HashMap` whose buckets are chains of entries that
/// cache their hash, so growth never rehashes a key.
pub mod hash_map;

/// A binary heap whose elements are addressed by integer id.
pub mod priority_queue;

/// Weighted graphs over named vertices.
pub mod graph;

pub mod shortest_path;

pub mod edge_list;

/// Road networks: a graph plus a name index.
pub mod road_map;

pub mod travel;

pub mod logging;

pub use edge_list::EdgeList;
pub use error::Error;
pub use error::Result;
pub use graph::Graph;
pub use graph::VertexId;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use priority_queue::HeapOrder;
pub use priority_queue::IndexedPriorityQueue;
pub use road_map::MapConfig;
pub use road_map::RoadMap;
pub use shortest_path::Route;
pub use shortest_path::ShortestPaths;
pub use shortest_path::shortest_paths;
pub use travel::TravelSession;

//! Single-source shortest paths over a [`Graph`].

use crate::error::GraphError;
use crate::graph::Graph;
use crate::graph::VertexId;
use crate::priority_queue::HeapOrder;
use crate::priority_queue::IndexedPriorityQueue;

/// Distance reported for vertices the source cannot reach.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// A path through the graph and its total length.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Vertices from the start to the destination, both included.
    pub vertices: Vec<VertexId>,
    /// Sum of the edge weights along the path.
    pub distance: f64,
}

impl Route {
    /// The names of the vertices along the route.
    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.vertices
            .iter()
            .filter_map(|&id| graph.name(id))
            .collect()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// The result of [`shortest_paths`]: a distance table and a predecessor
/// tree rooted at the source.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: VertexId,
    distances: Vec<f64>,
    predecessors: Vec<Option<VertexId>>,
}

/// Runs Dijkstra's algorithm from `source`.
///
/// Every vertex starts in a min-ordered [`IndexedPriorityQueue`] at
/// [`UNREACHABLE`], except the source at zero. Popping a vertex finalizes
/// it, and each edge to a still-queued vertex is relaxed on strict
/// improvement. Edge weights are assumed non-negative, which [`Graph`]
/// enforces on insertion.
///
/// # Examples
///
/// ```rust
/// # use travel_planner::Graph;
/// # use travel_planner::shortest_path::shortest_paths;
/// #
/// let mut g = Graph::with_capacity(3);
/// for name in ["A", "B", "C"] {
///     g.insert_vertex(name).unwrap();
/// }
/// g.connect(0, 1, 1.0).unwrap();
/// g.connect(1, 2, 2.0).unwrap();
/// g.connect(0, 2, 5.0).unwrap();
///
/// let paths = shortest_paths(&g, 0).unwrap();
/// assert_eq!(paths.distance(2), Some(3.0));
/// assert_eq!(paths.path_to(2), Some(vec![0, 1, 2]));
/// ```
pub fn shortest_paths(graph: &Graph, source: VertexId) -> Result<ShortestPaths, GraphError> {
    let n = graph.len();
    if source >= n {
        return Err(GraphError::UnknownVertex(source));
    }

    let mut distances = vec![UNREACHABLE; n];
    let mut predecessors = vec![None; n];
    distances[source] = 0.0;

    let mut queue = IndexedPriorityQueue::from_priorities(HeapOrder::Min, distances.iter().copied());
    let mut finalized = 0usize;

    while let Ok((u, du)) = queue.delete_top() {
        if du == UNREACHABLE {
            // Everything still queued is cut off from the source.
            break;
        }
        finalized += 1;

        for edge in graph.neighbors(u) {
            let v = edge.target;
            if !queue.contains(v) {
                continue;
            }
            let candidate = du + edge.weight;
            if candidate < distances[v] {
                distances[v] = candidate;
                predecessors[v] = Some(u);
                // `v` is in range and still queued, so the update is accepted.
                queue.change_priority(v, candidate).ok();
            }
        }
    }

    tracing::debug!(source, vertices = n, reachable = finalized, "shortest path search finished");

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}

impl ShortestPaths {
    /// The vertex the search started from.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Distance to every vertex, [`UNREACHABLE`] where there is no path.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Distance to `v`, or `None` if `v` is unreachable or unknown.
    pub fn distance(&self, v: VertexId) -> Option<f64> {
        self.distances.get(v).copied().filter(|d| d.is_finite())
    }

    /// Returns `true` if a path from the source to `v` exists.
    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.distance(v).is_some()
    }

    /// The vertex before `v` on a shortest path. `None` for the source and
    /// for unreachable vertices.
    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.predecessors.get(v).copied().flatten()
    }

    /// The vertices of a shortest path from the source to `dest`, in travel
    /// order.
    pub fn path_to(&self, dest: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(dest) {
            return None;
        }

        let mut path = vec![dest];
        let mut current = dest;
        while let Some(prev) = self.predecessor(current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Like [`path_to`](Self::path_to), bundled with the distance.
    pub fn route_to(&self, dest: VertexId) -> Option<Route> {
        let distance = self.distance(dest)?;
        let vertices = self.path_to(dest)?;
        Some(Route { vertices, distance })
    }

    /// The first vertex after the source on a shortest path to `dest`.
    ///
    /// `None` if `dest` is the source itself or unreachable.
    pub fn next_hop(&self, dest: VertexId) -> Option<VertexId> {
        self.path_to(dest)?.get(1).copied()
    }
}

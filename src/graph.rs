use core::fmt;

use crate::error::GraphError;

/// Dense vertex identifier, assigned in first-seen order.
pub type VertexId = usize;

/// One directed adjacency entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Vertex the edge leads to.
    pub target: VertexId,
    /// Non-negative length of the edge.
    pub weight: f64,
    /// Display name of the target, copied when the edge was added.
    pub name: String,
}

/// A named vertex and its outgoing edges.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    name: String,
    edges: Vec<Edge>,
}

impl Vertex {
    /// The dense id of this vertex.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// The name this vertex was inserted with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of outgoing adjacency entries.
    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing edges, most recently added first.
    pub fn neighbors(&self) -> impl DoubleEndedIterator<Item = &Edge> + ExactSizeIterator {
        self.edges.iter().rev()
    }
}

/// A weighted graph over named vertices with a fixed vertex capacity.
///
/// Vertices are created on first mention by [`insert_vertex`] and receive
/// dense ids `0..len`. Edges are directed adjacency entries; an undirected
/// road is two of them (see [`connect`]). Parallel edges and self-loops are
/// accepted.
///
/// [`insert_vertex`]: Graph::insert_vertex
/// [`connect`]: Graph::connect
///
/// # Examples
///
/// ```rust
/// # use travel_planner::Graph;
/// #
/// let mut g = Graph::with_capacity(2);
/// let a = g.insert_vertex("A").unwrap();
/// let b = g.insert_vertex("B").unwrap();
/// g.connect(a, b, 1.5).unwrap();
///
/// assert_eq!(g.insert_vertex("A"), Ok(a));
/// assert_eq!(g.neighbors(b).next().map(|e| e.target), Some(a));
/// assert!(g.insert_vertex("C").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    capacity: usize,
}

impl Graph {
    /// Creates an empty graph that can hold up to `capacity` vertices.
    ///
    /// `capacity` is a limit, not a reservation; vertex storage grows as
    /// vertices are inserted.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::new(),
            capacity,
        }
    }

    /// Maximum number of vertices.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of vertices inserted so far.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if no vertex has been inserted.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Total number of directed adjacency entries.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(Vertex::out_degree).sum()
    }

    /// Returns the id of the vertex called `name`, inserting it if needed.
    ///
    /// An existing name returns its id without mutating the graph.
    pub fn insert_vertex(&mut self, name: &str) -> Result<VertexId, GraphError> {
        if let Some(id) = self.vertex_id(name) {
            return Ok(id);
        }
        if self.vertices.len() >= self.capacity {
            tracing::debug!(name, capacity = self.capacity, "graph is full");
            return Err(GraphError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let id = self.vertices.len();
        self.vertices.push(Vertex {
            id,
            name: name.to_string(),
            edges: Vec::new(),
        });
        Ok(id)
    }

    /// Adds the directed entry `u -> v`.
    ///
    /// `display_name` is what menus show for the edge; callers normally pass
    /// the name of `v`.
    pub fn add_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        weight: f64,
        display_name: &str,
    ) -> Result<(), GraphError> {
        if v >= self.vertices.len() {
            return Err(GraphError::UnknownVertex(v));
        }
        if weight.is_nan() || weight < 0.0 {
            return Err(GraphError::InvalidWeight(weight));
        }
        let from = self
            .vertices
            .get_mut(u)
            .ok_or(GraphError::UnknownVertex(u))?;

        from.edges.push(Edge {
            target: v,
            weight,
            name: display_name.to_string(),
        });
        Ok(())
    }

    /// Adds `u -> v` and `v -> u`, each named after its target.
    pub fn connect(&mut self, u: VertexId, v: VertexId, weight: f64) -> Result<(), GraphError> {
        let u_name = self.vertex(u).ok_or(GraphError::UnknownVertex(u))?.name.clone();
        let v_name = self.vertex(v).ok_or(GraphError::UnknownVertex(v))?.name.clone();

        self.add_edge(u, v, weight, &v_name)?;
        self.add_edge(v, u, weight, &u_name)
    }

    /// Outgoing edges of `u`, most recently added first. Empty for unknown
    /// ids.
    pub fn neighbors(&self, u: VertexId) -> impl DoubleEndedIterator<Item = &Edge> + ExactSizeIterator {
        self.vertices
            .get(u)
            .map_or(&[][..], |vertex| vertex.edges.as_slice())
            .iter()
            .rev()
    }

    /// Finds a vertex by exact name. Linear in the number of vertices.
    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.vertices.iter().position(|v| v.name == name)
    }

    /// The name of vertex `id`.
    pub fn name(&self, id: VertexId) -> Option<&str> {
        self.vertices.get(id).map(Vertex::name)
    }

    /// The vertex with id `id`.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// All vertices in id order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

/// One line per vertex slot, `[id-name]: (target-name, weight), ...`.
/// Unused slots print as `EMPTY`.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in 0..self.capacity.max(self.vertices.len()) {
            let Some(vertex) = self.vertices.get(slot) else {
                writeln!(f, "[{slot}]: EMPTY")?;
                continue;
            };

            write!(f, "[{}-{}]: ", vertex.id, vertex.name)?;
            if vertex.edges.is_empty() {
                write!(f, "EMPTY")?;
            }
            for edge in vertex.neighbors() {
                write!(f, "({}-{}, {:.2}), ", edge.target, edge.name, edge.weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut g = Graph::with_capacity(3);
        let a = g.insert_vertex("A").unwrap();
        let b = g.insert_vertex("B").unwrap();
        let c = g.insert_vertex("C").unwrap();
        g.connect(a, b, 1.0).unwrap();
        g.connect(b, c, 2.0).unwrap();
        g.connect(a, c, 4.0).unwrap();
        g
    }

    #[test]
    fn vertex_ids_are_dense_and_stable() {
        let mut g = Graph::with_capacity(4);
        assert_eq!(g.insert_vertex("Denver"), Ok(0));
        assert_eq!(g.insert_vertex("Boulder"), Ok(1));
        assert_eq!(g.insert_vertex("Denver"), Ok(0));
        assert_eq!(g.len(), 2);
        assert_eq!(g.name(1), Some("Boulder"));
        assert_eq!(g.vertex_id("Boulder"), Some(1));
        assert_eq!(g.vertex_id("Golden"), None);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut g = Graph::with_capacity(1);
        g.insert_vertex("A").unwrap();
        assert_eq!(
            g.insert_vertex("B"),
            Err(GraphError::CapacityExceeded { capacity: 1 })
        );
        assert_eq!(g.len(), 1);

        let mut empty = Graph::with_capacity(0);
        assert!(empty.insert_vertex("A").is_err());
    }

    #[test]
    fn large_capacity_reserves_nothing() {
        let mut g = Graph::with_capacity(usize::MAX);
        assert_eq!(g.capacity(), usize::MAX);
        assert_eq!(g.insert_vertex("A"), Ok(0));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn neighbors_are_most_recent_first() {
        let g = triangle();
        let targets: Vec<_> = g.neighbors(0).map(|e| e.target).collect();
        assert_eq!(targets, vec![2, 1]);

        let names: Vec<_> = g.neighbors(2).map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(g.edge_count(), 6);
    }

    #[test]
    fn add_edge_validates_input() {
        let mut g = triangle();
        assert_eq!(g.add_edge(0, 7, 1.0, "X"), Err(GraphError::UnknownVertex(7)));
        assert_eq!(g.add_edge(7, 0, 1.0, "A"), Err(GraphError::UnknownVertex(7)));
        assert_eq!(
            g.add_edge(0, 1, -1.0, "B"),
            Err(GraphError::InvalidWeight(-1.0))
        );
        assert!(g.add_edge(0, 1, f64::NAN, "B").is_err());
        assert_eq!(g.edge_count(), 6);
    }

    #[test]
    fn parallel_edges_and_self_loops_are_kept() {
        let mut g = triangle();
        g.connect(0, 1, 0.5).unwrap();
        g.add_edge(2, 2, 0.0, "C").unwrap();

        assert_eq!(g.vertex(0).unwrap().out_degree(), 3);
        assert_eq!(g.neighbors(0).next().map(|e| e.weight), Some(0.5));
        assert_eq!(g.neighbors(2).next().map(|e| e.target), Some(2));
    }

    #[test]
    fn unknown_vertex_has_no_neighbors() {
        let g = triangle();
        assert_eq!(g.neighbors(42).count(), 0);
        assert!(g.vertex(42).is_none());
    }

    #[test]
    fn display_lists_adjacency() {
        let mut g = Graph::with_capacity(3);
        let a = g.insert_vertex("A").unwrap();
        let b = g.insert_vertex("B").unwrap();
        g.connect(a, b, 1.0).unwrap();

        assert_eq!(
            g.to_string(),
            "[0-A]: (1-B, 1.00), \n[1-B]: (0-A, 1.00), \n[2]: EMPTY\n"
        );
    }
}

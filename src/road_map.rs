use std::path::Path;

use crate::edge_list::EdgeList;
use crate::error::Error;
use crate::error::Result;
use crate::graph::Graph;
use crate::graph::VertexId;
use crate::hash_fn::BuiltinHash;
use crate::hash_map::DEFAULT_BUCKETS;
use crate::hash_map::DEFAULT_LOAD_FACTOR;
use crate::hash_map::HashMap;
pub use crate::shortest_path::Route;
use crate::shortest_path::ShortestPaths;
use crate::shortest_path::shortest_paths;

/// How the name index of a [`RoadMap`] is set up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Initial bucket count. `0` selects the default.
    pub buckets: usize,
    /// Maximum load factor before growth. Non-positive selects the default.
    pub load_factor: f64,
    /// Hash function for vertex names.
    pub hash: BuiltinHash,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            load_factor: DEFAULT_LOAD_FACTOR,
            hash: BuiltinHash::default(),
        }
    }
}

/// A road network: a [`Graph`] plus a hash index from place names to
/// vertex ids.
///
/// Every road in the input becomes two directed edges of the same length.
///
/// # Examples
///
/// ```rust
/// # use travel_planner::EdgeList;
/// # use travel_planner::RoadMap;
/// #
/// let list = EdgeList::parse("3\nA B 1\nB C 2\nA C 5\n").unwrap();
/// let map = RoadMap::from_edge_list(&list).unwrap();
///
/// let route = map.route("A", "C").unwrap();
/// assert_eq!(route.distance, 3.0);
/// assert_eq!(route.names(map.graph()), vec!["A", "B", "C"]);
/// ```
#[derive(Debug)]
pub struct RoadMap {
    graph: Graph,
    index: HashMap<VertexId>,
}

impl RoadMap {
    /// Builds a road map with the default index configuration.
    pub fn from_edge_list(list: &EdgeList) -> Result<Self> {
        Self::with_map_config(list, MapConfig::default())
    }

    /// Builds a road map whose name index uses `config`.
    ///
    /// The graph is sized to the distinct names in the edges. The header
    /// count is advisory; a mismatch in either direction only warns.
    pub fn with_map_config(list: &EdgeList, config: MapConfig) -> Result<Self> {
        let mut index =
            HashMap::with_hash_function(config.buckets, config.load_factor, config.hash.into());

        for record in &list.edges {
            for name in [&record.from, &record.to] {
                let next = index.len();
                index.entry(name).or_insert(next);
            }
        }

        let distinct = index.len();
        if distinct != list.declared_vertices {
            tracing::warn!(
                declared = list.declared_vertices,
                distinct,
                "vertex count in header does not match the edge list"
            );
        }

        let mut graph = Graph::with_capacity(distinct);
        for record in &list.edges {
            let u = graph.insert_vertex(&record.from)?;
            let v = graph.insert_vertex(&record.to)?;
            debug_assert_eq!(index.get(&record.from), Some(&u));
            debug_assert_eq!(index.get(&record.to), Some(&v));
            graph.connect(u, v, record.weight)?;
        }

        tracing::info!(
            vertices = graph.len(),
            edges = graph.edge_count(),
            hash = index.hash_description(),
            "road map built"
        );

        Ok(Self { graph, index })
    }

    /// Reads an edge list from `path` and builds a road map from it.
    pub fn load(path: impl AsRef<Path>, config: MapConfig) -> Result<Self> {
        let list = EdgeList::load(path)?;
        Self::with_map_config(&list, config)
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The name index.
    pub fn index(&self) -> &HashMap<VertexId> {
        &self.index
    }

    /// The id of the place called `name`.
    pub fn lookup(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup), but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<VertexId> {
        self.lookup(name)
            .ok_or_else(|| Error::UnknownLocation(name.to_string()))
    }

    /// The name of vertex `id`.
    pub fn name(&self, id: VertexId) -> Option<&str> {
        self.graph.name(id)
    }

    /// Shortest distances from the place called `name` to every vertex.
    pub fn shortest_paths_from(&self, name: &str) -> Result<ShortestPaths> {
        let source = self.require(name)?;
        Ok(shortest_paths(&self.graph, source)?)
    }

    /// A shortest route between two named places.
    pub fn route(&self, from: &str, to: &str) -> Result<Route> {
        let dest = self.require(to)?;
        self.shortest_paths_from(from)?
            .route_to(dest)
            .ok_or_else(|| Error::Unreachable {
                from: from.to_string(),
                to: to.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    const FOUR_CYCLE: &str = "4\nA B 1\nB C 2\nC D 1\nD A 4\n";

    fn four_cycle() -> RoadMap {
        RoadMap::from_edge_list(&EdgeList::parse(FOUR_CYCLE).unwrap()).unwrap()
    }

    #[test]
    fn ids_follow_first_mention() {
        let map = four_cycle();
        for (id, name) in ["A", "B", "C", "D"].into_iter().enumerate() {
            assert_eq!(map.lookup(name), Some(id));
            assert_eq!(map.name(id), Some(name));
        }
        assert_eq!(map.index().len(), 4);
        assert_eq!(map.graph().edge_count(), 8);
    }

    #[test]
    fn route_through_the_cycle() {
        let map = four_cycle();
        let route = map.route("A", "C").unwrap();
        assert_eq!(route.names(map.graph()), vec!["A", "B", "C"]);
        assert_eq!(route.distance, 3.0);

        let route = map.route("A", "D").unwrap();
        assert_eq!(route.distance, 4.0);
        assert_eq!(route.names(map.graph()), vec!["A", "D"]);
    }

    #[test]
    fn distances_from_a() {
        let map = four_cycle();
        let paths = map.shortest_paths_from("A").unwrap();
        assert_eq!(paths.distances(), &[0.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn unknown_place() {
        let map = four_cycle();
        assert_eq!(map.lookup("Z"), None);
        assert!(matches!(
            map.route("A", "Z"),
            Err(Error::UnknownLocation(ref name)) if name == "Z"
        ));
        assert!(matches!(
            map.shortest_paths_from("Z"),
            Err(Error::UnknownLocation(_))
        ));
    }

    #[test]
    fn unreachable_place() {
        let list = EdgeList::parse("4\nA B 1\nC D 1\n").unwrap();
        let map = RoadMap::from_edge_list(&list).unwrap();
        let err = map.route("A", "D").unwrap_err();
        assert_eq!(err.to_string(), "cannot go from A to D");
    }

    #[test]
    fn understated_header_grows_the_graph() {
        let list = EdgeList::parse("1\nA B 1\nB C 1\n").unwrap();
        let map = RoadMap::from_edge_list(&list).unwrap();
        assert_eq!(map.graph().len(), 3);
        assert_eq!(map.graph().capacity(), 3);
    }

    #[test]
    fn overstated_header_is_ignored() {
        let list = EdgeList::parse("10\nA B 1\n").unwrap();
        let map = RoadMap::from_edge_list(&list).unwrap();
        assert_eq!(map.graph().len(), 2);
        assert_eq!(map.graph().capacity(), 2);
    }

    #[test]
    fn huge_header_does_not_size_the_graph() {
        let list = EdgeList::parse("1000000000000000000\nA B 1\n").unwrap();
        assert_eq!(list.declared_vertices, 1_000_000_000_000_000_000);

        let map = RoadMap::from_edge_list(&list).unwrap();
        assert_eq!(map.graph().capacity(), 2);
        assert_eq!(map.route("A", "B").unwrap().distance, 1.0);
        assert_eq!(
            map.graph().to_string(),
            "[0-A]: (1-B, 1.00), \n[1-B]: (0-A, 1.00), \n"
        );
    }

    #[test]
    fn map_config_selects_the_index_hash() {
        let list = EdgeList::parse(FOUR_CYCLE).unwrap();
        let config = MapConfig {
            buckets: 1,
            load_factor: 0.5,
            hash: BuiltinHash::Naive,
        };
        let map = RoadMap::with_map_config(&list, config).unwrap();
        assert_eq!(map.index().hash_description(), "naive char sum");
        assert!(map.index().bucket_count() >= 8);
        assert_eq!(map.route("B", "D").unwrap().distance, 3.0);
    }

    #[test]
    fn graph_errors_surface() {
        let err: Error = GraphError::CapacityExceeded { capacity: 0 }.into();
        assert!(matches!(err, Error::Graph(_)));
    }

    #[test]
    fn load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FOUR_CYCLE.as_bytes()).unwrap();
        let map = RoadMap::load(file.path(), MapConfig::default()).unwrap();
        assert_eq!(map.graph().len(), 4);
    }
}

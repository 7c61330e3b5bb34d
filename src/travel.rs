//! Hop-by-hop travel over a [`RoadMap`].

use crate::error::Error;
use crate::error::Result;
use crate::graph::VertexId;
use crate::road_map::RoadMap;
use crate::shortest_path::ShortestPaths;
use crate::shortest_path::shortest_paths;

/// A road leaving the current location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move<'m> {
    /// Where the road leads.
    pub target: VertexId,
    /// Name of the place it leads to.
    pub name: &'m str,
    /// Length of the road.
    pub weight: f64,
}

/// Outcome of [`TravelSession::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Moved to a new location that is not the destination.
    Moved {
        /// The new location.
        to: VertexId,
    },
    /// Reached the destination.
    Arrived {
        /// Total distance covered.
        traveled: f64,
        /// Length of a shortest route from the start.
        optimal: f64,
    },
    /// The traveler chose to stop.
    GaveUp,
}

/// A traveler moving through a road map one road at a time.
///
/// Shortest distances to the destination are computed once, at the start.
/// Roads are two-way, so the distances from the destination are also the
/// distances to it from every place.
///
/// # Examples
///
/// ```rust
/// # use travel_planner::EdgeList;
/// # use travel_planner::RoadMap;
/// # use travel_planner::travel::Step;
/// # use travel_planner::travel::TravelSession;
/// #
/// let list = EdgeList::parse("3\nA B 1\nB C 2\nA C 5\n").unwrap();
/// let map = RoadMap::from_edge_list(&list).unwrap();
/// let mut session = TravelSession::start(&map, "A", "C").unwrap();
///
/// while !session.is_arrived() {
///     let choice = session.recommended_choice().unwrap();
///     session.step(choice).unwrap();
/// }
/// assert_eq!(session.traveled(), session.optimal());
/// ```
#[derive(Debug)]
pub struct TravelSession<'m> {
    map: &'m RoadMap,
    current: VertexId,
    destination: VertexId,
    traveled: f64,
    optimal: f64,
    to_destination: ShortestPaths,
}

impl<'m> TravelSession<'m> {
    /// Starts a trip from `from` to `to`.
    ///
    /// Fails if either place is unknown or no route connects them.
    pub fn start(map: &'m RoadMap, from: &str, to: &str) -> Result<Self> {
        let current = map.require(from)?;
        let destination = map.require(to)?;
        let to_destination = shortest_paths(map.graph(), destination)?;

        let optimal = to_destination
            .distance(current)
            .ok_or_else(|| Error::Unreachable {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        tracing::debug!(from, to, optimal, "travel session started");

        Ok(Self {
            map,
            current,
            destination,
            traveled: 0.0,
            optimal,
            to_destination,
        })
    }

    /// The road map being traveled.
    pub fn map(&self) -> &'m RoadMap {
        self.map
    }

    /// The current location.
    pub fn current(&self) -> VertexId {
        self.current
    }

    /// The destination.
    pub fn destination(&self) -> VertexId {
        self.destination
    }

    /// Distance covered so far.
    pub fn traveled(&self) -> f64 {
        self.traveled
    }

    /// Length of a shortest route from the starting point.
    pub fn optimal(&self) -> f64 {
        self.optimal
    }

    /// Length of a shortest route from the current location.
    pub fn remaining(&self) -> f64 {
        self.remaining_from(self.current)
    }

    /// Returns `true` once the destination is reached.
    pub fn is_arrived(&self) -> bool {
        self.current == self.destination
    }

    /// Roads leaving the current location, most recently added first.
    ///
    /// [`step`](Self::step) numbers these from `1`.
    pub fn moves(&self) -> Vec<Move<'m>> {
        let map = self.map;
        map.graph()
            .neighbors(self.current)
            .map(|edge| Move {
                target: edge.target,
                name: &edge.name,
                weight: edge.weight,
            })
            .collect()
    }

    /// The 1-based choice of a move that starts a shortest remaining route.
    ///
    /// On ties the first listed move wins. `None` once arrived.
    pub fn recommended_choice(&self) -> Option<usize> {
        if self.is_arrived() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (idx, mv) in self.moves().iter().enumerate() {
            let total = mv.weight + self.remaining_from(mv.target);
            if best.is_none_or(|(_, d)| total < d) {
                best = Some((idx + 1, total));
            }
        }
        best.filter(|(_, d)| d.is_finite()).map(|(choice, _)| choice)
    }

    /// The move a shortest route takes next.
    pub fn recommended(&self) -> Option<Move<'m>> {
        let choice = self.recommended_choice()?;
        self.moves().get(choice - 1).copied()
    }

    /// Takes move number `choice` from [`moves`](Self::moves). `0` gives
    /// up.
    pub fn step(&mut self, choice: usize) -> Result<Step> {
        if choice == 0 {
            tracing::debug!(traveled = self.traveled, "traveler gave up");
            return Ok(Step::GaveUp);
        }

        let moves = self.moves();
        let Some(mv) = moves.get(choice - 1) else {
            return Err(Error::InvalidMove {
                choice,
                available: moves.len(),
            });
        };

        self.traveled += mv.weight;
        self.current = mv.target;
        tracing::debug!(to = mv.name, traveled = self.traveled, "moved");

        if self.is_arrived() {
            return Ok(Step::Arrived {
                traveled: self.traveled,
                optimal: self.optimal,
            });
        }
        Ok(Step::Moved { to: self.current })
    }

    fn remaining_from(&self, v: VertexId) -> f64 {
        self.to_destination.distances()[v]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_list::EdgeList;

    fn four_cycle() -> RoadMap {
        let list = EdgeList::parse("4\nA B 1\nB C 2\nC D 1\nD A 4\n").unwrap();
        RoadMap::from_edge_list(&list).unwrap()
    }

    #[test]
    fn following_recommendations_is_optimal() {
        let map = four_cycle();
        for (from, to) in [("A", "C"), ("A", "D"), ("D", "B"), ("C", "A")] {
            let mut session = TravelSession::start(&map, from, to).unwrap();
            let mut last = None;
            while !session.is_arrived() {
                let choice = session.recommended_choice().unwrap();
                last = Some(session.step(choice).unwrap());
            }
            assert_eq!(session.traveled(), session.optimal(), "{from} -> {to}");
            assert!(matches!(last, Some(Step::Arrived { .. })));
        }
    }

    #[test]
    fn moves_are_listed_most_recent_first() {
        let map = four_cycle();
        let session = TravelSession::start(&map, "A", "C").unwrap();
        let names: Vec<_> = session.moves().iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["D", "B"]);
        assert_eq!(session.recommended().map(|m| m.name), Some("B"));
        assert_eq!(session.remaining(), 3.0);
    }

    #[test]
    fn detour_tracks_distance() {
        let map = four_cycle();
        let mut session = TravelSession::start(&map, "A", "C").unwrap();

        assert_eq!(session.step(1).unwrap(), Step::Moved { to: 3 });
        assert_eq!(session.traveled(), 4.0);
        assert_eq!(session.remaining(), 1.0);

        // D lists A, then C.
        assert_eq!(
            session.step(2).unwrap(),
            Step::Arrived {
                traveled: 5.0,
                optimal: 3.0
            }
        );
        assert!(session.is_arrived());
        assert_eq!(session.recommended(), None);
    }

    #[test]
    fn give_up_and_invalid_moves() {
        let map = four_cycle();
        let mut session = TravelSession::start(&map, "B", "D").unwrap();

        assert!(matches!(
            session.step(3),
            Err(Error::InvalidMove {
                choice: 3,
                available: 2
            })
        ));
        assert_eq!(session.current(), 1);
        assert_eq!(session.step(0).unwrap(), Step::GaveUp);
    }

    #[test]
    fn start_equals_destination() {
        let map = four_cycle();
        let session = TravelSession::start(&map, "B", "B").unwrap();
        assert!(session.is_arrived());
        assert_eq!(session.optimal(), 0.0);
        assert_eq!(session.recommended_choice(), None);
    }

    #[test]
    fn start_fails_for_bad_endpoints() {
        let list = EdgeList::parse("4\nA B 1\nC D 1\n").unwrap();
        let map = RoadMap::from_edge_list(&list).unwrap();

        assert!(matches!(
            TravelSession::start(&map, "A", "C"),
            Err(Error::Unreachable { .. })
        ));
        assert!(matches!(
            TravelSession::start(&map, "X", "C"),
            Err(Error::UnknownLocation(_))
        ));
    }
}

//! Single-pair shortest route search over an unweighted network.
//!
//! # Algorithm
//!
//! Best-first search with a stable frontier. Every edge costs one hop; the
//! frontier is keyed by hops from the start ([`SearchStrategy::BreadthFirst`])
//! or by hops plus the Manhattan distance to the destination
//! ([`SearchStrategy::AStar`]). Occupied stations are never entered and
//! blocked edges never travelled, so each successful search pushes the
//! next one onto a different route.
//!
//! # Direct-edge mode
//!
//! When the first route of an allocation is a single start–end edge, later
//! searches run with [`DirectEdge::Claimed`]: the destination may always be
//! relaxed into, but the search does not stop on it while its predecessor
//! is the start. This forces one longer alternative to be found before the
//! direct edge is reported again. The destination is a sink: it is never
//! expanded.
//!
//! # Complexity
//!
//! O(V · (V + E)) worst case with the sorted-list frontier; networks in
//! this domain are small.

use log::debug;
use serde::{Deserialize, Serialize};

use super::frontier::Frontier;
use super::Occupancy;
use crate::models::{Network, Route};

const UNREACHED: u64 = u64::MAX;

/// Frontier ordering used by [`RouteFinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Order by hops from the start.
    #[default]
    BreadthFirst,
    /// Order by hops from the start plus Manhattan distance to the end.
    AStar,
}

/// Whether the direct start–end edge has already been handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectEdge {
    /// Regular search.
    #[default]
    Free,
    /// A previous route used the direct edge; look for a detour first.
    Claimed,
}

/// Finds shortest routes between two stations of a network.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Network;
/// use u_dispatch::pathfinding::{DirectEdge, Occupancy, RouteFinder, SearchStrategy};
///
/// let mut net = Network::new();
/// let a = net.add_station("A", 0, 0);
/// let b = net.add_station("B", 1, 0);
/// let c = net.add_station("C", 2, 0);
/// net.connect(a, b).unwrap();
/// net.connect(b, c).unwrap();
///
/// let finder = RouteFinder::new(&net, SearchStrategy::BreadthFirst);
/// let mut occ = Occupancy::new(net.len());
/// let route = finder.find(a, c, &mut occ, DirectEdge::Free).unwrap();
/// assert_eq!(route.stations(), &[a, b, c]);
///
/// // A and B are now occupied: no second route exists.
/// assert!(finder.find(a, c, &mut occ, DirectEdge::Free).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteFinder<'a> {
    network: &'a Network,
    strategy: SearchStrategy,
}

impl<'a> RouteFinder<'a> {
    /// Creates a finder over `network`.
    pub fn new(network: &'a Network, strategy: SearchStrategy) -> Self {
        Self { network, strategy }
    }

    /// The frontier ordering in use.
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Searches for a route from `start` to `end` avoiding occupied stations.
    ///
    /// On success every station of the returned route except `end` is
    /// marked in `occupancy`. Returns `None` when no route exists, when
    /// `start == end`, or when either id is unknown.
    pub fn find(
        &self,
        start: usize,
        end: usize,
        occupancy: &mut Occupancy,
        direct_edge: DirectEdge,
    ) -> Option<Route> {
        let n = self.network.len();
        if start >= n || end >= n || start == end {
            return None;
        }
        let claimed = direct_edge == DirectEdge::Claimed;

        let mut hops = vec![UNREACHED; n];
        let mut came_from: Vec<Option<usize>> = vec![None; n];
        let mut frontier = Frontier::new(n);
        hops[start] = 0;
        frontier.push(start, 0);

        while let Some(current) = frontier.pop() {
            if current == end {
                if claimed && came_from[end] == Some(start) {
                    continue;
                }
                let route = reconstruct(&came_from, end)?;
                occupancy.reserve_route(&route);
                debug!(
                    "found {}-hop route {:?}",
                    route.hops(),
                    route.station_names(self.network)
                );
                return Some(route);
            }

            let tentative = hops[current] + 1;
            for neighbor in self.network.neighbors(current) {
                let open = tentative < hops[neighbor]
                    && !occupancy.is_occupied(neighbor)
                    && !occupancy.is_blocked(current, neighbor);
                if !open && !(claimed && neighbor == end) {
                    continue;
                }
                came_from[neighbor] = Some(current);
                hops[neighbor] = tentative;
                frontier.push(neighbor, self.priority(neighbor, tentative, end));
            }
        }

        debug!(
            "no route from {} to {}",
            self.network.name(start),
            self.network.name(end)
        );
        None
    }

    fn priority(&self, station: usize, hops: u64, end: usize) -> u64 {
        match self.strategy {
            SearchStrategy::BreadthFirst => hops,
            SearchStrategy::AStar => {
                let h = self
                    .network
                    .station(station)
                    .manhattan_distance(self.network.station(end));
                hops.saturating_add(h)
            }
        }
    }
}

fn reconstruct(came_from: &[Option<usize>], end: usize) -> Option<Route> {
    let mut stations = vec![end];
    let mut current = end;
    while let Some(prev) = came_from[current] {
        stations.push(prev);
        current = prev;
    }
    stations.reverse();
    Route::new(stations)
}

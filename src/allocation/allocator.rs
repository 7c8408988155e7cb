//! Multi-train route allocation.
//!
//! # Algorithm
//!
//! 1. Find the base (shortest) route. Its stations become occupied.
//! 2. Keep searching: each new route avoids all previously used stations.
//!    A candidate is kept as a new distinct route only while its extra
//!    hops over the base are fewer than the trains still to dispatch.
//! 3. Once discovery stops, remaining trains reuse the distinct routes
//!    round-robin from the base, falling back to the base whenever a
//!    route's extra hops no longer pay off.
//! 4. If only the base was found, clear occupancy, reserve the base by
//!    blocking the edges between its interior stations, and run steps 1–3
//!    once more. This breaks the shortcut that made the base cut across
//!    longer disjoint routes. The alternative split wins only when its
//!    simulated turn total beats `base_hops + trains - 1`, the cost of
//!    sending everyone down the base route.

use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use crate::models::{Network, Route, RouteSet};
use crate::pathfinding::{DirectEdge, Occupancy, RouteFinder, SearchStrategy};
use crate::schedule::{run_schedule, ScheduleMode};

/// Errors raised by [`RouteAllocator::allocate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The fleet must contain at least one train.
    #[error("number of trains must be positive")]
    InvalidTrainCount,
    /// Start and end are the same station.
    #[error("start and end station are the same")]
    SameStation,
    /// A station id does not exist in the network.
    #[error("unknown station id {0}")]
    UnknownStation(usize),
    /// Two stations share a name.
    #[error("duplicate station name `{0}`")]
    DuplicateStationName(String),
    /// Two stations share a coordinate.
    #[error("duplicate station coordinates ({x}, {y})")]
    DuplicateCoordinates {
        /// Shared x coordinate.
        x: i64,
        /// Shared y coordinate.
        y: i64,
    },
    /// Start and end are not connected.
    #[error("no route exists from {start} to {end}")]
    NoRoute {
        /// Start station name.
        start: String,
        /// End station name.
        end: String,
    },
}

/// Assigns one route to every train of a fleet.
///
/// # Examples
///
/// ```
/// use u_dispatch::allocation::RouteAllocator;
/// use u_dispatch::models::Network;
/// use u_dispatch::pathfinding::SearchStrategy;
///
/// // Two parallel two-hop routes between S and E.
/// let mut net = Network::new();
/// let s = net.add_station("S", 0, 0);
/// let a = net.add_station("a", 1, 1);
/// let b = net.add_station("b", 1, -1);
/// let e = net.add_station("E", 2, 0);
/// for (x, y) in [(s, a), (s, b), (a, e), (b, e)] {
///     net.connect(x, y).unwrap();
/// }
///
/// let allocator = RouteAllocator::new(&net, SearchStrategy::BreadthFirst);
/// let set = allocator.allocate(s, e, 4).unwrap();
/// assert_eq!(set.len(), 4);
/// assert_eq!(set.distinct_routes(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteAllocator<'a> {
    network: &'a Network,
    finder: RouteFinder<'a>,
}

impl<'a> RouteAllocator<'a> {
    /// Creates an allocator over `network`.
    pub fn new(network: &'a Network, strategy: SearchStrategy) -> Self {
        Self {
            network,
            finder: RouteFinder::new(network, strategy),
        }
    }

    /// Allocates routes for `trains` trains from `start` to `end`.
    ///
    /// The returned set holds exactly `trains` routes.
    pub fn allocate(
        &self,
        start: usize,
        end: usize,
        trains: usize,
    ) -> Result<RouteSet, AllocationError> {
        if trains == 0 {
            return Err(AllocationError::InvalidTrainCount);
        }
        for id in [start, end] {
            if id >= self.network.len() {
                return Err(AllocationError::UnknownStation(id));
            }
        }
        if start == end {
            return Err(AllocationError::SameStation);
        }

        let mut occupancy = Occupancy::new(self.network.len());

        if trains == 1 {
            return self
                .finder
                .find(start, end, &mut occupancy, DirectEdge::Free)
                .map(RouteSet::single)
                .ok_or_else(|| self.no_route(start, end));
        }

        self.check_distinct_stations()?;

        let primary = self
            .discover(start, end, trains, &mut occupancy)
            .ok_or_else(|| self.no_route(start, end))?;
        if primary.distinct_routes() > 1 {
            return Ok(primary);
        }

        let base = primary.base().clone();
        occupancy.clear();
        occupancy.reserve_shortcuts(&base);
        match self.fallback(start, end, trains, &base, &mut occupancy) {
            Some(alternative) => Ok(alternative),
            None => Ok(primary),
        }
    }

    /// Runs discovery again around the reserved base route and returns the
    /// alternative only if it strictly beats the single-route schedule.
    fn fallback(
        &self,
        start: usize,
        end: usize,
        trains: usize,
        base: &Route,
        occupancy: &mut Occupancy,
    ) -> Option<RouteSet> {
        let alternative = self.discover(start, end, trains, occupancy)?;
        if alternative.distinct_routes() < 2 {
            debug!("fallback found no alternative split");
            return None;
        }
        let single_route_turns = base.hops() + trains - 1;
        let turns = run_schedule(&alternative, ScheduleMode::Counting).total_turns();
        debug!(
            "fallback split: {} routes, {turns} turns vs {single_route_turns} on the base route",
            alternative.distinct_routes()
        );
        (turns < single_route_turns).then_some(alternative)
    }

    /// Steps 1–3: base route, distinct discovery, round-robin reuse.
    ///
    /// Returns `None` when not even a base route exists.
    fn discover(
        &self,
        start: usize,
        end: usize,
        trains: usize,
        occupancy: &mut Occupancy,
    ) -> Option<RouteSet> {
        let base = self.finder.find(start, end, occupancy, DirectEdge::Free)?;
        let direct_edge = if base.is_direct() {
            DirectEdge::Claimed
        } else {
            DirectEdge::Free
        };
        let base_hops = base.hops();
        let mut routes = vec![base];
        let mut remaining = trains - 1;

        while remaining > 0 {
            let Some(candidate) = self.finder.find(start, end, occupancy, direct_edge) else {
                break;
            };
            // Extra hops over the base must stay below the trains left.
            if candidate.hops() >= base_hops + remaining {
                debug!(
                    "rejecting {}-hop route: {remaining} trains left",
                    candidate.hops()
                );
                break;
            }
            routes.push(candidate);
            remaining -= 1;
        }

        let distinct = routes.len();
        let mut cursor = 0;
        while remaining > 0 {
            let reused = if routes[cursor].hops() < base_hops + remaining {
                let r = routes[cursor].clone();
                cursor = (cursor + 1) % distinct;
                r
            } else {
                cursor = 0;
                routes[0].clone()
            };
            routes.push(reused);
            remaining -= 1;
        }

        debug!("{distinct} distinct routes for {trains} trains");
        RouteSet::new(routes, distinct)
    }

    fn check_distinct_stations(&self) -> Result<(), AllocationError> {
        let mut names = HashSet::new();
        let mut coordinates = HashSet::new();
        for station in self.network.stations() {
            if !coordinates.insert(station.coordinates()) {
                let (x, y) = station.coordinates();
                return Err(AllocationError::DuplicateCoordinates { x, y });
            }
            if !names.insert(station.name()) {
                return Err(AllocationError::DuplicateStationName(
                    station.name().to_string(),
                ));
            }
        }
        Ok(())
    }

    fn no_route(&self, start: usize, end: usize) -> AllocationError {
        AllocationError::NoRoute {
            start: self.network.name(start).to_string(),
            end: self.network.name(end).to_string(),
        }
    }
}

//! Shortest-route search with occupancy-biased discovery.
//!
//! - [`RouteFinder`] — Dijkstra/A* hybrid over unit-cost edges
//! - [`Occupancy`] — Per-allocation station markers steering later searches
//!   onto node-disjoint alternatives

mod finder;
mod frontier;
mod occupancy;

pub use finder::{DirectEdge, RouteFinder, SearchStrategy};
pub use occupancy::Occupancy;

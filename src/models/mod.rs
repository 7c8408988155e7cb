//! Domain model types for train dispatch.
//!
//! Provides the core abstractions: named stations with grid coordinates,
//! an undirected network connecting them, routes as ordered station
//! sequences, and route sets assigning one route to every train.

mod network;
mod route;
mod route_set;
mod station;

pub use network::{Network, NetworkError};
pub use route::Route;
pub use route_set::RouteSet;
pub use station::Station;

//! # u-dispatch
//!
//! Multi-train route allocation and turn-based dispatch simulation over
//! station networks.
//!
//! A fleet of trains travels from one station to another. The crate finds
//! node-disjoint routes through the network, decides how many of them are
//! worth using for the fleet size, assigns a route to every train and
//! simulates departures turn by turn.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Station, Network, Route, RouteSet)
//! - [`loader`] — Map file parsing
//! - [`pathfinding`] — Breadth-first and A* route search with occupancy
//! - [`allocation`] — Fleet route allocation
//! - [`schedule`] — Turn-based simulation and dispatch reports
//!
//! ## Example
//!
//! ```
//! use u_dispatch::allocation::RouteAllocator;
//! use u_dispatch::loader::parse_network;
//! use u_dispatch::pathfinding::SearchStrategy;
//! use u_dispatch::schedule::{run_schedule, ScheduleMode};
//!
//! let net = parse_network(
//!     "stations:\nA,0,0\nB,1,0\nC,2,0\nconnections:\nA-B\nB-C\n",
//! ).unwrap();
//! let start = net.lookup("A").unwrap();
//! let end = net.lookup("C").unwrap();
//!
//! let routes = RouteAllocator::new(&net, SearchStrategy::BreadthFirst)
//!     .allocate(start, end, 2)
//!     .unwrap();
//! let schedule = run_schedule(&routes, ScheduleMode::Logging);
//! assert_eq!(schedule.total_turns(), 3);
//! ```

pub mod allocation;
pub mod loader;
pub mod models;
pub mod pathfinding;
pub mod schedule;

//! Undirected station network.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use thiserror::Error;

use super::Station;

/// Errors raised while wiring a [`Network`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A station id does not exist in the network.
    #[error("unknown station id {0}")]
    UnknownStation(usize),
    /// A connection from a station to itself.
    #[error("station {0} cannot connect to itself")]
    SelfLoop(String),
    /// The connection already exists (in either direction).
    #[error("duplicate connection {0}-{1}")]
    DuplicateConnection(String, String),
}

/// An unweighted, undirected graph of stations.
///
/// Stations are addressed by their index (assigned in insertion order).
/// Neighbor lists keep connection declaration order, which decides
/// tie-breaking during route search.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Network;
///
/// let mut net = Network::new();
/// let a = net.add_station("A", 0, 0);
/// let b = net.add_station("B", 1, 0);
/// net.connect(a, b).unwrap();
///
/// assert_eq!(net.lookup("B"), Some(b));
/// assert_eq!(net.neighbors(a), vec![b]);
/// assert!(net.is_connected(b, a));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: UnGraph<Station, ()>,
    by_name: HashMap<String, usize>,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a station and returns its id.
    ///
    /// Name uniqueness is not enforced here; [`lookup`](Self::lookup)
    /// resolves a repeated name to the first station declared with it.
    pub fn add_station(&mut self, name: impl Into<String>, x: i64, y: i64) -> usize {
        let station = Station::new(name, x, y);
        let name = station.name().to_string();
        let id = self.graph.add_node(station).index();
        self.by_name.entry(name).or_insert(id);
        id
    }

    /// Connects two stations in both directions.
    pub fn connect(&mut self, a: usize, b: usize) -> Result<(), NetworkError> {
        for id in [a, b] {
            if id >= self.len() {
                return Err(NetworkError::UnknownStation(id));
            }
        }
        if a == b {
            return Err(NetworkError::SelfLoop(self.name(a).to_string()));
        }
        if self.is_connected(a, b) {
            return Err(NetworkError::DuplicateConnection(
                self.name(a).to_string(),
                self.name(b).to_string(),
            ));
        }
        self.graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        Ok(())
    }

    /// Resolves a station name to its id.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Returns the station with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn station(&self, id: usize) -> &Station {
        &self.graph[NodeIndex::new(id)]
    }

    /// Returns the station with the given id, if any.
    pub fn get(&self, id: usize) -> Option<&Station> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// All stations in id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.graph.node_weights()
    }

    /// Adjacent station ids in connection declaration order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn neighbors(&self, id: usize) -> Vec<usize> {
        let node = NodeIndex::new(id);
        assert!(id < self.len(), "station id {id} out of bounds");
        let mut edges: Vec<(usize, usize)> = self
            .graph
            .edges(node)
            .map(|e| {
                let other = if e.source() == node { e.target() } else { e.source() };
                (e.id().index(), other.index())
            })
            .collect();
        // Edge ids grow with insertion; petgraph walks them newest first.
        edges.sort_unstable();
        edges.into_iter().map(|(_, other)| other).collect()
    }

    /// Returns `true` if `a` and `b` share an edge.
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        a < self.len()
            && b < self.len()
            && self
                .graph
                .find_edge(NodeIndex::new(a), NodeIndex::new(b))
                .is_some()
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if the network has no stations.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of undirected connections.
    pub fn num_connections(&self) -> usize {
        self.graph.edge_count()
    }

    /// Name of the station with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn name(&self, id: usize) -> &str {
        self.station(id).name()
    }
}

//! Route type.

use super::Network;

/// An ordered sequence of station ids from a start to an end station.
///
/// A route always holds at least two stations; a route of exactly two
/// stations is a direct edge between start and end.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Route;
///
/// let route = Route::new(vec![0, 3, 5]).unwrap();
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.hops(), 2);
/// assert_eq!(route.start(), 0);
/// assert_eq!(route.end(), 5);
/// assert!(!route.is_direct());
///
/// assert!(Route::new(vec![4]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    stations: Vec<usize>,
}

impl Route {
    /// Creates a route.
    ///
    /// Returns `None` if fewer than two stations are given.
    pub fn new(stations: Vec<usize>) -> Option<Self> {
        if stations.len() < 2 {
            return None;
        }
        Some(Self { stations })
    }

    /// Station ids in travel order, start and end included.
    pub fn stations(&self) -> &[usize] {
        &self.stations
    }

    /// Number of stations on the route.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always `false` for a constructed route.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of edges travelled (`len - 1`).
    pub fn hops(&self) -> usize {
        self.stations.len() - 1
    }

    /// First station.
    pub fn start(&self) -> usize {
        self.stations[0]
    }

    /// Last station.
    pub fn end(&self) -> usize {
        self.stations[self.stations.len() - 1]
    }

    /// Returns `true` if the route is a single edge.
    pub fn is_direct(&self) -> bool {
        self.stations.len() == 2
    }

    /// Station ids between start and end, exclusive.
    pub fn interior(&self) -> &[usize] {
        &self.stations[1..self.stations.len() - 1]
    }

    /// Returns `true` if every consecutive pair is connected in `network`.
    pub fn follows_edges(&self, network: &Network) -> bool {
        self.stations
            .windows(2)
            .all(|pair| network.is_connected(pair[0], pair[1]))
    }

    /// Station names in travel order.
    pub fn station_names<'a>(&self, network: &'a Network) -> Vec<&'a str> {
        self.stations.iter().map(|&id| network.name(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_too_short() {
        assert!(Route::new(vec![]).is_none());
        assert!(Route::new(vec![1]).is_none());
    }

    #[test]
    fn test_direct_route() {
        let r = Route::new(vec![2, 7]).expect("valid");
        assert!(r.is_direct());
        assert_eq!(r.hops(), 1);
        assert!(r.interior().is_empty());
        assert!(!r.is_empty());
    }

    #[test]
    fn test_interior() {
        let r = Route::new(vec![0, 4, 2, 9]).expect("valid");
        assert_eq!(r.interior(), &[4, 2]);
        assert_eq!(r.start(), 0);
        assert_eq!(r.end(), 9);
    }

    #[test]
    fn test_follows_edges() {
        let mut net = Network::new();
        let a = net.add_station("A", 0, 0);
        let b = net.add_station("B", 1, 0);
        let c = net.add_station("C", 2, 0);
        net.connect(a, b).expect("valid");
        net.connect(b, c).expect("valid");

        let good = Route::new(vec![a, b, c]).expect("valid");
        let bad = Route::new(vec![a, c]).expect("valid");
        assert!(good.follows_edges(&net));
        assert!(!bad.follows_edges(&net));
        assert_eq!(good.station_names(&net), vec!["A", "B", "C"]);
    }
}

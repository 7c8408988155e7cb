//! Per-allocation station occupancy.

use std::collections::HashSet;

use crate::models::Route;

/// Occupancy markers for one allocation run, indexed by station id.
///
/// A station marked occupied is skipped by later route searches, which
/// pushes them onto alternative, node-disjoint routes. Individual edges can
/// also be blocked; the allocator uses this to forbid the shortcut of a
/// reserved route while leaving its stations usable.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Route;
/// use u_dispatch::pathfinding::Occupancy;
///
/// let mut occ = Occupancy::new(4);
/// occ.reserve_route(&Route::new(vec![0, 2, 3]).unwrap());
/// assert!(occ.is_occupied(0));
/// assert!(occ.is_occupied(2));
/// assert!(!occ.is_occupied(3)); // destination stays free
/// occ.clear();
/// assert_eq!(occ.num_occupied(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    occupied: Vec<bool>,
    blocked: HashSet<(usize, usize)>,
}

impl Occupancy {
    /// Creates occupancy for `num_stations` stations, all free.
    pub fn new(num_stations: usize) -> Self {
        Self {
            occupied: vec![false; num_stations],
            blocked: HashSet::new(),
        }
    }

    /// Returns `true` if the station is occupied.
    ///
    /// Unknown ids read as free.
    pub fn is_occupied(&self, station: usize) -> bool {
        self.occupied.get(station).copied().unwrap_or(false)
    }

    /// Marks a single station occupied.
    pub fn occupy(&mut self, station: usize) {
        if let Some(slot) = self.occupied.get_mut(station) {
            *slot = true;
        }
    }

    /// Marks every station of `route` except its destination.
    pub fn reserve_route(&mut self, route: &Route) {
        let stations = route.stations();
        for &id in &stations[..stations.len() - 1] {
            self.occupy(id);
        }
    }

    /// Returns `true` if travel between `a` and `b` is blocked.
    pub fn is_blocked(&self, a: usize, b: usize) -> bool {
        self.blocked.contains(&edge_key(a, b))
    }

    /// Blocks travel between `a` and `b` in both directions.
    pub fn block(&mut self, a: usize, b: usize) {
        self.blocked.insert(edge_key(a, b));
    }

    /// Blocks every edge of `route` that joins two of its interior stations.
    ///
    /// The route's first and last legs stay open, so routes through the same
    /// stations remain possible as long as they avoid the shortcut.
    pub fn reserve_shortcuts(&mut self, route: &Route) {
        for pair in route.interior().windows(2) {
            self.block(pair[0], pair[1]);
        }
    }

    /// Frees every station and unblocks every edge.
    pub fn clear(&mut self) {
        self.occupied.fill(false);
        self.blocked.clear();
    }

    /// Number of occupied stations.
    pub fn num_occupied(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    /// Number of blocked edges.
    pub fn num_blocked(&self) -> usize {
        self.blocked.len()
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

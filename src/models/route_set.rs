//! Route set: one route per train.

use super::Route;

/// The routes assigned to a fleet, one per train, plus the number of
/// genuinely different routes among them.
///
/// Distinct routes come first; later entries are copies of earlier ones.
/// The distinct-route count also bounds how many trains may depart per turn.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Route, RouteSet};
///
/// let a = Route::new(vec![0, 1, 3]).unwrap();
/// let b = Route::new(vec![0, 2, 3]).unwrap();
/// let set = RouteSet::new(vec![a.clone(), b, a], 2).unwrap();
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.distinct_routes(), 2);
/// assert_eq!(set.route(2).stations(), &[0, 1, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSet {
    routes: Vec<Route>,
    distinct: usize,
}

impl RouteSet {
    /// Creates a route set.
    ///
    /// Returns `None` if `routes` is empty or `distinct` is not within
    /// `1..=routes.len()`.
    pub fn new(routes: Vec<Route>, distinct: usize) -> Option<Self> {
        if routes.is_empty() || distinct == 0 || distinct > routes.len() {
            return None;
        }
        Some(Self { routes, distinct })
    }

    /// A set holding exactly one route.
    pub fn single(route: Route) -> Self {
        Self {
            routes: vec![route],
            distinct: 1,
        }
    }

    /// All assigned routes in train order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route assigned to the given train (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `train` is out of bounds.
    pub fn route(&self, train: usize) -> &Route {
        &self.routes[train]
    }

    /// Number of trains.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always `false` for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of distinct routes among the assignments.
    pub fn distinct_routes(&self) -> usize {
        self.distinct
    }

    /// The first (shortest discovered) route.
    pub fn base(&self) -> &Route {
        &self.routes[0]
    }

    /// Keeps only the first `trains` assignments.
    ///
    /// The distinct count is clamped to the new length. Returns `None`
    /// when `trains` is zero.
    pub fn truncated(&self, trains: usize) -> Option<Self> {
        if trains == 0 {
            return None;
        }
        let n = trains.min(self.routes.len());
        Self::new(self.routes[..n].to_vec(), self.distinct.min(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(ids: &[usize]) -> Route {
        Route::new(ids.to_vec()).expect("valid")
    }

    #[test]
    fn test_route_set_invalid() {
        assert!(RouteSet::new(vec![], 1).is_none());
        assert!(RouteSet::new(vec![route(&[0, 1])], 0).is_none());
        assert!(RouteSet::new(vec![route(&[0, 1])], 2).is_none());
    }

    #[test]
    fn test_single() {
        let set = RouteSet::single(route(&[0, 1, 2]));
        assert_eq!(set.len(), 1);
        assert_eq!(set.distinct_routes(), 1);
        assert_eq!(set.base().hops(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_truncated() {
        let set = RouteSet::new(
            vec![route(&[0, 1, 3]), route(&[0, 2, 3]), route(&[0, 1, 3])],
            2,
        )
        .expect("valid");
        let one = set.truncated(1).expect("non-empty");
        assert_eq!(one.len(), 1);
        assert_eq!(one.distinct_routes(), 1);
        let all = set.truncated(10).expect("non-empty");
        assert_eq!(all, set);
        assert!(set.truncated(0).is_none());
    }
}

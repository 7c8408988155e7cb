//! Serializable dispatch summary.

use serde::Serialize;

use super::Schedule;
use crate::models::{Network, RouteSet};
use crate::pathfinding::SearchStrategy;

/// The route taken by one train, as station names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainRoute {
    /// 1-based train number.
    pub train: usize,
    /// Station names from start to end.
    pub stations: Vec<String>,
}

/// A complete dispatch plan and its simulated outcome.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Network, Route, RouteSet};
/// use u_dispatch::pathfinding::SearchStrategy;
/// use u_dispatch::schedule::{run_schedule, DispatchReport, ScheduleMode};
///
/// let mut net = Network::new();
/// let a = net.add_station("A", 0, 0);
/// let b = net.add_station("B", 1, 0);
/// net.connect(a, b).unwrap();
///
/// let set = RouteSet::single(Route::new(vec![a, b]).unwrap());
/// let schedule = run_schedule(&set, ScheduleMode::Counting);
/// let report = DispatchReport::new(&net, SearchStrategy::BreadthFirst, &set, &schedule);
/// assert_eq!(report.total_turns, 1);
/// assert_eq!(report.routes[0].stations, vec!["A", "B"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Start station name.
    pub start: String,
    /// Destination station name.
    pub end: String,
    /// Search strategy used to discover routes.
    pub strategy: SearchStrategy,
    /// Number of trains dispatched.
    pub trains: usize,
    /// Number of distinct routes among the assignments.
    pub distinct_routes: usize,
    /// Route assigned to each train.
    pub routes: Vec<TrainRoute>,
    /// Turns until every train arrived.
    pub total_turns: usize,
    /// Refused moves during the simulation.
    pub stalls: usize,
}

impl DispatchReport {
    /// Builds a report from an allocation and its simulation.
    pub fn new(
        network: &Network,
        strategy: SearchStrategy,
        routes: &RouteSet,
        schedule: &Schedule,
    ) -> Self {
        let base = routes.base();
        Self {
            start: network.name(base.start()).to_string(),
            end: network.name(base.end()).to_string(),
            strategy,
            trains: routes.len(),
            distinct_routes: routes.distinct_routes(),
            routes: routes
                .routes()
                .iter()
                .enumerate()
                .map(|(i, r)| TrainRoute {
                    train: i + 1,
                    stations: r
                        .station_names(network)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                })
                .collect(),
            total_turns: schedule.total_turns(),
            stalls: schedule.stalls(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Route;
    use crate::schedule::{run_schedule, ScheduleMode};

    #[test]
    fn test_report_json_shape() {
        let mut net = Network::new();
        let s = net.add_station("S", 0, 0);
        let e = net.add_station("E", 1, 0);
        net.connect(s, e).expect("valid");
        let edge = Route::new(vec![s, e]).expect("valid");
        let set = RouteSet::new(vec![edge.clone(), edge], 1).expect("valid");
        let schedule = run_schedule(&set, ScheduleMode::Counting);

        let report = DispatchReport::new(&net, SearchStrategy::AStar, &set, &schedule);
        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["start"], "S");
        assert_eq!(json["end"], "E");
        assert_eq!(json["strategy"], "a_star");
        assert_eq!(json["trains"], 2);
        assert_eq!(json["distinct_routes"], 1);
        assert_eq!(json["total_turns"], 2);
        assert_eq!(json["routes"][1]["train"], 2);
        assert_eq!(json["routes"][1]["stations"][1], "E");
    }
}

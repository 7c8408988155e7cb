//! Turn-based dispatch simulation.
//!
//! # Algorithm
//!
//! Trains depart in waves: turn `t` tracks the first `distinct · t` trains
//! of the route set, where `distinct` is its number of different routes.
//! Every tracked train still travelling moves one station per turn. A move
//! is refused when another train already holds exactly the trajectory the
//! move would produce; the refused train stalls and retries next turn.
//!
//! Trains are resolved in index order within a turn, so a train compares
//! against lower-indexed trains as already moved and higher-indexed trains
//! as they stood before the turn. Comparing only against the pre-turn
//! state would let two trains stalled behind the same leader both take
//! the freed trajectory in one turn.
//!
//! # Complexity
//!
//! O(T · n² · L) where T is the number of turns, n the number of trains
//! and L the longest route.

use std::io::{self, Write};

use log::trace;
use serde::Serialize;

use crate::models::{Network, RouteSet};

/// Whether a simulation keeps a per-turn record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    /// Only count turns.
    Counting,
    /// Count turns and record train positions after every turn with movement.
    Logging,
}

/// A train's position at the end of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainPosition {
    /// 1-based train number.
    pub train: usize,
    /// Station id the train is at.
    pub station: usize,
}

/// Positions of all travelling trains after one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    /// 1-based turn number.
    pub turn: usize,
    /// Travelling trains in train order, including trains that reached the
    /// destination during this turn.
    pub positions: Vec<TrainPosition>,
}

/// Outcome of a dispatch simulation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    total_turns: usize,
    stalls: usize,
    records: Vec<TurnRecord>,
}

impl Schedule {
    /// Turns needed until every train has arrived.
    pub fn total_turns(&self) -> usize {
        self.total_turns
    }

    /// Number of refused moves over the whole simulation.
    pub fn stalls(&self) -> usize {
        self.stalls
    }

    /// Per-turn records (empty in [`ScheduleMode::Counting`]).
    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    /// Writes one `Turn N: T1-A T2-B` line per record.
    pub fn write_log<W: Write>(&self, network: &Network, out: &mut W) -> io::Result<()> {
        for record in &self.records {
            let moves: Vec<String> = record
                .positions
                .iter()
                .map(|p| format!("T{}-{}", p.train, network.name(p.station)))
                .collect();
            writeln!(out, "Turn {}: {}", record.turn, moves.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TrainState {
    Waiting,
    InTransit(Vec<usize>),
    Arrived,
}

/// Simulates the route set turn by turn.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Route, RouteSet};
/// use u_dispatch::schedule::{run_schedule, ScheduleMode};
///
/// // One direct edge shared by three trains: one departure per turn.
/// let edge = Route::new(vec![0, 1]).unwrap();
/// let set = RouteSet::new(vec![edge.clone(), edge.clone(), edge], 1).unwrap();
/// let schedule = run_schedule(&set, ScheduleMode::Counting);
/// assert_eq!(schedule.total_turns(), 3);
/// assert!(schedule.records().is_empty());
/// ```
pub fn run_schedule(routes: &RouteSet, mode: ScheduleMode) -> Schedule {
    let n = routes.len();
    let wave = routes.distinct_routes().max(1);
    let mut states = vec![TrainState::Waiting; n];
    let mut schedule = Schedule::default();

    for turn in 1.. {
        let tracked = wave.saturating_mul(turn).min(n);
        let mut pending = false;
        let mut advanced = false;

        for train in 0..tracked {
            let route = routes.route(train).stations();
            let mut trajectory = match &states[train] {
                TrainState::Arrived => continue,
                TrainState::Waiting => vec![route[0]],
                TrainState::InTransit(trajectory) => trajectory.clone(),
            };
            let Some(&next) = route.get(trajectory.len()) else {
                states[train] = TrainState::Arrived;
                continue;
            };
            pending = true;
            trajectory.push(next);

            let blocked = states.iter().enumerate().any(|(other, state)| {
                other != train && matches!(state, TrainState::InTransit(t) if *t == trajectory)
            });
            if blocked {
                trace!("turn {turn}: train {} stalls", train + 1);
                schedule.stalls += 1;
                continue;
            }
            states[train] = TrainState::InTransit(trajectory);
            advanced = true;
        }

        if !pending {
            break;
        }
        schedule.total_turns = turn;

        if mode == ScheduleMode::Logging && advanced {
            let positions = states
                .iter()
                .enumerate()
                .filter_map(|(train, state)| match state {
                    TrainState::InTransit(t) => t.last().map(|&station| TrainPosition {
                        train: train + 1,
                        station,
                    }),
                    _ => None,
                })
                .collect();
            schedule.records.push(TurnRecord { turn, positions });
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Route;

    fn route(ids: &[usize]) -> Route {
        Route::new(ids.to_vec()).expect("valid")
    }

    fn positions(record: &TurnRecord) -> Vec<(usize, usize)> {
        record
            .positions
            .iter()
            .map(|p| (p.train, p.station))
            .collect()
    }

    #[test]
    fn test_follower_moves_as_leader_arrives() {
        let edge = route(&[0, 1]);
        let set = RouteSet::new(vec![edge.clone(), edge.clone(), edge], 1)
            .expect("valid");
        let schedule = run_schedule(&set, ScheduleMode::Logging);
        assert_eq!(schedule.total_turns(), 3);
        assert_eq!(schedule.stalls(), 0);
        let moves: Vec<Vec<(usize, usize)>> =
            schedule.records().iter().map(positions).collect();
        assert_eq!(moves, vec![vec![(1, 1)], vec![(2, 1)], vec![(3, 1)]]);
        assert_eq!(schedule.records()[1].turn, 2);
    }

    #[test]
    fn test_single_train_line() {
        let set = RouteSet::single(route(&[0, 1, 2]));
        let schedule = run_schedule(&set, ScheduleMode::Logging);
        assert_eq!(schedule.total_turns(), 2);
        assert_eq!(schedule.stalls(), 0);
        assert_eq!(schedule.records().len(), 2);
        assert_eq!(positions(&schedule.records()[0]), vec![(1, 1)]);
        assert_eq!(positions(&schedule.records()[1]), vec![(1, 2)]);
    }

    #[test]
    fn test_two_distinct_routes_depart_together() {
        let set = RouteSet::new(vec![route(&[0, 1, 3]), route(&[0, 2, 3])], 2).expect("valid");
        let schedule = run_schedule(&set, ScheduleMode::Logging);
        assert_eq!(schedule.total_turns(), 2);
        assert_eq!(positions(&schedule.records()[0]), vec![(1, 1), (2, 2)]);
        assert_eq!(positions(&schedule.records()[1]), vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn test_single_route_waves() {
        // h hops, n trains, one route: h + n - 1 turns.
        let r = route(&[0, 1, 2, 3]);
        let set = RouteSet::new(vec![r.clone(); 4], 1).expect("valid");
        let schedule = run_schedule(&set, ScheduleMode::Counting);
        assert_eq!(schedule.total_turns(), 3 + 4 - 1);
        assert_eq!(schedule.stalls(), 0);
    }

    #[test]
    fn test_same_wave_on_same_route_stalls() {
        // 0-1-4 (2 hops) and 0-2-3-4 (3 hops); trains 3 and 4 both take
        // the short route in the second wave.
        let short = route(&[0, 1, 4]);
        let long = route(&[0, 2, 3, 4]);
        let set = RouteSet::new(vec![short.clone(), long, short.clone(), short], 2)
            .expect("valid");
        let schedule = run_schedule(&set, ScheduleMode::Logging);

        assert_eq!(schedule.total_turns(), 4);
        assert_eq!(schedule.stalls(), 1);
        let records = schedule.records();
        assert_eq!(records.len(), 4);
        assert_eq!(positions(&records[0]), vec![(1, 1), (2, 2)]);
        assert_eq!(positions(&records[1]), vec![(1, 4), (2, 3), (3, 1)]);
        assert_eq!(positions(&records[2]), vec![(2, 4), (3, 4), (4, 1)]);
        assert_eq!(positions(&records[3]), vec![(4, 4)]);
    }

    #[test]
    fn test_counting_mode_records_nothing() {
        let set = RouteSet::single(route(&[0, 1, 2]));
        let counted = run_schedule(&set, ScheduleMode::Counting);
        let logged = run_schedule(&set, ScheduleMode::Logging);
        assert!(counted.records().is_empty());
        assert_eq!(counted.total_turns(), logged.total_turns());
    }

    #[test]
    fn test_write_log_format() {
        let mut net = Network::new();
        let a = net.add_station("A", 0, 0);
        let b = net.add_station("B", 1, 0);
        let c = net.add_station("C", 2, 0);
        let set = RouteSet::new(vec![route(&[a, b, c]), route(&[a, b, c])], 1).expect("valid");
        let schedule = run_schedule(&set, ScheduleMode::Logging);

        let mut out = Vec::new();
        schedule.write_log(&net, &mut out).expect("write to vec");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "Turn 1: T1-B\nTurn 2: T1-C T2-B\nTurn 3: T2-C\n"
        );
    }

    #[test]
    fn test_no_identical_trajectories_after_any_turn() {
        let r = route(&[0, 1, 2]);
        // Five copies, claimed as five distinct routes: everyone departs in
        // turn 1 and must queue behind each other.
        let set = RouteSet::new(vec![r; 5], 5).expect("valid");
        let schedule = run_schedule(&set, ScheduleMode::Logging);
        for record in schedule.records() {
            let at_first_hop = record.positions.iter().filter(|p| p.station == 1).count();
            assert!(at_first_hop <= 1, "turn {}", record.turn);
        }
        assert_eq!(schedule.total_turns(), 2 + 5 - 1);
        assert_eq!(schedule.stalls(), 4 + 3 + 2 + 1);
    }
}

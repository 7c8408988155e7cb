//! Turn-based dispatch simulation.
//!
//! - [`run_schedule`] — Wave departures, one station per turn, trajectory
//!   collision blocking
//! - [`DispatchReport`] — Serializable summary of a plan and its outcome

mod report;
mod scheduler;

pub use report::{DispatchReport, TrainRoute};
pub use scheduler::{run_schedule, Schedule, ScheduleMode, TrainPosition, TurnRecord};

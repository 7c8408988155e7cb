//! Station type.

use serde::{Deserialize, Serialize};

/// A named station with an integer grid coordinate.
///
/// Coordinates only feed the A* heuristic; travel between adjacent
/// stations always costs one hop.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Station;
///
/// let a = Station::new("A", 0, 0);
/// let b = Station::new("B", 3, -4);
/// assert_eq!(a.name(), "A");
/// assert_eq!(a.manhattan_distance(&b), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    name: String,
    x: i64,
    y: i64,
}

impl Station {
    /// Creates a station at `(x, y)`.
    pub fn new(name: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Station name (unique within a network).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// X coordinate.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// `(x, y)` as a tuple.
    pub fn coordinates(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Manhattan distance to another station.
    pub fn manhattan_distance(&self, other: &Station) -> u64 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

use serde::Serialize;
use std::fmt;

use super::CostMode;

/// Result of a successful path query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub mode: CostMode,
    /// Station names from origin to destination, both included
    pub stations: Vec<String>,
    /// `lines[i]` is the line ridden between `stations[i]` and `stations[i + 1]`
    pub lines: Vec<u32>,
    /// Accumulated cost at the destination in the unit of `mode`, transfer penalties included
    pub cost: f64,
    /// Physical distance travelled in kilometers, independent of `mode`
    pub distance: f64,
    /// Fare for `distance`, reported for fare queries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<u32>,
}

impl Route {
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.stations.first().map(String::as_str)
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.stations.last().map(String::as_str)
    }

    /// Positions in `stations` where the rider changes line
    #[must_use]
    pub fn transfers(&self) -> Vec<usize> {
        self.lines
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] != pair[1])
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// One-line summary of the metrics relevant to the query mode
    #[must_use]
    pub fn summary(&self) -> String {
        match self.mode {
            CostMode::Time => format!(
                "total time: {:.1} min, distance: {:.1} km",
                self.cost, self.distance
            ),
            CostMode::Distance => format!("total distance: {:.1} km", self.cost),
            CostMode::Fare => format!(
                "total distance: {:.1} km, fare: {}",
                self.distance,
                self.fare.unwrap_or_default()
            ),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, station) in self.stations.iter().enumerate() {
            f.write_str(station)?;
            let Some(&line) = self.lines.get(i) else {
                continue;
            };
            if i == 0 {
                write!(f, " (line {line})")?;
            } else if self.lines[i - 1] != line {
                write!(f, " (transfer: line {line})")?;
            }
            f.write_str(" -> ")?;
        }
        Ok(())
    }
}

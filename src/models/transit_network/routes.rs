use super::{Connections, Stations, TransitNetwork};
use crate::error::{NetworkError, Result};
use crate::logging;
use crate::routing::{CostMode, Route};

/// Extension trait for shortest-path queries on `TransitNetwork`
pub trait Routes {
    /// Cheapest route from `from` to `to` under `mode`
    ///
    /// A transfer penalty, in the unit of `mode`, is added to every hop whose
    /// line differs from the line the rider arrived on. The first hop is never
    /// penalised.
    ///
    /// # Errors
    /// `StationNotFound` for an unknown endpoint, `NoPathFound` when the
    /// destination is unreachable
    fn find_path(&self, from: &str, to: &str, mode: CostMode) -> Result<Route>;
}

impl Routes for TransitNetwork {
    fn find_path(&self, from: &str, to: &str, mode: CostMode) -> Result<Route> {
        let start = self
            .find_index(from)
            .ok_or_else(|| NetworkError::StationNotFound(from.trim().to_string()))?;
        let end = self
            .find_index(to)
            .ok_or_else(|| NetworkError::StationNotFound(to.trim().to_string()))?;

        log::debug!("finding {mode} path from '{}' to '{}'", from.trim(), to.trim());
        let route = logging::timed("find_path", || self.shortest_path(start, end, mode));

        match route {
            Some(route) => {
                log::debug!("found route over {} station(s), cost {}", route.stations.len(), route.cost);
                Ok(route)
            }
            None => Err(NetworkError::NoPathFound {
                from: from.trim().to_string(),
                to: to.trim().to_string(),
            }),
        }
    }
}

/// Per-station search state
struct Labels {
    cost: Vec<f64>,
    /// Physical distance along the current best path, tracked regardless of mode
    distance: Vec<f64>,
    previous: Vec<Option<usize>>,
    /// Line of the connection the station was reached by
    arrival_line: Vec<Option<u32>>,
    visited: Vec<bool>,
}

impl Labels {
    fn new(count: usize, start: usize) -> Self {
        let mut cost = vec![f64::INFINITY; count];
        cost[start] = 0.0;
        Self {
            cost,
            distance: vec![0.0; count],
            previous: vec![None; count],
            arrival_line: vec![None; count],
            visited: vec![false; count],
        }
    }

    /// Unvisited station with the lowest finite cost; ties go to the lowest index
    fn next_unvisited(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, &cost) in self.cost.iter().enumerate() {
            if self.visited[index] || !cost.is_finite() {
                continue;
            }
            if best.map_or(true, |b| cost < self.cost[b]) {
                best = Some(index);
            }
        }
        best
    }
}

impl TransitNetwork {
    fn shortest_path(&self, start: usize, end: usize, mode: CostMode) -> Option<Route> {
        let mut labels = Labels::new(self.station_count(), start);

        while let Some(u) = labels.next_unvisited() {
            labels.visited[u] = true;
            if u == end {
                break;
            }

            for connection in self.connections(u) {
                let v = connection.target;
                if labels.visited[v] {
                    continue;
                }

                let mut weight = connection.weight(mode, labels.distance[u], &self.fares);
                if labels.arrival_line[u].is_some_and(|line| line != connection.line) {
                    weight += self.transfer_penalty;
                }

                let candidate = labels.cost[u] + weight;
                if candidate < labels.cost[v] {
                    labels.cost[v] = candidate;
                    labels.previous[v] = Some(u);
                    labels.arrival_line[v] = Some(connection.line);
                    labels.distance[v] = labels.distance[u] + connection.distance;
                }
            }
        }

        if !labels.cost[end].is_finite() {
            return None;
        }
        self.reconstruct(&labels, start, end, mode)
    }

    fn reconstruct(&self, labels: &Labels, start: usize, end: usize, mode: CostMode) -> Option<Route> {
        let mut path = vec![end];
        let mut current = end;
        while current != start {
            current = labels.previous[current]?;
            path.push(current);
        }
        path.reverse();

        let stations = path
            .iter()
            .map(|&index| self.station_name(index).map(ToString::to_string))
            .collect::<Option<Vec<_>>>()?;
        let lines = path[1..]
            .iter()
            .map(|&index| labels.arrival_line[index])
            .collect::<Option<Vec<_>>>()?;

        let distance = labels.distance[end];
        Some(Route {
            mode,
            stations,
            lines,
            cost: labels.cost[end],
            distance,
            fare: (mode == CostMode::Fare).then(|| self.fares.fare(distance)),
        })
    }
}

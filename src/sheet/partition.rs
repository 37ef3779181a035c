use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use serde::Serialize;
use super::assignment::RoomAssignmentIndex;
use super::types::{floor_of, table_order, Housekeeper};

/// Guest floors taking part in the principal-floor ("dd") partition
pub const DD_FLOORS: RangeInclusive<u32> = 2..=10;

/// Rooms cleaned per (floor, housekeeper); rows are floors 2..=10, columns follow table order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorHouseMatrix {
    numbers: Vec<String>,
    counts: Vec<Vec<u32>>,
}

impl FloorHouseMatrix {
    /// Counts instructed rooms on floors 2..=10
    /// A room whose number matches no row, or lies outside the range, is ignored
    pub fn build(index: &RoomAssignmentIndex, housekeepers: &[Housekeeper]) -> Self {
        let numbers: Vec<String> = table_order(housekeepers)
            .into_iter()
            .map(|h| h.number.trim().to_string())
            .collect();
        let floor_count = DD_FLOORS.count();
        let mut counts = vec![vec![0u32; numbers.len()]; floor_count];

        for (room, number) in index.instructed() {
            let Some(floor) = floor_of(room) else { continue };
            if !DD_FLOORS.contains(&floor) {
                continue;
            }
            // First row holding the number, so a duplicate never double counts
            if let Some(col) = numbers.iter().position(|n| n == number) {
                counts[(floor - DD_FLOORS.start()) as usize][col] += 1;
            }
        }

        FloorHouseMatrix { numbers, counts }
    }

    /// Builds a matrix from explicit counts, one row per floor from 2 upward
    #[cfg(test)]
    pub fn from_counts(numbers: Vec<String>, counts: Vec<Vec<u32>>) -> Self {
        FloorHouseMatrix { numbers, counts }
    }

    pub fn floor_of_row(&self, row: usize) -> u32 {
        DD_FLOORS.start() + row as u32
    }

    pub fn count(&self, row: usize, col: usize) -> u32 {
        self.counts
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Columns with at least one room on the floor, in table order
    pub fn candidates(&self, row: usize) -> Vec<usize> {
        (0..self.numbers.len())
            .filter(|&col| self.count(row, col) > 0)
            .collect()
    }
}

/// Principal floors of one housekeeper row; empty means none
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DdAssignment {
    pub number: String,
    pub principal_floors: Vec<u32>,
}

/// Gives every floor with candidates to exactly one housekeeper
///
/// Floors with the fewest candidates are decided first. Each floor goes to the
/// candidate with the most rooms there among those still without a floor; when
/// every candidate already has one, the whole candidate set competes again.
/// That fallback is how a housekeeper can end up with several principal
/// floors, and it is kept as is rather than capped at one.
/// Ties go to the earlier table row.
pub fn partition_floors(matrix: &FloorHouseMatrix) -> Vec<DdAssignment> {
    let candidates: Vec<Vec<usize>> = (0..matrix.counts.len())
        .map(|row| matrix.candidates(row))
        .collect();

    let mut order: Vec<usize> = (0..candidates.len())
        .filter(|&row| !candidates[row].is_empty())
        .collect();
    order.sort_by_key(|&row| candidates[row].len());

    let (assigned, _used) = order.into_iter().fold(
        (vec![Vec::new(); matrix.numbers.len()], BTreeSet::new()),
        |(mut assigned, mut used): (Vec<Vec<u32>>, BTreeSet<usize>), row| {
            let fresh: Vec<usize> = candidates[row]
                .iter()
                .copied()
                .filter(|col| !used.contains(col))
                .collect();
            let pool = if fresh.is_empty() {
                log::debug!(
                    "floor {} has no candidate without a principal floor, reusing all {}",
                    matrix.floor_of_row(row),
                    candidates[row].len()
                );
                &candidates[row]
            } else {
                &fresh
            };

            let mut best = pool[0];
            for &col in &pool[1..] {
                if matrix.count(row, col) > matrix.count(row, best) {
                    best = col;
                }
            }

            assigned[best].push(matrix.floor_of_row(row));
            if assigned[best].len() == 1 {
                used.insert(best);
            }
            (assigned, used)
        },
    );

    matrix
        .numbers
        .iter()
        .zip(assigned)
        .map(|(number, principal_floors)| DdAssignment {
            number: number.clone(),
            principal_floors,
        })
        .collect()
}

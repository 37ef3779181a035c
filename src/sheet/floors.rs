use std::collections::BTreeSet;
use serde::Serialize;
use super::assignment::RoomAssignmentIndex;
use super::types::{floor_of, table_order, Housekeeper};

/// Floors a housekeeper has at least one room on, ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorAssignment {
    pub number: String,
    pub floors: Vec<u32>,
}

/// Resolves the floor list of every housekeeper row in table order
/// Muted rooms never contribute a floor, and the blank row gets no floors
pub fn resolve_floor_assignments(
    index: &RoomAssignmentIndex,
    housekeepers: &[Housekeeper],
) -> Vec<FloorAssignment> {
    table_order(housekeepers)
        .into_iter()
        .map(|h| {
            let floors: BTreeSet<u32> = match h.number() {
                Some(number) => index
                    .instructed()
                    .filter(|(_, n)| *n == number)
                    .filter_map(|(room, _)| floor_of(room))
                    .collect(),
                None => BTreeSet::new(),
            };
            FloorAssignment {
                number: h.number.trim().to_string(),
                floors: floors.into_iter().collect(),
            }
        })
        .collect()
}

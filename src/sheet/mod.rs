pub mod types;
pub mod assignment;
pub mod floors;
pub mod keys;
pub mod partition;
pub mod workload;
pub mod stats;
pub mod instruction;

use std::collections::BTreeMap;
use serde::Serialize;
use crate::error::SheetError;

pub use types::{Housekeeper, RoomCell, RoomKind, SheetNotes, SheetSnapshot, TimingConfig, MUTED};
pub use assignment::RoomAssignmentIndex;
pub use instruction::InstructionTable;
pub use keys::KEY_PRIORITY;
pub use stats::{CleanMethodCounts, RoomStats, Verdict};
pub use workload::Workload;

use assignment::count_rooms;
use floors::resolve_floor_assignments;
use keys::allocate_keys;
use partition::{partition_floors, FloorHouseMatrix};
use stats::{aggregate_stats, count_clean_methods};
use types::table_order;
use workload::estimate_workloads;

/// Derived columns of one housekeeper table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HousekeeperRow {
    pub order: usize,
    pub number: String,
    pub name: String,
    pub room_count: usize,
    pub floors: Vec<u32>,
    pub keys: String,
    pub dd_floors: Vec<u32>,
}

/// Everything the sheet shows, recomputed from one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub date: String,
    pub submitter: String,
    pub housekeepers: Vec<HousekeeperRow>,
    pub workloads: Vec<Workload>,
    pub stats: RoomStats,
    pub clean_methods: CleanMethodCounts,
    pub instruction: InstructionTable,
    pub notes: SheetNotes,
}

/// Runs every derivation over the snapshot
/// Floors are resolved before keys and the floor partition, which depend on them
pub fn summarize(snapshot: &SheetSnapshot) -> SheetSummary {
    let index = RoomAssignmentIndex::build(snapshot.assignment_pairs());

    let counts = count_rooms(&index, &snapshot.housekeepers);
    let floors = resolve_floor_assignments(&index, &snapshot.housekeepers);
    let keys = allocate_keys(&floors, &KEY_PRIORITY);
    let dd = partition_floors(&FloorHouseMatrix::build(&index, &snapshot.housekeepers));

    let housekeepers = table_order(&snapshot.housekeepers)
        .into_iter()
        .zip(counts)
        .zip(floors)
        .zip(keys)
        .zip(dd)
        .map(|((((h, count), floors), keys), dd)| HousekeeperRow {
            order: h.order,
            number: h.number.trim().to_string(),
            name: h.name.trim().to_string(),
            room_count: count.count,
            floors: floors.floors,
            keys: keys.key_string(),
            dd_floors: dd.principal_floors,
        })
        .collect();

    let workloads = estimate_workloads(
        &index,
        &snapshot.rooms,
        &snapshot.housekeepers,
        &snapshot.bath_numbers,
        &snapshot.timing,
    );
    let instruction = InstructionTable::build(&index, &snapshot.rooms, &snapshot.housekeepers, &workloads);
    let stats = aggregate_stats(room_values(snapshot));
    let clean_methods = count_clean_methods(&snapshot.rooms, &snapshot.notes);

    log::debug!(
        "summarized sheet: {} rooms ({} assigned), {} instructed, verdict {:?}",
        stats.room_count,
        index.len(),
        stats.instruction_count,
        stats.verdict
    );

    SheetSummary {
        date: snapshot.date.clone(),
        submitter: snapshot.submitter.clone(),
        housekeepers,
        workloads,
        stats,
        clean_methods,
        instruction,
        notes: snapshot.notes.clone(),
    }
}

/// One value per distinct room id, keyed the way the assignment index keys rooms:
/// blank ids are skipped and a repeated id keeps its last value
fn room_values(snapshot: &SheetSnapshot) -> Vec<&str> {
    let mut by_room: BTreeMap<&str, &str> = BTreeMap::new();
    for room in &snapshot.rooms {
        let id = room.room_id.trim();
        if !id.is_empty() {
            by_room.insert(id, room.assignment.as_str());
        }
    }
    by_room.into_values().collect()
}

/// Marks every room whose id starts with `floor` as muted ("0")
/// Returns how many rooms were changed
pub fn mute_floor(snapshot: &mut SheetSnapshot, floor: &str) -> Result<usize, SheetError> {
    let floor = floor.trim();
    if floor.is_empty() {
        return Err(SheetError::MissingFloor);
    }

    let mut changed = 0;
    for room in snapshot
        .rooms
        .iter_mut()
        .filter(|r| r.room_id.trim().starts_with(floor))
    {
        if !room.is_muted() {
            room.assignment = MUTED.to_string();
            changed += 1;
        }
    }
    log::info!("muted {} rooms on floor {}", changed, floor);
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(assignments: &[(&str, &str)], housekeepers: &[(&str, &str)]) -> SheetSnapshot {
        SheetSnapshot {
            rooms: assignments
                .iter()
                .map(|(id, n)| {
                    let mut cell = RoomCell::new(id, RoomKind::Single);
                    cell.assignment = n.to_string();
                    cell
                })
                .collect(),
            housekeepers: housekeepers
                .iter()
                .enumerate()
                .map(|(i, (n, name))| Housekeeper::new(i, n, name))
                .collect(),
            timing: TimingConfig::new(20, 30, 15),
            ..SheetSnapshot::default()
        }
    }

    #[test]
    fn two_housekeepers_on_separate_floors() {
        let snap = snapshot(
            &[("201", "1"), ("202", "1"), ("301", "2")],
            &[("1", "Alice"), ("2", "Bob")],
        );
        let summary = summarize(&snap);

        let rows: Vec<(&str, usize, Vec<u32>, &str, Vec<u32>)> = summary
            .housekeepers
            .iter()
            .map(|h| (h.number.as_str(), h.room_count, h.floors.clone(), h.keys.as_str(), h.dd_floors.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("1", 2, vec![2], "2A", vec![2]),
                ("2", 1, vec![3], "3A", vec![3]),
            ]
        );
        assert_eq!(summary.stats.verdict, Verdict::OK);
        assert_eq!(summary.workloads[0].end_time, "10:10");
        assert_eq!(summary.instruction.columns[1].name, "Bob");
    }

    #[test]
    fn blank_trailing_row_gets_empty_columns() {
        let snap = snapshot(&[("201", "1")], &[("1", "Alice"), ("", "")]);
        let summary = summarize(&snap);
        let blank = &summary.housekeepers[1];
        assert_eq!(blank.room_count, 0);
        assert!(blank.floors.is_empty());
        assert_eq!(blank.keys, "");
        assert!(blank.dd_floors.is_empty());
    }

    #[test]
    fn summarize_is_idempotent() {
        let snap = snapshot(
            &[("201", "1"), ("202", "2"), ("301", "2"), ("302", "3"), ("303", "0"), ("304", "")],
            &[("1", "A"), ("2", "B"), ("3", "C")],
        );
        assert_eq!(summarize(&snap), summarize(&snap));
    }

    #[test]
    fn mute_floor_sets_sentinel_by_prefix() {
        let mut snap = snapshot(&[("501", "1"), ("502", ""), ("601", "2"), ("503", "0")], &[]);
        let changed = mute_floor(&mut snap, "5").unwrap();
        assert_eq!(changed, 2);
        let values: Vec<&str> = snap.rooms.iter().map(|r| r.assignment.as_str()).collect();
        assert_eq!(values, vec!["0", "0", "2", "0"]);

        let stats = summarize(&snap).stats;
        assert_eq!(stats.muted_count, 3);
        assert_eq!(stats.verdict, Verdict::OK);
    }

    #[test]
    fn stats_ignore_blank_and_repeated_room_ids() {
        let snap = snapshot(
            &[("201", "1"), ("201", "1"), ("  ", ""), ("202", "")],
            &[("1", "Alice")],
        );
        let summary = summarize(&snap);
        assert_eq!(summary.stats.room_count, 2);
        assert_eq!(summary.stats.instruction_count, 1);
        assert_eq!(summary.housekeepers[0].room_count, 1);
    }

    #[test]
    fn bath_number_without_a_row_reaches_the_instruction_table() {
        let mut snap = snapshot(&[("201", "1"), ("301", "7")], &[("1", "Alice")]);
        snap.bath_numbers = vec!["7".into()];
        let summary = summarize(&snap);
        let column = &summary.instruction.columns[1];
        assert_eq!(column.number, "7");
        assert_eq!(column.name, "None");
        assert!(column.bath);
        assert_eq!(column.end_time, "10:05");
    }

    #[test]
    fn mute_floor_requires_a_floor() {
        let mut snap = snapshot(&[("501", "1")], &[]);
        assert!(matches!(mute_floor(&mut snap, "  "), Err(SheetError::MissingFloor)));
        assert_eq!(snap.rooms[0].assignment, "1");
    }
}

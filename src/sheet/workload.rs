use std::collections::HashMap;
use chrono::{Duration, NaiveTime};
use serde::Serialize;
use super::assignment::RoomAssignmentIndex;
use super::types::{Housekeeper, RoomCell, RoomKind, TimingConfig};

/// Shift start every estimate counts from (09:30)
pub const SHIFT_START: (u32, u32) = (9, 30);

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Room-type counts and finish estimate for one housekeeper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workload {
    pub number: String,
    pub single_rooms: u32,
    pub twin_rooms: u32,
    pub eco_rooms: u32,
    pub bath: bool,
    pub total_minutes: u64,
    pub end_time: String,
}

/// Formats shift start + minutes as HH:MM on a 24-hour clock, wrapping past midnight
pub fn estimate_end_time(total_minutes: u64) -> String {
    let Some(start) = NaiveTime::from_hms_opt(SHIFT_START.0, SHIFT_START.1, 0) else {
        return String::new();
    };
    let (end, _) = start.overflowing_add_signed(Duration::minutes((total_minutes % MINUTES_PER_DAY) as i64));
    end.format("%H:%M").to_string()
}

/// Estimates the workload of every housekeeper number with at least one instructed room
/// Eco and amenity rooms take the eco timing whatever their type; rooms that are
/// neither single nor twin add no time. Bath applies when the number's row is
/// flagged or the number is listed in `bath_numbers`
pub fn estimate_workloads(
    index: &RoomAssignmentIndex,
    rooms: &[RoomCell],
    housekeepers: &[Housekeeper],
    bath_numbers: &[String],
    timing: &TimingConfig,
) -> Vec<Workload> {
    let cells: HashMap<&str, &RoomCell> = rooms
        .iter()
        .map(|r| (r.room_id.trim(), r))
        .collect();

    index
        .assigned_numbers()
        .into_iter()
        .map(|number| {
            let (mut single_rooms, mut twin_rooms, mut eco_rooms) = (0u32, 0u32, 0u32);
            for (room, _) in index.instructed().filter(|(_, n)| *n == number) {
                let Some(cell) = cells.get(room) else { continue };
                if cell.is_eco_equivalent() {
                    eco_rooms += 1;
                } else {
                    match cell.kind {
                        RoomKind::Single => single_rooms += 1,
                        RoomKind::Twin => twin_rooms += 1,
                        RoomKind::Other => {}
                    }
                }
            }

            let bath = housekeepers
                .iter()
                .any(|h| h.bath && h.number() == Some(number.as_str()))
                || bath_numbers.iter().any(|b| b.trim() == number);
            // Timings are unbounded user input
            let total_minutes = u64::from(single_rooms) * u64::from(timing.single_minutes)
                + u64::from(twin_rooms) * u64::from(timing.twin_minutes)
                + u64::from(eco_rooms) * u64::from(timing.eco_minutes)
                + if bath { u64::from(timing.bath_minutes) } else { 0 };

            Workload {
                end_time: estimate_end_time(total_minutes),
                number,
                single_rooms,
                twin_rooms,
                eco_rooms,
                bath,
                total_minutes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, number: &str, kind: RoomKind) -> RoomCell {
        let mut cell = RoomCell::new(id, kind);
        cell.assignment = number.to_string();
        cell
    }

    fn estimate(rooms: &[RoomCell], housekeepers: &[Housekeeper], timing: TimingConfig) -> Vec<Workload> {
        let index = RoomAssignmentIndex::build(rooms.iter().map(|r| (r.room_id.as_str(), r.assignment.as_str())));
        estimate_workloads(&index, rooms, housekeepers, &[], &timing)
    }

    #[test]
    fn two_singles_one_twin_and_bath_end_at_10_55() {
        let rooms = vec![
            room("201", "1", RoomKind::Single),
            room("202", "1", RoomKind::Single),
            room("203", "1", RoomKind::Twin),
        ];
        let mut alice = Housekeeper::new(0, "1", "Alice");
        alice.bath = true;
        let workloads = estimate(&rooms, &[alice], TimingConfig::new(20, 30, 15));
        assert_eq!(workloads.len(), 1);
        assert_eq!(workloads[0].total_minutes, 85);
        assert_eq!(workloads[0].end_time, "10:55");
    }

    #[test]
    fn eco_and_amenity_take_precedence_over_type() {
        let mut eco = room("201", "1", RoomKind::Twin);
        eco.is_eco = true;
        let mut amenity = room("202", "1", RoomKind::Single);
        amenity.is_amenity = true;
        let mut duvet = room("203", "1", RoomKind::Single);
        duvet.is_duvet = true;
        let rooms = vec![eco, amenity, duvet, room("204", "1", RoomKind::Other)];

        let workloads = estimate(&rooms, &[Housekeeper::new(0, "1", "A")], TimingConfig::new(20, 30, 15));
        let w = &workloads[0];
        assert_eq!((w.single_rooms, w.twin_rooms, w.eco_rooms), (1, 0, 2));
        assert_eq!(w.total_minutes, 20 + 2 * 5);
        assert_eq!(w.end_time, "10:00");
        assert!(!w.bath);
    }

    #[test]
    fn muted_and_unassigned_numbers_are_skipped() {
        let rooms = vec![
            room("201", "0", RoomKind::Single),
            room("202", "", RoomKind::Single),
            room("203", "10", RoomKind::Single),
            room("204", "2", RoomKind::Twin),
        ];
        let workloads = estimate(&rooms, &[], TimingConfig::new(20, 30, 15));
        let numbers: Vec<&str> = workloads.iter().map(|w| w.number.as_str()).collect();
        assert_eq!(numbers, vec!["2", "10"]);
    }

    #[test]
    fn bath_applies_to_numbers_without_a_row() {
        let rooms = vec![room("201", "1", RoomKind::Single), room("301", "7", RoomKind::Single)];
        let index = RoomAssignmentIndex::build(rooms.iter().map(|r| (r.room_id.as_str(), r.assignment.as_str())));
        let workloads = estimate_workloads(
            &index,
            &rooms,
            &[Housekeeper::new(0, "1", "A")],
            &[" 7 ".to_string()],
            &TimingConfig::new(20, 30, 15),
        );
        assert!(!workloads[0].bath);
        assert!(workloads[1].bath);
        assert_eq!(workloads[1].total_minutes, 35);
        assert_eq!(workloads[1].end_time, "10:05");
    }

    #[test]
    fn end_time_wraps_past_midnight() {
        assert_eq!(estimate_end_time(0), "09:30");
        assert_eq!(estimate_end_time(30), "10:00");
        assert_eq!(estimate_end_time(14 * 60 + 45), "00:15");
        assert_eq!(estimate_end_time(3 * 24 * 60 + 30), "10:00");
    }

    #[test]
    fn huge_timings_do_not_overflow() {
        let rooms = vec![
            room("201", "1", RoomKind::Single),
            room("202", "1", RoomKind::Single),
        ];
        let mut a = Housekeeper::new(0, "1", "A");
        a.bath = true;
        let workloads = estimate(&rooms, &[a], TimingConfig::new(4_000_000_000, 0, u32::MAX));
        let expected = 2 * 4_000_000_000u64 + u64::from(u32::MAX);
        assert_eq!(workloads[0].total_minutes, expected);
        assert_eq!(workloads[0].end_time, estimate_end_time(expected % (24 * 60)));
    }
}

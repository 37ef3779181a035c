use serde::Serialize;
use super::types::{RoomCell, SheetNotes, MUTED};

/// Whether every all-clean room also shows up as an instructed one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    OK,
    NG,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomStats {
    pub room_count: usize,
    pub muted_count: usize,
    pub all_clean_count: usize,
    pub instruction_count: usize,
    pub verdict: Verdict,
}

/// Totals over every room value on the sheet
/// all clean = rooms - muted, instructed = non-blank and not muted
pub fn aggregate_stats<'a, I>(values: I) -> RoomStats
where
    I: IntoIterator<Item = &'a str>,
{
    let (mut room_count, mut muted_count, mut instruction_count) = (0, 0, 0);
    for value in values {
        let value = value.trim();
        room_count += 1;
        if value == MUTED {
            muted_count += 1;
        } else if !value.is_empty() {
            instruction_count += 1;
        }
    }

    let all_clean_count = room_count - muted_count;
    let verdict = if all_clean_count == instruction_count {
        Verdict::OK
    } else {
        Verdict::NG
    };

    RoomStats {
        room_count,
        muted_count,
        all_clean_count,
        instruction_count,
        verdict,
    }
}

/// Number of rooms flagged per cleaning method, plus multiple-night stays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanMethodCounts {
    pub eco: usize,
    pub amenity: usize,
    pub duvet: usize,
    pub multiple_night: usize,
}

pub fn count_clean_methods(rooms: &[RoomCell], notes: &SheetNotes) -> CleanMethodCounts {
    CleanMethodCounts {
        eco: rooms.iter().filter(|r| r.is_eco).count(),
        amenity: rooms.iter().filter(|r| r.is_amenity).count(),
        duvet: rooms.iter().filter(|r| r.is_duvet).count(),
        multiple_night: notes
            .multiple_night_rooms
            .iter()
            .filter(|r| !r.trim().is_empty())
            .count(),
    }
}

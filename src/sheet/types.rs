use serde::{Deserialize, Serialize};

/// Assignment value that excludes a room from instructed cleaning
pub const MUTED: &str = "0";

/// Minutes budgeted for an eco or amenity room
pub const ECO_MINUTES: u32 = 5;

/// Room type from the hotel's room list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoomKind {
    #[serde(rename = "S")]
    Single,
    #[serde(rename = "T")]
    Twin,
    #[default]
    #[serde(other)]
    Other,
}

impl RoomKind {
    pub fn from_code(code: &str) -> RoomKind {
        match code.trim() {
            "S" => RoomKind::Single,
            "T" => RoomKind::Twin,
            _ => RoomKind::Other,
        }
    }
}

/// Derives the floor from a room id (e.g. "1417" -> 14)
/// Only the leading digits are considered; ids without any yield None
pub fn floor_of(room_id: &str) -> Option<u32> {
    let digits: String = room_id
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().map(|n| n / 100)
}

/// One room of the sheet with its raw assignment text and cleaning flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCell {
    pub room_id: String,
    #[serde(default)]
    pub assignment: String,
    #[serde(default)]
    pub is_eco: bool,
    #[serde(default)]
    pub is_amenity: bool,
    #[serde(default)]
    pub is_duvet: bool,
    #[serde(default)]
    pub kind: RoomKind,
}

impl RoomCell {
    pub fn new(room_id: &str, kind: RoomKind) -> Self {
        RoomCell {
            room_id: room_id.to_string(),
            assignment: String::new(),
            is_eco: false,
            is_amenity: false,
            is_duvet: false,
            kind,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.assignment.trim() == MUTED
    }

    /// Eco and amenity rooms share the reduced eco timing
    pub fn is_eco_equivalent(&self) -> bool {
        self.is_eco || self.is_amenity
    }
}

/// A row of the housekeeper table
/// `order` is the row position and breaks ties in key allocation and floor partitioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Housekeeper {
    pub order: usize,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bath: bool,
}

impl Housekeeper {
    pub fn new(order: usize, number: &str, name: &str) -> Self {
        Housekeeper {
            order,
            number: number.to_string(),
            name: name.to_string(),
            bath: false,
        }
    }

    /// Trimmed number, None for the blank trailing row
    pub fn number(&self) -> Option<&str> {
        let value = self.number.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Returns housekeepers sorted by their table order
/// Rows sharing an order keep their slice position
pub fn table_order(housekeepers: &[Housekeeper]) -> Vec<&Housekeeper> {
    let mut rows: Vec<&Housekeeper> = housekeepers.iter().collect();
    rows.sort_by_key(|h| h.order);
    rows
}

/// Per room-type cleaning durations in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default)]
    pub single_minutes: u32,
    #[serde(default)]
    pub twin_minutes: u32,
    #[serde(default)]
    pub bath_minutes: u32,
    #[serde(default = "default_eco_minutes")]
    pub eco_minutes: u32,
}

fn default_eco_minutes() -> u32 {
    ECO_MINUTES
}

impl TimingConfig {
    pub fn new(single_minutes: u32, twin_minutes: u32, bath_minutes: u32) -> Self {
        TimingConfig {
            single_minutes,
            twin_minutes,
            bath_minutes,
            eco_minutes: ECO_MINUTES,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig::new(0, 0, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remark {
    pub room: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomChange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MustClean {
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub number: String,
    pub message: String,
}

/// Free-form tables carried through to the printed sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetNotes {
    #[serde(default)]
    pub remarks: Vec<Remark>,
    #[serde(default)]
    pub room_changes: Vec<RoomChange>,
    #[serde(default)]
    pub out_in: Vec<String>,
    #[serde(default)]
    pub must_clean: Vec<MustClean>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub multiple_night_rooms: Vec<String>,
}

/// Snapshot of the whole form that every derivation reads from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub submitter: String,
    #[serde(default)]
    pub rooms: Vec<RoomCell>,
    #[serde(default)]
    pub housekeepers: Vec<Housekeeper>,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub notes: SheetNotes,
    /// Numbers ticked for bath, including instructed numbers with no table row
    #[serde(default)]
    pub bath_numbers: Vec<String>,
}

impl SheetSnapshot {
    /// (room id, raw assignment) pairs in room order
    pub fn assignment_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rooms
            .iter()
            .map(|r| (r.room_id.as_str(), r.assignment.as_str()))
    }
}

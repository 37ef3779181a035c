use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::sheet::{types::floor_of, RoomCell, RoomKind, SheetSnapshot, TimingConfig};

/// Room list file: header row, then `room,type` with type S or T
pub const ROOM_INFO_FILE: &str = "room_info.csv";
/// Default durations: header row, then `type,minutes` with type S, T or B (bath)
pub const TIMES_BY_TYPE_FILE: &str = "times_by_type.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRoom {
    pub room_id: String,
    pub kind: RoomKind,
}

/// The hotel's rooms and default timings, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCatalog {
    pub rooms: Vec<CatalogRoom>,
    pub timing: TimingConfig,
}

/// Rooms of one floor as laid out on the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorRow {
    pub floor: u32,
    pub rooms: Vec<String>,
}

impl RoomCatalog {
    pub fn kind_of(&self, room_id: &str) -> RoomKind {
        self.rooms
            .iter()
            .find(|r| r.room_id == room_id)
            .map(|r| r.kind)
            .unwrap_or_default()
    }

    /// Groups rooms by floor, top floor first, keeping file order within a floor
    pub fn floors_descending(&self) -> Vec<FloorRow> {
        let mut floors: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for room in &self.rooms {
            if let Some(floor) = floor_of(&room.room_id) {
                floors.entry(floor).or_default().push(room.room_id.clone());
            }
        }
        floors
            .into_iter()
            .rev()
            .map(|(floor, rooms)| FloorRow { floor, rooms })
            .collect()
    }

    /// Blank sheet with every catalog room and the default timings
    pub fn empty_snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            rooms: self
                .rooms
                .iter()
                .map(|r| RoomCell::new(&r.room_id, r.kind))
                .collect(),
            timing: self.timing,
            ..SheetSnapshot::default()
        }
    }
}

/// Parses the room list; blank room ids are skipped
pub fn read_room_info<R: Read>(reader: R) -> Result<Vec<CatalogRoom>, SheetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut rooms = Vec::new();

    for result in reader.records() {
        let record = result?;
        let room_id = record.get(0).unwrap_or("").trim();
        if room_id.is_empty() {
            continue;
        }
        rooms.push(CatalogRoom {
            room_id: room_id.to_string(),
            kind: RoomKind::from_code(record.get(1).unwrap_or("")),
        });
    }

    Ok(rooms)
}

/// Parses a number, returning 0 if empty or invalid
pub(crate) fn parse_minutes(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

/// Parses default durations; unknown types are ignored and missing ones stay 0
pub fn read_times_by_type<R: Read>(reader: R) -> Result<TimingConfig, SheetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut timing = TimingConfig::default();

    for result in reader.records() {
        let record = result?;
        let minutes = parse_minutes(record.get(1).unwrap_or(""));
        match record.get(0).unwrap_or("").trim() {
            "S" => timing.single_minutes = minutes,
            "T" => timing.twin_minutes = minutes,
            "B" => timing.bath_minutes = minutes,
            other => log::warn!("ignoring unknown room type {:?} in timing file", other),
        }
    }

    Ok(timing)
}

/// Loads the catalog from a data directory holding both CSV files
/// A missing timing file falls back to zero durations
pub fn load_catalog<P: AsRef<Path>>(data_dir: P) -> Result<RoomCatalog, SheetError> {
    let data_dir = data_dir.as_ref();
    let rooms = read_room_info(std::fs::File::open(data_dir.join(ROOM_INFO_FILE))?)?;

    let times_path = data_dir.join(TIMES_BY_TYPE_FILE);
    let timing = if times_path.exists() {
        read_times_by_type(std::fs::File::open(times_path)?)?
    } else {
        log::warn!("{} not found, timings default to 0", times_path.display());
        TimingConfig::default()
    };

    log::info!("loaded {} rooms from {}", rooms.len(), data_dir.display());
    Ok(RoomCatalog { rooms, timing })
}

/// Parses a saved worklog; missing fields take their defaults
pub fn read_snapshot<R: Read>(reader: R) -> Result<SheetSnapshot, SheetError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads a saved sheet snapshot from a JSON file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<SheetSnapshot, SheetError> {
    let file = std::fs::File::open(path.as_ref())?;
    let snapshot = read_snapshot(std::io::BufReader::new(file))?;
    log::info!("loaded {} rooms from {}", snapshot.rooms.len(), path.as_ref().display());
    Ok(snapshot)
}

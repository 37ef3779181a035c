use std::collections::HashMap;
use serde::Serialize;
use super::assignment::{numeric_key, RoomAssignmentIndex};
use super::types::{table_order, Housekeeper, RoomCell};
use super::workload::Workload;

/// Shown in the header when a column's number has no named row
pub const UNNAMED: &str = "None";

/// Room numbers printed in red on the sheet end in one of these
const FLAGGED_SUFFIXES: [&str; 3] = ["14", "16", "17"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EcoKind {
    Eco,
    Amenity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionRoom {
    pub room_id: String,
    pub flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco: Option<EcoKind>,
}

impl InstructionRoom {
    fn new(room_id: &str, eco: Option<EcoKind>) -> Self {
        InstructionRoom {
            room_id: room_id.to_string(),
            flagged: is_flagged_room(room_id),
            eco,
        }
    }
}

pub fn is_flagged_room(room_id: &str) -> bool {
    FLAGGED_SUFFIXES.iter().any(|s| room_id.ends_with(s))
}

/// One housekeeper's column of the clean instruction table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionColumn {
    pub number: String,
    pub name: String,
    pub rooms: Vec<InstructionRoom>,
    pub eco_rooms: Vec<InstructionRoom>,
    pub end_time: String,
    pub bath: bool,
}

/// Printable summary: one column per instructed housekeeper, sorted by number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstructionTable {
    pub columns: Vec<InstructionColumn>,
}

impl InstructionTable {
    pub fn build(
        index: &RoomAssignmentIndex,
        rooms: &[RoomCell],
        housekeepers: &[Housekeeper],
        workloads: &[Workload],
    ) -> Self {
        let mut names: HashMap<&str, &str> = HashMap::new();
        for h in table_order(housekeepers) {
            if let Some(number) = h.number() {
                let name = h.name.trim();
                names.insert(number, if name.is_empty() { UNNAMED } else { name });
            }
        }
        let cells: HashMap<&str, &RoomCell> = rooms.iter().map(|r| (r.room_id.trim(), r)).collect();

        let columns = index
            .assigned_numbers()
            .into_iter()
            .map(|number| {
                let mut normal = Vec::new();
                let mut eco_rooms = Vec::new();
                for (room, _) in index.instructed().filter(|(_, n)| *n == number) {
                    let cell = cells.get(room);
                    match cell {
                        Some(c) if c.is_eco => eco_rooms.push(InstructionRoom::new(room, Some(EcoKind::Eco))),
                        Some(c) if c.is_amenity => {
                            eco_rooms.push(InstructionRoom::new(room, Some(EcoKind::Amenity)))
                        }
                        _ => normal.push(InstructionRoom::new(room, None)),
                    }
                }
                normal.sort_by(|a, b| numeric_key(&a.room_id).cmp(&numeric_key(&b.room_id)));
                eco_rooms.sort_by(|a, b| numeric_key(&a.room_id).cmp(&numeric_key(&b.room_id)));

                let workload = workloads.iter().find(|w| w.number == number);
                let bath = workload.map(|w| w.bath).unwrap_or(false);

                InstructionColumn {
                    name: names.get(number.as_str()).copied().unwrap_or(UNNAMED).to_string(),
                    rooms: normal,
                    eco_rooms,
                    end_time: workload.map(|w| w.end_time.clone()).unwrap_or_default(),
                    bath,
                    number,
                }
            })
            .collect();

        InstructionTable { columns }
    }

    pub fn room_rows(&self) -> usize {
        self.columns.iter().map(|c| c.rooms.len()).max().unwrap_or(0)
    }

    pub fn eco_rows(&self) -> usize {
        self.columns.iter().map(|c| c.eco_rooms.len()).max().unwrap_or(0)
    }

    /// Flattens the table into text rows: header, rooms, eco rooms, end time, bath
    /// The first cell of each row is its label
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::new();

        let mut header = vec![String::new()];
        header.extend(self.columns.iter().map(|c| c.name.clone()));
        rows.push(header);

        for i in 0..self.room_rows() {
            let label = if i == 0 { "Rooms" } else { "" };
            let mut row = vec![label.to_string()];
            row.extend(self.columns.iter().map(|c| {
                c.rooms.get(i).map(|r| r.room_id.clone()).unwrap_or_default()
            }));
            rows.push(row);
        }

        for i in 0..self.eco_rows() {
            let label = if i == 0 { "Eco rooms" } else { "" };
            let mut row = vec![label.to_string()];
            row.extend(self.columns.iter().map(|c| {
                c.eco_rooms.get(i).map(|r| r.room_id.clone()).unwrap_or_default()
            }));
            rows.push(row);
        }

        let mut end = vec!["End time".to_string()];
        end.extend(self.columns.iter().map(|c| c.end_time.clone()));
        rows.push(end);

        let mut bath = vec!["Bath".to_string()];
        bath.extend(
            self.columns
                .iter()
                .map(|c| if c.bath { "o".to_string() } else { String::new() }),
        );
        rows.push(bath);

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::types::{RoomKind, TimingConfig};
    use crate::sheet::workload::estimate_workloads;

    fn sheet() -> (Vec<RoomCell>, Vec<Housekeeper>) {
        let assignments = [
            ("1417", "2", false, false),
            ("202", "1", false, false),
            ("201", "1", true, false),
            ("203", "1", false, true),
            ("204", "0", false, false),
            ("1016", "1", false, false),
        ];
        let rooms = assignments
            .iter()
            .map(|(id, n, eco, amenity)| {
                let mut cell = RoomCell::new(id, RoomKind::Single);
                cell.assignment = n.to_string();
                cell.is_eco = *eco;
                cell.is_amenity = *amenity;
                cell
            })
            .collect();
        let mut bob = Housekeeper::new(1, "2", "");
        bob.bath = true;
        (rooms, vec![Housekeeper::new(0, "1", "Alice"), bob])
    }

    fn table() -> InstructionTable {
        let (rooms, housekeepers) = sheet();
        let index = RoomAssignmentIndex::build(rooms.iter().map(|r| (r.room_id.as_str(), r.assignment.as_str())));
        let workloads = estimate_workloads(&index, &rooms, &housekeepers, &[], &TimingConfig::new(20, 30, 15));
        InstructionTable::build(&index, &rooms, &housekeepers, &workloads)
    }

    #[test]
    fn columns_split_normal_and_eco_rooms() {
        let table = table();
        assert_eq!(table.columns.len(), 2);

        let alice = &table.columns[0];
        assert_eq!(alice.name, "Alice");
        let rooms: Vec<&str> = alice.rooms.iter().map(|r| r.room_id.as_str()).collect();
        assert_eq!(rooms, vec!["202", "1016"]);
        let eco: Vec<(&str, Option<EcoKind>)> =
            alice.eco_rooms.iter().map(|r| (r.room_id.as_str(), r.eco)).collect();
        assert_eq!(eco, vec![("201", Some(EcoKind::Eco)), ("203", Some(EcoKind::Amenity))]);
        assert!(alice.rooms[1].flagged);
        assert_eq!(alice.end_time, "10:20");
        assert!(!alice.bath);
    }

    #[test]
    fn blank_name_shows_none_and_bath_is_marked() {
        let table = table();
        let bob = &table.columns[1];
        assert_eq!(bob.name, UNNAMED);
        assert!(bob.bath);
        assert!(bob.rooms[0].flagged);
        assert_eq!(bob.end_time, "10:05");
    }

    #[test]
    fn text_rows_are_padded_per_section() {
        let rows = table().text_rows();
        assert_eq!(rows[0], vec!["", "Alice", "None"]);
        assert_eq!(rows[1], vec!["Rooms", "202", "1417"]);
        assert_eq!(rows[2], vec!["", "1016", ""]);
        assert_eq!(rows[3], vec!["Eco rooms", "201", ""]);
        assert_eq!(rows[4], vec!["", "203", ""]);
        assert_eq!(rows[5], vec!["End time", "10:20", "10:05"]);
        assert_eq!(rows[6], vec!["Bath", "", "o"]);
    }

    #[test]
    fn flagged_suffixes() {
        assert!(is_flagged_room("514"));
        assert!(is_flagged_room("1017"));
        assert!(!is_flagged_room("515"));
    }
}

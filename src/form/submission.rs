use std::collections::{HashMap, HashSet};

use crate::error::{SheetError, SheetWarning};
use crate::parser::{parse_minutes, RoomCatalog};
use crate::sheet::types::{Contact, MustClean, Remark, RoomChange};
use crate::sheet::{Housekeeper, RoomCell, SheetNotes, SheetSnapshot, TimingConfig, MUTED};

/// Highest housekeeper row index read from a posted form
pub const MAX_HOUSEKEEPER_ROWS: usize = 100;

/// Posted form fields in arrival order; repeated names are kept
pub struct FormFields<'a> {
    pairs: &'a [(String, String)],
}

impl<'a> FormFields<'a> {
    pub fn new(pairs: &'a [(String, String)]) -> Self {
        FormFields { pairs }
    }

    /// First value of a field, trimmed; empty when absent
    pub fn get(&self, name: &str) -> &'a str {
        let pairs: &'a [(String, String)] = self.pairs;
        pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .unwrap_or("")
    }

    /// Every value posted under a repeated field name, trimmed
    pub fn get_list(&self, name: &str) -> Vec<&'a str> {
        let pairs: &'a [(String, String)] = self.pairs;
        pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .collect()
    }

    /// (suffix, value) for every field starting with `prefix`
    fn with_prefix(&self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let pairs: &'a [(String, String)] = self.pairs;
        pairs
            .iter()
            .filter_map(move |(k, v)| k.strip_prefix(prefix).map(|suffix| (suffix, v.trim())))
    }
}

/// Builds a snapshot from the posted sheet form
///
/// Rooms come from the catalog in its order, with `room_<id>` supplying the
/// assignment; posted rooms the catalog does not know are appended. Housekeeper
/// rows `no_<i>`/`name_<i>` keep their index as table order, and rows with both
/// fields blank are dropped.
pub fn snapshot_from_form(pairs: &[(String, String)], catalog: &RoomCatalog) -> SheetSnapshot {
    let fields = FormFields::new(pairs);

    // room_change_* fields share the prefix; room ids never contain '_'
    let posted: Vec<(&str, &str)> = fields
        .with_prefix("room_")
        .filter(|(id, _)| !id.is_empty() && !id.contains('_'))
        .collect();
    let assignments: HashMap<&str, &str> = posted.iter().copied().collect();

    let eco: HashSet<&str> = fields.get_list("eco_room").into_iter().filter(|v| !v.is_empty()).collect();
    let amenity: HashSet<&str> = fields.get_list("amenity").into_iter().filter(|v| !v.is_empty()).collect();
    let duvet: HashSet<&str> = fields.get_list("duvet").into_iter().filter(|v| !v.is_empty()).collect();

    let mut rooms: Vec<RoomCell> = catalog
        .rooms
        .iter()
        .map(|r| RoomCell::new(&r.room_id, r.kind))
        .collect();
    for (room_id, _) in &posted {
        if !rooms.iter().any(|r| r.room_id == *room_id) {
            rooms.push(RoomCell::new(room_id, catalog.kind_of(room_id)));
        }
    }
    for room in &mut rooms {
        let id = room.room_id.as_str();
        room.assignment = assignments.get(id).copied().unwrap_or("").to_string();
        room.is_eco = eco.contains(id);
        room.is_amenity = amenity.contains(id);
        room.is_duvet = duvet.contains(id);
    }

    let bath: HashSet<&str> = fields
        .get_list("bath")
        .into_iter()
        .filter(|v| !v.is_empty() && *v != MUTED)
        .collect();
    let housekeepers: Vec<Housekeeper> = (1..MAX_HOUSEKEEPER_ROWS)
        .filter_map(|i| {
            let number = fields.get(&format!("no_{}", i));
            let name = fields.get(&format!("name_{}", i));
            if number.is_empty() && name.is_empty() {
                return None;
            }
            let mut row = Housekeeper::new(i - 1, number, name);
            row.bath = bath.contains(number);
            Some(row)
        })
        .collect();

    let mut bath_numbers: Vec<String> = bath.iter().map(|n| n.to_string()).collect();
    bath_numbers.sort();

    let timing = TimingConfig::new(
        parse_minutes(fields.get("single_time")),
        parse_minutes(fields.get("twin_time")),
        parse_minutes(fields.get("bath_time")),
    );

    SheetSnapshot {
        date: fields.get("date").to_string(),
        submitter: fields.get("name").to_string(),
        rooms,
        housekeepers,
        timing,
        notes: notes_from_form(&fields),
        bath_numbers,
    }
}

/// Collects the free-form tables, keeping only rows the sheet would print
fn notes_from_form(fields: &FormFields<'_>) -> SheetNotes {
    let mut remarks = Vec::new();
    for (index, room) in fields.with_prefix("remark_room_") {
        let comment = fields.get(&format!("remark_{}", index));
        if !room.is_empty() && !comment.is_empty() {
            remarks.push(Remark { room: room.to_string(), comment: comment.to_string() });
        }
    }

    let room_changes = fields
        .get_list("room_change_original")
        .into_iter()
        .zip(fields.get_list("room_change_destination"))
        .filter(|(from, to)| !from.is_empty() && !to.is_empty())
        .map(|(from, to)| RoomChange { from: from.to_string(), to: to.to_string() })
        .collect();

    let out_in = fields
        .get_list("outin")
        .into_iter()
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();

    let must_clean_to = fields.get_list("must_clean_room_to");
    let must_clean_reasons: Vec<&str> = fields.with_prefix("must_clean_reason").map(|(_, v)| v).collect();
    let must_clean = fields
        .get_list("must_clean_room")
        .into_iter()
        .enumerate()
        .filter(|(_, from)| !from.is_empty())
        .map(|(i, from)| MustClean {
            from: from.to_string(),
            to: must_clean_to.get(i).copied().unwrap_or("").to_string(),
            reason: must_clean_reasons.get(i).copied().unwrap_or("").to_string(),
        })
        .collect();

    let mut contacts = Vec::new();
    for (index, message) in fields.with_prefix("contact_") {
        if index.starts_with("number_") || message.is_empty() {
            continue;
        }
        contacts.push(Contact {
            number: fields.get(&format!("contact_number_{}", index)).to_string(),
            message: message.to_string(),
        });
    }

    let multiple_night_rooms = fields
        .get_list("multiple_night_room")
        .into_iter()
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();

    SheetNotes {
        remarks,
        room_changes,
        out_in,
        must_clean,
        contacts,
        multiple_night_rooms,
    }
}

/// Commits an edit to a housekeeper number
/// A number already held by another row is rejected: the edited field is
/// cleared and the other rows are left untouched
pub fn commit_housekeeper_number(
    housekeepers: &mut [Housekeeper],
    position: usize,
    value: &str,
) -> Result<(), SheetError> {
    let value = value.trim();
    let duplicate = !value.is_empty()
        && housekeepers
            .iter()
            .enumerate()
            .any(|(i, h)| i != position && h.number() == Some(value));

    if let Some(row) = housekeepers.get_mut(position) {
        if duplicate {
            row.number.clear();
        } else {
            row.number = value.to_string();
        }
    }

    if duplicate {
        log::info!("rejected duplicate housekeeper number {}", value);
        return Err(SheetError::DuplicateNumber(value.to_string()));
    }
    Ok(())
}

/// Names entered on more than one row, in first-repeat order
pub fn duplicate_names(housekeepers: &[Housekeeper]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for h in housekeepers {
        let name = h.name.trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}

/// Validates a sheet before submission
/// A missing submitter blocks it; repeated names only produce warnings
pub fn validate_submission(snapshot: &SheetSnapshot) -> Result<Vec<SheetWarning>, SheetError> {
    if snapshot.submitter.trim().is_empty() {
        return Err(SheetError::MissingSubmitter);
    }

    Ok(duplicate_names(&snapshot.housekeepers)
        .into_iter()
        .map(SheetWarning::DuplicateName)
        .collect())
}

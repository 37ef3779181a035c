use std::collections::BTreeMap;
use serde::Serialize;
use super::types::{table_order, Housekeeper, MUTED};

/// Room id -> housekeeper number, built from the raw per-room inputs
/// Blank inputs are left out; "0" (muted) is kept so floor totals still see it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomAssignmentIndex {
    by_room: BTreeMap<String, String>,
}

impl RoomAssignmentIndex {
    /// Builds the index from (room id, raw text) pairs
    /// Whitespace is trimmed; a later pair for the same room replaces the earlier one
    pub fn build<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut by_room = BTreeMap::new();
        for (room_id, raw) in pairs {
            let room_id = room_id.trim();
            let value = raw.trim();
            if room_id.is_empty() || value.is_empty() {
                continue;
            }
            by_room.insert(room_id.to_string(), value.to_string());
        }
        RoomAssignmentIndex { by_room }
    }

    #[cfg(test)]
    pub fn get(&self, room_id: &str) -> Option<&str> {
        self.by_room.get(room_id).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_room.iter().map(|(r, n)| (r.as_str(), n.as_str()))
    }

    /// Assignments that are part of instructed cleaning (muted rooms skipped)
    pub fn instructed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, number)| *number != MUTED)
    }

    pub fn len(&self) -> usize {
        self.by_room.len()
    }

    /// Distinct instructed housekeeper numbers sorted numerically
    pub fn assigned_numbers(&self) -> Vec<String> {
        let mut numbers: Vec<String> = self.instructed().map(|(_, n)| n.to_string()).collect();
        numbers.sort_by(|a, b| numeric_key(a).cmp(&numeric_key(b)));
        numbers.dedup();
        numbers
    }
}

/// Sort key for housekeeper numbers: numeric first, then text for anything unparsable
pub fn numeric_key(number: &str) -> (u64, String) {
    (number.parse::<u64>().unwrap_or(u64::MAX), number.to_string())
}

/// Number of rooms each housekeeper holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCount {
    pub number: String,
    pub count: usize,
}

/// Counts assigned rooms per housekeeper in table order
/// The blank trailing row always counts zero
pub fn count_rooms(index: &RoomAssignmentIndex, housekeepers: &[Housekeeper]) -> Vec<RoomCount> {
    table_order(housekeepers)
        .into_iter()
        .map(|h| {
            let count = match h.number() {
                Some(number) => index.iter().filter(|(_, n)| *n == number).count(),
                None => 0,
            };
            RoomCount {
                number: h.number.trim().to_string(),
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn housekeepers(numbers: &[&str]) -> Vec<Housekeeper> {
        numbers
            .iter()
            .enumerate()
            .map(|(i, n)| Housekeeper::new(i, n, ""))
            .collect()
    }

    #[test]
    fn blank_and_whitespace_inputs_are_unassigned() {
        let index = RoomAssignmentIndex::build(vec![
            ("201", " 1 "),
            ("202", ""),
            ("203", "   "),
            ("204", "0"),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("201"), Some("1"));
        assert_eq!(index.get("202"), None);
        assert_eq!(index.get("204"), Some("0"));
        assert_eq!(index.instructed().count(), 1);
    }

    #[test]
    fn counts_follow_table_order() {
        let index = RoomAssignmentIndex::build(vec![
            ("201", "2"),
            ("202", "2"),
            ("301", "1"),
            ("302", "0"),
        ]);
        let counts = count_rooms(&index, &housekeepers(&["1", "2", ""]));
        let got: Vec<(&str, usize)> = counts.iter().map(|c| (c.number.as_str(), c.count)).collect();
        assert_eq!(got, vec![("1", 1), ("2", 2), ("", 0)]);
    }

    #[test]
    fn assigned_numbers_sort_numerically() {
        let index = RoomAssignmentIndex::build(vec![
            ("201", "10"),
            ("202", "2"),
            ("203", "2"),
            ("204", "0"),
            ("205", "1"),
        ]);
        assert_eq!(index.assigned_numbers(), vec!["1", "2", "10"]);
    }

    proptest! {
        #[test]
        fn index_is_idempotent(values in proptest::collection::vec("[0-3 ]{0,2}", 0..40)) {
            let pairs: Vec<(String, String)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("{}", 200 + i), v.clone()))
                .collect();
            let first = RoomAssignmentIndex::build(pairs.iter().map(|(r, v)| (r.as_str(), v.as_str())));
            let second = RoomAssignmentIndex::build(pairs.iter().map(|(r, v)| (r.as_str(), v.as_str())));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn counts_cover_instructed_and_muted(values in proptest::collection::vec("[0-3]?", 0..40)) {
            let pairs: Vec<(String, String)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("{}", 200 + i), v.clone()))
                .collect();
            let index = RoomAssignmentIndex::build(pairs.iter().map(|(r, v)| (r.as_str(), v.as_str())));
            // Every value names a row, including the muted sentinel
            let counts = count_rooms(&index, &housekeepers(&["0", "1", "2", "3"]));
            let total: usize = counts.iter().map(|c| c.count).sum();
            let muted = values.iter().filter(|v| v.as_str() == "0").count();
            let instructed = values.iter().filter(|v| !v.is_empty() && v.as_str() != "0").count();
            prop_assert_eq!(total, instructed + muted);
        }
    }
}

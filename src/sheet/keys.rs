use std::collections::{HashMap, HashSet};
use std::fmt;
use serde::{Deserialize, Serialize};
use super::floors::FloorAssignment;

/// Letter of a physical master key; `N` means no copy was free for that floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyLetter {
    A,
    B,
    C,
    N,
}

impl fmt::Display for KeyLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            KeyLetter::A => "A",
            KeyLetter::B => "B",
            KeyLetter::C => "C",
            KeyLetter::N => "N",
        };
        f.write_str(letter)
    }
}

/// Each floor has three key copies, handed out in this order
pub const KEY_PRIORITY: [KeyLetter; 3] = [KeyLetter::A, KeyLetter::B, KeyLetter::C];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyAssignment {
    pub floor: u32,
    pub housekeeper: String,
    pub letter: KeyLetter,
}

/// Keys held by one housekeeper, ascending by floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HousekeeperKeys {
    pub number: String,
    pub keys: Vec<KeyAssignment>,
}

impl HousekeeperKeys {
    /// Formats as "3A,5B"; empty when the housekeeper has no floors
    pub fn key_string(&self) -> String {
        self.keys
            .iter()
            .map(|k| format!("{}{}", k.floor, k.letter))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn letters(&self) -> Vec<KeyLetter> {
        self.keys.iter().map(|k| k.letter).collect()
    }
}

/// Allocates master keys for every (floor, housekeeper) pair
/// Pass 1 hands out letters in priority order per floor, pass 2 swaps letters
/// so a housekeeper does not carry two keys with the same letter
pub fn allocate_keys(floors: &[FloorAssignment], priority: &[KeyLetter]) -> Vec<HousekeeperKeys> {
    let mut rows = assign_initial_keys(floors, priority);
    let swaps = resolve_key_conflicts(&mut rows);
    log::debug!("key allocation: {} rows, {} swaps", rows.len(), swaps);
    rows
}

/// First-fit allocation, rows in table order and floors ascending
/// The used-letter set per floor lives for this call only
fn assign_initial_keys(floors: &[FloorAssignment], priority: &[KeyLetter]) -> Vec<HousekeeperKeys> {
    let mut used_by_floor: HashMap<u32, HashSet<KeyLetter>> = HashMap::new();

    floors
        .iter()
        .map(|row| {
            let keys = row
                .floors
                .iter()
                .map(|&floor| {
                    let used = used_by_floor.entry(floor).or_default();
                    let letter = priority
                        .iter()
                        .copied()
                        .find(|k| !used.contains(k))
                        .unwrap_or(KeyLetter::N);
                    if letter != KeyLetter::N {
                        used.insert(letter);
                    }
                    KeyAssignment {
                        floor,
                        housekeeper: row.number.clone(),
                        letter,
                    }
                })
                .collect();
            HousekeeperKeys {
                number: row.number.clone(),
                keys,
            }
        })
        .collect()
}

fn has_duplicate(letters: &[KeyLetter]) -> bool {
    let mut seen = HashSet::new();
    letters.iter().any(|l| !seen.insert(*l))
}

/// Swaps letters on a shared floor between two housekeepers
/// A swap is committed only when neither ends up holding a repeated letter;
/// the first such swap per housekeeper wins and the pass is not repeated
fn resolve_key_conflicts(rows: &mut [HousekeeperKeys]) -> usize {
    let mut swaps = 0;

    for i in 0..rows.len() {
        if !has_duplicate(&rows[i].letters()) {
            continue;
        }

        'search: for j in 0..rows.len() {
            if i == j {
                continue;
            }
            for fi in 0..rows[i].keys.len() {
                for fj in 0..rows[j].keys.len() {
                    let (floor_i, letter_i) = (rows[i].keys[fi].floor, rows[i].keys[fi].letter);
                    let (floor_j, letter_j) = (rows[j].keys[fj].floor, rows[j].keys[fj].letter);
                    if floor_i != floor_j || letter_i == letter_j {
                        continue;
                    }

                    let mut trial_i = rows[i].letters();
                    let mut trial_j = rows[j].letters();
                    trial_i[fi] = letter_j;
                    trial_j[fj] = letter_i;

                    if !has_duplicate(&trial_i) && !has_duplicate(&trial_j) {
                        rows[i].keys[fi].letter = letter_j;
                        rows[j].keys[fj].letter = letter_i;
                        swaps += 1;
                        break 'search;
                    }
                }
            }
        }
    }

    swaps
}

//! Small map-merging helpers used by the build analysis and the template
//! inventory.

use std::collections::BTreeMap;

/// Merges maps by summing the values of shared keys.
pub fn summed_values<K: Ord + Clone>(
    target: &mut BTreeMap<K, f64>,
    source: &BTreeMap<K, f64>,
) {
    for (key, value) in source {
        *target.entry(key.clone()).or_insert(0.0) += value;
    }
}

/// Merges maps by keeping the maximum value of shared keys.
pub fn maxed_values<K: Ord + Clone>(
    target: &mut BTreeMap<K, f64>,
    source: &BTreeMap<K, f64>,
) {
    for (key, value) in source {
        target
            .entry(key.clone())
            .and_modify(|current| {
                if *value > *current {
                    *current = *value;
                }
            })
            .or_insert(*value);
    }
}

/// Reassigns numeric string keys within `floor..=ceiling` so they run
/// consecutively from `floor`, preserving order. Keys outside the range are
/// kept as they are. Returns the renumbered map together with the old-to-new
/// key changes, so favorites lists can follow along.
pub fn renumber_consecutive<V>(
    map: BTreeMap<String, V>,
    floor: u32,
    ceiling: u32,
) -> (BTreeMap<String, V>, BTreeMap<String, String>) {
    let mut in_range: Vec<(u32, String, V)> = Vec::new();
    let mut result: BTreeMap<String, V> = BTreeMap::new();

    for (key, value) in map {
        match key.parse::<u32>() {
            Ok(numeric) if (floor..=ceiling).contains(&numeric) => {
                in_range.push((numeric, key, value));
            }
            _ => {
                result.insert(key, value);
            }
        }
    }

    in_range.sort_by_key(|(numeric, _, _)| *numeric);
    let mut remapped = BTreeMap::new();
    for (offset, (_, old_key, value)) in in_range.into_iter().enumerate() {
        let new_key = (floor + offset as u32).to_string();
        if new_key != old_key {
            remapped.insert(old_key, new_key.clone());
        }
        result.insert(new_key, value);
    }
    (result, remapped)
}

//! Qualification slot allocation and the persisted rules payload.

use std::collections::HashMap;

/// Fallback qualifier count when a tournament's stored rules are absent or
/// unreadable.
pub const DEFAULT_QUALIFIERS_PER_GROUP: usize = 2;

/// Split `qualifiers_needed` knockout slots across groups.
///
/// Remainder distribution, NOT proportional to group size: every group gets
/// `qualifiers_needed / groups`, and the first `qualifiers_needed % groups`
/// groups (in the order given, i.e. first appearance among grouped players)
/// get one more. Each count is then clamped to the group's own size, since a
/// group cannot qualify more players than it has. Zero groups yields an empty
/// allocation.
pub fn allocate_slots(
    group_sizes: &[(String, usize)],
    qualifiers_needed: usize,
) -> Vec<(String, usize)> {
    if group_sizes.is_empty() {
        return Vec::new();
    }
    let base = qualifiers_needed / group_sizes.len();
    let extra = qualifiers_needed % group_sizes.len();
    group_sizes
        .iter()
        .enumerate()
        .map(|(i, (name, size))| {
            let count = base + usize::from(i < extra);
            (name.clone(), count.min(*size))
        })
        .collect()
}

/// Serialize an allocation for the tournament record.
pub fn encode_rules(allocation: &[(String, usize)]) -> String {
    let map: HashMap<&str, usize> = allocation
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
}

/// Parse a tournament's stored qualification rules.
///
/// A missing or malformed payload is recovered locally: the warning is logged
/// and an empty map returned, which makes every group fall back to
/// [`DEFAULT_QUALIFIERS_PER_GROUP`] at lookup time. Never surfaced to the
/// caller.
pub fn decode_rules(payload: Option<&str>) -> HashMap<String, usize> {
    let Some(payload) = payload else {
        log::warn!(
            "No qualification rules stored; defaulting to {} per group",
            DEFAULT_QUALIFIERS_PER_GROUP
        );
        return HashMap::new();
    };
    match serde_json::from_str(payload) {
        Ok(rules) => rules,
        Err(err) => {
            log::warn!(
                "Unreadable qualification rules ({}); defaulting to {} per group",
                err,
                DEFAULT_QUALIFIERS_PER_GROUP
            );
            HashMap::new()
        }
    }
}

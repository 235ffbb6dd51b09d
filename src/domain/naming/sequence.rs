//! Numeric file-name sequencing

/// Default first number when no numbered file exists yet
pub const DEFAULT_FLOOR: u64 = 1;

/// Parse a file stem made only of ASCII decimal digits
pub fn numeric_stem(stem: &str) -> Option<u64> {
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

/// Next number after the highest numeric stem, never below `floor`.
///
/// Returns `max(numbers ∪ {floor - 1}) + 1`; non-numeric stems are ignored.
pub fn next_in_sequence<I, S>(stems: I, floor: u64) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let highest = stems
        .into_iter()
        .filter_map(|stem| numeric_stem(stem.as_ref()))
        .max();

    let baseline = floor.checked_sub(1);
    match (highest, baseline) {
        (Some(n), Some(b)) => n.max(b).saturating_add(1),
        (Some(n), None) => n.saturating_add(1),
        (None, _) => floor,
    }
}

/// Canonical button name for a raw key identifier from the windowing layer.
///
/// Lowercases, drops leading underscores (`_1` -> `1`) and the numeric-pad
/// prefix (`NUM_8` -> `8`).
pub fn normalize_key_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let trimmed = lower.trim_start_matches('_');
    trimmed.strip_prefix("num_").unwrap_or(trimmed).to_string()
}

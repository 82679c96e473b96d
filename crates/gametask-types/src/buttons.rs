/// Number of entries in an action vector for one player.
pub const BUTTON_COUNT: usize = 12;

/// Placeholder name for action slots with no keyboard binding.
pub const UNMAPPED_BUTTON: &str = "_";

/// Default key names, indexed by action-vector position.
///
/// Positions follow the emulator's Genesis pad layout; slots marked
/// [`UNMAPPED_BUTTON`] are never driven by the keyboard.
pub const DEFAULT_BUTTON_MAP: [&str; BUTTON_COUNT] =
    ["y", "a", "_", "_", "u", "d", "l", "r", "b", "_", "_", "_"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_has_seven_unique_bindings() {
        let mut bound: Vec<&str> = DEFAULT_BUTTON_MAP
            .iter()
            .copied()
            .filter(|name| *name != UNMAPPED_BUTTON)
            .collect();
        assert_eq!(bound.len(), 7);
        bound.sort_unstable();
        bound.dedup();
        assert_eq!(bound.len(), 7);
    }
}

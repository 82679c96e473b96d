/// Direction of a physical key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Press,
    Release,
}

/// A normalized key transition stamped on the task clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub name: String,
    /// Microseconds on the buffer's TimeProvider.
    pub time_us: i64,
}

impl KeyEvent {
    pub fn new(name: impl Into<String>, time_us: i64) -> Self {
        Self {
            name: name.into(),
            time_us,
        }
    }
}

/// Modifier keys held during a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const META: Self = Self(1 << 3);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// What an input source does with a key transition after the buffer saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRouting {
    /// Only the game sees the key.
    Captured,
    /// Also hand the key to the window's default handler, so the
    /// experimenter's shortcuts keep working during play.
    AlsoDefault,
}

use gametask_types::{BUTTON_COUNT, DEFAULT_BUTTON_MAP, TaskError, UNMAPPED_BUTTON};

/// Ordered key names, one per emulator action index. `_` marks an index no
/// key drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMap {
    names: Vec<String>,
}

impl ButtonMap {
    /// Build a map from configured names. Names are stored as given; they
    /// are compared against normalized key names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, TaskError> {
        if names.len() != BUTTON_COUNT {
            return Err(TaskError::InvalidButtonMap {
                expected: BUTTON_COUNT,
                actual: names.len(),
            });
        }
        Ok(Self {
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
        })
    }

    /// Action index driven by `name`, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        if name.is_empty() || name == UNMAPPED_BUTTON {
            return None;
        }
        self.names.iter().position(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            names: DEFAULT_BUTTON_MAP.iter().map(|n| n.to_string()).collect(),
        }
    }
}

use crate::button_map::ButtonMap;

/// Held state of every emulator button, persisting across frames.
#[derive(Debug, Clone)]
pub struct KeyState {
    map: ButtonMap,
    pressed: Vec<bool>,
}

impl KeyState {
    pub fn new(map: ButtonMap) -> Self {
        let pressed = vec![false; map.len()];
        Self { map, pressed }
    }

    /// Mark the button bound to `name` as held. Returns false if no button
    /// is bound to it.
    pub fn press(&mut self, name: &str) -> bool {
        self.set(name, true)
    }

    /// Mark the button bound to `name` as released.
    pub fn release(&mut self, name: &str) -> bool {
        self.set(name, false)
    }

    fn set(&mut self, name: &str, value: bool) -> bool {
        match self.map.index_of(name) {
            Some(idx) => {
                self.pressed[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn is_pressed(&self, name: &str) -> bool {
        self.map
            .index_of(name)
            .is_some_and(|idx| self.pressed[idx])
    }

    /// Action vector for the emulator, in button map order.
    pub fn actions(&self) -> &[bool] {
        &self.pressed
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new(ButtonMap::default())
    }
}

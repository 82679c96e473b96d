use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gametask_types::TimeProvider;

use crate::key_event::{KeyEvent, KeyRouting, KeyTransition, Modifiers};
use crate::key_name::normalize_key_name;
use crate::key_state::KeyState;

/// Press and release events captured between two frames.
///
/// Written by the input callbacks (possibly from another thread), drained
/// once per frame by the play loop.
pub struct KeyEventBuffer {
    pressed: Mutex<VecDeque<KeyEvent>>,
    released: Mutex<VecDeque<KeyEvent>>,
    clock: Arc<dyn TimeProvider>,
}

fn locked(queue: &Mutex<VecDeque<KeyEvent>>) -> MutexGuard<'_, VecDeque<KeyEvent>> {
    // A panicking callback must not wedge the frame loop.
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

impl KeyEventBuffer {
    pub fn new(clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            pressed: Mutex::new(VecDeque::new()),
            released: Mutex::new(VecDeque::new()),
            clock,
        }
    }

    /// Input callback: normalize `raw_key` and queue it, stamped now.
    ///
    /// Presses made with a modifier held are queued too, but the source must
    /// also pass them to the window's default key handler.
    pub fn on_key(
        &self,
        raw_key: &str,
        transition: KeyTransition,
        modifiers: Modifiers,
    ) -> KeyRouting {
        let event = KeyEvent::new(normalize_key_name(raw_key), self.clock.now_us());
        self.push(event, transition);
        if transition == KeyTransition::Press && !modifiers.is_empty() {
            KeyRouting::AlsoDefault
        } else {
            KeyRouting::Captured
        }
    }

    pub fn push(&self, event: KeyEvent, transition: KeyTransition) {
        match transition {
            KeyTransition::Press => locked(&self.pressed).push_back(event),
            KeyTransition::Release => locked(&self.released).push_back(event),
        }
    }

    /// Apply queued releases, then queued presses, to `state` and empty both
    /// queues. Returns the number of events consumed.
    pub fn drain_into(&self, state: &mut KeyState) -> usize {
        let released: Vec<KeyEvent> = locked(&self.released).drain(..).collect();
        let pressed: Vec<KeyEvent> = locked(&self.pressed).drain(..).collect();

        for event in &released {
            state.release(&event.name);
        }
        for event in &pressed {
            state.press(&event.name);
        }
        if !released.is_empty() || !pressed.is_empty() {
            log::debug!(
                "key events: {} released, {} pressed",
                released.len(),
                pressed.len()
            );
        }
        released.len() + pressed.len()
    }

    /// Number of queued (press, release) events.
    pub fn pending(&self) -> (usize, usize) {
        (locked(&self.pressed).len(), locked(&self.released).len())
    }

    /// Drop every queued event without applying it.
    pub fn clear(&self) {
        locked(&self.pressed).clear();
        locked(&self.released).clear();
    }
}

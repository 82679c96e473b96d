//! Scriptable input source for tests.

use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};

use crate::key_buffer::KeyEventBuffer;
use crate::key_event::{KeyRouting, KeyTransition, Modifiers};
use crate::source::InputSource;

#[derive(Default)]
struct Slot {
    buffer: Option<Arc<KeyEventBuffer>>,
    subscribe_calls: usize,
    /// Raw keys the window's own handler received.
    default_handled: Vec<String>,
}

/// Input source whose key callbacks are triggered through a
/// [`MockInputHandle`].
pub struct MockInputSource {
    name: String,
    slot: Arc<Mutex<Slot>>,
    fail_subscribe: bool,
}

/// Test-side handle standing in for the windowing layer.
#[derive(Clone)]
pub struct MockInputHandle {
    slot: Arc<Mutex<Slot>>,
}

impl MockInputSource {
    pub fn new(name: &str) -> (Self, MockInputHandle) {
        Self::build(name, false)
    }

    /// A source whose `subscribe` always fails.
    pub fn failing(name: &str) -> (Self, MockInputHandle) {
        Self::build(name, true)
    }

    fn build(name: &str, fail_subscribe: bool) -> (Self, MockInputHandle) {
        let slot = Arc::new(Mutex::new(Slot::default()));
        let source = Self {
            name: name.to_string(),
            slot: Arc::clone(&slot),
            fail_subscribe,
        };
        (source, MockInputHandle { slot })
    }
}

impl InputSource for MockInputSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe(&mut self, buffer: Arc<KeyEventBuffer>) -> Result<()> {
        if self.fail_subscribe {
            bail!("window {} has no input slot", self.name);
        }
        let mut slot = self.slot.lock().unwrap();
        slot.buffer = Some(buffer);
        slot.subscribe_calls += 1;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.slot.lock().unwrap().buffer = None;
    }
}

impl MockInputHandle {
    /// Deliver a key press. Returns false if nothing is subscribed.
    pub fn press(&self, raw_key: &str) -> bool {
        self.send(raw_key, KeyTransition::Press, Modifiers::NONE)
    }

    /// Deliver a key release. Returns false if nothing is subscribed.
    pub fn release(&self, raw_key: &str) -> bool {
        self.send(raw_key, KeyTransition::Release, Modifiers::NONE)
    }

    pub fn press_with(&self, raw_key: &str, modifiers: Modifiers) -> bool {
        self.send(raw_key, KeyTransition::Press, modifiers)
    }

    pub fn release_with(&self, raw_key: &str, modifiers: Modifiers) -> bool {
        self.send(raw_key, KeyTransition::Release, modifiers)
    }

    fn send(&self, raw_key: &str, transition: KeyTransition, modifiers: Modifiers) -> bool {
        let buffer = self.slot.lock().unwrap().buffer.clone();
        let routing = buffer
            .as_ref()
            .map(|buffer| buffer.on_key(raw_key, transition, modifiers));
        // Without a subscriber the window keeps its own press handling.
        let to_default = match routing {
            Some(KeyRouting::AlsoDefault) => true,
            Some(KeyRouting::Captured) => false,
            None => transition == KeyTransition::Press,
        };
        if to_default {
            self.slot
                .lock()
                .unwrap()
                .default_handled
                .push(raw_key.to_string());
        }
        buffer.is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.slot.lock().unwrap().buffer.is_some()
    }

    pub fn subscribe_calls(&self) -> usize {
        self.slot.lock().unwrap().subscribe_calls
    }

    /// Presses the window's default handler saw, in order.
    pub fn default_handled(&self) -> Vec<String> {
        self.slot.lock().unwrap().default_handled.clone()
    }
}

use std::sync::Arc;

use anyhow::Result;

use crate::key_buffer::KeyEventBuffer;

/// A window (or other device) that reports key transitions.
/// Implementations: the presentation toolkit's windows, MockInputSource
/// (testing).
pub trait InputSource {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Start forwarding key transitions to `buffer` through
    /// [`KeyEventBuffer::on_key`]. When it answers
    /// [`KeyRouting::AlsoDefault`](crate::KeyRouting::AlsoDefault) the
    /// transition must also reach the window's default key handler.
    fn subscribe(&mut self, buffer: Arc<KeyEventBuffer>) -> Result<()>;

    /// Stop forwarding and give every key back to the default handler.
    /// Calling it while not subscribed is a no-op.
    fn unsubscribe(&mut self);
}

/// Attaches one [`KeyEventBuffer`] to a set of input sources for the duration
/// of a run. Sources are detached on [`detach`](Self::detach) or on drop.
pub struct InputHook {
    buffer: Arc<KeyEventBuffer>,
    sources: Vec<Box<dyn InputSource>>,
    attached: bool,
}

impl InputHook {
    pub fn new(buffer: Arc<KeyEventBuffer>, sources: Vec<Box<dyn InputSource>>) -> Self {
        Self {
            buffer,
            sources,
            attached: false,
        }
    }

    /// Subscribe every source. If one fails the ones already subscribed are
    /// detached again before the error is returned.
    pub fn attach(&mut self) -> Result<()> {
        if self.attached {
            return Ok(());
        }
        for idx in 0..self.sources.len() {
            if let Err(e) = self.sources[idx].subscribe(Arc::clone(&self.buffer)) {
                for source in &mut self.sources[..idx] {
                    source.unsubscribe();
                }
                return Err(e.context(format!(
                    "failed to attach key handler to {}",
                    self.sources[idx].name()
                )));
            }
            log::debug!("key handler attached to {}", self.sources[idx].name());
        }
        self.attached = true;
        Ok(())
    }

    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        for source in &mut self.sources {
            source.unsubscribe();
            log::debug!("key handler detached from {}", source.name());
        }
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn buffer(&self) -> &Arc<KeyEventBuffer> {
        &self.buffer
    }
}

impl Drop for InputHook {
    fn drop(&mut self) {
        self.detach();
    }
}

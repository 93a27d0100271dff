//! Widget-side copy of the control values

use gasket_core::{Configuration, ControlEvent, TextureId};

/// Values the widgets edit in place
///
/// Synced from the session before every frame; edits come back out as
/// [`ControlEvent`]s and only take effect once the session accepts them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiState {
    pub depth: u32,
    pub cycles: u32,
    pub texture: TextureId,
}

impl UiState {
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            depth: config.depth(),
            cycles: config.total_cycles(),
            texture: config.texture(),
        }
    }

    /// Overwrite the widget values with the accepted configuration
    pub fn sync(&mut self, config: &Configuration) {
        *self = Self::from_config(config);
    }

    /// Events that turn `before` into `self`, in control order
    pub fn changes_since(&self, before: &UiState) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        if self.depth != before.depth {
            events.push(ControlEvent::SetDepth(self.depth as i64));
        }
        if self.cycles != before.cycles {
            events.push(ControlEvent::SetCycles(self.cycles as i64));
        }
        if self.texture != before.texture {
            events.push(ControlEvent::SelectTexture(self.texture));
        }
        events
    }
}

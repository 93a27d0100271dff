//! User controls and configuration validation
//!
//! Every value coming from the UI or from configuration files passes through
//! here before it can reach the generator or the sequencer. Out of range
//! values are rejected with a descriptive [`ControlError`], never clamped.

use std::fmt;

/// Deepest subdivision accepted by default (262 144 triangles)
pub const DEFAULT_MAX_DEPTH: u32 = 8;

/// Largest cycle count accepted by default
pub const DEFAULT_MAX_CYCLES: u32 = 10;

/// Hard ceiling on subdivision depth, whatever the configured limit
///
/// Depth 9 is 1 048 576 triangles, a vertex stream of about 126 MB. Depth 10
/// no longer fits in a default-sized GPU buffer.
pub const MAX_SUPPORTED_DEPTH: u32 = 9;

/// One of the three preset textures
///
/// Exactly one texture is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextureId {
    #[default]
    First,
    Second,
    Third,
}

impl TextureId {
    pub const ALL: [TextureId; 3] = [TextureId::First, TextureId::Second, TextureId::Third];

    /// Look up a texture by its 1-based id
    pub fn from_id(id: i64) -> Result<Self, ControlError> {
        match id {
            1 => Ok(TextureId::First),
            2 => Ok(TextureId::Second),
            3 => Ok(TextureId::Third),
            other => Err(ControlError::UnknownTexture(other)),
        }
    }

    /// 1-based id
    pub fn id(self) -> u8 {
        match self {
            TextureId::First => 1,
            TextureId::Second => 2,
            TextureId::Third => 3,
        }
    }

    /// 0-based index, for arrays of per-texture resources
    #[inline]
    pub fn index(self) -> usize {
        self.id() as usize - 1
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Texture {}", self.id())
    }
}

/// Upper bounds for user-adjustable values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_depth: u32,
    pub max_cycles: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

impl Limits {
    /// Build limits, refusing a depth ceiling above [`MAX_SUPPORTED_DEPTH`]
    pub fn new(max_depth: u32, max_cycles: u32) -> Result<Self, ControlError> {
        if max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ControlError::DepthCeilingTooLarge {
                max: max_depth,
                supported: MAX_SUPPORTED_DEPTH,
            });
        }
        Ok(Self { max_depth, max_cycles })
    }

    /// Validate a raw subdivision depth
    pub fn validate_depth(&self, raw: i64) -> Result<u32, ControlError> {
        if raw < 0 {
            return Err(ControlError::NegativeDepth(raw));
        }
        // Limits built field by field still cannot exceed the hard ceiling
        let max = self.max_depth.min(MAX_SUPPORTED_DEPTH);
        if raw > max as i64 {
            return Err(ControlError::DepthTooLarge { depth: raw, max });
        }
        Ok(raw as u32)
    }

    /// Validate a raw cycle count
    pub fn validate_cycles(&self, raw: i64) -> Result<u32, ControlError> {
        if raw < 0 {
            return Err(ControlError::NegativeCycles(raw));
        }
        if raw > self.max_cycles as i64 {
            return Err(ControlError::CyclesTooLarge { cycles: raw, max: self.max_cycles });
        }
        Ok(raw as u32)
    }
}

/// Validated user configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Configuration {
    depth: u32,
    total_cycles: u32,
    texture: TextureId,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            depth: 3,
            total_cycles: 1,
            texture: TextureId::First,
        }
    }
}

impl Configuration {
    /// Build a configuration from raw values, validating each
    pub fn new(
        depth: i64,
        total_cycles: i64,
        texture: i64,
        limits: &Limits,
    ) -> Result<Self, ControlError> {
        Ok(Self {
            depth: limits.validate_depth(depth)?,
            total_cycles: limits.validate_cycles(total_cycles)?,
            texture: TextureId::from_id(texture)?,
        })
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    #[inline]
    pub fn texture(&self) -> TextureId {
        self.texture
    }
}

/// A user action on one of the controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    /// Depth slider moved
    SetDepth(i64),
    /// Cycle slider moved
    SetCycles(i64),
    /// Texture selected
    SelectTexture(TextureId),
    /// Start button pressed
    Start,
}

/// What the caller has to do after an accepted event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEffect {
    /// Nothing changed
    Unchanged,
    /// Depth changed: regenerate geometry
    Regenerate,
    /// Texture changed: rebind texture and regenerate
    Retexture,
    /// Cycle count changed; takes effect on the next run
    CyclesChanged,
    /// Start a new animation run
    StartRun,
}

/// Control state: the configuration plus the run lock
#[derive(Clone, Debug)]
pub struct Controls {
    config: Configuration,
    limits: Limits,
    locked: bool,
}

impl Controls {
    pub fn new(config: Configuration, limits: Limits) -> Self {
        Self {
            config,
            limits,
            locked: false,
        }
    }

    /// Apply an event
    ///
    /// While locked (a run is active) every event is rejected.
    pub fn apply(&mut self, event: ControlEvent) -> Result<ControlEffect, ControlError> {
        if self.locked {
            return Err(ControlError::Locked);
        }

        let effect = match event {
            ControlEvent::SetDepth(raw) => {
                let depth = self.limits.validate_depth(raw)?;
                if depth == self.config.depth {
                    ControlEffect::Unchanged
                } else {
                    self.config.depth = depth;
                    ControlEffect::Regenerate
                }
            }
            ControlEvent::SetCycles(raw) => {
                let cycles = self.limits.validate_cycles(raw)?;
                if cycles == self.config.total_cycles {
                    ControlEffect::Unchanged
                } else {
                    self.config.total_cycles = cycles;
                    ControlEffect::CyclesChanged
                }
            }
            ControlEvent::SelectTexture(texture) => {
                if texture == self.config.texture {
                    ControlEffect::Unchanged
                } else {
                    self.config.texture = texture;
                    ControlEffect::Retexture
                }
            }
            ControlEvent::Start => ControlEffect::StartRun,
        };

        Ok(effect)
    }

    /// Disable the controls for the duration of a run
    #[inline]
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Re-enable the controls
    #[inline]
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}

/// Rejected control input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// Controls are disabled while an animation runs
    Locked,
    NegativeDepth(i64),
    DepthTooLarge { depth: i64, max: u32 },
    DepthCeilingTooLarge { max: u32, supported: u32 },
    NegativeCycles(i64),
    CyclesTooLarge { cycles: i64, max: u32 },
    UnknownTexture(i64),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::Locked => write!(f, "Controls are locked while the animation runs"),
            ControlError::NegativeDepth(d) => {
                write!(f, "Subdivision depth must be non-negative, got {}", d)
            }
            ControlError::DepthTooLarge { depth, max } => {
                write!(f, "Subdivision depth {} exceeds the maximum of {}", depth, max)
            }
            ControlError::DepthCeilingTooLarge { max, supported } => write!(
                f,
                "Depth ceiling {} is above the supported maximum of {}",
                max, supported
            ),
            ControlError::NegativeCycles(c) => {
                write!(f, "Cycle count must be non-negative, got {}", c)
            }
            ControlError::CyclesTooLarge { cycles, max } => {
                write!(f, "Cycle count {} exceeds the maximum of {}", cycles, max)
            }
            ControlError::UnknownTexture(id) => {
                write!(f, "Unknown texture id {} (expected 1, 2 or 3)", id)
            }
        }
    }
}

impl std::error::Error for ControlError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> Controls {
        Controls::new(Configuration::default(), Limits::default())
    }

    #[test]
    fn test_validate_depth() {
        let limits = Limits::default();
        assert_eq!(limits.validate_depth(0), Ok(0));
        assert_eq!(limits.validate_depth(8), Ok(8));
        assert_eq!(limits.validate_depth(-1), Err(ControlError::NegativeDepth(-1)));
        assert_eq!(
            limits.validate_depth(9),
            Err(ControlError::DepthTooLarge { depth: 9, max: 8 })
        );
    }

    #[test]
    fn test_depth_ceiling_is_bounded() {
        assert!(Limits::new(MAX_SUPPORTED_DEPTH, 3).is_ok());
        assert_eq!(
            Limits::new(40, 3),
            Err(ControlError::DepthCeilingTooLarge { max: 40, supported: MAX_SUPPORTED_DEPTH })
        );

        // A hand-built ceiling past the hard limit still rejects deep values
        let limits = Limits { max_depth: 40, max_cycles: 3 };
        assert_eq!(limits.validate_depth(MAX_SUPPORTED_DEPTH as i64), Ok(MAX_SUPPORTED_DEPTH));
        assert_eq!(
            limits.validate_depth(40),
            Err(ControlError::DepthTooLarge { depth: 40, max: MAX_SUPPORTED_DEPTH })
        );
        assert!(crate::geometry::triangle_count(MAX_SUPPORTED_DEPTH).is_some());
    }

    #[test]
    fn test_validate_cycles() {
        let limits = Limits { max_depth: 8, max_cycles: 3 };
        assert_eq!(limits.validate_cycles(0), Ok(0));
        assert_eq!(limits.validate_cycles(3), Ok(3));
        assert_eq!(limits.validate_cycles(-5), Err(ControlError::NegativeCycles(-5)));
        assert_eq!(
            limits.validate_cycles(4),
            Err(ControlError::CyclesTooLarge { cycles: 4, max: 3 })
        );
    }

    #[test]
    fn test_texture_ids() {
        for (i, texture) in TextureId::ALL.iter().enumerate() {
            assert_eq!(texture.index(), i);
            assert_eq!(TextureId::from_id(texture.id() as i64), Ok(*texture));
        }
        assert_eq!(TextureId::from_id(0), Err(ControlError::UnknownTexture(0)));
        assert_eq!(TextureId::from_id(4), Err(ControlError::UnknownTexture(4)));
        assert_eq!(TextureId::Second.to_string(), "Texture 2");
    }

    #[test]
    fn test_configuration_new_validates() {
        let limits = Limits::default();
        let config = Configuration::new(2, 5, 3, &limits).unwrap();
        assert_eq!(config.depth(), 2);
        assert_eq!(config.total_cycles(), 5);
        assert_eq!(config.texture(), TextureId::Third);

        assert!(Configuration::new(-1, 1, 1, &limits).is_err());
        assert!(Configuration::new(1, -1, 1, &limits).is_err());
        assert!(Configuration::new(1, 1, 7, &limits).is_err());
    }

    #[test]
    fn test_apply_effects() {
        let mut c = controls();
        assert_eq!(c.apply(ControlEvent::SetDepth(3)), Ok(ControlEffect::Unchanged));
        assert_eq!(c.apply(ControlEvent::SetDepth(5)), Ok(ControlEffect::Regenerate));
        assert_eq!(c.config().depth(), 5);

        assert_eq!(c.apply(ControlEvent::SetCycles(2)), Ok(ControlEffect::CyclesChanged));
        assert_eq!(c.config().total_cycles(), 2);

        assert_eq!(
            c.apply(ControlEvent::SelectTexture(TextureId::Second)),
            Ok(ControlEffect::Retexture)
        );
        assert_eq!(
            c.apply(ControlEvent::SelectTexture(TextureId::Second)),
            Ok(ControlEffect::Unchanged)
        );
        assert_eq!(c.apply(ControlEvent::Start), Ok(ControlEffect::StartRun));
    }

    #[test]
    fn test_rejected_event_leaves_config_untouched() {
        let mut c = controls();
        let before = *c.config();
        assert!(c.apply(ControlEvent::SetDepth(-2)).is_err());
        assert!(c.apply(ControlEvent::SetDepth(100)).is_err());
        assert!(c.apply(ControlEvent::SetCycles(-1)).is_err());
        assert_eq!(*c.config(), before);
    }

    #[test]
    fn test_locked_rejects_everything() {
        let mut c = controls();
        c.lock();
        assert!(c.is_locked());

        for event in [
            ControlEvent::SetDepth(4),
            ControlEvent::SetCycles(2),
            ControlEvent::SelectTexture(TextureId::Third),
            ControlEvent::Start,
        ] {
            assert_eq!(c.apply(event), Err(ControlError::Locked));
        }
        assert_eq!(*c.config(), Configuration::default());

        c.unlock();
        assert_eq!(c.apply(ControlEvent::SetDepth(4)), Ok(ControlEffect::Regenerate));
    }

    #[test]
    fn test_error_display() {
        assert!(ControlError::Locked.to_string().contains("locked"));
        assert!(ControlError::NegativeDepth(-3).to_string().contains("-3"));
        let msg = ControlError::DepthTooLarge { depth: 12, max: 8 }.to_string();
        assert!(msg.contains("12") && msg.contains("8"));
        assert!(ControlError::UnknownTexture(9).to_string().contains("9"));
    }
}

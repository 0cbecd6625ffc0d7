//! Volume control
//!
//! Volume is a linear fraction in [0, 1]. Muting never touches the stored
//! level, it only zeroes the level pushed to the output.

use serde::{Deserialize, Serialize};

/// Volume controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume, clamped to 0.0-1.0
    pub fn new(level: f32) -> Self {
        Self {
            level: sanitize_level(level),
            muted: false,
        }
    }

    /// Set volume level, clamped to 0.0-1.0
    pub fn set_level(&mut self, level: f32) {
        self.level = sanitize_level(level);
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level the output should actually play at
    ///
    /// Returns 0.0 if muted, otherwise the stored level
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    /// Volume bar fill in percent (0 when muted)
    pub fn percent(&self) -> f32 {
        self.effective() * 100.0
    }

    /// Whether the speaker icon should show as silent
    pub fn is_silent(&self) -> bool {
        self.muted || self.level == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn sanitize_level(level: f32) -> f32 {
    if level.is_finite() {
        level.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.8);
        assert_eq!(vol.level(), 0.8);
        assert!(!vol.is_muted());
    }

    #[test]
    fn set_volume_level() {
        let mut vol = Volume::new(0.5);
        assert_eq!(vol.level(), 0.5);

        vol.set_level(0.75);
        assert_eq!(vol.level(), 0.75);

        // Clamp to 1.0
        vol.set_level(1.5);
        assert_eq!(vol.level(), 1.0);

        // Clamp to 0.0
        vol.set_level(-0.2);
        assert_eq!(vol.level(), 0.0);
    }

    #[test]
    fn non_finite_level_is_zero() {
        let mut vol = Volume::new(f32::NAN);
        assert_eq!(vol.level(), 0.0);

        vol.set_level(f32::INFINITY);
        assert_eq!(vol.level(), 0.0);
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(0.6);

        vol.mute();
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 0.6);
        assert_eq!(vol.effective(), 0.0);

        vol.unmute();
        assert!(!vol.is_muted());
        assert_eq!(vol.effective(), 0.6);
    }

    #[test]
    fn toggle_mute_twice_restores() {
        let mut vol = Volume::new(0.3);

        vol.toggle_mute();
        vol.toggle_mute();

        assert!(!vol.is_muted());
        assert_eq!(vol.level(), 0.3);
    }

    #[test]
    fn percent_and_silence() {
        let mut vol = Volume::new(0.25);
        assert_eq!(vol.percent(), 25.0);
        assert!(!vol.is_silent());

        vol.mute();
        assert_eq!(vol.percent(), 0.0);
        assert!(vol.is_silent());

        assert!(Volume::new(0.0).is_silent());
    }
}

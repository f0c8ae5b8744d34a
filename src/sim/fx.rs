//! Camera shake and screen distortion
//!
//! Pure parameter generators: the sim owns the combine/decay math so it
//! stays testable, the frontend reads the per-frame output and applies it
//! to its camera and scene colors. Concurrent requests combine by taking
//! the maximum of intensity and duration; they never stack beyond the
//! strongest active request.

use glam::Vec3;
use rand::Rng;

use crate::tuning::EffectTuning;

/// Camera shake state
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraShake {
    pub intensity: f32,
    pub duration: f32,
}

impl CameraShake {
    /// Request a shake; strongest active request wins on both axes
    pub fn start(&mut self, intensity: f32, duration: f32) {
        self.intensity = self.intensity.max(intensity);
        self.duration = self.duration.max(duration);
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0.0
    }

    /// Advance one tick and return the camera offset to apply this frame.
    /// Intensity decays exponentially; a finished shake returns to zero.
    pub fn update(&mut self, dt: f32, decay: f32, rng: &mut impl Rng) -> Vec3 {
        if self.duration <= 0.0 {
            self.intensity = 0.0;
            return Vec3::ZERO;
        }
        let offset = Vec3::new(
            (rng.random::<f32>() - 0.5) * self.intensity,
            (rng.random::<f32>() - 0.5) * self.intensity,
            (rng.random::<f32>() - 0.5) * self.intensity * 0.5,
        );
        self.duration -= dt;
        self.intensity *= decay;
        offset
    }
}

/// What the frontend applies for one frame of distortion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionFrame {
    /// How far to blend the scene toward the polluted tint (0..max_tint)
    pub tint_blend: f32,
    /// Multiplier on ambient light intensity (1.0 = untouched)
    pub ambient_scale: f32,
}

impl DistortionFrame {
    pub const CLEAR: Self = Self {
        tint_blend: 0.0,
        ambient_scale: 1.0,
    };
}

/// Screen color distortion state (the smog/pollution look)
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenDistortion {
    pub intensity: f32,
    pub duration: f32,
}

impl ScreenDistortion {
    pub fn start(&mut self, intensity: f32, duration: f32) {
        self.intensity = self.intensity.max(intensity);
        self.duration = self.duration.max(duration);
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0.0
    }

    /// Advance one tick and return this frame's tint and ambient dimming.
    pub fn update(&mut self, dt: f32, effects: &EffectTuning) -> DistortionFrame {
        if self.duration <= 0.0 {
            self.intensity = 0.0;
            return DistortionFrame::CLEAR;
        }
        // Normalize against the typical 3-second request
        let factor = self.intensity * (self.duration / 3.0);
        let frame = DistortionFrame {
            tint_blend: (factor * 0.4).min(effects.max_tint),
            ambient_scale: 1.0 - (factor * 0.3).min(effects.max_ambient_drop),
        };
        self.duration -= dt;
        self.intensity *= effects.distortion_decay;
        frame
    }
}

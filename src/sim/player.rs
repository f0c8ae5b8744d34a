//! Player state and the gravity integrator
//!
//! Horizontal and depth position come straight from the attitude stream;
//! the vertical axis is its own little state machine: height-adjust
//! commands rise instantly, gravity sinks the bird back toward the floor
//! every tick, scaled by the current game speed. Hop and sink.

use glam::Vec3;

use crate::tuning::{FlightTuning, WorldTuning};

/// The controlled bird
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
}

impl Player {
    /// Start on the floor of the height band, centered in the lane
    pub fn new(flight: &FlightTuning) -> Self {
        Self {
            pos: Vec3::new(0.0, flight.min_height, 0.0),
        }
    }

    /// Apply a smoothed attitude sample: roll steers laterally, pitch along
    /// the travel axis. Vertical position is untouched.
    pub fn apply_attitude(
        &mut self,
        roll: f32,
        pitch: f32,
        flight: &FlightTuning,
        world: &WorldTuning,
    ) {
        let x = roll * flight.roll_sensitivity;
        self.pos.x = x.clamp(-world.max_horizontal, world.max_horizontal);
        self.pos.z = -pitch * flight.pitch_sensitivity;
    }

    /// Instant height step from touch, gesture or key. Clamped to the band.
    pub fn adjust_height(&mut self, direction: i8, flight: &FlightTuning) {
        self.pos.y = (self.pos.y + f32::from(direction) * flight.height_step)
            .clamp(flight.min_height, flight.max_height);
    }

    /// One gravity step: decay toward the floor, never overshooting.
    /// `speed` is the current game-speed multiplier.
    pub fn integrate_gravity(&mut self, flight: &FlightTuning, speed: f32, dt: f32) {
        if self.pos.y > flight.min_height {
            self.pos.y = (self.pos.y - flight.gravity_rate * speed * dt).max(flight.min_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flight() -> FlightTuning {
        FlightTuning::default()
    }

    fn world() -> WorldTuning {
        WorldTuning::default()
    }

    #[test]
    fn test_three_height_steps_before_gravity() {
        // From the floor (-25), three +1 steps of 10 land at +5; gravity is
        // only applied after the frame's command drain.
        let mut player = Player::new(&flight());
        for _ in 0..3 {
            player.adjust_height(1, &flight());
        }
        assert_eq!(player.pos.y, 5.0);
    }

    #[test]
    fn test_height_clamps_at_band_edges() {
        let mut player = Player::new(&flight());
        for _ in 0..20 {
            player.adjust_height(1, &flight());
        }
        assert_eq!(player.pos.y, flight().max_height);
        for _ in 0..20 {
            player.adjust_height(-1, &flight());
        }
        assert_eq!(player.pos.y, flight().min_height);
    }

    #[test]
    fn test_gravity_never_overshoots_floor() {
        let mut player = Player::new(&flight());
        player.adjust_height(1, &flight());
        // Huge dt at high speed: one step must land exactly on the floor
        player.integrate_gravity(&flight(), 3.0, 100.0);
        assert_eq!(player.pos.y, flight().min_height);
    }

    #[test]
    fn test_gravity_scales_with_game_speed() {
        let mut slow = Player::new(&flight());
        let mut fast = Player::new(&flight());
        for p in [&mut slow, &mut fast] {
            for _ in 0..5 {
                p.adjust_height(1, &flight());
            }
        }
        slow.integrate_gravity(&flight(), 0.5, 1.0);
        fast.integrate_gravity(&flight(), 2.0, 1.0);
        assert!(fast.pos.y < slow.pos.y);
    }

    #[test]
    fn test_attitude_clamps_horizontal() {
        let mut player = Player::new(&flight());
        player.apply_attitude(500.0, 0.0, &flight(), &world());
        assert_eq!(player.pos.x, world().max_horizontal);
        player.apply_attitude(-500.0, 0.0, &flight(), &world());
        assert_eq!(player.pos.x, -world().max_horizontal);
    }

    proptest! {
        #[test]
        fn prop_height_stays_in_band(steps in proptest::collection::vec(-3i8..=3, 0..200)) {
            let flight = flight();
            let mut player = Player::new(&flight);
            for (i, step) in steps.iter().enumerate() {
                player.adjust_height(*step, &flight);
                if i % 3 == 0 {
                    player.integrate_gravity(&flight, 1.0, 1.0 / 60.0);
                }
                prop_assert!(player.pos.y >= flight.min_height);
                prop_assert!(player.pos.y <= flight.max_height);
            }
        }
    }
}

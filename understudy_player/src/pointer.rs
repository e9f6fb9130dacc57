// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and avatar state.

use kurbo::Point;

use crate::host::AvatarFrame;

/// Where the virtual pointer is and how fast it plays.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerState {
    /// Target position driven by action tweens.
    pub(crate) position: Point,
    /// Trailing position used when damping is enabled.
    pub(crate) damped_position: Point,
    speed: f64,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            damped_position: Point::ZERO,
            speed: 1.0,
        }
    }
}

impl PointerState {
    /// Target position in client coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Trailing position. Equals the target position when damping is disabled and idle.
    pub fn damped_position(&self) -> Point {
        self.damped_position
    }

    /// The position used for rendering, hit testing and dispatch.
    pub fn effective(&self, damped: bool) -> Point {
        if damped {
            self.damped_position
        } else {
            self.position
        }
    }

    /// Playback rate. Always positive and finite.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the playback rate. Rejects zero, negative and non-finite values.
    pub(crate) fn set_speed(&mut self, value: f64) -> bool {
        if value.is_finite() && value > 0.0 {
            self.speed = value;
            true
        } else {
            false
        }
    }

    /// Scale a duration or delay by the current speed.
    pub(crate) fn scaled(&self, seconds: f64) -> f64 {
        seconds / self.speed
    }
}

/// Visual properties of the avatar that tweens drive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct AvatarLook {
    pub(crate) opacity: f64,
    pub(crate) scale: f64,
}

impl Default for AvatarLook {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
        }
    }
}

impl AvatarLook {
    pub(crate) fn frame(self, position: Point) -> AvatarFrame {
        AvatarFrame {
            position,
            opacity: self.opacity,
            scale: self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_rejects_invalid_values() {
        let mut p = PointerState::default();
        assert!(p.set_speed(2.0));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(!p.set_speed(bad));
            assert_eq!(p.speed(), 2.0);
        }
        assert_eq!(p.scaled(1.0), 0.5);
    }

    #[test]
    fn effective_position_follows_damping() {
        let p = PointerState {
            position: Point::new(10.0, 10.0),
            damped_position: Point::new(4.0, 4.0),
            speed: 1.0,
        };
        assert_eq!(p.effective(false), Point::new(10.0, 10.0));
        assert_eq!(p.effective(true), Point::new(4.0, 4.0));
    }
}

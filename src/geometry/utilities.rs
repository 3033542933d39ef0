//! Geometry utility functions
//!
//! Small helpers shared by the session controller and the render adapter.

use bevy::prelude::*;

/// Direction of one wheel notch: -1, 0 or 1
///
/// Unlike `f32::signum`, a zero delta yields zero so an empty wheel event changes nothing.
pub fn wheel_sign(delta_y: f32) -> f32 {
    if delta_y > 0.0 {
        1.0
    } else if delta_y < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Whether `pointer` lies within `radius` of `center`
pub fn is_within(pointer: Vec2, center: Vec2, radius: f32) -> bool {
    pointer.distance_squared(center) <= radius * radius
}

/// Round to the nearest multiple of `step`, never going below `minimum`
pub fn round_to_step(value: f32, step: f32, minimum: f32) -> f32 {
    ((value / step).round() * step).max(minimum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_sign() {
        assert_eq!(wheel_sign(120.0), 1.0);
        assert_eq!(wheel_sign(-0.5), -1.0);
        assert_eq!(wheel_sign(0.0), 0.0);
    }

    #[test]
    fn test_is_within() {
        let center = Vec2::new(150.0, 50.0);
        assert!(is_within(Vec2::new(160.0, 60.0), center, 20.0));
        assert!(is_within(Vec2::new(170.0, 50.0), center, 20.0));
        assert!(!is_within(Vec2::new(171.0, 50.0), center, 20.0));
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(50.0, 20.0, 40.0), 60.0);
        assert_eq!(round_to_step(20.0, 20.0, 40.0), 40.0);
    }
}

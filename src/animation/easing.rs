//! Easing curves for camera tweens and overlay sequences

/// Easing function types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic slow start
    EaseIn,
    /// Quadratic fast start, decelerate
    EaseOut,
    /// Quadratic ease in and out
    EaseInOut,
    /// Cubic in-out, used for page-level fades
    Power2InOut,
    /// Quartic deceleration; the cinematic camera curve
    #[default]
    Power3Out,
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::Power2InOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
        Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
    }
}

//! Animation primitives for camera transitions and overlays
//!
//! Easing curves, a keyed Vec3 tween engine, and the timed phases of the
//! star approach sequence.

mod easing;
mod sun_sequence;
mod tween;

pub use easing::{ease, Easing};
pub use sun_sequence::{SunApproachSequence, SunPhase};
pub use tween::{TweenFrame, TweenHandle, TweenOptions, TweenTarget, Tweener};

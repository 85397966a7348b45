//! Time-bounded Vec3 tweens for the camera handle
//!
//! A small stand-in for a timeline library: tweens are keyed by the property
//! they drive, so a new transition can kill everything still animating the
//! camera before it starts its own.

use super::easing::{ease, Easing};
use crate::math::Vec3;

/// Camera properties a tween can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    CameraPosition,
    ControlsTarget,
}

/// Opaque reference to a running tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

#[derive(Debug, Clone, Copy)]
pub struct TweenOptions {
    /// Seconds from start to end value
    pub duration: f32,
    pub easing: Easing,
}

impl TweenOptions {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

#[derive(Debug, Clone)]
struct Tween {
    handle: TweenHandle,
    target: TweenTarget,
    from: Vec3,
    to: Vec3,
    options: TweenOptions,
    elapsed: f32,
}

impl Tween {
    fn progress(&self) -> f32 {
        if self.options.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.options.duration).min(1.0)
        }
    }

    fn value(&self) -> Vec3 {
        self.from.lerp(&self.to, ease(self.progress(), self.options.easing))
    }
}

/// Values produced by one tick
#[derive(Debug, Default)]
pub struct TweenFrame {
    /// New value for every tween that advanced, in start order
    pub updates: Vec<(TweenTarget, Vec3)>,
    /// Tweens that reached their end value this tick
    pub completed: Vec<TweenHandle>,
}

impl TweenFrame {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.completed.is_empty()
    }
}

/// Owns all running tweens
#[derive(Debug, Default)]
pub struct Tweener {
    tweens: Vec<Tween>,
    next_id: u64,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating `target` from `from` to `to`
    pub fn animate(&mut self, target: TweenTarget, from: Vec3, to: Vec3, options: TweenOptions) -> TweenHandle {
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        self.tweens.push(Tween {
            handle,
            target,
            from,
            to,
            options,
            elapsed: 0.0,
        });
        handle
    }

    /// Cancel one tween; returns false if it already finished
    pub fn kill(&mut self, handle: TweenHandle) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.handle != handle);
        self.tweens.len() != before
    }

    /// Cancel every tween driving `target`, returning how many were removed
    pub fn kill_tweens_of(&mut self, target: TweenTarget) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.target != target);
        before - self.tweens.len()
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }

    pub fn is_tweening(&self, target: TweenTarget) -> bool {
        self.tweens.iter().any(|t| t.target == target)
    }

    /// Advance every tween by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> TweenFrame {
        let mut frame = TweenFrame::default();

        for tween in &mut self.tweens {
            tween.elapsed += dt.max(0.0);
            frame.updates.push((tween.target, tween.value()));
            if tween.progress() >= 1.0 {
                frame.completed.push(tween.handle);
            }
        }

        self.tweens.retain(|t| t.progress() < 1.0);
        frame
    }
}

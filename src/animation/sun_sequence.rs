//! Multi-phase overlay played when the camera heads for the star

/// Seconds spent in each phase before moving on
const APPROACH_SECS: f32 = 2.0;
const EXPLOSION_SECS: f32 = 2.0;
const FLARE_STORM_SECS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunPhase {
    Approaching,
    Explosion,
    FlareStorm,
    Complete,
}

impl SunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SunPhase::Approaching => "approaching",
            SunPhase::Explosion => "3d-explosion",
            SunPhase::FlareStorm => "3d-flare-storm",
            SunPhase::Complete => "complete",
        }
    }

    fn at(elapsed: f32) -> Self {
        if elapsed < APPROACH_SECS {
            SunPhase::Approaching
        } else if elapsed < APPROACH_SECS + EXPLOSION_SECS {
            SunPhase::Explosion
        } else if elapsed < APPROACH_SECS + EXPLOSION_SECS + FLARE_STORM_SECS {
            SunPhase::FlareStorm
        } else {
            SunPhase::Complete
        }
    }
}

/// Purely presentational timeline; the camera tween runs independently of it
#[derive(Debug, Clone, Default)]
pub struct SunApproachSequence {
    elapsed: f32,
    active: bool,
}

impl SunApproachSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start from the first phase
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Stop without reaching the final phase
    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current phase, or None when nothing is playing
    pub fn phase(&self) -> Option<SunPhase> {
        self.active.then(|| SunPhase::at(self.elapsed))
    }

    /// Advance the timeline; returns the new phase when it changed this frame
    pub fn update(&mut self, dt: f32) -> Option<SunPhase> {
        if !self.active {
            return None;
        }

        let before = SunPhase::at(self.elapsed);
        self.elapsed += dt;
        let after = SunPhase::at(self.elapsed);

        if after == SunPhase::Complete {
            self.active = false;
        }

        (after != before).then_some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut seq = SunApproachSequence::new();
        assert_eq!(seq.phase(), None);
        assert_eq!(seq.update(10.0), None);
    }

    #[test]
    fn test_phase_progression() {
        let mut seq = SunApproachSequence::new();
        seq.start();
        assert_eq!(seq.phase(), Some(SunPhase::Approaching));

        assert_eq!(seq.update(1.0), None);
        assert_eq!(seq.update(1.5), Some(SunPhase::Explosion));
        assert_eq!(seq.update(2.0), Some(SunPhase::FlareStorm));
        assert!(seq.is_active());
        assert_eq!(seq.update(3.0), Some(SunPhase::Complete));
        assert!(!seq.is_active());
        assert_eq!(seq.phase(), None);
    }

    #[test]
    fn test_restart_rewinds() {
        let mut seq = SunApproachSequence::new();
        seq.start();
        seq.update(5.0);
        seq.start();
        assert_eq!(seq.phase(), Some(SunPhase::Approaching));
    }

    #[test]
    fn test_cancel_silences_updates() {
        let mut seq = SunApproachSequence::new();
        seq.start();
        seq.cancel();
        assert_eq!(seq.phase(), None);
        assert_eq!(seq.update(3.0), None);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(SunPhase::Explosion.as_str(), "3d-explosion");
        assert_eq!(SunPhase::Complete.as_str(), "complete");
    }
}

//! Particle systems: instanced ring rocks and the background starfield

pub mod rings;
pub mod starfield;

pub use rings::{RingField, RingParticle, FLOATS_PER_INSTANCE, RADIAL_WOBBLE};
pub use starfield::{Starfield, DEFAULT_STAR_COUNT};

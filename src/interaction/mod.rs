pub mod picking;

pub use picking::{HitInfo, PickCamera, PickTarget, RayPicker};

//! Camera handling: the orbit-controls handle, the follow rig and focus transitions

pub mod controls;
pub mod focus;
pub mod rig;

pub use controls::OrbitControls;
pub use focus::{FocusController, FocusEvent, FocusPhase, Transition, TransitionKind};
pub use rig::{CameraPose, CameraRig, RigState, RigStep};

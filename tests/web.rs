//! Browser smoke tests for the GPU-free part of the viewer
#![cfg(target_arch = "wasm32")]

use solar_orrery::camera::FocusEvent;
use solar_orrery::{FocusError, Orrery, SystemConfig};
use wasm_bindgen_test::*;

const CUSTOM: &str = r#"
name: Two-body test system
background_stars: 200
bodies:
  - name: Lux
    kind: star
    size: 1.0
    color: [1.0, 0.9, 0.6]
  - name: Cinder
    distance: 5.0
    size: 0.3
    speed: 1.0
    color: [0.6, 0.3, 0.2]
"#;

#[wasm_bindgen_test]
fn builtin_system_mounts() {
    let orrery = Orrery::new(SystemConfig::default()).unwrap();
    assert_eq!(orrery.body_names().len(), 10);
    assert!(!orrery.is_transitioning());
}

#[wasm_bindgen_test]
fn custom_system_flies_to_planet() {
    let mut orrery = Orrery::from_yaml(CUSTOM).unwrap();
    orrery.focus_body("cinder").unwrap();
    assert_eq!(orrery.focus_body("lux"), Err(FocusError::TransitionInProgress));

    let mut arrived = false;
    for _ in 0..120 {
        arrived |= orrery
            .frame(1.0 / 60.0)
            .contains(&FocusEvent::Arrived("Cinder".to_string()));
    }
    assert!(arrived);
    assert_eq!(orrery.focused_body().as_deref(), Some("Cinder"));
}

#[wasm_bindgen_test]
fn unknown_body_is_reported() {
    let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
    assert_eq!(
        orrery.focus_body("Vulcan"),
        Err(FocusError::UnknownBody("Vulcan".to_string()))
    );
}

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

pub mod animation;
pub mod camera;
pub mod error;
pub mod interaction;
pub mod math;
pub mod mesh;
pub mod navigation;
pub mod orbit;
pub mod orrery;
pub mod particles;
pub mod render;
pub mod scene;

pub use error::{ConfigError, FocusError, RenderError};
pub use orrery::Orrery;
pub use scene::{Scene, SystemConfig};

use render::RenderPipeline;

/// Install the panic hook and the console logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (hot reload) finds the logger already set
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Interactive solar system bound to a canvas
#[wasm_bindgen]
pub struct OrreryViewer {
    pipeline: RenderPipeline,
    orrery: Orrery,
    width: i32,
    height: i32,
}

#[wasm_bindgen]
impl OrreryViewer {
    /// Create a viewer showing the built-in solar system
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<OrreryViewer, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or_else(|| to_js(RenderError::NoContext))?
            .dyn_into::<WebGl2RenderingContext>()?;

        let mut pipeline = RenderPipeline::new(gl, width, height).map_err(to_js)?;
        let orrery = Orrery::new(SystemConfig::default()).map_err(to_js)?;
        pipeline.fov = orrery.scene().tuning().fov_degrees.to_radians();
        pipeline.upload_scene(orrery.scene()).map_err(to_js)?;

        Ok(Self {
            pipeline,
            orrery,
            width,
            height,
        })
    }

    /// Replace the system with one described in YAML
    #[wasm_bindgen]
    pub fn load_system(&mut self, yaml: &str) -> Result<(), JsValue> {
        let orrery = Orrery::from_yaml(yaml).map_err(to_js)?;
        self.pipeline.fov = orrery.scene().tuning().fov_degrees.to_radians();
        self.pipeline.upload_scene(orrery.scene()).map_err(to_js)?;
        self.orrery = orrery;
        Ok(())
    }

    /// Update and render a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.orrery.frame(dt);
        self.pipeline.render(self.orrery.scene(), &self.orrery.camera_pose());
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.pipeline.resize(width, height);
    }

    /// Focus whatever body is under the pointer; returns its name.
    /// Throws if the camera is busy with another transition.
    #[wasm_bindgen]
    pub fn on_click(&mut self, x: f32, y: f32) -> Result<Option<String>, JsValue> {
        self.orrery
            .click(x, y, self.width as f32, self.height as f32, self.pipeline.fov)
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn focus_body(&mut self, name: &str) -> Result<(), JsValue> {
        self.orrery.focus_body(name).map(|_| ()).map_err(to_js)
    }

    /// Feed a `KeyboardEvent.key`; returns the highlighted or selected body
    #[wasm_bindgen]
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Result<Option<String>, JsValue> {
        self.orrery.handle_key(key, ctrl).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn reset_view(&mut self) {
        self.orrery.reset_view();
    }

    #[wasm_bindgen]
    pub fn snap_to_overview(&mut self) {
        self.orrery.snap_to_overview();
    }

    /// Orbit camera
    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.orrery.orbit(delta_x, delta_y);
    }

    /// Zoom camera
    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.orrery.zoom(delta);
    }

    /// Pan camera target
    #[wasm_bindgen]
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        self.orrery.pan(delta_x, delta_y);
    }

    #[wasm_bindgen]
    pub fn focused_body(&self) -> Option<String> {
        self.orrery.focused_body()
    }

    #[wasm_bindgen]
    pub fn is_transitioning(&self) -> bool {
        self.orrery.is_transitioning()
    }

    /// Overlay phase while the star sequence plays
    #[wasm_bindgen]
    pub fn sun_sequence_phase(&self) -> Option<String> {
        self.orrery.sun_phase().map(|phase| phase.as_str().to_string())
    }

    #[wasm_bindgen]
    pub fn body_names(&self) -> js_sys::Array {
        self.orrery
            .body_names()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }
}

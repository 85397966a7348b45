use web_sys::{WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject};
use crate::camera::CameraPose;
use crate::error::RenderError;
use crate::math::{Mat4, Vec3};
use crate::mesh::{orbit_loop, rock_mesh, uv_sphere, LineLoop, Mesh, VERTEX_STRIDE};
use crate::scene::{hex, BodyHandle, RingMaterial, Scene};
use super::webgl::WebGLContext;
use super::shaders::*;

type Gl = WebGl2RenderingContext;

const ORBIT_SEGMENTS: usize = 128;
const ORBIT_GLOW_SCALE: f32 = 1.002;
const ORBIT_OPACITY: f32 = 0.4;
const ORBIT_GLOW_OPACITY: f32 = 0.15;
const STAR_FLOATS: usize = 8;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 2000.0;

/// Cached uniform locations for the body shader
struct BodyUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
    light_pos: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
}

struct RingUniforms {
    ring_frame: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
    light_pos: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
}

struct StarUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
}

struct OrbitUniforms {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
}

/// GPU copy of an indexed mesh
struct MeshBuffers {
    vao: WebGlVertexArrayObject,
    buffers: Vec<WebGlBuffer>,
    index_count: i32,
}

/// One ring band: rock mesh plus its per-instance matrices
struct RingBandBuffers {
    body: BodyHandle,
    band: usize,
    mesh: MeshBuffers,
    instances: WebGlBuffer,
    instance_count: i32,
    material: RingMaterial,
}

/// Non-indexed vertex stream (orbit loops, star points)
struct StreamBuffers {
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    count: i32,
}

/// Orbit guide of one planet, drawn twice
struct OrbitGuide {
    main: StreamBuffers,
    glow: StreamBuffers,
}

/// Draws a mounted [`Scene`] from a camera pose
pub struct RenderPipeline {
    ctx: WebGLContext,

    body_program: WebGlProgram,
    ring_program: WebGlProgram,
    star_program: WebGlProgram,
    orbit_program: WebGlProgram,

    body_uniforms: BodyUniforms,
    ring_uniforms: RingUniforms,
    star_uniforms: StarUniforms,
    orbit_uniforms: OrbitUniforms,

    sphere: Option<MeshBuffers>,
    ring_bands: Vec<RingBandBuffers>,
    orbits: Vec<OrbitGuide>,
    stars: Option<StreamBuffers>,

    width: i32,
    height: i32,

    /// Vertical field of view, radians
    pub fov: f32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self, RenderError> {
        let ctx = WebGLContext::new(gl);

        let body_program = ctx.create_program(BODY_VERTEX_SHADER, BODY_FRAGMENT_SHADER)?;
        let ring_program = ctx.create_program(RING_VERTEX_SHADER, RING_FRAGMENT_SHADER)?;
        let star_program = ctx.create_program(STAR_VERTEX_SHADER, STAR_FRAGMENT_SHADER)?;
        let orbit_program = ctx.create_program(ORBIT_VERTEX_SHADER, ORBIT_FRAGMENT_SHADER)?;

        let body_uniforms = BodyUniforms {
            model: ctx.get_uniform_location(&body_program, "u_model"),
            view: ctx.get_uniform_location(&body_program, "u_view"),
            projection: ctx.get_uniform_location(&body_program, "u_projection"),
            color: ctx.get_uniform_location(&body_program, "u_color"),
            emissive: ctx.get_uniform_location(&body_program, "u_emissive"),
            light_pos: ctx.get_uniform_location(&body_program, "u_light_pos"),
            camera_pos: ctx.get_uniform_location(&body_program, "u_camera_pos"),
            opacity: ctx.get_uniform_location(&body_program, "u_opacity"),
        };

        let ring_uniforms = RingUniforms {
            ring_frame: ctx.get_uniform_location(&ring_program, "u_ring_frame"),
            view: ctx.get_uniform_location(&ring_program, "u_view"),
            projection: ctx.get_uniform_location(&ring_program, "u_projection"),
            color: ctx.get_uniform_location(&ring_program, "u_color"),
            emissive: ctx.get_uniform_location(&ring_program, "u_emissive"),
            light_pos: ctx.get_uniform_location(&ring_program, "u_light_pos"),
            opacity: ctx.get_uniform_location(&ring_program, "u_opacity"),
        };

        let star_uniforms = StarUniforms {
            model: ctx.get_uniform_location(&star_program, "u_model"),
            view: ctx.get_uniform_location(&star_program, "u_view"),
            projection: ctx.get_uniform_location(&star_program, "u_projection"),
            opacity: ctx.get_uniform_location(&star_program, "u_opacity"),
        };

        let orbit_uniforms = OrbitUniforms {
            view: ctx.get_uniform_location(&orbit_program, "u_view"),
            projection: ctx.get_uniform_location(&orbit_program, "u_projection"),
            color: ctx.get_uniform_location(&orbit_program, "u_color"),
            opacity: ctx.get_uniform_location(&orbit_program, "u_opacity"),
        };

        Ok(Self {
            ctx,
            body_program,
            ring_program,
            star_program,
            orbit_program,
            body_uniforms,
            ring_uniforms,
            star_uniforms,
            orbit_uniforms,
            sphere: None,
            ring_bands: Vec::new(),
            orbits: Vec::new(),
            stars: None,
            width,
            height,
            fov: std::f32::consts::FRAC_PI_4,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Upload every mesh a scene needs, replacing whatever was there
    pub fn upload_scene(&mut self, scene: &Scene) -> Result<(), RenderError> {
        self.release_scene();

        self.sphere = Some(self.upload_mesh(&uv_sphere(1.0, 32, 16), None)?);

        for handle in scene.registry().handles() {
            let Some(rings) = scene.rings(handle) else { continue };
            for (band, (config, field)) in rings.bands.iter().enumerate() {
                let instances = self.ctx.create_buffer_f32(field.instance_data(), Gl::DYNAMIC_DRAW)?;
                let mesh = self.upload_mesh(&rock_mesh(&config.geometry), Some(&instances))?;
                self.ring_bands.push(RingBandBuffers {
                    body: handle,
                    band,
                    mesh,
                    instances,
                    instance_count: field.count() as i32,
                    material: config.material,
                });
            }
        }

        for body in scene.bodies().iter().filter(|b| !b.is_star()) {
            let main = self.upload_line_loop(&orbit_loop(body.distance, ORBIT_SEGMENTS, 1.0))?;
            let glow = self.upload_line_loop(&orbit_loop(body.distance, ORBIT_SEGMENTS, ORBIT_GLOW_SCALE))?;
            self.orbits.push(OrbitGuide { main, glow });
        }

        self.stars = Some(self.upload_stars(&scene.starfield().get_particle_data())?);

        log::debug!(
            "uploaded scene: {} ring bands, {} orbit guides, {} stars",
            self.ring_bands.len(),
            self.orbits.len(),
            scene.starfield().count()
        );
        Ok(())
    }

    fn release_scene(&mut self) {
        let gl = &self.ctx.gl;
        let delete_stream = |s: StreamBuffers| {
            gl.delete_vertex_array(Some(&s.vao));
            gl.delete_buffer(Some(&s.buffer));
        };
        let delete_mesh = |m: MeshBuffers| {
            gl.delete_vertex_array(Some(&m.vao));
            for buffer in &m.buffers {
                gl.delete_buffer(Some(buffer));
            }
        };

        if let Some(sphere) = self.sphere.take() {
            delete_mesh(sphere);
        }
        for band in self.ring_bands.drain(..) {
            gl.delete_buffer(Some(&band.instances));
            delete_mesh(band.mesh);
        }
        for guide in self.orbits.drain(..) {
            delete_stream(guide.main);
            delete_stream(guide.glow);
        }
        if let Some(stars) = self.stars.take() {
            delete_stream(stars);
        }
    }

    /// Upload an indexed mesh; with `instances`, also bind a per-instance mat4 at location 2
    fn upload_mesh(&self, mesh: &Mesh, instances: Option<&WebGlBuffer>) -> Result<MeshBuffers, RenderError> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = self.ctx.create_buffer_f32(&mesh.vertex_data(), Gl::STATIC_DRAW)?;
        let index_buffer = self.ctx.create_index_buffer(mesh.index_data(), Gl::STATIC_DRAW)?;

        // Layout: position(3) + normal(3)
        let stride = VERTEX_STRIDE as i32;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertex_buffer));
        self.ctx.float_attribute(0, 3, stride, 0);
        self.ctx.float_attribute(1, 3, stride, 3);

        if let Some(instances) = instances {
            gl.bind_buffer(Gl::ARRAY_BUFFER, Some(instances));
            self.ctx.instance_matrix_attribute(2);
        }

        gl.bind_vertex_array(None);
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);

        Ok(MeshBuffers {
            vao,
            buffers: vec![vertex_buffer, index_buffer],
            index_count: mesh.index_data().len() as i32,
        })
    }

    fn upload_line_loop(&self, line: &LineLoop) -> Result<StreamBuffers, RenderError> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self.ctx.create_buffer_f32(&line.vertex_data(), Gl::STATIC_DRAW)?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
        self.ctx.float_attribute(0, 3, 3, 0);

        gl.bind_vertex_array(None);
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);

        Ok(StreamBuffers { vao, buffer, count: line.len() as i32 })
    }

    /// Format: position(3) + size(1) + alpha(1) + color(3) = 8 floats per star.
    /// Written once; the breathing opacity goes in as a uniform.
    fn upload_stars(&self, data: &[f32]) -> Result<StreamBuffers, RenderError> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self.ctx.create_buffer_f32(data, Gl::STATIC_DRAW)?;
        let stride = STAR_FLOATS as i32;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
        self.ctx.float_attribute(0, 3, stride, 0);
        self.ctx.float_attribute(1, 1, stride, 3);
        self.ctx.float_attribute(2, 1, stride, 4);
        self.ctx.float_attribute(3, 3, stride, 5);

        gl.bind_vertex_array(None);
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);

        Ok(StreamBuffers { vao, buffer, count: (data.len() / STAR_FLOATS) as i32 })
    }

    /// Push this frame's ring matrices to the GPU
    fn sync_dynamic(&self, scene: &Scene) {
        for band in &self.ring_bands {
            if let Some((_, field)) = scene.rings(band.body).and_then(|r| r.bands.get(band.band)) {
                self.ctx.update_buffer_f32(&band.instances, field.instance_data());
            }
        }
    }

    /// Render a frame
    pub fn render(&self, scene: &Scene, pose: &CameraPose) {
        let gl = &self.ctx.gl;

        let projection = Mat4::perspective(self.fov, self.aspect(), NEAR_PLANE, FAR_PLANE);
        let view = Mat4::look_at(pose.position, pose.look_at, Vec3::UP);
        let light_pos = scene
            .registry()
            .star()
            .and_then(|h| scene.position(h))
            .unwrap_or(Vec3::ZERO);

        self.sync_dynamic(scene);

        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(0.0, 0.0, 0.0, 1.0);
        self.ctx.enable_depth_test();

        // Backdrop: stars and orbit guides, no depth writes
        gl.depth_mask(false);
        if let Some(stars) = &self.stars {
            gl.use_program(Some(&self.star_program));
            self.ctx.enable_additive_blending();
            self.ctx.uniform_matrix4fv(self.star_uniforms.model.as_ref(), scene.starfield().model_matrix().as_slice());
            self.ctx.uniform_matrix4fv(self.star_uniforms.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(self.star_uniforms.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(self.star_uniforms.opacity.as_ref(), scene.starfield().opacity());

            gl.bind_vertex_array(Some(&stars.vao));
            gl.draw_arrays(Gl::POINTS, 0, stars.count);
        }

        if !self.orbits.is_empty() {
            gl.use_program(Some(&self.orbit_program));
            self.ctx.enable_blending();
            self.ctx.uniform_matrix4fv(self.orbit_uniforms.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(self.orbit_uniforms.projection.as_ref(), projection.as_slice());

            for guide in &self.orbits {
                self.ctx.uniform_vec3(self.orbit_uniforms.color.as_ref(), Vec3::ONE);
                self.ctx.uniform_1f(self.orbit_uniforms.opacity.as_ref(), ORBIT_OPACITY);
                gl.bind_vertex_array(Some(&guide.main.vao));
                gl.draw_arrays(Gl::LINE_LOOP, 0, guide.main.count);

                self.ctx.uniform_vec3(self.orbit_uniforms.color.as_ref(), hex(0xaaccff));
                self.ctx.uniform_1f(self.orbit_uniforms.opacity.as_ref(), ORBIT_GLOW_OPACITY);
                gl.bind_vertex_array(Some(&guide.glow.vao));
                gl.draw_arrays(Gl::LINE_LOOP, 0, guide.glow.count);
            }
        }
        gl.depth_mask(true);

        // Bodies
        if let Some(sphere) = &self.sphere {
            gl.use_program(Some(&self.body_program));
            self.ctx.disable_blending();
            self.ctx.uniform_matrix4fv(self.body_uniforms.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(self.body_uniforms.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_vec3(self.body_uniforms.light_pos.as_ref(), light_pos);
            self.ctx.uniform_vec3(self.body_uniforms.camera_pos.as_ref(), pose.position);
            self.ctx.uniform_1f(self.body_uniforms.opacity.as_ref(), 1.0);

            gl.bind_vertex_array(Some(&sphere.vao));
            for handle in scene.registry().handles() {
                let (Some(body), Some(model), Some(emissive)) =
                    (scene.body(handle), scene.body_model(handle), scene.emissive(handle))
                else {
                    continue;
                };
                self.ctx.uniform_matrix4fv(self.body_uniforms.model.as_ref(), model.as_slice());
                self.ctx.uniform_vec3(self.body_uniforms.color.as_ref(), body.color);
                self.ctx.uniform_vec3(self.body_uniforms.emissive.as_ref(), emissive);
                gl.draw_elements_with_i32(Gl::TRIANGLES, sphere.index_count, Gl::UNSIGNED_INT, 0);
            }
        }

        // Ring rocks, instanced per band
        if !self.ring_bands.is_empty() {
            gl.use_program(Some(&self.ring_program));
            self.ctx.enable_blending();
            self.ctx.uniform_matrix4fv(self.ring_uniforms.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(self.ring_uniforms.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_vec3(self.ring_uniforms.light_pos.as_ref(), light_pos);

            for band in &self.ring_bands {
                let Some(frame) = scene.ring_frame(band.body) else { continue };
                self.ctx.uniform_matrix4fv(self.ring_uniforms.ring_frame.as_ref(), frame.as_slice());
                self.ctx.uniform_vec3(self.ring_uniforms.color.as_ref(), band.material.color);
                self.ctx.uniform_vec3(self.ring_uniforms.emissive.as_ref(), band.material.emissive);
                self.ctx.uniform_1f(self.ring_uniforms.opacity.as_ref(), band.material.opacity);

                gl.bind_vertex_array(Some(&band.mesh.vao));
                gl.draw_elements_instanced_with_i32(
                    Gl::TRIANGLES,
                    band.mesh.index_count,
                    Gl::UNSIGNED_INT,
                    0,
                    band.instance_count,
                );
            }
        }

        gl.bind_vertex_array(None);
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }
}

use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};
use crate::error::RenderError;
use crate::math::Vec3;

type Gl = WebGl2RenderingContext;

/// Wrapper around WebGL2 context with helper methods
pub struct WebGLContext {
    pub gl: WebGl2RenderingContext,
}

impl WebGLContext {
    pub fn new(gl: WebGl2RenderingContext) -> Self {
        Self { gl }
    }

    /// Compile a shader from source
    pub fn compile_shader(&self, shader_type: u32, source: &str) -> Result<WebGlShader, RenderError> {
        let gl = &self.gl;

        let shader = gl.create_shader(shader_type).ok_or(RenderError::Allocation("shader"))?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);

        if gl.get_shader_parameter(&shader, Gl::COMPILE_STATUS).as_bool().unwrap_or(false) {
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            Err(RenderError::ShaderCompile(log))
        }
    }

    /// Create a shader program from vertex and fragment shaders
    pub fn create_program(&self, vert_src: &str, frag_src: &str) -> Result<WebGlProgram, RenderError> {
        let gl = &self.gl;

        let vert_shader = self.compile_shader(Gl::VERTEX_SHADER, vert_src)?;
        let frag_shader = self.compile_shader(Gl::FRAGMENT_SHADER, frag_src)?;

        let program = gl.create_program().ok_or(RenderError::Allocation("program"))?;
        gl.attach_shader(&program, &vert_shader);
        gl.attach_shader(&program, &frag_shader);
        gl.link_program(&program);

        // Linked programs keep their own copy
        gl.delete_shader(Some(&vert_shader));
        gl.delete_shader(Some(&frag_shader));

        if gl.get_program_parameter(&program, Gl::LINK_STATUS).as_bool().unwrap_or(false) {
            Ok(program)
        } else {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            Err(RenderError::ProgramLink(log))
        }
    }

    /// Create a buffer and upload data
    pub fn create_buffer_f32(&self, data: &[f32], usage: u32) -> Result<WebGlBuffer, RenderError> {
        let gl = &self.gl;

        let buffer = gl.create_buffer().ok_or(RenderError::Allocation("vertex buffer"))?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));

        // Safety: the view is consumed by buffer_data before any allocation can move `data`
        unsafe {
            let array = js_sys::Float32Array::view(data);
            gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &array, usage);
        }

        gl.bind_buffer(Gl::ARRAY_BUFFER, None);
        Ok(buffer)
    }

    /// Overwrite the start of an existing buffer
    pub fn update_buffer_f32(&self, buffer: &WebGlBuffer, data: &[f32]) {
        let gl = &self.gl;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
        unsafe {
            let array = js_sys::Float32Array::view(data);
            gl.buffer_sub_data_with_i32_and_array_buffer_view(Gl::ARRAY_BUFFER, 0, &array);
        }
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);
    }

    /// Create an index buffer
    pub fn create_index_buffer(&self, data: &[u32], usage: u32) -> Result<WebGlBuffer, RenderError> {
        let gl = &self.gl;

        let buffer = gl.create_buffer().ok_or(RenderError::Allocation("index buffer"))?;
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&buffer));

        unsafe {
            let array = js_sys::Uint32Array::view(data);
            gl.buffer_data_with_array_buffer_view(Gl::ELEMENT_ARRAY_BUFFER, &array, usage);
        }

        // Left bound: the element binding is part of the current VAO
        Ok(buffer)
    }

    pub fn create_vao(&self) -> Result<WebGlVertexArrayObject, RenderError> {
        self.gl.create_vertex_array().ok_or(RenderError::Allocation("vertex array"))
    }

    /// Point a float attribute at the bound ARRAY_BUFFER
    pub fn float_attribute(&self, location: u32, size: i32, stride_floats: i32, offset_floats: i32) {
        self.gl.enable_vertex_attrib_array(location);
        self.gl.vertex_attrib_pointer_with_i32(location, size, Gl::FLOAT, false, stride_floats * 4, offset_floats * 4);
    }

    /// Bind a per-instance mat4 across four consecutive attribute slots
    pub fn instance_matrix_attribute(&self, first_location: u32) {
        for column in 0..4u32 {
            let location = first_location + column;
            self.float_attribute(location, 4, 16, column as i32 * 4);
            self.gl.vertex_attrib_divisor(location, 1);
        }
    }

    pub fn get_uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    pub fn uniform_1f(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    pub fn uniform_vec3(&self, location: Option<&WebGlUniformLocation>, v: Vec3) {
        self.gl.uniform3f(location, v.x, v.y, v.z);
    }

    pub fn uniform_matrix4fv(&self, location: Option<&WebGlUniformLocation>, data: &[f32; 16]) {
        self.gl.uniform_matrix4fv_with_f32_array(location, false, data);
    }

    /// Clear the screen
    pub fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    pub fn enable_depth_test(&self) {
        self.gl.enable(Gl::DEPTH_TEST);
        self.gl.depth_mask(true);
    }

    /// Standard alpha blending
    pub fn enable_blending(&self) {
        self.gl.enable(Gl::BLEND);
        self.gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);
    }

    /// Enable additive blending (for stars and glow lines)
    pub fn enable_additive_blending(&self) {
        self.gl.enable(Gl::BLEND);
        self.gl.blend_func(Gl::SRC_ALPHA, Gl::ONE);
    }

    pub fn disable_blending(&self) {
        self.gl.disable(Gl::BLEND);
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }
}

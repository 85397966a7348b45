/// Vertex shader for planets and the star
pub const BODY_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec3 v_world_position;

void main() {
    vec4 world_pos = u_model * vec4(a_position, 1.0);
    v_world_position = world_pos.xyz;
    v_normal = mat3(u_model) * a_normal;
    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Fragment shader for planets and the star: lit by the star, plus emissive
pub const BODY_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world_position;

uniform vec3 u_color;
uniform vec3 u_emissive;
uniform vec3 u_light_pos;
uniform vec3 u_camera_pos;
uniform float u_opacity;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 light_dir = normalize(u_light_pos - v_world_position);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    float diffuse = max(dot(normal, light_dir), 0.0);
    float ambient = 0.08;

    // Soft rim so the night side keeps a silhouette
    float rim = pow(1.0 - max(dot(normal, view_dir), 0.0), 3.0) * 0.15;

    vec3 color = u_color * (ambient + diffuse) + u_color * rim + u_emissive;
    color = color / (color + vec3(1.0));
    color = pow(color, vec3(1.0 / 2.2));

    fragColor = vec4(color, u_opacity);
}
"#;

/// Vertex shader for ring rocks, one mat4 per instance
pub const RING_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in mat4 a_instance;

uniform mat4 u_ring_frame;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec3 v_world_position;

void main() {
    mat4 model = u_ring_frame * a_instance;
    vec4 world_pos = model * vec4(a_position, 1.0);
    v_world_position = world_pos.xyz;
    v_normal = mat3(model) * a_normal;
    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Fragment shader for ring rocks
pub const RING_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world_position;

uniform vec3 u_color;
uniform vec3 u_emissive;
uniform vec3 u_light_pos;
uniform float u_opacity;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 light_dir = normalize(u_light_pos - v_world_position);

    // Rocks are small; light both faces
    float diffuse = abs(dot(normal, light_dir));
    vec3 color = u_color * (0.15 + 0.85 * diffuse) + u_emissive;
    color = pow(color / (color + vec3(1.0)), vec3(1.0 / 2.2));

    fragColor = vec4(color, u_opacity);
}
"#;

/// Vertex shader for the background stars
pub const STAR_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in float a_size;
layout(location = 2) in float a_alpha;
layout(location = 3) in vec3 a_color;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_opacity;

out float v_alpha;
out vec3 v_color;

void main() {
    v_alpha = a_alpha * u_opacity;
    v_color = a_color;

    vec4 view_pos = u_view * u_model * vec4(a_position, 1.0);
    gl_Position = u_projection * view_pos;
    gl_PointSize = max(a_size * (300.0 / -view_pos.z), 1.0);
}
"#;

/// Fragment shader for the background stars
pub const STAR_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float v_alpha;
in vec3 v_color;

out vec4 fragColor;

void main() {
    vec2 coord = gl_PointCoord - vec2(0.5);
    float dist = length(coord);

    if (dist > 0.5) {
        discard;
    }

    float alpha = v_alpha * (1.0 - dist * 2.0);
    fragColor = vec4(v_color, alpha);
}
"#;

/// Vertex shader for orbit guide loops
pub const ORBIT_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;

uniform mat4 u_view;
uniform mat4 u_projection;

void main() {
    gl_Position = u_projection * u_view * vec4(a_position, 1.0);
}
"#;

/// Fragment shader for orbit guide loops
pub const ORBIT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform vec3 u_color;
uniform float u_opacity;

out vec4 fragColor;

void main() {
    fragColor = vec4(u_color, u_opacity);
}
"#;

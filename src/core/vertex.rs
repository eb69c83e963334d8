//! Vertex stream layouts
//!
//! Objects bind three separate streams so shapes without uvs or normals can
//! still satisfy the shader's fixed locations.

/// Shader location of the position stream.
pub const POSITION_LOCATION: u32 = 0;
/// Shader location of the uv stream.
pub const UV_LOCATION: u32 = 1;
/// Shader location of the normal stream.
pub const NORMAL_LOCATION: u32 = 2;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![POSITION_LOCATION => Float32x3];
const UV_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![UV_LOCATION => Float32x2];
const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![NORMAL_LOCATION => Float32x3];

/// Position stream (`vec3<f32>` at location 0).
pub const fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRIBUTES,
    }
}

/// UV stream (`vec2<f32>` at location 1).
pub const fn uv_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &UV_ATTRIBUTES,
    }
}

/// Normal stream (`vec3<f32>` at location 2).
pub const fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &NORMAL_ATTRIBUTES,
    }
}

/// All three streams in slot order.
pub fn stream_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [position_layout(), uv_layout(), normal_layout()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_strides() {
        let [p, uv, n] = stream_layouts();
        assert_eq!(p.array_stride, 12);
        assert_eq!(uv.array_stride, 8);
        assert_eq!(n.array_stride, 12);
        assert_eq!(uv.attributes[0].shader_location, UV_LOCATION);
        assert_eq!(n.attributes[0].shader_location, NORMAL_LOCATION);
    }
}

// RustPixel
// copyright zipxing@hotmail.com 2022~2024

//! # Render Device Module
//!
//! The 2d layer issues a small, fixed set of OpenGL 3 calls. They are
//! collected in the `RenderDevice` trait so the drawing code can run on:
//!
//! - **gl**: `glow::Context`, the real OpenGL 3.2 core / GLES 3 backend
//! - **trace**: `TraceDevice`, records every call, no gpu needed
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │               Draw2d                     │
//! │  chars · pics · fill · fade · raw video  │
//! └───────────────────┬──────────────────────┘
//!                     │ RenderDevice
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//!  ┌──────────────┐       ┌──────────────┐
//!  │ glow::Context│       │ TraceDevice  │
//!  └──────────────┘       └──────────────┘
//! ```
//!
//! Methods take `&self` like glow does; the context is shared with the 3d
//! renderer and passed into every draw call.

use std::fmt::Debug;

/// OpenGL backend built on glow
pub mod gl;

/// recording backend
pub mod trace;

/// vertex attribute slot of positions
pub const ATTRIB_POSITION: u32 = 0;
/// vertex attribute slot of texture coordinates
pub const ATTRIB_TEXCOORD: u32 = 1;

pub trait RenderDevice {
    type Buffer: Copy + PartialEq + Debug;
    type VertexArray: Copy + PartialEq + Debug;
    type Texture: Copy + PartialEq + Debug;
    type Program: Copy + PartialEq + Debug;
    type UniformLocation: Clone + Debug;

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn delete_vertex_array(&self, vao: Self::VertexArray);
    fn create_texture(&self) -> Result<Self::Texture, String>;
    fn delete_texture(&self, texture: Self::Texture);

    fn bind_vertex_array(&self, vao: Option<Self::VertexArray>);
    /// binds GL_ARRAY_BUFFER
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// binds GL_TEXTURE_2D on the active unit
    fn bind_texture(&self, texture: Option<Self::Texture>);
    fn use_program(&self, program: Option<Self::Program>);

    /// Enables `index` and points it at `size` floats, stride and offset in floats.
    fn float_attrib(&self, index: u32, size: i32, stride: i32, offset: i32);

    /// Uploads vertices to the bound array buffer as GL_STREAM_DRAW.
    fn stream_vertices(&self, vertices: &[f32]);

    fn draw_triangle_strip(&self, first: i32, count: i32);

    fn uniform_4_f32(&self, location: Option<&Self::UniformLocation>, v: [f32; 4]);

    fn set_blend(&self, enabled: bool);

    /// Uploads tightly packed rgba bytes into the bound texture, stored with an
    /// rgb internal format (alpha is not kept).
    fn upload_rgba_solid(&self, width: i32, height: i32, rgba: &[u8]);

    /// GL_LINEAR min and mag filter on the bound texture
    fn set_linear_filter(&self);
}

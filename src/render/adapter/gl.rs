// RustPixel
// copyright zipxing@hotmail.com 2022~2024

//! RenderDevice for glow.
//!
//! Every call needs a current OpenGL 3.2 core (or GLES 3) context; the
//! window layer makes it current before the frame starts.

use crate::render::adapter::RenderDevice;
use glow::HasContext;

const FLOAT_SIZE: i32 = std::mem::size_of::<f32>() as i32;

impl RenderDevice for glow::Context {
    type Buffer = <glow::Context as HasContext>::Buffer;
    type VertexArray = <glow::Context as HasContext>::VertexArray;
    type Texture = <glow::Context as HasContext>::Texture;
    type Program = <glow::Context as HasContext>::Program;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn delete_vertex_array(&self, vao: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vao) }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { HasContext::create_texture(self) }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { HasContext::delete_texture(self, texture) }
    }

    fn bind_vertex_array(&self, vao: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vao) }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { self.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        unsafe { HasContext::bind_texture(self, glow::TEXTURE_2D, texture) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn float_attrib(&self, index: u32, size: i32, stride: i32, offset: i32) {
        // the layout is recorded in the bound vertex array, not in the program
        unsafe {
            self.enable_vertex_attrib_array(index);
            self.vertex_attrib_pointer_f32(
                index,
                size,
                glow::FLOAT,
                false,
                stride * FLOAT_SIZE,
                offset * FLOAT_SIZE,
            );
        }
    }

    fn stream_vertices(&self, vertices: &[f32]) {
        unsafe {
            self.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STREAM_DRAW,
            );
        }
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        unsafe { self.draw_arrays(glow::TRIANGLE_STRIP, first, count) }
    }

    fn uniform_4_f32(&self, location: Option<&Self::UniformLocation>, v: [f32; 4]) {
        unsafe { HasContext::uniform_4_f32(self, location, v[0], v[1], v[2], v[3]) }
    }

    fn set_blend(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.enable(glow::BLEND);
            } else {
                self.disable(glow::BLEND);
            }
        }
    }

    fn upload_rgba_solid(&self, width: i32, height: i32, rgba: &[u8]) {
        unsafe {
            self.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGB as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(rgba),
            );
        }
    }

    fn set_linear_filter(&self) {
        unsafe {
            self.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            self.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
        }
    }
}

// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Bind cache.
//!
//! Remembers the program, vertex array and 2d texture that were last bound
//! and skips binding them again. The fields are private: these helpers are
//! the only code that binds, so the cache always matches the gl state.
//! Anything else touching those binds (the 3d renderer, for example) must
//! call `invalidate` afterwards.

use crate::render::adapter::RenderDevice;

pub struct GlState<D: RenderDevice> {
    current_program: Option<D::Program>,
    current_vao: Option<D::VertexArray>,
    current_texture: Option<D::Texture>,
}

impl<D: RenderDevice> Default for GlState<D> {
    fn default() -> Self {
        Self {
            current_program: None,
            current_vao: None,
            current_texture: None,
        }
    }
}

impl<D: RenderDevice> GlState<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_program(&mut self, gl: &D, program: D::Program) {
        if self.current_program != Some(program) {
            self.current_program = Some(program);
            gl.use_program(Some(program));
        }
    }

    pub fn bind_vao(&mut self, gl: &D, vao: Option<D::VertexArray>) {
        if self.current_vao != vao {
            self.current_vao = vao;
            gl.bind_vertex_array(vao);
        }
    }

    pub fn bind_texture(&mut self, gl: &D, texture: Option<D::Texture>) {
        if self.current_texture != texture {
            self.current_texture = texture;
            gl.bind_texture(texture);
        }
    }

    pub fn current_program(&self) -> Option<D::Program> {
        self.current_program
    }

    pub fn current_vao(&self) -> Option<D::VertexArray> {
        self.current_vao
    }

    pub fn current_texture(&self) -> Option<D::Texture> {
        self.current_texture
    }

    /// Forget everything, the next bind of each kind is always issued.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }
}

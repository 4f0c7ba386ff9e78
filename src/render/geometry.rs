// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Shared vertex buffer and the two 2d vertex layouts.
//!
//! ```text
//!  x,y+h      x+w,y+h
//! sl,th--------sh,th
//!  |             |
//!  |             |
//! sl,tl--------sh,tl
//!  x,y        x+w,y
//! ```
//!
//! Quads are 4-vertex triangle strips in the order
//! (x,y+h) (x,y) (x+w,y+h) (x+w,y).
//! Textured layout: position.xy + texcoord.xy, 4 floats per vertex.
//! Color layout: position.xy, 2 floats per vertex.
//! Both vertex arrays record the same buffer.

use crate::error::{DrawError, DrawResult};
use crate::render::adapter::{RenderDevice, ATTRIB_POSITION, ATTRIB_TEXCOORD};
use crate::render::state::GlState;
use log::debug;

pub const TEXTURED_VERTEX_FLOATS: i32 = 4;
pub const COLOR_VERTEX_FLOATS: i32 = 2;
pub const QUAD_VERTICES: i32 = 4;

/// 16 floats: x, y, s, t per corner
#[rustfmt::skip]
pub fn textured_quad(x: f32, y: f32, w: f32, h: f32, sl: f32, tl: f32, sh: f32, th: f32) -> [f32; 16] {
    [
    //  X,     Y,     S,  T
        x,     y + h, sl, th,
        x,     y,     sl, tl,
        x + w, y + h, sh, th,
        x + w, y,     sh, tl,
    ]
}

/// 8 floats: x, y per corner
#[rustfmt::skip]
pub fn color_quad(x: f32, y: f32, w: f32, h: f32) -> [f32; 8] {
    [
        x,     y + h,
        x,     y,
        x + w, y + h,
        x + w, y,
    ]
}

pub struct GeometryState<D: RenderDevice> {
    vbo: Option<D::Buffer>,
    vao_textured: Option<D::VertexArray>,
    vao_color: Option<D::VertexArray>,
}

impl<D: RenderDevice> GeometryState<D> {
    /// Creates the shared buffer and both layouts.
    ///
    /// On failure whatever was created is released again before the error
    /// is returned.
    pub fn create(
        gl: &D,
        state: &mut GlState<D>,
        textured_program: D::Program,
        color_program: D::Program,
    ) -> DrawResult<Self> {
        let mut geo = Self {
            vbo: None,
            vao_textured: None,
            vao_color: None,
        };
        if let Err(e) = geo.setup(gl, state, textured_program, color_program) {
            geo.destroy(gl, state);
            return Err(e);
        }
        debug!(
            "2d geometry ready: vbo {:?} vao {:?} / {:?}",
            geo.vbo, geo.vao_textured, geo.vao_color
        );
        Ok(geo)
    }

    fn setup(
        &mut self,
        gl: &D,
        state: &mut GlState<D>,
        textured_program: D::Program,
        color_program: D::Program,
    ) -> DrawResult<()> {
        // textured layout
        let vao = gl.create_vertex_array().map_err(DrawError::Gpu)?;
        self.vao_textured = Some(vao);
        state.bind_vao(gl, Some(vao));

        let vbo = gl.create_buffer().map_err(DrawError::Gpu)?;
        self.vbo = Some(vbo);
        gl.bind_array_buffer(Some(vbo));

        state.use_program(gl, textured_program);
        gl.float_attrib(ATTRIB_POSITION, 2, TEXTURED_VERTEX_FLOATS, 0);
        gl.float_attrib(ATTRIB_TEXCOORD, 2, TEXTURED_VERTEX_FLOATS, 2);

        // color-only layout on the same buffer
        let vao = gl.create_vertex_array().map_err(DrawError::Gpu)?;
        self.vao_color = Some(vao);
        state.bind_vao(gl, Some(vao));
        gl.bind_array_buffer(Some(vbo));

        state.use_program(gl, color_program);
        gl.float_attrib(ATTRIB_POSITION, 2, COLOR_VERTEX_FLOATS, 0);

        state.bind_vao(gl, None);
        Ok(())
    }

    /// Releases buffer and layouts. Safe on a partially created state and
    /// when called twice.
    pub fn destroy(&mut self, gl: &D, state: &mut GlState<D>) {
        if self.vao_textured.is_some() || self.vao_color.is_some() {
            state.bind_vao(gl, None);
        }
        if let Some(vbo) = self.vbo.take() {
            gl.delete_buffer(vbo);
        }
        if let Some(vao) = self.vao_textured.take() {
            gl.delete_vertex_array(vao);
        }
        if let Some(vao) = self.vao_color.take() {
            gl.delete_vertex_array(vao);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.vbo.is_some() && self.vao_textured.is_some() && self.vao_color.is_some()
    }

    /// Binds the textured layout, uploads the quad and draws it.
    /// The texture and the textured program must already be bound.
    /// Does nothing once the state is destroyed.
    pub fn draw_textured(&self, gl: &D, state: &mut GlState<D>, quad: &[f32; 16]) {
        self.draw(gl, state, self.vao_textured, quad);
    }

    /// Same with the color layout, the color program must be active.
    pub fn draw_color(&self, gl: &D, state: &mut GlState<D>, quad: &[f32; 8]) {
        self.draw(gl, state, self.vao_color, quad);
    }

    fn draw(&self, gl: &D, state: &mut GlState<D>, vao: Option<D::VertexArray>, vertices: &[f32]) {
        if !self.is_ready() {
            return;
        }
        state.bind_vao(gl, vao);
        // binding the vao does not bind its buffer for uploads
        gl.bind_array_buffer(self.vbo);
        gl.stream_vertices(vertices);
        gl.draw_triangle_strip(0, QUAD_VERTICES);
    }
}

// RustPixel
// copyright zipxing@hotmail.com 2022~2024

//! Recording RenderDevice.
//!
//! Handles are plain u32 counters starting at 1, every call is appended to
//! a log of `GlCall` values. Useful to run the 2d layer without a window and
//! to check exactly what reaches the gpu.

use crate::render::adapter::RenderDevice;
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer(u32),
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    CreateTexture(u32),
    DeleteTexture(u32),
    BindVertexArray(Option<u32>),
    BindArrayBuffer(Option<u32>),
    BindTexture(Option<u32>),
    UseProgram(Option<u32>),
    FloatAttrib {
        index: u32,
        size: i32,
        stride: i32,
        offset: i32,
    },
    StreamVertices(Vec<f32>),
    DrawTriangleStrip {
        first: i32,
        count: i32,
    },
    Uniform4f(Option<u32>, [f32; 4]),
    Blend(bool),
    UploadRgbaSolid {
        width: i32,
        height: i32,
        len: usize,
    },
    LinearFilter,
}

#[derive(Debug, Default)]
pub struct TraceDevice {
    calls: RefCell<Vec<GlCall>>,
    next_id: Cell<u32>,
    // number of object creations allowed before they start failing
    create_budget: Cell<Option<usize>>,
    last_upload: RefCell<Vec<u8>>,
}

impl TraceDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets `n` more object creations succeed, then fails the rest.
    pub fn fail_after(&self, n: usize) {
        self.create_budget.set(Some(n));
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn draw_count(&self) -> usize {
        self.count(|c| matches!(c, GlCall::DrawTriangleStrip { .. }))
    }

    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// vertices of the most recent upload
    pub fn last_vertices(&self) -> Option<Vec<f32>> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            GlCall::StreamVertices(v) => Some(v.clone()),
            _ => None,
        })
    }

    /// bytes of the most recent texture upload
    pub fn last_upload(&self) -> Vec<u8> {
        self.last_upload.borrow().clone()
    }

    fn push(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn new_id(&self) -> Result<u32, String> {
        if let Some(left) = self.create_budget.get() {
            if left == 0 {
                return Err("trace device: object creation refused".to_string());
            }
            self.create_budget.set(Some(left - 1));
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        Ok(id)
    }
}

impl RenderDevice for TraceDevice {
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;
    type Program = u32;
    type UniformLocation = u32;

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.new_id()?;
        self.push(GlCall::CreateBuffer(id));
        Ok(id)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.push(GlCall::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.new_id()?;
        self.push(GlCall::CreateVertexArray(id));
        Ok(id)
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.push(GlCall::DeleteVertexArray(vao));
    }

    fn create_texture(&self) -> Result<u32, String> {
        let id = self.new_id()?;
        self.push(GlCall::CreateTexture(id));
        Ok(id)
    }

    fn delete_texture(&self, texture: u32) {
        self.push(GlCall::DeleteTexture(texture));
    }

    fn bind_vertex_array(&self, vao: Option<u32>) {
        self.push(GlCall::BindVertexArray(vao));
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.push(GlCall::BindArrayBuffer(buffer));
    }

    fn bind_texture(&self, texture: Option<u32>) {
        self.push(GlCall::BindTexture(texture));
    }

    fn use_program(&self, program: Option<u32>) {
        self.push(GlCall::UseProgram(program));
    }

    fn float_attrib(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.push(GlCall::FloatAttrib {
            index,
            size,
            stride,
            offset,
        });
    }

    fn stream_vertices(&self, vertices: &[f32]) {
        self.push(GlCall::StreamVertices(vertices.to_vec()));
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        self.push(GlCall::DrawTriangleStrip { first, count });
    }

    fn uniform_4_f32(&self, location: Option<&u32>, v: [f32; 4]) {
        self.push(GlCall::Uniform4f(location.copied(), v));
    }

    fn set_blend(&self, enabled: bool) {
        self.push(GlCall::Blend(enabled));
    }

    fn upload_rgba_solid(&self, width: i32, height: i32, rgba: &[u8]) {
        *self.last_upload.borrow_mut() = rgba.to_vec();
        self.push(GlCall::UploadRgbaSolid {
            width,
            height,
            len: rgba.len(),
        });
    }

    fn set_linear_filter(&self) {
        self.push(GlCall::LinearFilter);
    }
}

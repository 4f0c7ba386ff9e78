// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! RGBA expansion of palette-indexed cinematic frames.
//!
//! Frames up to 320x240 pixels are expanded into a buffer on the stack.
//! Bigger frames get an exact-size heap buffer that is dropped as soon as
//! the upload callback returns.

use crate::error::{DrawError, DrawResult};
use crate::render::palette::Palette;

pub const RAW_STACK_WIDTH: usize = 320;
pub const RAW_STACK_HEIGHT: usize = 240;
pub const RAW_STACK_PIXELS: usize = RAW_STACK_WIDTH * RAW_STACK_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawStorage {
    Stack,
    Heap,
}

impl RawStorage {
    pub fn for_pixels(pixels: usize) -> Self {
        if pixels <= RAW_STACK_PIXELS {
            RawStorage::Stack
        } else {
            RawStorage::Heap
        }
    }
}

/// Pixel count of a `cols` x `rows` frame backed by `len` bytes of indices.
pub fn frame_pixels(cols: i32, rows: i32, len: usize) -> DrawResult<usize> {
    let bad = || DrawError::BadRawFrame { cols, rows, len };
    if cols <= 0 || rows <= 0 {
        return Err(bad());
    }
    let n = (cols as usize).checked_mul(rows as usize).ok_or_else(bad)?;
    if len < n {
        return Err(bad());
    }
    Ok(n)
}

#[inline]
fn expand(palette: &Palette, indices: &[u8], out: &mut [u8]) {
    for (px, &i) in out.chunks_exact_mut(4).zip(indices) {
        px.copy_from_slice(&palette.rgba(i));
    }
}

/// Expands the first `cols * rows` indices of `data` to tightly packed
/// rgba bytes and hands them to `upload`.
pub fn expand_frame<F>(
    palette: &Palette,
    cols: i32,
    rows: i32,
    data: &[u8],
    upload: F,
) -> DrawResult<RawStorage>
where
    F: FnOnce(&[u8]),
{
    let n = frame_pixels(cols, rows, data.len())?;
    let indices = &data[..n];
    let storage = RawStorage::for_pixels(n);
    match storage {
        RawStorage::Stack => {
            let mut buf = [0u8; RAW_STACK_PIXELS * 4];
            let out = &mut buf[..n * 4];
            expand(palette, indices, out);
            upload(out);
        }
        RawStorage::Heap => {
            let bytes = n.checked_mul(4).ok_or(DrawError::OutOfMemory(n))?;
            let mut buf: Vec<u8> = Vec::new();
            buf.try_reserve_exact(bytes)
                .map_err(|_| DrawError::OutOfMemory(n))?;
            buf.resize(bytes, 0);
            expand(palette, indices, &mut buf);
            upload(&buf);
        }
    }
    Ok(storage)
}

// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Errors of the 2d layer.
//!
//! A pic that cannot be found is not an error: it is logged and the draw is
//! skipped. Everything here is fatal for the caller: a bad fill color is a
//! programming error, a missing palette leaves the fill and cinematic paths
//! unusable, and a failed gl object creation leaves nothing to draw with.

pub type DrawResult<T> = Result<T, DrawError>;

#[derive(Debug)]
pub enum DrawError {
    /// fill color index outside 0..=255
    BadColor(i32),
    /// colormap could not be read or has no usable palette
    PaletteLoad { path: String, reason: String },
    /// any other asset read failure
    Asset { path: String, reason: String },
    /// gl object creation failed
    Gpu(String),
    /// heap buffer for an oversized raw frame could not be allocated
    OutOfMemory(usize),
    /// raw frame dimensions don't match the supplied data
    BadRawFrame { cols: i32, rows: i32, len: usize },
    /// cinematic palette must hold 256 rgb triplets
    BadRawPalette(usize),
    Config(String),
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::BadColor(c) => write!(f, "Draw_Fill: bad color {}", c),
            DrawError::PaletteLoad { path, reason } => {
                write!(f, "Couldn't load palette {}: {}", path, reason)
            }
            DrawError::Asset { path, reason } => write!(f, "asset {} error: {}", path, reason),
            DrawError::Gpu(msg) => write!(f, "gpu error: {}", msg),
            DrawError::OutOfMemory(n) => {
                write!(f, "out of memory allocating raw frame of {} pixels", n)
            }
            DrawError::BadRawFrame { cols, rows, len } => write!(
                f,
                "bad raw frame {}x{} with {} bytes of data",
                cols, rows, len
            ),
            DrawError::BadRawPalette(len) => {
                write!(f, "raw palette needs 768 bytes, got {}", len)
            }
            DrawError::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for DrawError {}

impl DrawError {
    pub(crate) fn palette(path: &str, reason: impl ToString) -> Self {
        DrawError::PaletteLoad {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DrawError::BadColor(256).to_string(), "Draw_Fill: bad color 256");
        let e = DrawError::palette("pics/colormap.pcx", "no palette");
        assert_eq!(
            e.to_string(),
            "Couldn't load palette pics/colormap.pcx: no palette"
        );
    }
}

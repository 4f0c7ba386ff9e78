// RustPixel
// copyright zipxing@hotmail.com 2022~2024

//! # 2D render module
//!
//! ## Sub modules
//! - `adapter`: RenderDevice trait, glow backend and a recording backend
//! - `pcx`: legacy 8-bit pcx decoder
//! - `palette`: 256 entry colormap expanded to rgba
//! - `image`: image handle borrowed from the texture cache, pic naming
//! - `state`: cached program / vertex array / texture binds
//! - `geometry`: shared vertex buffer, the two vertex layouts, quad builders
//! - `raw`: rgba expansion buffers for cinematic frames
//! - `draw`: the Draw2d context and public draw api

pub mod adapter;
pub mod draw;
pub mod geometry;
pub mod image;
pub mod palette;
pub mod pcx;
pub mod raw;
pub mod state;

pub use adapter::RenderDevice;
pub use draw::{Draw2d, ShaderInfo};
pub use image::{Image, ImageCache, ImageType};
pub use palette::Palette;

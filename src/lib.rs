// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! pixel_draw2d is the immediate-mode 2D layer of an OpenGL3 renderer.
//! It draws HUD pics, console characters, flat fills, screen fades and
//! palette-indexed cinematic frames on top of the 3D view.
//!
//! Every draw call resolves its resources, binds program / texture / vertex
//! layout through a small bind cache and issues exactly one draw call.
//! There is no batching: the calling frame loop decides the draw order.
//!
//! The texture cache and the shader registry live outside this crate. They
//! are reached through the [`render::image::ImageCache`] trait and the
//! [`render::draw::ShaderInfo`] handles passed to [`render::draw::Draw2d::new`].
//!
//! GL calls go through [`render::adapter::RenderDevice`], implemented for
//! `glow::Context` and for a recording [`render::adapter::trace::TraceDevice`]
//! which is handy for headless runs.

/// configuration loaded from a toml file
pub mod config;

/// error type shared by all modules
pub mod error;

/// raw asset loader, reads files relative to the asset root
pub mod asset;

/// log4rs setup and one-shot diagnostics
pub mod log;

/// path helpers
pub mod util;

/// 2d drawing: palette, pcx codec, gl state, geometry, draw api
pub mod render;

pub use config::Draw2dConfig;
pub use error::DrawError;
pub use render::draw::{Draw2d, ShaderInfo};

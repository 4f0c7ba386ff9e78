// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Image handles as handed out by the texture cache, and the naming
//! convention of 2d pics.
//!
//! The texture cache itself (loading, power-of-two resampling, scrap
//! packing, registration sequence eviction) lives outside this crate.
//! The 2d layer only borrows an `Image` for the length of one draw call.

use std::borrow::Cow;

pub const PIC_DIR: &str = "pics/";
pub const PIC_EXT: &str = ".pcx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Skin,
    Sprite,
    Wall,
    Pic,
    Sky,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    /// game path, including extension
    pub name: String,
    pub kind: ImageType,
    /// source image size
    pub width: i32,
    pub height: i32,
    /// size after power of two and picmip
    pub upload_width: i32,
    pub upload_height: i32,
    /// 0 = free
    pub registration_sequence: i32,
    pub texnum: T,
    /// 0,0 - 1,1 unless part of the scrap
    pub sl: f32,
    pub tl: f32,
    pub sh: f32,
    pub th: f32,
    pub scrap: bool,
    pub has_alpha: bool,
}

impl<T> Image<T> {
    /// whole-texture image as most loaders produce it
    pub fn new(name: &str, kind: ImageType, width: i32, height: i32, texnum: T) -> Self {
        Self {
            name: name.to_string(),
            kind,
            width,
            height,
            upload_width: width,
            upload_height: height,
            registration_sequence: 1,
            texnum,
            sl: 0.0,
            tl: 0.0,
            sh: 1.0,
            th: 1.0,
            scrap: false,
            has_alpha: false,
        }
    }

    pub fn uv(&self) -> [f32; 4] {
        [self.sl, self.tl, self.sh, self.th]
    }
}

/// Lookup side of the texture cache.
///
/// `find_image` may load and register the image on first use, hence `&mut`.
/// A miss is not fatal, the caller logs it and skips the draw.
pub trait ImageCache {
    type Texture: Copy;

    fn find_image(&mut self, name: &str, kind: ImageType) -> Option<&Image<Self::Texture>>;
}

/// Game path of a 2d pic.
///
/// "conback" -> "pics/conback.pcx", while a leading '/' or '\' means the rest
/// is already a full game path: "/textures/x.pcx" -> "textures/x.pcx".
pub fn pic_path(name: &str) -> Cow<'_, str> {
    match name.strip_prefix(['/', '\\']) {
        Some(rest) => Cow::Borrowed(rest),
        None => Cow::Owned(format!("{}{}{}", PIC_DIR, name, PIC_EXT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pic_path() {
        assert_eq!(pic_path("foo"), "pics/foo.pcx");
        assert_eq!(pic_path("/absolute/foo"), "absolute/foo");
        assert_eq!(pic_path("\\absolute\\foo"), "absolute\\foo");
        assert_eq!(pic_path(""), "pics/.pcx");
    }

    #[test]
    fn test_default_uv() {
        let img = Image::new("pics/a.pcx", ImageType::Pic, 32, 16, 7u32);
        assert_eq!(img.uv(), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(img.upload_width, 32);
    }
}

// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! 256 entry colormap.
//!
//! Entries are little-endian packed rgba words, so `to_le_bytes()` yields
//! the r, g, b, a bytes in the order gl expects for RGBA / UNSIGNED_BYTE.
//! Index 255 is the transparent color of 8-bit art: its alpha is 0 and its
//! rgb is kept.

use crate::asset::AssetManager;
use crate::error::{DrawError, DrawResult};
use crate::render::pcx::{self, PCX_PALETTE_SIZE};
use log::info;

pub const PALETTE_FILE: &str = "pics/colormap.pcx";
pub const TRANSPARENT_INDEX: usize = 255;

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: [u32; 256],
}

#[inline]
fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

impl Palette {
    /// Loads the colormap through the asset manager.
    /// There is no usable fallback without it, callers abort init on error.
    pub fn load(assets: &mut AssetManager) -> DrawResult<Self> {
        let data = assets
            .load(PALETTE_FILE)
            .map_err(|e| DrawError::palette(PALETTE_FILE, e))?;
        // only header and palette are needed, the pixel data is not decoded
        let header = pcx::parse_header(data).map_err(|e| DrawError::palette(PALETTE_FILE, e))?;
        let rgb = pcx::palette_of(data).map_err(|e| DrawError::palette(PALETTE_FILE, e))?;
        info!(
            "palette loaded from {} ({}x{})",
            PALETTE_FILE, header.width, header.height
        );
        Ok(Self::from_colormap(&rgb))
    }

    /// colormap palette: opaque except the transparent index
    pub fn from_colormap(rgb: &[u8; PCX_PALETTE_SIZE]) -> Self {
        let mut pal = Self::from_rgb(rgb);
        pal.entries[TRANSPARENT_INDEX] &= 0x00ff_ffff;
        pal
    }

    /// every entry opaque, used for cinematic palettes
    pub fn from_rgb(rgb: &[u8; PCX_PALETTE_SIZE]) -> Self {
        let mut entries = [0u32; 256];
        for (i, e) in entries.iter_mut().enumerate() {
            *e = pack(rgb[i * 3], rgb[i * 3 + 1], rgb[i * 3 + 2], 255);
        }
        Self { entries }
    }

    #[inline]
    pub fn rgba(&self, idx: u8) -> [u8; 4] {
        self.entries[idx as usize].to_le_bytes()
    }

    /// rgb of an entry scaled to 0.0..=1.0
    pub fn rgb_f32(&self, idx: u8) -> [f32; 3] {
        let [r, g, b, _] = self.rgba(idx);
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    /// Expands palette indices into packed rgba words.
    /// `out` must be at least as long as `indices`.
    pub fn expand_into(&self, indices: &[u8], out: &mut [u32]) {
        for (o, &i) in out.iter_mut().zip(indices) {
            *o = self.entries[i as usize];
        }
    }

    /// Converts legacy 8-bit art to an rgba byte buffer.
    pub fn to_rgba8(&self, indices: &[u8]) -> Vec<u8> {
        let mut words = vec![0u32; indices.len()];
        self.expand_into(indices, &mut words);
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }
}

// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Draw2d
//!
//! The 2d drawing context. Owns the palette tables, the shared vertex
//! buffer, the bind cache and the glyph atlas handle. The gl device and the
//! image cache are passed into each call, both are shared with the 3d side.
//!
//! Each public draw call issues at most one draw. Pics are drawn with the
//! textured 2d program, fills and fades with the flat color program.
//!
//! Lifecycle: `new` once the context is current and the 2d shaders are
//! compiled, `shutdown` before the context goes away.

use crate::asset::AssetManager;
use crate::config::Draw2dConfig;
use crate::error::{DrawError, DrawResult};
use crate::log::OnceLog;
use crate::render::adapter::RenderDevice;
use crate::render::geometry::{color_quad, textured_quad, GeometryState};
use crate::render::image::{pic_path, Image, ImageCache, ImageType};
use crate::render::palette::Palette;
use crate::render::pcx::PCX_PALETTE_SIZE;
use crate::render::raw::{self, RawStorage};
use crate::render::state::GlState;
use log::{info, warn};

/// glyph atlas, 16x16 cells of 8x8 pixels
pub const CONCHARS_PIC: &str = "pics/conchars.pcx";
const CHAR_SIZE: f32 = 8.0;
const CHAR_UV: f32 = 0.0625;
/// tile_clear repeats the pattern every 64 pixels
const TILE_SIZE: f32 = 64.0;

/// Compiled program plus its `color` uniform, from the shader registry.
#[derive(Debug, Clone)]
pub struct ShaderInfo<P, U> {
    pub program: P,
    pub uni_color: Option<U>,
}

pub type DeviceShader<D> =
    ShaderInfo<<D as RenderDevice>::Program, <D as RenderDevice>::UniformLocation>;

/// What a draw needs from a resolved pic.
struct PicRef<T> {
    texnum: T,
    width: i32,
    height: i32,
    uv: [f32; 4],
}

impl<T: Copy> PicRef<T> {
    fn of(img: &Image<T>) -> Self {
        Self {
            texnum: img.texnum,
            width: img.width,
            height: img.height,
            uv: img.uv(),
        }
    }
}

pub struct Draw2d<D: RenderDevice> {
    palette: Palette,
    // cinematic palette, the colormap unless a video supplied one
    raw_palette: Palette,
    geometry: GeometryState<D>,
    state: GlState<D>,
    conchars: Option<D::Texture>,
    once: OnceLog,
    si2d: DeviceShader<D>,
    si2d_color: DeviceShader<D>,
    vid_width: u32,
    vid_height: u32,
    fade_alpha: f32,
}

impl<D: RenderDevice> Draw2d<D> {
    /// Loads the palette, creates the 2d geometry and resolves the glyph
    /// atlas. Palette and gpu failures are fatal for the renderer.
    pub fn new<C>(
        gl: &D,
        images: &mut C,
        assets: &mut AssetManager,
        si2d: DeviceShader<D>,
        si2d_color: DeviceShader<D>,
        cfg: &Draw2dConfig,
    ) -> DrawResult<Self>
    where
        C: ImageCache<Texture = D::Texture>,
    {
        let palette = Palette::load(assets)?;
        let mut state = GlState::new();
        let geometry = GeometryState::create(gl, &mut state, si2d.program, si2d_color.program)?;
        let conchars = images
            .find_image(CONCHARS_PIC, ImageType::Pic)
            .map(|img| img.texnum);
        if conchars.is_none() {
            warn!("Couldn't load {}, characters won't be drawn", CONCHARS_PIC);
        }
        info!(
            "draw2d init ok, viewport {}x{}",
            cfg.vid_width, cfg.vid_height
        );
        Ok(Self {
            raw_palette: palette.clone(),
            palette,
            geometry,
            state,
            conchars,
            once: OnceLog::new(),
            si2d,
            si2d_color,
            vid_width: cfg.vid_width,
            vid_height: cfg.vid_height,
            fade_alpha: cfg.fade_alpha,
        })
    }

    /// Releases the gpu objects of the 2d layer. Calling it again is a no-op.
    pub fn shutdown(&mut self, gl: &D) {
        if self.geometry.is_ready() {
            info!("draw2d shutdown");
        }
        self.geometry.destroy(gl, &mut self.state);
        self.conchars = None;
    }

    /// False once `shutdown` ran, every draw is then skipped.
    pub fn is_ready(&self) -> bool {
        self.geometry.is_ready()
    }

    fn check_ready(&mut self) -> bool {
        if self.geometry.is_ready() {
            return true;
        }
        self.once
            .warn("draw.after_shutdown", "2d layer is shut down, draw skipped");
        false
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn raw_palette(&self) -> &Palette {
        &self.raw_palette
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.vid_width = width;
        self.vid_height = height;
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.vid_width, self.vid_height)
    }

    /// Must be called after someone else changed program, vao or texture.
    pub fn invalidate(&mut self) {
        self.state.invalidate();
    }

    /// One quad with the textured layout.
    /// The texture and the textured program must already be bound.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_textured_rect(
        &mut self,
        gl: &D,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        sl: f32,
        tl: f32,
        sh: f32,
        th: f32,
    ) {
        let quad = textured_quad(x, y, w, h, sl, tl, sh, th);
        self.geometry.draw_textured(gl, &mut self.state, &quad);
    }

    pub fn draw_char(&mut self, gl: &D, x: i32, y: i32, num: i32) {
        self.draw_char_scaled(gl, x, y, num, 1.0);
    }

    /// Draws one 8x8 glyph of the console font, `scale` times bigger.
    /// Spaces (32 and 160) and glyphs fully above the screen are skipped.
    pub fn draw_char_scaled(&mut self, gl: &D, x: i32, y: i32, num: i32, scale: f32) {
        let num = num & 255;
        if num & 127 == 32 {
            return;
        }
        if y <= -8 {
            return;
        }
        let Some(texture) = self.conchars else {
            self.once.warn(
                "draw_char.no_conchars",
                "glyph atlas missing, characters are skipped",
            );
            return;
        };
        if !self.check_ready() {
            return;
        }

        let row = num >> 4;
        let col = num & 15;
        let frow = row as f32 * CHAR_UV;
        let fcol = col as f32 * CHAR_UV;
        let size = CHAR_SIZE * scale;

        self.state.use_program(gl, self.si2d.program);
        self.state.bind_texture(gl, Some(texture));
        self.draw_textured_rect(
            gl,
            x as f32,
            y as f32,
            size,
            size,
            fcol,
            frow,
            fcol + CHAR_UV,
            frow + CHAR_UV,
        );
    }

    /// Resolves a 2d pic, see `pic_path` for the naming rule.
    pub fn find_pic<'a, C>(&self, images: &'a mut C, name: &str) -> Option<&'a Image<D::Texture>>
    where
        C: ImageCache<Texture = D::Texture>,
    {
        images.find_image(&pic_path(name), ImageType::Pic)
    }

    /// (width, height) of a pic, (-1, -1) when it can't be found
    pub fn get_pic_size<C>(&self, images: &mut C, name: &str) -> (i32, i32)
    where
        C: ImageCache<Texture = D::Texture>,
    {
        match self.find_pic(images, name) {
            Some(img) => (img.width, img.height),
            None => (-1, -1),
        }
    }

    fn lookup<C>(&self, images: &mut C, name: &str) -> Option<PicRef<D::Texture>>
    where
        C: ImageCache<Texture = D::Texture>,
    {
        let pic = self.find_pic(images, name).map(PicRef::of);
        if pic.is_none() {
            warn!("Can't find pic: {}", name);
        }
        pic
    }

    fn draw_pic_rect(&mut self, gl: &D, texture: D::Texture, rect: [f32; 4], uv: [f32; 4]) {
        let [x, y, w, h] = rect;
        let [sl, tl, sh, th] = uv;
        if !self.check_ready() {
            return;
        }
        self.state.use_program(gl, self.si2d.program);
        self.state.bind_texture(gl, Some(texture));
        self.draw_textured_rect(gl, x, y, w, h, sl, tl, sh, th);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stretch_pic<C>(&mut self, gl: &D, images: &mut C, x: i32, y: i32, w: i32, h: i32, name: &str)
    where
        C: ImageCache<Texture = D::Texture>,
    {
        if let Some(pic) = self.lookup(images, name) {
            let rect = [x as f32, y as f32, w as f32, h as f32];
            self.draw_pic_rect(gl, pic.texnum, rect, pic.uv);
        }
    }

    pub fn draw_pic<C>(&mut self, gl: &D, images: &mut C, x: i32, y: i32, name: &str)
    where
        C: ImageCache<Texture = D::Texture>,
    {
        self.draw_pic_scaled(gl, images, x, y, name, 1.0);
    }

    /// Draws a pic at its native size times `factor`.
    pub fn draw_pic_scaled<C>(
        &mut self,
        gl: &D,
        images: &mut C,
        x: i32,
        y: i32,
        name: &str,
        factor: f32,
    ) where
        C: ImageCache<Texture = D::Texture>,
    {
        if let Some(pic) = self.lookup(images, name) {
            let rect = [
                x as f32,
                y as f32,
                pic.width as f32 * factor,
                pic.height as f32 * factor,
            ];
            self.draw_pic_rect(gl, pic.texnum, rect, pic.uv);
        }
    }

    /// Fills a screen rectangle with a repeating 64x64 pattern, aligned to the
    /// screen origin so neighbouring clears line up.
    #[allow(clippy::too_many_arguments)]
    pub fn tile_clear<C>(&mut self, gl: &D, images: &mut C, x: i32, y: i32, w: i32, h: i32, name: &str)
    where
        C: ImageCache<Texture = D::Texture>,
    {
        if let Some(pic) = self.lookup(images, name) {
            let (x, y, w, h) = (x as f32, y as f32, w as f32, h as f32);
            let uv = [
                x / TILE_SIZE,
                y / TILE_SIZE,
                (x + w) / TILE_SIZE,
                (y + h) / TILE_SIZE,
            ];
            self.draw_pic_rect(gl, pic.texnum, [x, y, w, h], uv);
        }
    }

    fn draw_color_rect(&mut self, gl: &D, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        if !self.check_ready() {
            return;
        }
        self.state.use_program(gl, self.si2d_color.program);
        gl.uniform_4_f32(self.si2d_color.uni_color.as_ref(), color);
        let quad = color_quad(x, y, w, h);
        self.geometry.draw_color(gl, &mut self.state, &quad);
    }

    /// Fills a rectangle with palette color `c`.
    ///
    /// A color outside 0..=255 is a caller bug: `DrawError::BadColor` is
    /// returned and nothing is drawn.
    pub fn fill(&mut self, gl: &D, x: i32, y: i32, w: i32, h: i32, c: i32) -> DrawResult<()> {
        let idx = u8::try_from(c).map_err(|_| DrawError::BadColor(c))?;
        let [r, g, b] = self.palette.rgb_f32(idx);
        self.draw_color_rect(
            gl,
            x as f32,
            y as f32,
            w as f32,
            h as f32,
            [r, g, b, 1.0],
        );
        Ok(())
    }

    /// Darkens the whole screen, used behind menus.
    pub fn fade_screen(&mut self, gl: &D) {
        if !self.check_ready() {
            return;
        }
        gl.set_blend(true);
        let (w, h) = self.viewport();
        let (w, h) = (w as f32, h as f32);
        self.draw_color_rect(gl, 0.0, 0.0, w, h, [0.0, 0.0, 0.0, self.fade_alpha]);
        gl.set_blend(false);
    }

    /// Replaces the cinematic palette with 256 rgb triplets, `None` goes back
    /// to the colormap.
    pub fn set_raw_palette(&mut self, rgb: Option<&[u8]>) -> DrawResult<()> {
        match rgb {
            None => self.raw_palette = self.palette.clone(),
            Some(rgb) => {
                let rgb: &[u8; PCX_PALETTE_SIZE] = rgb
                    .try_into()
                    .map_err(|_| DrawError::BadRawPalette(rgb.len()))?;
                self.raw_palette = Palette::from_rgb(rgb);
            }
        }
        Ok(())
    }

    /// Draws a `cols` x `rows` palette-indexed frame stretched to the given
    /// screen rectangle.
    ///
    /// The frame goes through a texture that is created, filled and deleted
    /// within this call.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_stretch_raw(
        &mut self,
        gl: &D,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        cols: i32,
        rows: i32,
        data: &[u8],
    ) -> DrawResult<()> {
        raw::frame_pixels(cols, rows, data.len())?;
        if !self.check_ready() {
            return Ok(());
        }
        self.state.bind_texture(gl, None);

        let texture = gl.create_texture().map_err(DrawError::Gpu)?;
        let state = &mut self.state;
        let uploaded = raw::expand_frame(&self.raw_palette, cols, rows, data, |rgba| {
            state.bind_texture(gl, Some(texture));
            gl.upload_rgba_solid(cols, rows, rgba);
            gl.set_linear_filter();
        });
        let storage = match uploaded {
            Ok(storage) => storage,
            Err(e) => {
                gl.delete_texture(texture);
                self.state.bind_texture(gl, None);
                return Err(e);
            }
        };
        if storage == RawStorage::Heap {
            self.once.info(
                "draw_stretch_raw.heap",
                &format!("{}x{} frame exceeds the 320x240 stack buffer", cols, rows),
            );
        }

        self.state.use_program(gl, self.si2d.program);
        self.draw_textured_rect(
            gl, x as f32, y as f32, w as f32, h as f32, 0.0, 0.0, 1.0, 1.0,
        );

        gl.delete_texture(texture);
        self.state.bind_texture(gl, None);
        Ok(())
    }
}

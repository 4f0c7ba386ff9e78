// RustPixel
// copyright zipxing@hotmail.com 2022～2025

use pixel_draw2d::asset::AssetManager;
use pixel_draw2d::render::adapter::trace::{GlCall, TraceDevice};
use pixel_draw2d::render::palette::PALETTE_FILE;
use pixel_draw2d::render::pcx::{self, PCX_PALETTE_SIZE};
use pixel_draw2d::render::raw::{RawStorage, RAW_STACK_PIXELS};
use pixel_draw2d::render::{Image, ImageCache, ImageType};
use pixel_draw2d::{Draw2d, Draw2dConfig, DrawError, ShaderInfo};
use std::collections::HashMap;

const TEX_CONCHARS: u32 = 50;
const TEX_BACKTILE: u32 = 51;
const TEX_HUD: u32 = 52;
const PROG_2D: u32 = 10;
const PROG_2D_COLOR: u32 = 11;
const UNI_COLOR: u32 = 20;

/// image cache double that remembers every name it was asked for
#[derive(Default)]
struct Pics {
    images: HashMap<String, Image<u32>>,
    requests: Vec<String>,
}

impl Pics {
    fn add(&mut self, name: &str, w: i32, h: i32, tex: u32) {
        self.images
            .insert(name.to_string(), Image::new(name, ImageType::Pic, w, h, tex));
    }
}

impl ImageCache for Pics {
    type Texture = u32;

    fn find_image(&mut self, name: &str, _kind: ImageType) -> Option<&Image<u32>> {
        self.requests.push(name.to_string());
        self.images.get(name)
    }
}

fn colormap_rgb() -> [u8; PCX_PALETTE_SIZE] {
    let mut rgb = [0u8; PCX_PALETTE_SIZE];
    for i in 0..256 {
        rgb[i * 3] = i as u8;
        rgb[i * 3 + 1] = (i / 2) as u8;
        rgb[i * 3 + 2] = 255 - i as u8;
    }
    rgb
}

fn assets() -> AssetManager {
    let mut am = AssetManager::in_memory();
    am.set_data(
        PALETTE_FILE,
        &pcx::encode(4, 2, &[0, 1, 2, 3, 255, 255, 4, 5], &colormap_rgb()),
    );
    am
}

fn shaders() -> (ShaderInfo<u32, u32>, ShaderInfo<u32, u32>) {
    (
        ShaderInfo {
            program: PROG_2D,
            uni_color: None,
        },
        ShaderInfo {
            program: PROG_2D_COLOR,
            uni_color: Some(UNI_COLOR),
        },
    )
}

fn setup() -> (TraceDevice, Pics, Draw2d<TraceDevice>) {
    let gl = TraceDevice::new();
    let mut pics = Pics::default();
    pics.add("pics/conchars.pcx", 128, 128, TEX_CONCHARS);
    pics.add("pics/backtile.pcx", 64, 64, TEX_BACKTILE);
    pics.add("pics/hud.pcx", 24, 12, TEX_HUD);
    let (si2d, si2d_color) = shaders();
    let d2 = Draw2d::new(
        &gl,
        &mut pics,
        &mut assets(),
        si2d,
        si2d_color,
        &Draw2dConfig::default(),
    )
    .unwrap();
    gl.clear();
    pics.requests.clear();
    (gl, pics, d2)
}

fn uniforms(gl: &TraceDevice) -> Vec<(Option<u32>, [f32; 4])> {
    gl.calls()
        .into_iter()
        .filter_map(|c| match c {
            GlCall::Uniform4f(loc, v) => Some((loc, v)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_init_loads_palette() {
    let (_, _, d2) = setup();
    let rgb = colormap_rgb();
    assert_eq!(d2.palette().rgba(255), [rgb[765], rgb[766], rgb[767], 0]);
    for i in 0..=254u8 {
        let [r, g, b, a] = d2.palette().rgba(i);
        let k = i as usize * 3;
        assert_eq!([r, g, b], [rgb[k], rgb[k + 1], rgb[k + 2]]);
        assert_eq!(a, 255);
    }
}

#[test]
fn test_init_without_colormap_is_fatal() {
    let gl = TraceDevice::new();
    let mut pics = Pics::default();
    let (si2d, si2d_color) = shaders();
    let r = Draw2d::new(
        &gl,
        &mut pics,
        &mut AssetManager::in_memory(),
        si2d,
        si2d_color,
        &Draw2dConfig::default(),
    );
    assert!(matches!(r, Err(DrawError::PaletteLoad { .. })));
    assert!(gl.calls().is_empty());
}

#[test]
fn test_init_gpu_failure_cleans_up() {
    let gl = TraceDevice::new();
    gl.fail_after(1);
    let mut pics = Pics::default();
    let (si2d, si2d_color) = shaders();
    let r = Draw2d::new(
        &gl,
        &mut pics,
        &mut assets(),
        si2d,
        si2d_color,
        &Draw2dConfig::default(),
    );
    assert!(matches!(r, Err(DrawError::Gpu(_))));
    assert_eq!(gl.count(|c| *c == GlCall::DeleteVertexArray(1)), 1);
    assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteBuffer(_))), 0);
}

#[test]
fn test_space_chars_draw_nothing() {
    let (gl, _, mut d2) = setup();
    d2.draw_char(&gl, 10, 10, 32);
    d2.draw_char(&gl, 10, 10, 160);
    // only the low 8 bits count
    d2.draw_char(&gl, 10, 10, 256 + 32);
    assert_eq!(gl.draw_count(), 0);
    d2.draw_char(&gl, 10, 10, 33);
    assert_eq!(gl.draw_count(), 1);
}

#[test]
fn test_char_above_screen() {
    let (gl, _, mut d2) = setup();
    d2.draw_char(&gl, 0, -8, 65);
    assert_eq!(gl.draw_count(), 0);
    d2.draw_char(&gl, 0, -7, 65);
    assert_eq!(gl.draw_count(), 1);
}

#[test]
fn test_char_scaled_size() {
    let (gl, _, mut d2) = setup();
    // 255: row 15, col 15
    d2.draw_char_scaled(&gl, 0, 0, 255, 2.0);
    let v = gl.last_vertices().unwrap();
    assert_eq!(&v[0..4], &[0.0, 16.0, 0.9375, 1.0]);
    assert_eq!(&v[12..16], &[16.0, 0.0, 1.0, 0.9375]);
}

#[test]
fn test_chars_share_binds() {
    let (gl, _, mut d2) = setup();
    for c in "quake".chars() {
        d2.draw_char(&gl, 0, 0, c as i32);
    }
    assert_eq!(gl.draw_count(), 5);
    assert_eq!(gl.count(|c| *c == GlCall::UseProgram(Some(PROG_2D))), 1);
    assert_eq!(gl.count(|c| *c == GlCall::BindTexture(Some(TEX_CONCHARS))), 1);
    assert_eq!(gl.count(|c| matches!(c, GlCall::BindVertexArray(_))), 1);
}

#[test]
fn test_fill_bad_color() {
    let (gl, _, mut d2) = setup();
    for c in [256, -1] {
        match d2.fill(&gl, 0, 0, 8, 8, c) {
            Err(DrawError::BadColor(bad)) => assert_eq!(bad, c),
            other => panic!("fill {} returned {:?}", c, other),
        }
    }
    assert!(gl.calls().is_empty());
}

#[test]
fn test_fill_uses_palette() {
    let (gl, _, mut d2) = setup();
    d2.fill(&gl, 5, 6, 7, 8, 0).unwrap();
    assert_eq!(uniforms(&gl), vec![(Some(UNI_COLOR), [0.0, 0.0, 1.0, 1.0])]);
    assert_eq!(
        gl.last_vertices().unwrap(),
        vec![5.0, 14.0, 5.0, 6.0, 12.0, 14.0, 12.0, 6.0]
    );
    assert_eq!(gl.count(|c| *c == GlCall::UseProgram(Some(PROG_2D_COLOR))), 1);
    // color layout is the third object created
    assert_eq!(gl.count(|c| *c == GlCall::BindVertexArray(Some(3))), 1);
}

#[test]
fn test_fade_screen() {
    let (gl, _, mut d2) = setup();
    d2.set_viewport(800, 600);
    d2.fade_screen(&gl);
    let calls = gl.calls();
    assert_eq!(calls.first(), Some(&GlCall::Blend(true)));
    assert_eq!(calls.last(), Some(&GlCall::Blend(false)));
    assert_eq!(gl.draw_count(), 1);
    let u = uniforms(&gl);
    assert_eq!(u.len(), 1);
    assert_eq!(&u[0].1[0..3], &[0.0, 0.0, 0.0]);
    assert!((u[0].1[3] - 0.6).abs() < 1e-6);
    assert_eq!(
        gl.last_vertices().unwrap(),
        vec![0.0, 600.0, 0.0, 0.0, 800.0, 600.0, 800.0, 0.0]
    );
}

#[test]
fn test_tile_clear_uv() {
    let (gl, mut pics, mut d2) = setup();
    d2.tile_clear(&gl, &mut pics, 64, 64, 128, 64, "backtile");
    assert_eq!(gl.draw_count(), 1);
    assert_eq!(gl.count(|c| *c == GlCall::BindTexture(Some(TEX_BACKTILE))), 1);
    let v = gl.last_vertices().unwrap();
    // (x, y+h | sl, th) (x, y | sl, tl) (x+w, y+h | sh, th) (x+w, y | sh, tl)
    assert_eq!(
        v,
        vec![
            64.0, 128.0, 1.0, 2.0, //
            64.0, 64.0, 1.0, 1.0, //
            192.0, 128.0, 3.0, 2.0, //
            192.0, 64.0, 3.0, 1.0,
        ]
    );
}

#[test]
fn test_find_pic_names() {
    let (_, mut pics, d2) = setup();
    assert!(d2.find_pic(&mut pics, "/absolute/foo").is_none());
    assert!(d2.find_pic(&mut pics, "foo").is_none());
    assert_eq!(pics.requests, vec!["absolute/foo", "pics/foo.pcx"]);
}

#[test]
fn test_pic_size() {
    let (_, mut pics, d2) = setup();
    assert_eq!(d2.get_pic_size(&mut pics, "hud"), (24, 12));
    assert_eq!(d2.get_pic_size(&mut pics, "/pics/hud.pcx"), (24, 12));
    assert_eq!(d2.get_pic_size(&mut pics, "nope"), (-1, -1));
}

#[test]
fn test_draw_pic_sizes() {
    let (gl, mut pics, mut d2) = setup();
    d2.draw_pic(&gl, &mut pics, 1, 2, "hud");
    let v = gl.last_vertices().unwrap();
    assert_eq!((v[12], v[1]), (25.0, 14.0));

    d2.draw_pic_scaled(&gl, &mut pics, 0, 0, "hud", 1.5);
    let v = gl.last_vertices().unwrap();
    assert_eq!((v[12], v[1]), (36.0, 18.0));

    d2.stretch_pic(&gl, &mut pics, 0, 0, 100, 50, "hud");
    let v = gl.last_vertices().unwrap();
    assert_eq!((v[12], v[1]), (100.0, 50.0));
    assert_eq!(&v[0..4], &[0.0, 50.0, 0.0, 1.0]);

    assert_eq!(gl.draw_count(), 3);
}

#[test]
fn test_scrap_uv_passes_through() {
    let (gl, mut pics, mut d2) = setup();
    let mut img = Image::new("pics/sb.pcx", ImageType::Pic, 8, 8, 60);
    img.scrap = true;
    img.sl = 0.25;
    img.tl = 0.5;
    img.sh = 0.375;
    img.th = 0.625;
    pics.images.insert(img.name.clone(), img);
    d2.draw_pic(&gl, &mut pics, 0, 0, "sb");
    let v = gl.last_vertices().unwrap();
    assert_eq!(&v[0..4], &[0.0, 8.0, 0.25, 0.625]);
    assert_eq!(&v[12..16], &[8.0, 0.0, 0.375, 0.5]);
}

fn raw_frame_calls(cols: i32, rows: i32) -> (TraceDevice, Draw2d<TraceDevice>) {
    let (gl, _, mut d2) = setup();
    let data = vec![7u8; (cols * rows) as usize];
    d2.draw_char(&gl, 0, 0, 65);
    gl.clear();
    d2.draw_stretch_raw(&gl, 0, 0, 640, 480, cols, rows, &data)
        .unwrap();
    (gl, d2)
}

#[test]
fn test_raw_frame_stack_budget() {
    assert_eq!(RawStorage::for_pixels(320 * 240), RawStorage::Stack);
    let (gl, _) = raw_frame_calls(320, 240);
    let uploads: Vec<GlCall> = gl
        .calls()
        .into_iter()
        .filter(|c| matches!(c, GlCall::UploadRgbaSolid { .. }))
        .collect();
    assert_eq!(
        uploads,
        vec![GlCall::UploadRgbaSolid {
            width: 320,
            height: 240,
            len: RAW_STACK_PIXELS * 4
        }]
    );
    assert_eq!(&gl.last_upload()[0..4], &[7, 3, 248, 255]);
}

#[test]
fn test_raw_frame_heap_path() {
    assert_eq!(RawStorage::for_pixels(320 * 240 + 1), RawStorage::Heap);
    let (gl, _) = raw_frame_calls(320 * 240 + 1, 1);
    assert_eq!(gl.last_upload().len(), (RAW_STACK_PIXELS + 1) * 4);
    assert_eq!(gl.count(|c| matches!(c, GlCall::CreateTexture(_))), 1);
    assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteTexture(_))), 1);
    assert_eq!(gl.draw_count(), 1);
}

#[test]
fn test_raw_frame_texture_lifecycle() {
    let (gl, _) = raw_frame_calls(4, 4);
    let calls = gl.calls();
    let tex = calls
        .iter()
        .find_map(|c| match c {
            GlCall::CreateTexture(t) => Some(*t),
            _ => None,
        })
        .unwrap();
    let pos = |want: &GlCall| calls.iter().position(|c| c == want).unwrap();
    assert_eq!(calls[0], GlCall::BindTexture(None));
    assert!(pos(&GlCall::BindTexture(Some(tex))) < pos(&GlCall::LinearFilter));
    assert!(pos(&GlCall::LinearFilter) < pos(&GlCall::DrawTriangleStrip { first: 0, count: 4 }));
    assert!(pos(&GlCall::DrawTriangleStrip { first: 0, count: 4 }) < pos(&GlCall::DeleteTexture(tex)));
    assert_eq!(calls.last(), Some(&GlCall::BindTexture(None)));
    assert_eq!(
        gl.last_vertices().unwrap(),
        vec![0.0, 480.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 640.0, 480.0, 1.0, 1.0, 640.0, 0.0, 1.0, 0.0]
    );
}

#[test]
fn test_bad_raw_frame() {
    let (gl, _, mut d2) = setup();
    let r = d2.draw_stretch_raw(&gl, 0, 0, 10, 10, 4, 4, &[0u8; 15]);
    assert!(matches!(
        r,
        Err(DrawError::BadRawFrame {
            cols: 4,
            rows: 4,
            len: 15
        })
    ));
    assert!(d2.draw_stretch_raw(&gl, 0, 0, 10, 10, 0, 4, &[0u8; 16]).is_err());
    assert!(gl.calls().is_empty());
}

#[test]
fn test_raw_palette_override() {
    let (gl, _, mut d2) = setup();
    let mut rgb = [0u8; PCX_PALETTE_SIZE];
    rgb[765..768].copy_from_slice(&[1, 2, 3]);
    d2.set_raw_palette(Some(&rgb)).unwrap();
    d2.draw_stretch_raw(&gl, 0, 0, 2, 1, 2, 1, &[255, 0]).unwrap();
    assert_eq!(gl.last_upload(), vec![1, 2, 3, 255, 0, 0, 0, 255]);

    // back to the colormap, 255 is transparent again
    d2.set_raw_palette(None).unwrap();
    d2.draw_stretch_raw(&gl, 0, 0, 2, 1, 2, 1, &[255, 0]).unwrap();
    assert_eq!(gl.last_upload(), vec![255, 127, 0, 0, 0, 0, 255, 255]);
}

#[test]
fn test_invalidate_rebinds() {
    let (gl, _, mut d2) = setup();
    d2.draw_char(&gl, 0, 0, 65);
    d2.invalidate();
    d2.draw_char(&gl, 0, 0, 65);
    assert_eq!(gl.count(|c| *c == GlCall::UseProgram(Some(PROG_2D))), 2);
}

#[test]
fn test_shutdown() {
    let (gl, _, mut d2) = setup();
    d2.shutdown(&gl);
    assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteVertexArray(_))), 2);
    assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteBuffer(_))), 1);
    // the atlas belongs to the image cache
    assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteTexture(_))), 0);
}

#[test]
fn test_draws_after_shutdown_are_skipped() {
    let (gl, mut pics, mut d2) = setup();
    d2.shutdown(&gl);
    assert!(!d2.is_ready());
    gl.clear();
    d2.fill(&gl, 0, 0, 8, 8, 1).unwrap();
    d2.fade_screen(&gl);
    d2.draw_char(&gl, 0, 0, 65);
    d2.draw_pic(&gl, &mut pics, 0, 0, "hud");
    d2.tile_clear(&gl, &mut pics, 0, 0, 64, 64, "backtile");
    d2.draw_stretch_raw(&gl, 0, 0, 2, 2, 2, 2, &[0; 4]).unwrap();
    assert_eq!(gl.count(|c| matches!(c, GlCall::StreamVertices(_))), 0);
    assert_eq!(gl.draw_count(), 0);
    assert_eq!(gl.count(|c| matches!(c, GlCall::CreateTexture(_))), 0);
    assert!(gl.calls().is_empty());
    // bad colors are still reported
    assert!(matches!(
        d2.fill(&gl, 0, 0, 8, 8, 300),
        Err(DrawError::BadColor(300))
    ));
}

// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Decoder for the legacy ZSoft PCX images the game ships (8 bit, 1 plane,
//! RLE, 256 color palette appended at the end of the file).
//!
//! ```text
//!  0 manufacturer 0x0a   1 version 5   2 encoding 1   3 bits_per_pixel 8
//!  4 xmin  6 ymin  8 xmax  10 ymax            (u16 little endian)
//! 65 color_planes 1      66 bytes_per_line (u16)
//! 128.. rle data ....  [0x0c] [768 bytes rgb palette]
//! ```

use std::fmt;

pub const PCX_HEADER_SIZE: usize = 128;
pub const PCX_PALETTE_SIZE: usize = 768;
const PCX_PALETTE_MARKER: u8 = 0x0c;
const PCX_MAX_SIZE: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
pub enum PcxError {
    TooShort(usize),
    BadHeader(&'static str),
    TooLarge { width: usize, height: usize },
    Truncated { row: usize },
}

impl fmt::Display for PcxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcxError::TooShort(n) => write!(f, "pcx file too short ({} bytes)", n),
            PcxError::BadHeader(field) => write!(f, "bad pcx file: {}", field),
            PcxError::TooLarge { width, height } => {
                write!(f, "pcx file too large: {}x{}", width, height)
            }
            PcxError::Truncated { row } => write!(f, "pcx data truncated at row {}", row),
        }
    }
}

impl std::error::Error for PcxError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PcxHeader {
    pub version: u8,
    pub width: usize,
    pub height: usize,
    pub bytes_per_line: usize,
}

/// Decoded 8-bit pcx image: one palette index per pixel plus the palette
pub struct Pcx {
    pub header: PcxHeader,
    pub pixels: Vec<u8>,
    pub palette: [u8; PCX_PALETTE_SIZE],
}

impl Pcx {
    pub fn width(&self) -> usize {
        self.header.width
    }

    pub fn height(&self) -> usize {
        self.header.height
    }
}

fn read_u16(data: &[u8], at: usize) -> usize {
    u16::from_le_bytes([data[at], data[at + 1]]) as usize
}

pub fn parse_header(data: &[u8]) -> Result<PcxHeader, PcxError> {
    if data.len() < PCX_HEADER_SIZE + PCX_PALETTE_SIZE {
        return Err(PcxError::TooShort(data.len()));
    }
    if data[0] != 0x0a {
        return Err(PcxError::BadHeader("manufacturer"));
    }
    if data[1] != 5 {
        return Err(PcxError::BadHeader("version"));
    }
    if data[2] != 1 {
        return Err(PcxError::BadHeader("encoding"));
    }
    if data[3] != 8 {
        return Err(PcxError::BadHeader("bits_per_pixel"));
    }
    if data[65] != 1 {
        return Err(PcxError::BadHeader("color_planes"));
    }
    let (xmin, ymin, xmax, ymax) = (
        read_u16(data, 4),
        read_u16(data, 6),
        read_u16(data, 8),
        read_u16(data, 10),
    );
    if xmax < xmin || ymax < ymin {
        return Err(PcxError::BadHeader("window"));
    }
    let width = xmax - xmin + 1;
    let height = ymax - ymin + 1;
    if width > PCX_MAX_SIZE || height > PCX_MAX_SIZE {
        return Err(PcxError::TooLarge { width, height });
    }
    let bytes_per_line = read_u16(data, 66);
    if bytes_per_line < width {
        return Err(PcxError::BadHeader("bytes_per_line"));
    }
    Ok(PcxHeader {
        version: data[1],
        width,
        height,
        bytes_per_line,
    })
}

/// The palette is always the last 768 bytes of the file.
pub fn palette_of(data: &[u8]) -> Result<[u8; PCX_PALETTE_SIZE], PcxError> {
    if data.len() < PCX_HEADER_SIZE + PCX_PALETTE_SIZE {
        return Err(PcxError::TooShort(data.len()));
    }
    let start = data.len() - PCX_PALETTE_SIZE;
    let mut pal = [0u8; PCX_PALETTE_SIZE];
    pal.copy_from_slice(&data[start..]);
    Ok(pal)
}

pub fn decode(data: &[u8]) -> Result<Pcx, PcxError> {
    let header = parse_header(data)?;
    let palette = palette_of(data)?;

    // rle data ends where the palette (and its marker, if present) begins
    let mut end = data.len() - PCX_PALETTE_SIZE;
    if end > PCX_HEADER_SIZE && data[end - 1] == PCX_PALETTE_MARKER {
        end -= 1;
    }
    let rle = &data[PCX_HEADER_SIZE..end];

    let mut pixels = Vec::with_capacity(header.width * header.height);
    let mut pos = 0;
    for row in 0..header.height {
        let mut x = 0;
        while x < header.bytes_per_line {
            let mut byte = *rle.get(pos).ok_or(PcxError::Truncated { row })?;
            pos += 1;
            let mut run = 1;
            if byte & 0xc0 == 0xc0 {
                run = (byte & 0x3f) as usize;
                byte = *rle.get(pos).ok_or(PcxError::Truncated { row })?;
                pos += 1;
            }
            for _ in 0..run {
                // padding bytes past width are dropped, runs may cross it
                if x < header.width {
                    pixels.push(byte);
                }
                x += 1;
            }
        }
    }

    Ok(Pcx {
        header,
        pixels,
        palette,
    })
}

/// Encodes an 8-bit image as pcx, used by tools and tests to build assets.
///
/// Sizes outside 1..=4096 can't be stored and give an empty buffer.
pub fn encode(width: usize, height: usize, pixels: &[u8], palette: &[u8; PCX_PALETTE_SIZE]) -> Vec<u8> {
    if !(1..=PCX_MAX_SIZE).contains(&width) || !(1..=PCX_MAX_SIZE).contains(&height) {
        return Vec::new();
    }
    let mut out = vec![0u8; PCX_HEADER_SIZE];
    out[0] = 0x0a;
    out[1] = 5;
    out[2] = 1;
    out[3] = 8;
    out[8..10].copy_from_slice(&((width - 1) as u16).to_le_bytes());
    out[10..12].copy_from_slice(&((height - 1) as u16).to_le_bytes());
    out[12..14].copy_from_slice(&72u16.to_le_bytes());
    out[14..16].copy_from_slice(&72u16.to_le_bytes());
    out[65] = 1;
    out[66..68].copy_from_slice(&(width as u16).to_le_bytes());
    out[68] = 1;

    for row in pixels.chunks(width).take(height) {
        let mut i = 0;
        while i < row.len() {
            let b = row[i];
            let mut run = 1;
            while i + run < row.len() && row[i + run] == b && run < 63 {
                run += 1;
            }
            if run > 1 || b & 0xc0 == 0xc0 {
                out.push(0xc0 | run as u8);
            }
            out.push(b);
            i += run;
        }
    }

    out.push(PCX_PALETTE_MARKER);
    out.extend_from_slice(palette);
    out
}

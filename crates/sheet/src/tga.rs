// STD Dependencies -----------------------------------------------------------
use std::fmt;


// External Dependencies ------------------------------------------------------
use tinytga::{DataType, RawTga};


// Row Layout -----------------------------------------------------------------
const ROW_ALIGNMENT: usize = 4;


// Types ----------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    Rgba32,
    Rgb24,
    Rgba16,
    R5g5b5,
    R5g5b5a1,
    R5g6b5,
    Rgb8,
    /// Readable, but not one of the recognized layouts. Holds the bit depth.
    Unknown(u8)
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatTag::Unknown(bits) => write!(f, "Unknown ({}-bit)", bits),
            other => write!(f, "{:?}", other)
        }
    }
}

/// A TGA image as it comes out of the decoder: rows are stored top-down and
/// padded to a 4 byte boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub bits_per_pixel: usize,
    pub format: FormatTag,
    pub data: Vec<u8>
}


// TGA Decoder ----------------------------------------------------------------
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, String> {
    let tga = RawTga::from_slice(bytes).map_err(|e| {
        format!("Invalid TGA data ({:?})", e)
    })?;

    let header = tga.header();
    let bits_per_pixel = tga.color_bpp().bits() as usize;

    let size = tga.size();
    let (width, height) = (size.width as usize, size.height as usize);
    let bytes_per_pixel = bits_per_pixel / 8;
    let stride = aligned_stride(width, bytes_per_pixel);
    let mut data = vec![0; stride * height];

    let color_map = tga.color_map();
    for pixel in tga.pixels() {
        let (x, y) = (pixel.position.x, pixel.position.y);
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            continue;
        }

        let color = if let Some(color_map) = color_map {
            color_map.get_raw(pixel.color as usize).ok_or_else(|| {
                format!("Color map index {} at {}x{} is out of range", pixel.color, x, y)
            })?

        } else {
            pixel.color
        };

        let offset = y as usize * stride + x as usize * bytes_per_pixel;
        data[offset..offset + bytes_per_pixel].copy_from_slice(&color.to_le_bytes()[..bytes_per_pixel]);
    }

    Ok(DecodedImage {
        width,
        height,
        stride,
        bits_per_pixel,
        format: classify(header.data_type, bits_per_pixel as u8, header.alpha_channel_depth),
        data
    })
}


// Helpers --------------------------------------------------------------------
fn aligned_stride(width: usize, bytes_per_pixel: usize) -> usize {
    (width * bytes_per_pixel + ROW_ALIGNMENT - 1) / ROW_ALIGNMENT * ROW_ALIGNMENT
}

fn classify(data_type: DataType, bits_per_pixel: u8, alpha_bits: u8) -> FormatTag {
    let grayscale = data_type == DataType::BlackAndWhite;
    match (grayscale, bits_per_pixel) {
        (true, 8) => FormatTag::Rgb8,
        (false, 16) if alpha_bits == 0 => FormatTag::R5g5b5,
        (false, 16) => FormatTag::R5g5b5a1,
        (false, 24) => FormatTag::Rgb24,
        (false, 32) => FormatTag::Rgba32,
        (_, bits) => FormatTag::Unknown(bits)
    }
}

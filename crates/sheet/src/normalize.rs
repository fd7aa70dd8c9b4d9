// STD Dependencies -----------------------------------------------------------
use std::path::Path;


// External Dependencies ------------------------------------------------------
use file_io::FileReader;
use image::{Rgba, RgbaImage};


// Internal Dependencies ------------------------------------------------------
use crate::error::SheetError;
use crate::tga::{self, DecodedImage, FormatTag};


// Pixel Encodings ------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelEncoding {
    Bgra32,
    Bgr24,
    Bgra4444,
    Bgra5551,
    Bgr565,
    L8
}

impl PixelEncoding {

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelEncoding::Bgra32 => 4,
            PixelEncoding::Bgr24 => 3,
            PixelEncoding::Bgra4444 | PixelEncoding::Bgra5551 | PixelEncoding::Bgr565 => 2,
            PixelEncoding::L8 => 1
        }
    }

    /// Expands a single packed pixel into straight RGBA8.
    pub fn to_rgba(self, pixel: &[u8]) -> [u8; 4] {
        match self {
            PixelEncoding::Bgra32 => [pixel[2], pixel[1], pixel[0], pixel[3]],
            PixelEncoding::Bgr24 => [pixel[2], pixel[1], pixel[0], 255],
            PixelEncoding::Bgra4444 => {
                let packed = u16::from_le_bytes([pixel[0], pixel[1]]);
                [
                    scale(packed >> 8 & 0x0F, 0x0F),
                    scale(packed >> 4 & 0x0F, 0x0F),
                    scale(packed & 0x0F, 0x0F),
                    scale(packed >> 12 & 0x0F, 0x0F)
                ]
            },
            PixelEncoding::Bgra5551 => {
                let packed = u16::from_le_bytes([pixel[0], pixel[1]]);
                [
                    scale(packed >> 10 & 0x1F, 0x1F),
                    scale(packed >> 5 & 0x1F, 0x1F),
                    scale(packed & 0x1F, 0x1F),
                    if packed & 0x8000 != 0 { 255 } else { 0 }
                ]
            },
            PixelEncoding::Bgr565 => {
                let packed = u16::from_le_bytes([pixel[0], pixel[1]]);
                [
                    scale(packed >> 11 & 0x1F, 0x1F),
                    scale(packed >> 5 & 0x3F, 0x3F),
                    scale(packed & 0x1F, 0x1F),
                    255
                ]
            },
            PixelEncoding::L8 => [pixel[0], pixel[0], pixel[0], 255]
        }
    }

}

/// Tightly packed pixel rows tagged with their in-memory encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub encoding: PixelEncoding,
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>
}

impl NormalizedImage {
    pub fn to_rgba_image(&self) -> RgbaImage {
        let bytes_per_pixel = self.encoding.bytes_per_pixel();
        let stride = self.width * bytes_per_pixel;
        RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let offset = y as usize * stride + x as usize * bytes_per_pixel;
            Rgba(self.encoding.to_rgba(&self.data[offset..offset + bytes_per_pixel]))
        })
    }
}


// Decoder Adapter ------------------------------------------------------------
pub fn load<R: FileReader>(reader: &R, path: &Path) -> Result<NormalizedImage, SheetError> {
    let bytes = reader.read_binary_file(path)?;
    let decoded = tga::decode(&bytes).map_err(|message| SheetError::Decode {
        path: path.to_path_buf(),
        message
    })?;
    normalize(decoded)
}

pub fn normalize(decoded: DecodedImage) -> Result<NormalizedImage, SheetError> {
    let encoding = match decoded.format {
        FormatTag::Rgba32 => PixelEncoding::Bgra32,
        FormatTag::Rgb24 => PixelEncoding::Bgr24,
        FormatTag::Rgba16 => PixelEncoding::Bgra4444,
        FormatTag::R5g5b5 | FormatTag::R5g5b5a1 => PixelEncoding::Bgra5551,
        FormatTag::R5g6b5 => PixelEncoding::Bgr565,
        FormatTag::Rgb8 => PixelEncoding::L8,
        FormatTag::Unknown(_) => return Err(SheetError::UnsupportedFormat(decoded.format))
    };

    if decoded.bits_per_pixel != encoding.bytes_per_pixel() * 8 {
        return Err(SheetError::DepthMismatch {
            format: decoded.format,
            bits_per_pixel: decoded.bits_per_pixel
        });
    }

    let tight_stride = decoded.width * decoded.bits_per_pixel / 8;
    let mut data = strip_padding(decoded.data, decoded.height, decoded.stride, tight_stride)?;

    // The on-disk format carries no alpha, the 5-5-5-1 encoding needs the bit set
    if decoded.format == FormatTag::R5g5b5 {
        for byte in data.iter_mut().skip(1).step_by(2) {
            *byte |= 0x80;
        }
    }

    Ok(NormalizedImage {
        encoding,
        width: decoded.width,
        height: decoded.height,
        data
    })
}


// Helpers --------------------------------------------------------------------
fn strip_padding(
    mut data: Vec<u8>,
    height: usize,
    stride: usize,
    tight_stride: usize

) -> Result<Vec<u8>, SheetError> {

    let expected = if height == 0 {
        0

    } else {
        (height - 1) * stride + tight_stride
    };

    if stride < tight_stride || data.len() < expected {
        return Err(SheetError::Truncated {
            expected: expected.max(height * tight_stride),
            actual: data.len()
        });
    }

    if stride == tight_stride {
        data.truncate(height * tight_stride);
        Ok(data)

    } else {
        let mut packed = vec![0; height * tight_stride];
        for i in 0..height {
            packed[i * tight_stride..(i + 1) * tight_stride].copy_from_slice(
                &data[i * stride..i * stride + tight_stride]
            );
        }
        Ok(packed)
    }
}

fn scale(value: u16, max: u16) -> u8 {
    ((value as u32 * 255 + max as u32 / 2) / max as u32) as u8
}


#[cfg(test)]
mod test {
    use std::path::Path;

    use super::{load, normalize, scale, PixelEncoding};
    use crate::error::SheetError;
    use crate::mocks::{tga32, MockFileReader};
    use crate::tga::{DecodedImage, FormatTag};

    fn decoded(format: FormatTag, bits_per_pixel: usize, width: usize, height: usize, stride: usize, data: Vec<u8>) -> DecodedImage {
        DecodedImage {
            width,
            height,
            stride,
            bits_per_pixel,
            format,
            data
        }
    }

    const RECOGNIZED: [(FormatTag, usize); 7] = [
        (FormatTag::Rgba32, 32),
        (FormatTag::Rgb24, 24),
        (FormatTag::Rgba16, 16),
        (FormatTag::R5g5b5, 16),
        (FormatTag::R5g5b5a1, 16),
        (FormatTag::R5g6b5, 16),
        (FormatTag::Rgb8, 8)
    ];

    #[test]
    fn test_dispatch_table() {
        let expected = [
            PixelEncoding::Bgra32,
            PixelEncoding::Bgr24,
            PixelEncoding::Bgra4444,
            PixelEncoding::Bgra5551,
            PixelEncoding::Bgra5551,
            PixelEncoding::Bgr565,
            PixelEncoding::L8
        ];
        for ((format, bits), encoding) in RECOGNIZED.iter().zip(expected.iter()) {
            let bytes = bits / 8;
            let image = normalize(decoded(*format, *bits, 1, 1, bytes, vec![0; bytes])).expect("Normalization failed");
            assert_eq!(image.encoding, *encoding);
        }
    }

    #[test]
    fn test_length_matches_tight_stride() {
        // Width 5 forces padding for every depth below 32 bit
        for (format, bits) in RECOGNIZED.iter() {
            let bytes = bits / 8;
            let tight = 5 * bytes;
            let stride = (tight + 3) / 4 * 4;
            let image = normalize(decoded(*format, *bits, 5, 3, stride, vec![0x11; stride * 3])).expect("Normalization failed");
            assert_eq!(image.data.len(), 3 * tight);
            assert_eq!(image.data.len(), image.height * image.width * image.encoding.bytes_per_pixel());
        }
    }

    #[test]
    fn test_strip_padding() {
        let data = vec![
            1, 2, 3, 4, 5, 6, 7, 8, 9, 0xEE, 0xEE, 0xEE,
            10, 11, 12, 13, 14, 15, 16, 17, 18, 0xEE, 0xEE, 0xEE
        ];
        let image = normalize(decoded(FormatTag::Rgb24, 24, 3, 2, 12, data)).expect("Normalization failed");
        assert_eq!(image.data, vec![
            1, 2, 3, 4, 5, 6, 7, 8, 9,
            10, 11, 12, 13, 14, 15, 16, 17, 18
        ]);
    }

    #[test]
    fn test_tight_rows_are_untouched() {
        let data: Vec<u8> = (0..32).collect();
        let image = normalize(decoded(FormatTag::Rgba32, 32, 4, 2, 16, data.clone())).expect("Normalization failed");
        assert_eq!(image.data, data);
    }

    #[test]
    fn test_r5g5b5_forces_alpha() {
        let data = vec![0x00, 0x00, 0x1F, 0x7C, 0xFF, 0x7F, 0x00, 0x00];
        let image = normalize(decoded(FormatTag::R5g5b5, 16, 2, 2, 4, data)).expect("Normalization failed");
        assert_eq!(image.data, vec![0x00, 0x80, 0x1F, 0xFC, 0xFF, 0xFF, 0x00, 0x80]);
        for byte in image.data.iter().skip(1).step_by(2) {
            assert_eq!(byte & 0x80, 0x80);
        }
    }

    #[test]
    fn test_r5g5b5_forces_alpha_after_stripping() {
        // 3 pixels wide: 6 tight bytes padded to 8
        let data = vec![
            0, 0, 0, 0, 0, 0, 0x55, 0x55,
            0, 0, 0, 0, 0, 0, 0x55, 0x55
        ];
        let image = normalize(decoded(FormatTag::R5g5b5, 16, 3, 2, 8, data)).expect("Normalization failed");
        assert_eq!(image.data, vec![
            0, 0x80, 0, 0x80, 0, 0x80,
            0, 0x80, 0, 0x80, 0, 0x80
        ]);
    }

    #[test]
    fn test_r5g5b5a1_keeps_alpha() {
        let data = vec![0x1F, 0x7C, 0x1F, 0xFC];
        let image = normalize(decoded(FormatTag::R5g5b5a1, 16, 2, 1, 4, data.clone())).expect("Normalization failed");
        assert_eq!(image.data, data);
    }

    #[test]
    fn test_unsupported_format() {
        // The buffer is far too short, but must never be looked at
        match normalize(decoded(FormatTag::Unknown(16), 16, 100, 100, 200, vec![])) {
            Err(SheetError::UnsupportedFormat(FormatTag::Unknown(16))) => {},
            other => panic!("Expected UnsupportedFormat, got {:?}", other)
        }
    }

    #[test]
    fn test_truncated() {
        match normalize(decoded(FormatTag::Rgba32, 32, 2, 2, 8, vec![0; 12])) {
            Err(SheetError::Truncated { expected: 16, actual: 12 }) => {},
            other => panic!("Expected Truncated, got {:?}", other)
        }
    }

    #[test]
    fn test_depth_mismatch() {
        assert!(matches!(
            normalize(decoded(FormatTag::Rgba32, 24, 1, 1, 4, vec![0; 4])),
            Err(SheetError::DepthMismatch { bits_per_pixel: 24, .. })
        ));
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(0, 31), 0);
        assert_eq!(scale(31, 31), 255);
        assert_eq!(scale(16, 31), 132);
        assert_eq!(scale(15, 15), 255);
        assert_eq!(scale(8, 15), 136);
        assert_eq!(scale(63, 63), 255);
    }

    #[test]
    fn test_to_rgba() {
        assert_eq!(PixelEncoding::Bgra32.to_rgba(&[1, 2, 3, 4]), [3, 2, 1, 4]);
        assert_eq!(PixelEncoding::Bgr24.to_rgba(&[1, 2, 3]), [3, 2, 1, 255]);
        assert_eq!(PixelEncoding::Bgra4444.to_rgba(&[0x0F, 0xF0]), [0, 0, 255, 255]);
        assert_eq!(PixelEncoding::Bgra4444.to_rgba(&[0x00, 0x0F]), [255, 0, 0, 0]);
        assert_eq!(PixelEncoding::Bgra5551.to_rgba(&[0x00, 0xFC]), [255, 0, 0, 255]);
        assert_eq!(PixelEncoding::Bgra5551.to_rgba(&[0xE0, 0x03]), [0, 255, 0, 0]);
        assert_eq!(PixelEncoding::Bgr565.to_rgba(&[0x00, 0xF8]), [255, 0, 0, 255]);
        assert_eq!(PixelEncoding::Bgr565.to_rgba(&[0xE0, 0x07]), [0, 255, 0, 255]);
        assert_eq!(PixelEncoding::L8.to_rgba(&[128]), [128, 128, 128, 255]);
    }

    #[test]
    fn test_to_rgba_image() {
        let image = normalize(decoded(FormatTag::Rgb24, 24, 2, 1, 8, vec![1, 2, 3, 4, 5, 6, 0, 0])).expect("Normalization failed");
        let rgba = image.to_rgba_image();
        assert_eq!(rgba.dimensions(), (2, 1));
        assert_eq!(rgba.get_pixel(0, 0).0, [3, 2, 1, 255]);
        assert_eq!(rgba.get_pixel(1, 0).0, [6, 5, 4, 255]);
    }

    #[test]
    fn test_load() {
        let mut reader = MockFileReader::new();
        reader.add_binary_file("/tga/a.tga", tga32(3, 2, |x, y| [x as u8, y as u8, 7, 255]));
        let image = load(&reader, Path::new("/tga/a.tga")).expect("Loading failed");
        assert_eq!(image.encoding, PixelEncoding::Bgra32);
        assert_eq!(image.data.len(), 3 * 2 * 4);
        assert_eq!(image.to_rgba_image().get_pixel(2, 1).0, [2, 1, 7, 255]);
    }

    #[test]
    fn test_load_missing_file() {
        let reader = MockFileReader::new();
        assert!(matches!(load(&reader, Path::new("/tga/missing.tga")), Err(SheetError::File(_))));
    }

    #[test]
    fn test_load_invalid_data() {
        let mut reader = MockFileReader::new();
        reader.add_binary_file("/tga/broken.tga", vec![1, 2, 3]);
        match load(&reader, Path::new("/tga/broken.tga")) {
            Err(SheetError::Decode { path, .. }) => assert_eq!(path, Path::new("/tga/broken.tga")),
            other => panic!("Expected Decode error, got {:?}", other)
        }
    }
}

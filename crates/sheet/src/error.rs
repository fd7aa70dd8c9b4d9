// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::path::PathBuf;


// External Dependencies ------------------------------------------------------
use file_io::FileError;


// Internal Dependencies ------------------------------------------------------
use crate::tga::FormatTag;


// Sheet Error Abstraction ----------------------------------------------------
#[derive(Debug)]
pub enum SheetError {
    File(FileError),
    Decode {
        path: PathBuf,
        message: String
    },
    UnsupportedFormat(FormatTag),
    DepthMismatch {
        format: FormatTag,
        bits_per_pixel: usize
    },
    Truncated {
        expected: usize,
        actual: usize
    },
    SliceOutOfBounds {
        file: String,
        slice: usize,
        width: u32,
        height: u32
    },
    Encode(String)
}

impl From<FileError> for SheetError {
    fn from(err: FileError) -> Self {
        SheetError::File(err)
    }
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SheetError::File(err) => write!(f, "Failed to access file: {}", err),
            SheetError::Decode { path, message } => write!(
                f,
                "Failed to decode TGA image \"{}\": {}",
                path.display(),
                message
            ),
            SheetError::UnsupportedFormat(format) => write!(f, "Unsupported image format: {}", format),
            SheetError::DepthMismatch { format, bits_per_pixel } => write!(
                f,
                "Image format {} can not be stored with {} bit(s) per pixel",
                format,
                bits_per_pixel
            ),
            SheetError::Truncated { expected, actual } => write!(
                f,
                "Pixel data is truncated, expected at least {} byte(s) but found {}",
                expected,
                actual
            ),
            SheetError::SliceOutOfBounds { file, slice, width, height } => write!(
                f,
                "Slice {} of \"{}\" does not fit into its {}x{} pixel(s) source",
                slice,
                file,
                width,
                height
            ),
            SheetError::Encode(message) => write!(f, "Failed to encode PNG: {}", message)
        }
    }
}

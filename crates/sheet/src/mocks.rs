// STD Dependencies -----------------------------------------------------------
use std::path::{Path, PathBuf};
use std::collections::HashMap;
use std::io::{Error as IOError, ErrorKind};


// External Dependencies ------------------------------------------------------
use file_io::{FileError, FileReader, FileWriter};


// In-Memory File IO ----------------------------------------------------------
#[derive(Default)]
pub struct MockFileReader {
    pub base: PathBuf,
    binary_files: HashMap<PathBuf, Vec<u8>>,
    written_files: HashMap<PathBuf, Vec<u8>>
}

impl MockFileReader {

    pub fn new() -> Self {
        Self {
            base: PathBuf::from("/"),
            .. Self::default()
        }
    }

    pub fn add_binary_file<S: Into<String>>(&mut self, path: S, bytes: Vec<u8>) {
        self.binary_files.insert(PathBuf::from(path.into()), bytes);
    }

    pub fn get_written_file<S: Into<String>>(&mut self, path: S) -> Option<Vec<u8>> {
        self.written_files.remove(&PathBuf::from(path.into()))
    }

    pub fn written_count(&self) -> usize {
        self.written_files.len()
    }

}

impl FileReader for MockFileReader {

    fn read_file(&self, path: &Path) -> Result<String, FileError> {
        let bytes = self.read_binary_file(path)?;
        String::from_utf8(bytes).map_err(|_| FileError {
            io: IOError::new(ErrorKind::InvalidData, "Mock file is not valid UTF-8"),
            path: path.to_path_buf()
        })
    }

    fn read_binary_file(&self, path: &Path) -> Result<Vec<u8>, FileError> {
        self.binary_files.get(path).cloned().ok_or_else(|| {
            FileError {
                io: IOError::new(ErrorKind::NotFound, "No Mock file provided"),
                path: path.to_path_buf()
            }
        })
    }

    fn base_dir(&self) -> &Path {
        &self.base
    }

}

impl FileWriter for MockFileReader {
    fn write_binary_file(&mut self, path: &Path, data: Vec<u8>) -> Result<(), FileError> {
        self.written_files.insert(path.to_path_buf(), data);
        Ok(())
    }
}


// TGA Fixtures ---------------------------------------------------------------
pub fn tga_header(image_type: u8, width: u16, height: u16, bits_per_pixel: u8, descriptor: u8) -> Vec<u8> {
    let mut header = vec![0, 0, image_type, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    header.extend_from_slice(&width.to_le_bytes());
    header.extend_from_slice(&height.to_le_bytes());
    header.push(bits_per_pixel);
    header.push(descriptor);
    header
}

/// Uncompressed, top-left origin 32-bit image built from RGBA values.
pub fn tga32<F: Fn(u16, u16) -> [u8; 4]>(width: u16, height: u16, color: F) -> Vec<u8> {
    let mut bytes = tga_header(2, width, height, 32, 0x28);
    for y in 0..height {
        for x in 0..width {
            let [r, g, b, a] = color(x, y);
            bytes.extend_from_slice(&[b, g, r, a]);
        }
    }
    bytes
}

// STD Dependencies -----------------------------------------------------------
use std::env;
use std::fs::{DirBuilder, File};
use std::io::{Error as IOError, Read, Write};
use std::path::{Path, PathBuf};

// External Dependencies ------------------------------------------------------
use file_io::{FileError, FileReader, FileWriter};

// Concrete File IO Implementation --------------------------------------------
#[derive(Debug)]
pub struct ProjectReader {
    base: PathBuf,
}

impl ProjectReader {
    pub fn from_current_dir() -> Result<Self, IOError> {
        Ok(Self {
            base: env::current_dir()?,
        })
    }

    pub fn from_absolute(base: PathBuf) -> Self {
        Self { base }
    }

    fn read_file_inner(&self, full_path: &Path) -> Result<String, IOError> {
        let mut file = File::open(full_path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents)
    }

    fn read_binary_file_inner(&self, full_path: &Path) -> Result<Vec<u8>, IOError> {
        let mut file = File::open(full_path)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    fn write_binary_file_inner(&self, path: &Path, data: Vec<u8>) -> Result<(), IOError> {
        // Create output directory
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            DirBuilder::new().recursive(true).create(dir)?;
        }
        let mut file = File::create(path)?;
        file.write_all(&data)?;
        Ok(())
    }
}

impl FileReader for ProjectReader {
    fn base_dir(&self) -> &Path {
        &self.base
    }

    fn read_file(&self, path: &Path) -> Result<String, FileError> {
        self.read_file_inner(path).map_err(|io| FileError {
            io,
            path: path.to_path_buf(),
        })
    }

    fn read_binary_file(&self, path: &Path) -> Result<Vec<u8>, FileError> {
        self.read_binary_file_inner(path).map_err(|io| FileError {
            io,
            path: path.to_path_buf(),
        })
    }
}

impl FileWriter for ProjectReader {
    fn write_binary_file(&mut self, path: &Path, data: Vec<u8>) -> Result<(), FileError> {
        self.write_binary_file_inner(path, data)
            .map_err(|io| FileError {
                io,
                path: path.to_path_buf(),
            })
    }
}

// STD Dependencies -----------------------------------------------------------
use std::io::Cursor;
use std::path::{Path, PathBuf};


// External Dependencies ------------------------------------------------------
use file_io::{FileReader, FileWriter, Logger};
use image::{imageops, ImageFormat, RgbaImage};


// Internal Dependencies ------------------------------------------------------
use crate::error::SheetError;
use crate::layout::{SheetLayout, CANVAS_HEIGHT, CANVAS_WIDTH, SPRITE_SIZE};
use crate::normalize;


// Sprite Sheet Compositor ----------------------------------------------------
pub struct SheetCompositor {
    source_dir: PathBuf
}

impl SheetCompositor {

    pub fn new<P: Into<PathBuf>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.into()
        }
    }

    pub fn composite<R: FileReader + FileWriter>(
        &self,
        logger: &mut Logger,
        io: &mut R,
        files: &[String],
        output: &Path

    ) -> Result<(), SheetError> {

        // Every source has to load before anything gets drawn
        let mut images = Vec::with_capacity(files.len());
        for file in files {
            let path = io.resolve_path(&self.source_dir, Path::new(file));
            logger.status("Loading", path.display().to_string());
            images.push(normalize::load(&*io, &path)?.to_rgba_image());
        }

        let layout = SheetLayout::plan(files, output);
        let canvas = compose(&layout, &images, files)?;

        logger.status("Writing", output.display().to_string());
        io.write_binary_file(output, encode_png(&canvas)?)?;
        Ok(())
    }

}

/// Pastes every planned slice onto a cleared canvas. A slice which does not
/// lie fully inside its source aborts the whole sheet.
pub fn compose<S: AsRef<str>>(
    layout: &SheetLayout,
    images: &[RgbaImage],
    files: &[S]

) -> Result<RgbaImage, SheetError> {
    let mut canvas = RgbaImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    for placement in layout.placements() {
        let source = &images[placement.source];
        let left = SPRITE_SIZE as u32 * placement.slice as u32;
        if left + SPRITE_SIZE as u32 > source.width() {
            return Err(SheetError::SliceOutOfBounds {
                file: files.get(placement.source).map(|f| f.as_ref().to_string()).unwrap_or_default(),
                slice: placement.slice,
                width: source.width(),
                height: source.height()
            });
        }

        let slice = imageops::crop_imm(source, left, 0, SPRITE_SIZE as u32, source.height()).to_image();
        imageops::replace(&mut canvas, &slice, placement.x, placement.y);
    }
    Ok(canvas)
}

pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, SheetError> {
    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).map_err(|e| {
        SheetError::Encode(e.to_string())
    })?;
    Ok(bytes)
}

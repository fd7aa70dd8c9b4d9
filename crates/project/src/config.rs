// STD Dependencies -----------------------------------------------------------
use std::path::{Path, PathBuf};
use std::io::{Error as IOError, ErrorKind};
use std::time::Instant;


// External Dependencies ------------------------------------------------------
use serde::Deserialize;
use file_io::{FileReader, FileWriter, Logger};
use sheet::{SheetCompositor, SheetError};


// Defaults -------------------------------------------------------------------
pub const CONFIG_FILE: &str = "dragsheet.toml";
const DEFAULT_SOURCE_DIR: &str = r"C:\Apps\EverQuest.app\Contents\Resources\UIFiles\default";
const DEFAULT_OUTPUT_DIR: &str = r"C:\Code\EqDragIcons";
const DEFAULT_SHEETS: [(&str, &[&str]); 2] = [
    ("dragitem04.png", &[
        "dragitem17.tga",
        "dragitem18.tga",
        "dragitem19.tga",
        "dragitem20.tga",
        "dragitem21.tga",
        "dragitem22.tga"
    ]),
    ("dragitem05.png", &[
        "dragitem22.tga",
        "dragitem23.tga",
        "dragitem24.tga",
        "dragitem25.tga"
    ])
];


// Sprite Sheet Project Configuration -----------------------------------------
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectConfig {
    pub source: SourceConfig,
    #[serde(default, rename = "sheet")]
    pub sheets: Vec<SheetConfig>
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    pub dir: PathBuf
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetConfig {
    pub output: PathBuf,
    pub files: Vec<String>
}

impl SheetConfig {
    pub fn name(&self) -> String {
        self.output.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
    }
}

impl ProjectConfig {

    pub fn builtin() -> Self {
        Self {
            source: SourceConfig {
                dir: PathBuf::from(DEFAULT_SOURCE_DIR)
            },
            sheets: DEFAULT_SHEETS.iter().map(|(output, files)| SheetConfig {
                output: PathBuf::from(DEFAULT_OUTPUT_DIR).join(output),
                files: files.iter().map(|f| f.to_string()).collect()

            }).collect()
        }
    }

    pub fn load<R: FileReader>(logger: &mut Logger, reader: &R) -> Result<ProjectConfig, String> {
        match Self::try_load(logger, reader) {
            Ok(project) => Ok(project),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                logger.info("No project configuration file found, using built-in sheets.");
                Ok(Self::builtin())
            },
            Err(err) => Err(format!("Failed when trying to parse project configuration file!\n\n{}", err))
        }
    }

    pub fn try_load<R: FileReader>(logger: &mut Logger, reader: &R) -> Result<ProjectConfig, IOError> {
        let mut dir = reader.base_dir().to_path_buf();
        loop {
            let config_file = dir.join(CONFIG_FILE);

            // Check if config file exists at this level
            match reader.read_file(&config_file) {
                Ok(text) => {
                    let project = Self::parse(&text, &dir)?;
                    logger.info(format!("Loaded project configuration from {}", config_file.display()));
                    return Ok(project);
                },
                Err(err) if err.io.kind() == ErrorKind::NotFound => {
                    if let Some(parent) = dir.parent() {
                        dir = parent.into();

                    } else {
                        return Err(IOError::new(ErrorKind::NotFound, "No project configuration file found."));
                    }
                },
                Err(err) => return Err(err.io)
            }
        }
    }

    pub fn from_file<R: FileReader>(logger: &mut Logger, reader: &R, path: &Path) -> Result<ProjectConfig, String> {
        let path = reader.base_dir().join(path);
        let text = reader.read_file(&path).map_err(|err| {
            format!("Failed to read project configuration file: {}", err)
        })?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let project = Self::parse(&text, &dir).map_err(|err| {
            format!("Failed when trying to parse project configuration file!\n\n{}", err)
        })?;
        logger.info(format!("Loaded project configuration from {}", path.display()));
        Ok(project)
    }

    pub fn parse(text: &str, dir: &Path) -> Result<ProjectConfig, IOError> {
        let mut project = toml::from_str::<ProjectConfig>(text).map_err(|err| {
            IOError::new(ErrorKind::InvalidData, err.to_string())
        })?;

        // Update paths
        project.source.dir = dir.join(&project.source.dir);
        for sheet in &mut project.sheets {
            sheet.output = dir.join(&sheet.output);
        }
        Ok(project)
    }

    pub fn set_source_dir(&mut self, dir: PathBuf) {
        self.source.dir = dir;
    }

    pub fn set_output_dir(&mut self, dir: &Path) {
        for sheet in &mut self.sheets {
            if let Some(name) = sheet.output.file_name() {
                sheet.output = dir.join(name);
            }
        }
    }

    pub fn retain_sheets(&mut self, names: &[&str]) {
        if !names.is_empty() {
            self.sheets.retain(|sheet| names.contains(&sheet.name().as_str()));
        }
    }

    pub fn build<R: FileReader + FileWriter>(&self, logger: &mut Logger, io: &mut R) -> Result<usize, SheetError> {
        let start = Instant::now();
        let compositor = SheetCompositor::new(self.source.dir.clone());
        for sheet in &self.sheets {
            compositor.composite(logger, io, &sheet.files, &sheet.output)?;
        }
        logger.status("Finished", format!(
            "{} sheet(s) in {}ms",
            self.sheets.len(),
            start.elapsed().as_millis()
        ));
        Ok(self.sheets.len())
    }

}

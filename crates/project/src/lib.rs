// Modules --------------------------------------------------------------------
mod config;
mod reader;


// Internal Dependencies ------------------------------------------------------
pub use self::config::{ProjectConfig, SheetConfig, SourceConfig, CONFIG_FILE};
pub use self::reader::ProjectReader;

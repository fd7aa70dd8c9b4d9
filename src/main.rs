// STD Dependencies -----------------------------------------------------------
use std::path::{Path, PathBuf};
use std::process;


// External Dependencies ------------------------------------------------------
use file_io::Logger;
use project::{ProjectConfig, ProjectReader};


// Modules --------------------------------------------------------------------
mod cli;


// CLI Interface --------------------------------------------------------------
fn main() {
    let mut logger = Logger::new();
    let matches = cli::app().get_matches();

    // Support Silent Flag
    if matches.occurrences_of("silent") > 0 {
        logger.set_silent();
    }

    let mut reader = match ProjectReader::from_current_dir() {
        Ok(reader) => reader,
        Err(err) => {
            logger.error(Logger::format_error(format!("Failed to access current directory: {}", err)));
            process::exit(1);
        }
    };

    // Explicit configuration file or search upwards, falling back to the built-in sheets
    let config = if let Some(file) = matches.value_of("CONFIG_FILE") {
        ProjectConfig::from_file(&mut logger, &reader, Path::new(file))

    } else {
        ProjectConfig::load(&mut logger, &reader)
    };

    let mut config = match config {
        Ok(config) => config,
        Err(err) => {
            logger.error(Logger::format_error(err));
            process::exit(1);
        }
    };

    if let Some(dir) = matches.value_of("SOURCE_DIR") {
        config.set_source_dir(PathBuf::from(dir));
    }

    if let Some(dir) = matches.value_of("OUTPUT_DIR") {
        config.set_output_dir(Path::new(dir));
    }

    if let Some(names) = matches.values_of("ONLY") {
        let names: Vec<&str> = names.collect();
        config.retain_sheets(&names);
        if config.sheets.is_empty() {
            logger.error(Logger::format_error(format!(
                "No sheet matches \"{}\"",
                names.join("\", \"")
            )));
            process::exit(2);
        }
    }

    match config.build(&mut logger, &mut reader) {
        Ok(_) => logger.flush(),
        Err(err) => {
            logger.error(Logger::format_error(err.to_string()));
            process::exit(1);
        }
    }
}

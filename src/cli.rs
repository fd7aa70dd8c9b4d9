// External Dependencies ------------------------------------------------------
use clap::{Arg, Command};


// CLI Definition -------------------------------------------------------------
pub fn app() -> Command<'static> {
    Command::new("dragsheet")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Ivo Wetzel <ivo.wetzel@googlemail.com>")
        .about("Composites drag item TGA sprites into PNG sprite sheets")
        .arg(Arg::new("CONFIG_FILE")
            .long("config")
            .short('c')
            .takes_value(true)
            .help("project configuration file to use instead of searching for dragsheet.toml")
        )
        .arg(Arg::new("SOURCE_DIR")
            .long("source-dir")
            .short('s')
            .takes_value(true)
            .help("directory containing the source TGA files")
        )
        .arg(Arg::new("OUTPUT_DIR")
            .long("out-dir")
            .short('o')
            .takes_value(true)
            .help("directory the sprite sheets are written to")
        )
        .arg(Arg::new("ONLY")
            .long("only")
            .takes_value(true)
            .multiple_occurrences(true)
            .help("only build the sheet with the given name e.g. dragitem05")
        )
        .arg(Arg::new("silent")
            .long("silent")
            .help("do not print any status output")
        )
}

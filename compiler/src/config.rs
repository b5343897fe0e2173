
use std::path::PathBuf;

use clap::ArgMatches;

pub const DEFAULT_INPUT: &str = "data/in/input_code.txt";
pub const DEFAULT_OUT_DIR: &str = "data/out/";

/// Everything the driver needs to know, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// `None` selects the built-in language definition.
    pub coding_map: Option<PathBuf>,
    pub grammar: Option<PathBuf>,
    pub parse_only: bool,
    pub emulate: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Config {
        Config {
            input: PathBuf::from(matches.value_of("input").unwrap_or(DEFAULT_INPUT)),
            out_dir: PathBuf::from(matches.value_of("out-dir").unwrap_or(DEFAULT_OUT_DIR)),
            coding_map: matches.value_of("coding-map").map(PathBuf::from),
            grammar: matches.value_of("grammar").map(PathBuf::from),
            parse_only: matches.is_present("parse-only"),
            emulate: matches.is_present("emulate"),
            verbose: matches.is_present("verbose"),
        }
    }

    pub fn artifact(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }
}

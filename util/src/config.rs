use std::path::{Path, PathBuf};

use clap::Parser;

pub const INPUT_FILE: &str = "input.txt";
pub const EXAMPLE_INPUT_FILE: &str = "example-input.txt";
pub const EXAMPLE_ANSWERS_FILE: &str = "example-input-answers.txt";

const TEST_MODE: &str = "test";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Piped stdin, falling back to `input.txt`.
    Normal,
    /// `example-input.txt`, checked against `example-input-answers.txt`.
    Test,
}

/// Solve both parts of a puzzle.
///
/// Input is read from stdin when something is piped in, otherwise from
/// `input.txt`.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// `test` solves example-input.txt and checks example-input-answers.txt.
    /// Anything else runs normally; only the first value is looked at.
    #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub mode: Vec<String>,

    /// Directory holding the input and example files, given before MODE
    #[arg(short = 'C', long, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: RunMode,
    pub input: PathBuf,
    pub example_input: PathBuf,
    pub example_answers: PathBuf,
}

impl Config {
    pub fn new(mode: RunMode, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            mode,
            input: dir.join(INPUT_FILE),
            example_input: dir.join(EXAMPLE_INPUT_FILE),
            example_answers: dir.join(EXAMPLE_ANSWERS_FILE),
        }
    }

    pub fn from_args(args: Args) -> Self {
        let mode = match args.mode.first().map(String::as_str) {
            Some(TEST_MODE) => RunMode::Test,
            _ => RunMode::Normal,
        };
        Self::new(mode, args.dir)
    }
}

//! Shared plumbing for the daily puzzle binaries.
//!
//! Every day is a small `lib.rs` implementing [`Puzzle`] plus a `main.rs`
//! that hands it to [`run`]. The harness loads the input (piped stdin,
//! `input.txt`, or the example files in test mode), prints the answers and,
//! when asked to, checks them against `example-input-answers.txt`.

mod answer;
mod config;
mod input;
mod parse;
mod runner;

pub use answer::{compare, print_answers, Answer, AnswerSet, EvalError, Outcome, TestReport};
pub use config::{
    Args, Config, RunMode, EXAMPLE_ANSWERS_FILE, EXAMPLE_INPUT_FILE, INPUT_FILE,
};
pub use input::{
    load_from_file, load_from_stream, load_input, piped_stdin, read_lines, FileLines,
    InputError, LineSequence, LineTrim,
};
pub use parse::{parse_nice, parse_number, LineParseError, Span};
pub use runner::{init_logging, run, run_with, Puzzle};

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    answer::{compare, print_answers, AnswerSet, TestReport},
    config::{Args, Config, RunMode},
    input::{load_from_file, load_input, piped_stdin, LineSequence, LineTrim},
};

/// A day's puzzle: the questions it answers and how to answer them.
pub trait Puzzle {
    /// One sentence per part, printed in front of the answer.
    const QUESTIONS: &'static [&'static str];

    const LINE_TRIM: LineTrim = LineTrim::Whitespace;

    fn solve(input: &LineSequence) -> Result<AnswerSet>;
}

/// Logs go to stderr so stdout only carries answers. `RUST_LOG` overrides
/// the default `warn` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when several runs share a process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run<P: Puzzle>() -> Result<()> {
    init_logging();

    let config = Config::from_args(Args::parse());
    let stdin = match config.mode {
        RunMode::Normal => piped_stdin(),
        RunMode::Test => None,
    };

    let stdout = io::stdout();
    run_with::<P, _, _>(&config, stdin, &mut stdout.lock())?;

    Ok(())
}

/// Loads, solves and prints. In test mode the answers are also checked and
/// the report is returned; failed checks are reported, not treated as errors.
pub fn run_with<P, R, W>(
    config: &Config,
    stdin: Option<R>,
    out: &mut W,
) -> Result<Option<TestReport>>
where
    P: Puzzle,
    R: BufRead,
    W: Write,
{
    let input = load_input(config, P::LINE_TRIM, stdin)?;
    if input.is_empty() {
        match config.mode {
            RunMode::Normal => bail!(
                "No puzzle input: pipe it on stdin or create {}",
                config.input.display()
            ),
            RunMode::Test => bail!("{} is empty", config.example_input.display()),
        }
    }

    debug!(lines = input.len(), mode = ?config.mode, "solving");
    let answers: AnswerSet = P::solve(&input).context("Unable to solve the puzzle")?;
    print_answers(out, P::QUESTIONS, &answers)?;

    if config.mode != RunMode::Test {
        return Ok(None);
    }

    let expected = load_from_file(&config.example_answers, LineTrim::Whitespace)?
        .require(&config.example_answers)?;
    let report = compare(&answers, &expected)?;
    write!(out, "{report}")?;

    info!(
        passed = report.passed(),
        total = report.outcomes().len(),
        "checked example answers"
    );

    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{answer::Answer, input::InputError};
    use std::{fs, io::Cursor, path::Path};
    use tempfile::TempDir;

    struct Calories;

    impl Puzzle for Calories {
        const QUESTIONS: &'static [&'static str] = &["Most calories?", "Line count?"];

        fn solve(input: &LineSequence) -> Result<AnswerSet> {
            let max = input
                .iter()
                .filter(|l| !l.is_empty())
                .map(|l| l.parse::<i64>())
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .max()
                .unwrap_or(0);
            Ok(AnswerSet::from([
                Answer::Number(max),
                Answer::Text(format!("{} lines", input.len())),
            ]))
        }
    }

    fn run_in(
        dir: &Path,
        mode: RunMode,
        stdin: Option<&str>,
    ) -> (Result<Option<TestReport>>, String) {
        let config = Config::new(mode, dir);
        let mut out = Vec::new();
        let res = run_with::<Calories, _, _>(&config, stdin.map(Cursor::new), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn normal_mode_prints_answers() {
        let dir = TempDir::new().unwrap();

        let (res, out) = run_in(dir.path(), RunMode::Normal, Some("3\n4\n\n7\n"));

        assert!(res.unwrap().is_none());
        assert_eq!(out, "Part One: Most calories? = 7\nPart Two: Line count? = 4 lines\n");
    }

    #[test]
    fn normal_mode_falls_back_to_input_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("input.txt"), "12\n5\n").unwrap();

        let (res, out) = run_in(dir.path(), RunMode::Normal, None);

        assert!(res.is_ok());
        assert!(out.starts_with("Part One: Most calories? = 12\n"));
    }

    #[test]
    fn no_input_at_all_is_an_error() {
        let dir = TempDir::new().unwrap();

        let (res, out) = run_in(dir.path(), RunMode::Normal, Some(""));

        assert!(res.unwrap_err().to_string().contains("No puzzle input"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_mode_checks_example_answers() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("example-input.txt"), "1\n2\n").unwrap();
        fs::write(dir.path().join("example-input-answers.txt"), "3\n2 lines\n").unwrap();

        let (res, out) = run_in(dir.path(), RunMode::Test, Some("100\n"));

        let report = res.unwrap().unwrap();
        assert_eq!(report.passed(), 1);
        assert!(out.contains("Part One: Most calories? = 2\n"));
        assert!(out.ends_with("TESTS\n=====\n\tPart 1: failed! Expected Value: 3\n\tPart 2: PASSED\n"));
    }

    #[test]
    fn test_mode_without_answers_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("example-input.txt"), "1\n").unwrap();

        let (res, out) = run_in(dir.path(), RunMode::Test, None);

        let err = res.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::Missing(_))
        ));
        assert!(out.starts_with("Part One"));
    }

    #[test]
    fn solve_errors_are_propagated() {
        let dir = TempDir::new().unwrap();

        let (res, _) = run_in(dir.path(), RunMode::Normal, Some("twelve\n"));

        assert!(res.is_err());
    }
}

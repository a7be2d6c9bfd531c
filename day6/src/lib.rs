use std::collections::BTreeSet;

use anyhow::Result;
use thiserror::Error;
use tracing::debug;
use util::{Answer, AnswerSet, LineSequence, Puzzle};

const START_OF_PACKET: usize = 4;
const START_OF_MESSAGE: usize = 14;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MarkerError {
    #[error("The input holds no signal")]
    MissingSignal,

    #[error("No run of {0} distinct characters in the signal")]
    NotFound(usize),
}

/// Number of characters read when the last `n` were all different.
pub fn start_n(signal: &str, n: usize) -> Result<usize, MarkerError> {
    if n == 0 {
        return Ok(0);
    }

    signal
        .chars()
        .collect::<Vec<_>>()
        .windows(n)
        .enumerate()
        .find_map(|(i, window)| (window.iter().collect::<BTreeSet<_>>().len() == n).then(|| i + n))
        .ok_or(MarkerError::NotFound(n))
}

fn marker_answer(signal: &str, n: usize) -> Result<Answer> {
    Ok(Answer::from(i64::try_from(start_n(signal, n)?)?))
}

pub struct TuningTrouble;

impl Puzzle for TuningTrouble {
    const QUESTIONS: &'static [&'static str] = &[
        "How many characters need to be processed before the first start-of-packet marker is detected?",
        "How many characters need to be processed before the first start-of-message marker is detected?",
    ];

    fn solve(input: &LineSequence) -> Result<AnswerSet> {
        let signal = input
            .iter()
            .find(|line| !line.is_empty())
            .ok_or(MarkerError::MissingSignal)?;
        debug!(len = signal.len(), "scanning signal");

        [START_OF_PACKET, START_OF_MESSAGE]
            .into_iter()
            .map(|n| marker_answer(signal, n))
            .collect()
    }
}

use std::{fmt, io, num::ParseIntError};

use thiserror::Error;

use crate::input::LineSequence;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("{questions} questions are asked but {answers} answers were computed")]
    UnansweredQuestions { questions: usize, answers: usize },

    #[error("{answers} answers were computed but {expected} expected answers were given")]
    ArityMismatch { answers: usize, expected: usize },

    #[error("Expected answer for part {part} is not a number: {raw:?}")]
    NotANumber {
        part: usize,
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Unable to write answers")]
    Write(#[from] io::Error),
}

/// One part's result. Numbers and text never compare equal to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Number(i64),
    Text(String),
}

impl Answer {
    /// Parses `raw` as the same kind of answer as `self`.
    pub fn parse_like(&self, raw: &str) -> Result<Self, ParseIntError> {
        match self {
            Self::Number(_) => raw.trim().parse().map(Self::Number),
            Self::Text(_) => Ok(Self::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Answer {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet(Vec<Answer>);

impl AnswerSet {
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.0.iter()
    }
}

impl<const N: usize> From<[Answer; N]> for AnswerSet {
    fn from(answers: [Answer; N]) -> Self {
        Self(answers.into())
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn part_name(part: usize) -> String {
    match part {
        1 => "One".to_string(),
        2 => "Two".to_string(),
        3 => "Three".to_string(),
        n => n.to_string(),
    }
}

/// Writes `Part One: <question> = <answer>` for every part.
pub fn print_answers(
    out: &mut impl io::Write,
    questions: &[&str],
    answers: &AnswerSet,
) -> Result<(), EvalError> {
    if questions.len() != answers.len() {
        return Err(EvalError::UnansweredQuestions {
            questions: questions.len(),
            answers: answers.len(),
        });
    }

    for (i, (question, answer)) in questions.iter().zip(answers.iter()).enumerate() {
        writeln!(out, "Part {}: {question} = {answer}", part_name(i + 1))?;
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed { expected: Answer },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed { expected } => write!(f, "failed! Expected Value: {expected}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    outcomes: Vec<Outcome>,
}

impl TestReport {
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == Outcome::Passed)
            .count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.outcomes.len()
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n\nTESTS\n=====\n")?;
        for (i, outcome) in self.outcomes.iter().enumerate() {
            writeln!(f, "\tPart {}: {outcome}", i + 1)?;
        }
        Ok(())
    }
}

/// Checks each answer against the expected line at the same position.
pub fn compare(answers: &AnswerSet, expected: &LineSequence) -> Result<TestReport, EvalError> {
    if answers.len() != expected.len() {
        return Err(EvalError::ArityMismatch {
            answers: answers.len(),
            expected: expected.len(),
        });
    }

    let outcomes = answers
        .iter()
        .zip(expected.iter())
        .enumerate()
        .map(|(i, (answer, raw))| {
            let expected = answer
                .parse_like(raw)
                .map_err(|source| EvalError::NotANumber {
                    part: i + 1,
                    raw: raw.clone(),
                    source,
                })?;

            Ok(if *answer == expected {
                Outcome::Passed
            } else {
                Outcome::Failed { expected }
            })
        })
        .collect::<Result<Vec<_>, EvalError>>()?;

    Ok(TestReport { outcomes })
}

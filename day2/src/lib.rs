use anyhow::{anyhow, Context, Result};
use thiserror::Error;
use tracing::debug;
use util::{Answer, AnswerSet, LineSequence, Puzzle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchResult {
    Lose,
    Draw,
    Win,
}

impl MatchResult {
    fn value(&self) -> i64 {
        match self {
            Self::Lose => 0,
            Self::Draw => 3,
            Self::Win => 6,
        }
    }
}

#[derive(Error, Debug)]
#[error("Error parsing {0:?} into MatchResult")]
struct MatchResultParseError(String);

impl TryFrom<&str> for MatchResult {
    type Error = MatchResultParseError;

    fn try_from(result: &str) -> Result<Self, Self::Error> {
        match result {
            "X" => Ok(Self::Lose),
            "Y" => Ok(Self::Draw),
            "Z" => Ok(Self::Win),
            _ => Err(MatchResultParseError(result.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Rock,
    Paper,
    Scissors,
}

#[derive(Error, Debug)]
#[error("Error parsing {0:?} into Shape")]
struct ShapeParseError(String);

impl TryFrom<&str> for Shape {
    type Error = ShapeParseError;

    fn try_from(shape: &str) -> Result<Self, Self::Error> {
        match shape {
            "A" | "X" => Ok(Self::Rock),
            "B" | "Y" => Ok(Self::Paper),
            "C" | "Z" => Ok(Self::Scissors),
            _ => Err(ShapeParseError(shape.to_string())),
        }
    }
}

impl Shape {
    fn value(&self) -> i64 {
        match self {
            Self::Rock => 1,
            Self::Paper => 2,
            Self::Scissors => 3,
        }
    }

    /// Result for the player throwing `shape2` against `shape1`.
    fn match_result(shape1: &Self, shape2: &Self) -> MatchResult {
        match (shape1, shape2) {
            (Self::Rock, Self::Paper)
            | (Self::Paper, Self::Scissors)
            | (Self::Scissors, Self::Rock) => MatchResult::Win,
            (s1, s2) if s1 == s2 => MatchResult::Draw,
            _ => MatchResult::Lose,
        }
    }

    fn from_result(shape1: &Self, result: &MatchResult) -> Self {
        match (shape1, result) {
            (s, MatchResult::Draw) => *s,
            (Self::Rock, MatchResult::Lose) | (Self::Paper, MatchResult::Win) => Self::Scissors,
            (Self::Paper, MatchResult::Lose) | (Self::Scissors, MatchResult::Win) => Self::Rock,
            (Self::Scissors, MatchResult::Lose) | (Self::Rock, MatchResult::Win) => Self::Paper,
        }
    }

    fn match_value(shape1: &Shape, shape2: &Shape) -> i64 {
        Self::match_result(shape1, shape2).value() + shape2.value()
    }
}

fn split_round(line: &str) -> Result<(&str, &str)> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    match columns.as_slice() {
        [theirs, ours] => Ok((*theirs, *ours)),
        _ => Err(anyhow!(
            "wrong number of columns in line {line:?}: {}",
            columns.len()
        )),
    }
}

fn find_total<'a, F>(input: impl Iterator<Item = &'a str>, round_value: F) -> Result<i64>
where
    F: Fn(&str, &str) -> Result<i64>,
{
    input
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (theirs, ours) = split_round(line)?;
            round_value(theirs, ours).with_context(|| format!("Bad round {line:?}"))
        })
        .sum()
}

/// Second column is the shape to throw.
pub fn find_total_shapes<'a>(input: impl Iterator<Item = &'a str>) -> Result<i64> {
    find_total(input, |theirs, ours| {
        let theirs = Shape::try_from(theirs)?;
        let ours = Shape::try_from(ours)?;
        Ok(Shape::match_value(&theirs, &ours))
    })
}

/// Second column is how the round has to end.
pub fn find_total_results<'a>(input: impl Iterator<Item = &'a str>) -> Result<i64> {
    find_total(input, |theirs, result| {
        let theirs = Shape::try_from(theirs)?;
        let result = MatchResult::try_from(result)?;
        let ours = Shape::from_result(&theirs, &result);
        Ok(Shape::match_value(&theirs, &ours))
    })
}

pub struct RockPaperScissors;

impl Puzzle for RockPaperScissors {
    const QUESTIONS: &'static [&'static str] = &[
        "What would your total score be if everything goes exactly according to your strategy guide?",
        "Following the Elf's instructions for the second column, what would your total score be if everything goes exactly according to your strategy guide?",
    ];

    fn solve(input: &LineSequence) -> Result<AnswerSet> {
        debug!(rounds = input.len(), "scoring strategy guide");

        Ok(AnswerSet::from([
            Answer::from(find_total_shapes(input.iter().map(String::as_str))?),
            Answer::from(find_total_results(input.iter().map(String::as_str))?),
        ]))
    }
}

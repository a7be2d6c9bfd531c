use std::str::FromStr;

use anyhow::{Context, Result};
use nom::{
    bytes::complete::tag,
    combinator::map,
    sequence::{preceded, tuple},
    IResult,
};
use nom_supreme::error::ErrorTree;
use thiserror::Error;
use tracing::debug;
use util::{parse_nice, parse_number, Answer, AnswerSet, LineSequence, LineTrim, Puzzle, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrateMover {
    /// Moves one crate at a time.
    Model9000,
    /// Moves several crates at once, keeping their order.
    Model9001,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    n: usize,
    from: usize,
    to: usize,
}

/// Crate stacks, bottom first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stacks {
    stacks: Vec<Vec<char>>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("There is no stack {0}")]
    NoStack(usize),

    #[error("Stack {stack} holds {held} crates, unable to move {n}")]
    NotEnoughCrates { stack: usize, held: usize, n: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StacksParseError {
    #[error("Missing stacks description")]
    MissingStacks,

    #[error("Crate row {0:?} is wider than the stack labels")]
    RowTooWide(String),
}

impl Stacks {
    fn stack_index(&self, label: usize) -> Result<usize, MoveError> {
        label
            .checked_sub(1)
            .filter(|&i| i < self.stacks.len())
            .ok_or(MoveError::NoStack(label))
    }

    fn apply_move(&mut self, mv: &Move, crane: CrateMover) -> Result<(), MoveError> {
        let from = self.stack_index(mv.from)?;
        let to = self.stack_index(mv.to)?;

        let stack_from = &mut self.stacks[from];
        let held = stack_from.len();
        if held < mv.n {
            return Err(MoveError::NotEnoughCrates {
                stack: mv.from,
                held,
                n: mv.n,
            });
        }

        let mut lifted = stack_from.split_off(held - mv.n);
        if crane == CrateMover::Model9000 {
            lifted.reverse();
        }
        self.stacks[to].extend(lifted);

        Ok(())
    }

    /// Empty stacks contribute nothing.
    fn top_crates(&self) -> String {
        self.stacks.iter().filter_map(|stack| stack.last()).collect()
    }
}

impl FromStr for Stacks {
    type Err = StacksParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = s.lines().filter(|line| !line.trim().is_empty()).collect::<Vec<_>>();

        let n_stacks = rows
            .pop()
            .map(|labels| labels.split_whitespace().count())
            .filter(|&n| n > 0)
            .ok_or(StacksParseError::MissingStacks)?;

        let mut stacks = vec![Vec::new(); n_stacks];

        for row in rows.into_iter().rev() {
            for (i, val) in row.chars().skip(1).step_by(4).enumerate() {
                if val == ' ' {
                    continue;
                }
                stacks
                    .get_mut(i)
                    .ok_or_else(|| StacksParseError::RowTooWide(row.to_string()))?
                    .push(val);
            }
        }

        Ok(Self { stacks })
    }
}

fn parse_move(i: Span) -> IResult<Span, Move, ErrorTree<Span>> {
    map(
        tuple((
            preceded(tag("move "), parse_number::<usize, _>),
            preceded(tag(" from "), parse_number::<usize, _>),
            preceded(tag(" to "), parse_number::<usize, _>),
        )),
        |(n, from, to)| Move { n, from, to },
    )(i)
}

pub fn get_stacks_and_moves<'a>(
    mut input: impl Iterator<Item = &'a str>,
) -> Result<(Stacks, Vec<Move>)> {
    let stacks: Stacks = input
        .by_ref()
        .take_while(|line| !line.trim().is_empty())
        .fold(String::new(), |s, l| s + l + "\n")
        .parse()?;

    let moves = input
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_nice(line, parse_move))
        .collect::<Result<Vec<Move>, _>>()?;

    Ok((stacks, moves))
}

pub fn move_and_get_top<'a>(
    input: impl Iterator<Item = &'a str>,
    crane: CrateMover,
) -> Result<String> {
    let (mut stacks, moves) = get_stacks_and_moves(input)?;

    for (i, mv) in moves.iter().enumerate() {
        stacks
            .apply_move(mv, crane)
            .with_context(|| format!("Move {} failed", i + 1))?;
    }

    Ok(stacks.top_crates())
}

pub struct SupplyStacks;

impl Puzzle for SupplyStacks {
    const QUESTIONS: &'static [&'static str] = &[
        "After the rearrangement procedure completes, what crate ends up on top of each stack?",
        "After the rearrangement procedure completes, what crate ends up on top of each stack?",
    ];

    // The drawing is positional, so leading spaces matter.
    const LINE_TRIM: LineTrim = LineTrim::Terminators;

    fn solve(input: &LineSequence) -> Result<AnswerSet> {
        debug!(lines = input.len(), "rearranging crates");

        Ok(AnswerSet::from([
            Answer::from(move_and_get_top(
                input.iter().map(String::as_str),
                CrateMover::Model9000,
            )?),
            Answer::from(move_and_get_top(
                input.iter().map(String::as_str),
                CrateMover::Model9001,
            )?),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use util::{compare, LineTrim};

    const TEST_INPUT: &str = include_str!("../example-input.txt");
    const TEST_ANSWERS: &str = include_str!("../example-input-answers.txt");

    #[test]
    fn move_and_get_top_9000_ok() {
        let top = move_and_get_top(TEST_INPUT.lines(), CrateMover::Model9000);

        assert!(top.is_ok());

        assert_eq!(top.unwrap(), "CMZ".to_string());
    }

    #[test]
    fn move_and_get_top_9001_ok() {
        let top = move_and_get_top(TEST_INPUT.lines(), CrateMover::Model9001);

        assert!(top.is_ok());

        assert_eq!(top.unwrap(), "MCD".to_string());
    }

    #[test]
    fn stacks_from_drawing() {
        let stacks: Stacks = "    [D]    \n[N] [C]    \n[Z] [M] [P]\n 1   2   3 \n"
            .parse()
            .unwrap();

        assert_eq!(
            stacks.stacks,
            vec![vec!['Z', 'N'], vec!['M', 'C', 'D'], vec!['P']]
        );
    }

    #[test]
    fn trailing_spaces_may_be_stripped() {
        let stacks: Stacks = "    [D]\n[N] [C]\n[Z] [M] [P]\n 1   2   3\n".parse().unwrap();

        assert_eq!(stacks.top_crates(), "NDP");
    }

    #[test]
    fn missing_drawing() {
        assert_eq!("".parse::<Stacks>(), Err(StacksParseError::MissingStacks));
    }

    #[test]
    fn parse_move_ok() {
        let mv = parse_nice("move 13 from 2 to 9", parse_move).unwrap();

        assert_eq!(mv, Move { n: 13, from: 2, to: 9 });
    }

    #[test]
    fn empty_stacks_are_skipped() {
        let mut stacks: Stacks = "[A]    \n[B] [C]\n 1   2 \n".parse().unwrap();

        stacks
            .apply_move(&Move { n: 1, from: 2, to: 1 }, CrateMover::Model9000)
            .unwrap();

        assert_eq!(stacks.top_crates(), "C");
    }

    #[test]
    fn bad_moves() {
        let mut stacks: Stacks = "[A]    \n[B] [C]\n 1   2 \n".parse().unwrap();

        assert_eq!(
            stacks.apply_move(&Move { n: 3, from: 1, to: 2 }, CrateMover::Model9001),
            Err(MoveError::NotEnoughCrates {
                stack: 1,
                held: 2,
                n: 3
            })
        );
        assert_eq!(
            stacks.apply_move(&Move { n: 1, from: 0, to: 2 }, CrateMover::Model9001),
            Err(MoveError::NoStack(0))
        );
        assert_eq!(
            stacks.apply_move(&Move { n: 1, from: 1, to: 3 }, CrateMover::Model9001),
            Err(MoveError::NoStack(3))
        );
    }

    #[test]
    fn solve_example() {
        let input = LineSequence::from_text(TEST_INPUT, SupplyStacks::LINE_TRIM);

        let answers = SupplyStacks::solve(&input).unwrap();

        assert_eq!(answers, AnswerSet::from([Answer::from("CMZ"), Answer::from("MCD")]));
    }

    #[test]
    fn example_answers_match() {
        let input = LineSequence::from_text(TEST_INPUT, SupplyStacks::LINE_TRIM);
        let expected = LineSequence::from_text(TEST_ANSWERS, LineTrim::Whitespace);

        let report = compare(&SupplyStacks::solve(&input).unwrap(), &expected).unwrap();

        assert!(report.all_passed(), "{report}");
    }
}

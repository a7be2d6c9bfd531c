use anyhow::Result;
use nom::{bytes::complete::tag, combinator::map, sequence::separated_pair, IResult};
use nom_supreme::error::ErrorTree;
use tracing::debug;
use util::{parse_nice, parse_number, Answer, AnswerSet, LineSequence, Puzzle, Span};

/// Inclusive range of section ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Assignment {
    start: u32,
    end: u32,
}

impl Assignment {
    fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    fn overlaps(&self, other: &Self) -> bool {
        !(self.start > other.end || self.end < other.start)
    }
}

fn parse_assignment(i: Span) -> IResult<Span, Assignment, ErrorTree<Span>> {
    map(
        separated_pair(parse_number::<u32, _>, tag("-"), parse_number::<u32, _>),
        |(a, b)| Assignment::new(a, b),
    )(i)
}

fn parse_pair(i: Span) -> IResult<Span, [Assignment; 2], ErrorTree<Span>> {
    map(
        separated_pair(parse_assignment, tag(","), parse_assignment),
        |(first, second)| [first, second],
    )(i)
}

fn num_overlap_condition<'a, F>(
    input: impl Iterator<Item = &'a str>,
    condition_true: F,
) -> Result<i64>
where
    F: Fn(&[Assignment; 2]) -> bool,
{
    input
        .filter(|line| !line.is_empty())
        .map(|line| {
            let pair = parse_nice(line, parse_pair)?;
            Ok(i64::from(condition_true(&pair)))
        })
        .sum()
}

fn condition_full_overlap([first, second]: &[Assignment; 2]) -> bool {
    first.contains(second) || second.contains(first)
}

fn condition_any_overlap([first, second]: &[Assignment; 2]) -> bool {
    first.overlaps(second)
}

pub fn num_overlap_full<'a>(input: impl Iterator<Item = &'a str>) -> Result<i64> {
    num_overlap_condition(input, condition_full_overlap)
}

pub fn num_overlap_any<'a>(input: impl Iterator<Item = &'a str>) -> Result<i64> {
    num_overlap_condition(input, condition_any_overlap)
}

pub struct CampCleanup;

impl Puzzle for CampCleanup {
    const QUESTIONS: &'static [&'static str] = &[
        "In how many assignment pairs does one range fully contain the other?",
        "In how many assignment pairs do the ranges overlap?",
    ];

    fn solve(input: &LineSequence) -> Result<AnswerSet> {
        debug!(pairs = input.len(), "checking assignments");

        Ok(AnswerSet::from([
            Answer::from(num_overlap_full(input.iter().map(String::as_str))?),
            Answer::from(num_overlap_any(input.iter().map(String::as_str))?),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use util::{compare, LineTrim};
    use rstest::rstest;

    const TEST_INPUT: &str = include_str!("../example-input.txt");
    const TEST_ANSWERS: &str = include_str!("../example-input-answers.txt");

    #[test]
    fn num_overlap_full_ok() {
        let total = num_overlap_full(TEST_INPUT.lines());

        assert!(total.is_ok());

        assert_eq!(total.unwrap(), 2);
    }

    #[test]
    fn num_overlap_any_ok() {
        let total = num_overlap_any(TEST_INPUT.lines());

        assert!(total.is_ok());

        assert_eq!(total.unwrap(), 4);
    }

    #[rstest]
    #[case("6-6,4-6", true, true)]
    #[case("2-4,6-8", false, false)]
    #[case("5-7,7-9", false, true)]
    #[case("8-2,3-7", true, true)]
    fn single_pair(#[case] line: &str, #[case] full: bool, #[case] any: bool) {
        let pair = parse_nice(line, parse_pair).unwrap();

        assert_eq!(condition_full_overlap(&pair), full);
        assert_eq!(condition_any_overlap(&pair), any);
    }

    #[rstest]
    #[case("2-4;6-8")]
    #[case("2-4,6-")]
    #[case("2-4,6-8,1-1")]
    fn bad_pairs(#[case] line: &str) {
        let res = num_overlap_any([line].into_iter());

        assert!(res.is_err());
        assert!(res.unwrap_err().to_string().contains(line));
    }

    #[test]
    fn solve_example() {
        let input = LineSequence::from_text(TEST_INPUT, CampCleanup::LINE_TRIM);

        let answers = CampCleanup::solve(&input).unwrap();

        assert_eq!(answers, AnswerSet::from([Answer::Number(2), Answer::Number(4)]));
    }

    #[test]
    fn example_answers_match() {
        let input = LineSequence::from_text(TEST_INPUT, CampCleanup::LINE_TRIM);
        let expected = LineSequence::from_text(TEST_ANSWERS, LineTrim::Whitespace);

        let report = compare(&CampCleanup::solve(&input).unwrap(), &expected).unwrap();

        assert!(report.all_passed(), "{report}");
    }
}

use anyhow::{Context, Result};
use itertools::Itertools;
use tracing::debug;
use util::{Answer, AnswerSet, LineSequence, Puzzle};

/// Calorie totals per elf, biggest first. Elves are separated by blank lines.
fn find_ordered_totals<'a>(input: impl Iterator<Item = &'a str>) -> Result<Vec<i64>> {
    let mut totals = input
        .group_by(|line| line.is_empty())
        .into_iter()
        .filter(|(blank, _)| !blank)
        .map(|(_, elf)| {
            elf.map(|calories| {
                calories
                    .parse::<i64>()
                    .with_context(|| format!("Bad calorie count {calories:?}"))
            })
            .sum::<Result<i64>>()
        })
        .collect::<Result<Vec<_>>>()?;

    totals.sort_unstable_by(|a, b| b.cmp(a));

    Ok(totals)
}

fn get_biggest_total(totals: &[i64]) -> Result<i64> {
    totals.first().copied().context("No elves in the input")
}

fn get_biggest_three_total(totals: &[i64]) -> i64 {
    totals.iter().take(3).sum()
}

pub struct CalorieCounting;

impl Puzzle for CalorieCounting {
    const QUESTIONS: &'static [&'static str] = &[
        "Total Calories of the Elf carrying the most Calories",
        "Total Calories of the top three Elves carrying the most Calories",
    ];

    fn solve(input: &LineSequence) -> Result<AnswerSet> {
        let totals = find_ordered_totals(input.iter().map(String::as_str))?;
        debug!(elves = totals.len(), "counted calories");

        Ok(AnswerSet::from([
            Answer::from(get_biggest_total(&totals)?),
            Answer::from(get_biggest_three_total(&totals)),
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
    fn totals_ok() {
        let totals = find_ordered_totals(TEST_INPUT.lines());

        assert!(totals.is_ok());

        assert_eq!(totals.unwrap(), vec![24000, 11000, 10000, 6000, 4000]);
    }

    #[rstest]
    #[case(&["3", "4", "", "7"], vec![7, 7])]
    #[case(&["3", "4", "", "", "", "7", ""], vec![7, 7])]
    #[case(&["", "1", "", "2"], vec![2, 1])]
    fn equal_totals_are_kept(#[case] lines: &[&str], #[case] expected: Vec<i64>) {
        let totals = find_ordered_totals(lines.iter().copied()).unwrap();

        assert_eq!(totals, expected);
    }

    #[test]
    fn fewer_than_three_elves() {
        let totals = find_ordered_totals(["3", "4", "", "7"].into_iter()).unwrap();

        assert_eq!(get_biggest_total(&totals).unwrap(), 7);
        assert_eq!(get_biggest_three_total(&totals), 14);
    }

    #[test]
    fn bad_count_is_an_error() {
        let totals = find_ordered_totals(["100", "lots"].into_iter());

        assert!(totals.is_err());
    }

    #[test]
    fn solve_example() {
        let input = LineSequence::from_text(TEST_INPUT, CalorieCounting::LINE_TRIM);

        let answers = CalorieCounting::solve(&input).unwrap();

        assert_eq!(
            answers,
            AnswerSet::from([Answer::Number(24000), Answer::Number(45000)])
        );
    }

    #[test]
    fn example_answers_match() {
        let input = LineSequence::from_text(TEST_INPUT, CalorieCounting::LINE_TRIM);
        let expected = LineSequence::from_text(TEST_ANSWERS, LineTrim::Whitespace);

        let report = compare(&CalorieCounting::solve(&input).unwrap(), &expected).unwrap();

        assert!(report.all_passed(), "{report}");
    }
}

use std::collections::BTreeSet;

use anyhow::Result;
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;
use util::{Answer, AnswerSet, LineSequence, Puzzle};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RucksackError {
    #[error("Unknown item type {0:?}")]
    UnknownItem(char),

    #[error("Rucksack {0:?} cannot be split into two equal compartments")]
    OddLength(String),

    #[error("Rucksack {0:?} has no item type in both compartments")]
    NoMisplacedItem(String),

    #[error("Group {0} has no badge in common")]
    NoBadge(usize),

    #[error("{0} rucksacks cannot be split into groups of three")]
    IncompleteGroup(usize),
}

fn get_value(c: char) -> Result<i64, RucksackError> {
    match c {
        'a'..='z' => Ok(c as i64 - 'a' as i64 + 1),
        'A'..='Z' => Ok(c as i64 - 'A' as i64 + 27),
        _ => Err(RucksackError::UnknownItem(c)),
    }
}

fn get_values(items: &str) -> Result<Vec<i64>, RucksackError> {
    items.chars().map(get_value).collect()
}

fn sorted_unique(values: &[i64]) -> Vec<i64> {
    values
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First value present in every sorted, deduplicated array.
fn get_same(arrs: &[Vec<i64>]) -> Option<i64> {
    let mut inds = vec![0_usize; arrs.len()];

    while let Some(values) = arrs
        .iter()
        .zip(inds.iter())
        .map(|(arr, i)| arr.get(*i).copied())
        .collect::<Option<Vec<i64>>>()
    {
        if values.windows(2).all(|w| w[0] == w[1]) {
            return values.first().copied();
        }

        let (index_of_min, _) = values.iter().enumerate().min_by_key(|(_, v)| **v)?;
        inds[index_of_min] += 1;
    }

    None
}

pub fn find_sum_types<'a>(input: impl Iterator<Item = &'a str>) -> Result<i64, RucksackError> {
    input
        .filter(|line| !line.is_empty())
        .map(|line| {
            let values = get_values(line)?;
            if values.len() % 2 != 0 {
                return Err(RucksackError::OddLength(line.to_string()));
            }

            let (left, right) = values.split_at(values.len() / 2);
            get_same(&[sorted_unique(left), sorted_unique(right)])
                .ok_or_else(|| RucksackError::NoMisplacedItem(line.to_string()))
        })
        .sum()
}

pub fn find_sum_badges<'a>(input: impl Iterator<Item = &'a str>) -> Result<i64, RucksackError> {
    let rucksacks = input
        .filter(|line| !line.is_empty())
        .map(|line| get_values(line).map(|values| sorted_unique(&values)))
        .collect::<Result<Vec<_>, _>>()?;

    if rucksacks.len() % 3 != 0 {
        return Err(RucksackError::IncompleteGroup(rucksacks.len()));
    }

    rucksacks
        .into_iter()
        .tuples::<(_, _, _)>()
        .enumerate()
        .map(|(group, (ln1, ln2, ln3))| {
            get_same(&[ln1, ln2, ln3]).ok_or(RucksackError::NoBadge(group + 1))
        })
        .sum()
}

pub struct RucksackReorganization;

impl Puzzle for RucksackReorganization {
    const QUESTIONS: &'static [&'static str] = &[
        "Find the item type that appears in both compartments of each rucksack. What is the sum of the priorities of those item types?",
        "Find the item type that corresponds to the badges of each three-Elf group. What is the sum of the priorities of those item types?",
    ];

    fn solve(input: &LineSequence) -> Result<AnswerSet> {
        debug!(rucksacks = input.len(), "sorting rucksacks");

        Ok(AnswerSet::from([
            Answer::from(find_sum_types(input.iter().map(String::as_str))?),
            Answer::from(find_sum_badges(input.iter().map(String::as_str))?),
        ]))
    }
}

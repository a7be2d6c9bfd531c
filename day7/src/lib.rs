use std::collections::BTreeMap;

use anyhow::Result;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{map, rest, verify},
    sequence::{preceded, separated_pair},
    IResult,
};
use nom_supreme::error::ErrorTree;
use thiserror::Error;
use tracing::debug;
use util::{parse_nice, parse_number, Answer, AnswerSet, LineSequence, Puzzle, Span};

const SMALL_DIR_LIMIT: u64 = 100_000;
const DISK_SIZE: u64 = 70_000_000;
const UPDATE_SIZE: u64 = 30_000_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FsError {
    #[error("Unable to go up from the root directory")]
    AboveRoot,

    #[error("{0:?} is a file, not a directory")]
    NotADirectory(String),

    #[error("{used} is used but the disk only holds {total}")]
    UsedMoreThanTotal { used: u64, total: u64 },

    #[error("No directory is big enough to free {0}")]
    NothingBigEnough(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TerminalLine {
    Cd(String),
    Ls,
    Dir(String),
    File { name: String, size: u64 },
}

fn parse_name(i: Span) -> IResult<Span, String, ErrorTree<Span>> {
    map(verify(rest, |s: &Span| !s.fragment().is_empty()), |s: Span| {
        s.fragment().to_string()
    })(i)
}

fn parse_terminal_line(i: Span) -> IResult<Span, TerminalLine, ErrorTree<Span>> {
    alt((
        map(preceded(tag("$ cd "), parse_name), TerminalLine::Cd),
        map(tag("$ ls"), |_| TerminalLine::Ls),
        map(preceded(tag("dir "), parse_name), TerminalLine::Dir),
        map(
            separated_pair(parse_number::<u64, _>, char(' '), parse_name),
            |(size, name)| TerminalLine::File { name, size },
        ),
    ))(i)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File { size: u64 },
    Dir { contents: BTreeMap<String, Node> },
}

impl Node {
    fn new_dir() -> Self {
        Self::Dir {
            contents: BTreeMap::new(),
        }
    }

    /// Contents of the directory at `location`, creating directories that
    /// were entered without being listed first.
    fn dir_mut(&mut self, location: &[String]) -> Result<&mut BTreeMap<String, Node>, FsError> {
        let mut current_node = self;
        for dir_name in location {
            current_node = match current_node {
                Node::Dir { contents } => contents
                    .entry(dir_name.clone())
                    .or_insert_with(Node::new_dir),
                Node::File { .. } => return Err(FsError::NotADirectory(dir_name.clone())),
            };
        }

        match current_node {
            Node::Dir { contents } => Ok(contents),
            Node::File { .. } => Err(FsError::NotADirectory(
                location.last().cloned().unwrap_or_default(),
            )),
        }
    }

    fn parse<'a>(input: impl Iterator<Item = &'a str>) -> Result<Self> {
        let mut root = Node::new_dir();
        let mut current_location: Vec<String> = vec![];

        for line in input.filter(|line| !line.is_empty()) {
            match parse_nice(line, parse_terminal_line)? {
                TerminalLine::Cd(cd_to) => match cd_to.as_str() {
                    "/" => current_location.clear(),
                    ".." => {
                        current_location.pop().ok_or(FsError::AboveRoot)?;
                    }
                    dir_name => current_location.push(dir_name.to_string()),
                },
                TerminalLine::Ls => {}
                TerminalLine::Dir(name) => {
                    root.dir_mut(&current_location)?
                        .entry(name)
                        .or_insert_with(Node::new_dir);
                }
                // Listing a directory twice must not count its files twice.
                TerminalLine::File { name, size } => {
                    root.dir_mut(&current_location)?
                        .insert(name, Node::File { size });
                }
            }
        }

        Ok(root)
    }

    /// Pushes the size of every directory below and including this one,
    /// children before parents, and returns this node's size.
    fn collect_sizes(&self, sizes: &mut Vec<u64>) -> u64 {
        match self {
            Node::File { size } => *size,
            Node::Dir { contents } => {
                let total = contents.values().map(|n| n.collect_sizes(sizes)).sum();
                sizes.push(total);
                total
            }
        }
    }

    /// Directory sizes; the root comes last.
    fn get_sizes(&self) -> Vec<u64> {
        let mut sizes = vec![];
        self.collect_sizes(&mut sizes);
        sizes
    }
}

fn sum_at_most(sizes: &[u64], biggest: u64) -> u64 {
    sizes.iter().filter(|&&size| size <= biggest).sum()
}

fn smallest_to_free(sizes: &[u64], total: u64, needed: u64) -> Result<u64, FsError> {
    let used = sizes.last().copied().unwrap_or(0);
    let free = total
        .checked_sub(used)
        .ok_or(FsError::UsedMoreThanTotal { used, total })?;
    let to_free = needed.saturating_sub(free);

    sizes
        .iter()
        .copied()
        .filter(|&s| s >= to_free)
        .min()
        .ok_or(FsError::NothingBigEnough(to_free))
}

pub fn size_smallest<'a>(input: impl Iterator<Item = &'a str>, biggest: u64) -> Result<u64> {
    let root = Node::parse(input)?;
    Ok(sum_at_most(&root.get_sizes(), biggest))
}

pub fn size_to_delete<'a>(
    input: impl Iterator<Item = &'a str>,
    total: u64,
    needed: u64,
) -> Result<u64> {
    let root = Node::parse(input)?;
    Ok(smallest_to_free(&root.get_sizes(), total, needed)?)
}

pub struct NoSpaceLeft;

impl Puzzle for NoSpaceLeft {
    const QUESTIONS: &'static [&'static str] = &[
        "Find all of the directories with a total size of at most 100000. What is the sum of the total sizes of those directories?",
        "Find the smallest directory that, if deleted, would free up enough space on the filesystem to run the update. What is the total size of that directory?",
    ];

    fn solve(input: &LineSequence) -> Result<AnswerSet> {
        let sizes = Node::parse(input.iter().map(String::as_str))?.get_sizes();
        debug!(directories = sizes.len(), "walked filesystem");

        let small = sum_at_most(&sizes, SMALL_DIR_LIMIT);
        let to_delete = smallest_to_free(&sizes, DISK_SIZE, UPDATE_SIZE)?;

        Ok(AnswerSet::from([
            Answer::from(i64::try_from(small)?),
            Answer::from(i64::try_from(to_delete)?),
        ]))
    }
}

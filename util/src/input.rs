use std::{
    fs,
    io::{self, BufRead, IsTerminal, StdinLock},
    ops::Deref,
    path::{Path, PathBuf},
};

#[cfg(unix)]
use nix::poll::{poll, PollFd, PollFlags};
#[cfg(unix)]
use std::os::unix::io::AsRawFd;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, RunMode};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unable to read the input stream")]
    ReadStream(#[source] io::Error),

    #[error("Unable to read {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Missing file {}", .0.display())]
    Missing(PathBuf),
}

/// How much of each raw line survives loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTrim {
    /// Strip leading and trailing whitespace.
    #[default]
    Whitespace,
    /// Strip only `\r` and `\n`, keeping significant indentation.
    Terminators,
}

impl LineTrim {
    fn apply(self, line: &str) -> String {
        match self {
            Self::Whitespace => line.trim().to_string(),
            Self::Terminators => line.trim_end_matches(['\r', '\n']).to_string(),
        }
    }
}

/// The puzzle input, one entry per line.
///
/// A terminating newline does not produce a trailing empty entry, so a file
/// of N newline-terminated lines loads as N entries. Blank lines in the
/// middle are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence(Vec<String>);

impl LineSequence {
    pub fn from_text(text: &str, trim: LineTrim) -> Self {
        Self(text.lines().map(|l| trim.apply(l)).collect())
    }
}

impl Deref for LineSequence {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl FromIterator<String> for LineSequence {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of looking for an input file. A missing file is not an error by
/// itself; the caller decides whether to fall back or to fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLines {
    Found(LineSequence),
    NotFound,
}

impl FileLines {
    pub fn into_lines_or_empty(self) -> LineSequence {
        match self {
            Self::Found(lines) => lines,
            Self::NotFound => LineSequence::default(),
        }
    }

    pub fn require(self, path: &Path) -> Result<LineSequence, InputError> {
        match self {
            Self::Found(lines) => Ok(lines),
            Self::NotFound => Err(InputError::Missing(path.to_path_buf())),
        }
    }
}

pub fn read_lines(reader: impl BufRead, trim: LineTrim) -> Result<LineSequence, InputError> {
    reader
        .lines()
        .map(|line| line.map(|l| trim.apply(&l)))
        .collect::<Result<LineSequence, _>>()
        .map_err(InputError::ReadStream)
}

pub fn load_from_file(path: &Path, trim: LineTrim) -> Result<FileLines, InputError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let lines = LineSequence::from_text(&contents, trim);
            debug!(path = %path.display(), lines = lines.len(), "loaded input file");
            Ok(FileLines::Found(lines))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileLines::NotFound),
        Err(source) => Err(InputError::ReadFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads whatever the stream holds. When it yields nothing and a fallback is
/// given, the fallback file is loaded instead; a missing fallback leaves the
/// sequence empty.
pub fn load_from_stream<R: BufRead>(
    stream: Option<R>,
    trim: LineTrim,
    fallback: Option<&Path>,
) -> Result<LineSequence, InputError> {
    let lines = match stream {
        Some(reader) => read_lines(reader, trim)?,
        None => LineSequence::default(),
    };

    if !lines.is_empty() {
        debug!(lines = lines.len(), "read piped input");
        return Ok(lines);
    }

    match fallback {
        Some(path) => {
            debug!(path = %path.display(), "no piped input, falling back to file");
            let loaded = load_from_file(path, trim)?;
            if loaded == FileLines::NotFound {
                warn!(path = %path.display(), "fallback input file not found");
            }
            Ok(loaded.into_lines_or_empty())
        }
        None => Ok(lines),
    }
}

/// How long stdin gets to become readable before it counts as empty.
const STDIN_WAIT_MS: i32 = 100;

/// Whether a read on `fd` would return at once, with data or end of stream.
#[cfg(unix)]
fn has_data(fd: &impl AsRawFd, timeout_ms: i32) -> bool {
    let mut fds = [PollFd::new(fd.as_raw_fd(), PollFlags::POLLIN)];
    match poll(&mut fds, timeout_ms) {
        Ok(0) => false,
        Ok(_) => fds[0]
            .revents()
            .map_or(false, |ev| ev.intersects(PollFlags::POLLIN | PollFlags::POLLHUP)),
        Err(e) => {
            warn!(error = %e, "unable to poll stdin");
            false
        }
    }
}

#[cfg(not(unix))]
fn has_data<T>(_fd: &T, _timeout_ms: i32) -> bool {
    true
}

/// Stdin, if something is piped into it.
///
/// An interactive terminal, or a stream left open without anything written
/// to it, is treated as absent rather than read from.
pub fn piped_stdin() -> Option<StdinLock<'static>> {
    let stdin = io::stdin();
    if stdin.is_terminal() || !has_data(&stdin, STDIN_WAIT_MS) {
        debug!("nothing piped on stdin");
        None
    } else {
        Some(stdin.lock())
    }
}

pub fn load_input<R: BufRead>(
    config: &Config,
    trim: LineTrim,
    stdin: Option<R>,
) -> Result<LineSequence, InputError> {
    match config.mode {
        RunMode::Test => {
            load_from_file(&config.example_input, trim)?.require(&config.example_input)
        }
        RunMode::Normal => load_from_stream(stdin, trim, Some(&config.input)),
    }
}

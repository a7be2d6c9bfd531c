use std::{num::ParseIntError, str::FromStr};

use miette::{GraphicalReportHandler, GraphicalTheme};
use nom::{
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize},
    error::{FromExternalError, ParseError},
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

pub type Span<'a> = LocatedSpan<&'a str>;

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input")]
struct BadInput<'a> {
    #[source_code]
    src: &'a str,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: String,
}

/// A line that did not match its grammar, with a rendered pointer to where
/// parsing stopped.
#[derive(thiserror::Error, Debug)]
#[error("Unable to parse {line:?}\n{report}")]
pub struct LineParseError {
    pub line: String,
    report: String,
}

pub fn parse_number<'a, T, E>(i: Span<'a>) -> IResult<Span<'a>, T, E>
where
    T: FromStr<Err = ParseIntError>,
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    map_res(recognize(tuple((opt(char('-')), digit1))), |i: Span<'a>| {
        i.fragment().parse::<T>()
    })(i)
}

// Alternatives are reported at whichever branch got furthest.
fn furthest_base(e: &ErrorTree<Span>) -> (usize, String) {
    match e {
        GenericErrorTree::Base { location, kind } => (location.location_offset(), kind.to_string()),
        GenericErrorTree::Stack { base, .. } => furthest_base(base),
        GenericErrorTree::Alt(alts) => alts
            .iter()
            .map(furthest_base)
            .max_by_key(|(offset, _)| *offset)
            .unwrap_or_else(|| (0, "no alternative matched".to_string())),
    }
}

pub fn parse_nice<'a, T, F>(l: &'a str, parse_fun: F) -> Result<T, LineParseError>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(l);
    let line: Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);

    line.map_err(|e| {
        let (offset, kind) = furthest_base(&e);
        let err = BadInput {
            src: l,
            bad_bit: (offset, 0).into(),
            kind: kind.clone(),
        };

        let mut report = String::new();
        if GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .render_report(&mut report, &err)
            .is_err()
        {
            report = format!("{kind} at column {}", offset + 1);
        }

        LineParseError {
            line: l.to_string(),
            report,
        }
    })
}

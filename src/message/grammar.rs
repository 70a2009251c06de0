use winnow::combinator::{alt, delimited, repeat};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::Segment;

// -- Placeholders -----------------------------------------------------------

fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited(
        '{',
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
        '}',
    )
    .map(|name: &str| Segment::Placeholder(name.to_owned()))
    .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn escaped_brace(input: &mut &str) -> ModalResult<Segment> {
    alt(("{{".value("{"), "}}".value("}")))
        .map(|s: &str| Segment::Literal(s.to_owned()))
        .parse_next(input)
}

fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_while(1.., |c: char| c != '{' && c != '}')
        .map(|s: &str| Segment::Literal(s.to_owned()))
        .parse_next(input)
}

/// A brace that opens no well-formed placeholder is kept as text.
fn stray_brace(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

// -- Template ---------------------------------------------------------------

pub(super) fn segments(input: &mut &str) -> ModalResult<Vec<Segment>> {
    let raw: Vec<Segment> = repeat(
        0..,
        alt((escaped_brace, placeholder, literal_run, stray_brace)),
    )
    .parse_next(input)?;
    Ok(merge_literals(raw))
}

fn merge_literals(raw: Vec<Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(raw.len());
    for segment in raw {
        if let (Some(Segment::Literal(prev)), Segment::Literal(next)) = (out.last_mut(), &segment)
        {
            prev.push_str(next);
            continue;
        }
        out.push(segment);
    }
    out
}

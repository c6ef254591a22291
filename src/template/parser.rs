//! Tokenizer for the placeholder micro-language.
//!
//! ```text
//! template    := (literal | placeholder | block)*
//! placeholder := "{{" name (":" option ("|" option)* | (" --" flag [" " value])*)? "}}"
//! block       := "{{if " cond "}}" template "{{/if}}"
//! cond        := "notnull=" paramName | identifier
//! option      := flagName ["=" value]
//! ```

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::char;
use nom::combinator::{opt, verify};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::preceded;
use nom::{IResult, Parser};

/// One `{{...}}` occurrence: name plus ordered option list.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderToken {
    pub name: String,
    /// Flag options (`auto`) carry no value; `exclude=Id` style options do.
    pub options: Vec<(String, Option<String>)>,
    /// The span as written, for diagnostics.
    pub raw: String,
}

impl PlaceholderToken {
    /// First value for a key=value option.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.options.iter().any(|(k, _)| k == key)
    }

    /// Comma-separated list value for a key (empty when absent).
    pub fn list_option(&self, key: &str) -> Vec<String> {
        self.option(key)
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default()
    }
}

/// Conditional block guard.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockCond {
    /// Emit iff the named parameter is present and non-null.
    NotNull(String),
    /// Emit iff the named parameter is truthy.
    Truthy(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder(PlaceholderToken),
    Block {
        cond: BlockCond,
        body: Vec<Segment>,
    },
}

/// Parse a whole template; the caller checks for trailing unparsed input.
pub fn parse_template(input: &str) -> IResult<&str, Vec<Segment>> {
    many0(parse_segment).parse(input)
}

fn parse_segment(input: &str) -> IResult<&str, Segment> {
    alt((parse_block, parse_placeholder, parse_literal)).parse(input)
}

fn parse_literal(input: &str) -> IResult<&str, Segment> {
    if input.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeUntil,
        )));
    }
    match input.find("{{") {
        Some(0) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeUntil,
        ))),
        Some(idx) => Ok((&input[idx..], Segment::Literal(input[..idx].to_string()))),
        None => Ok(("", Segment::Literal(input.to_string()))),
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    verify(
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        |s: &str| s.starts_with(|c: char| c.is_alphabetic() || c == '_'),
    )
    .parse(input)
}

/// Option value in `key=value` form: anything up to `|` or `}`.
fn option_value(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '|' && c != '}').parse(input)
}

fn parse_option(input: &str) -> IResult<&str, (String, Option<String>)> {
    let (input, name) = identifier(input)?;
    let (input, value) = opt(preceded(char('='), option_value)).parse(input)?;
    Ok((input, (name.to_string(), value.map(str::to_string))))
}

/// ` --flag` or ` --flag value`; a value never starts with `--`.
fn parse_flag_option(input: &str) -> IResult<&str, (String, Option<String>)> {
    let (input, _) = tag(" --").parse(input)?;
    let (input, name) = identifier(input)?;
    let (input, value) = opt(preceded(
        char(' '),
        verify(take_while1(|c: char| c != ' ' && c != '}'), |s: &str| {
            !s.starts_with("--")
        }),
    ))
    .parse(input)?;
    Ok((input, (name.to_string(), value.map(str::to_string))))
}

fn parse_placeholder(input: &str) -> IResult<&str, Segment> {
    let start = input;
    let (rest, _) = tag("{{").parse(input)?;
    let (rest, name) = identifier(rest)?;
    let (rest, options) = alt((
        preceded(char(':'), separated_list1(char('|'), parse_option)),
        many1(parse_flag_option),
        nom::combinator::success(Vec::new()),
    ))
    .parse(rest)?;
    let (rest, _) = tag("}}").parse(rest)?;

    let raw = start[..start.len() - rest.len()].to_string();
    Ok((
        rest,
        Segment::Placeholder(PlaceholderToken {
            name: name.to_string(),
            options,
            raw,
        }),
    ))
}

fn parse_cond(input: &str) -> IResult<&str, BlockCond> {
    alt((
        preceded(tag("notnull="), identifier).map(|n: &str| BlockCond::NotNull(n.to_string())),
        identifier.map(|n: &str| BlockCond::Truthy(n.to_string())),
    ))
    .parse(input)
}

fn parse_block(input: &str) -> IResult<&str, Segment> {
    let (input, _) = tag("{{if ").parse(input)?;
    let (input, cond) = parse_cond(input)?;
    let (input, _) = tag("}}").parse(input)?;
    let (input, body) = parse_template(input)?;
    let (input, _) = tag("{{/if}}").parse(input)?;
    Ok((input, Segment::Block { cond, body }))
}

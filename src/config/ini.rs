use super::span::{Parse, ParseResult, Position, RawSpan};
use crate::Error;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{line_ending, not_line_ending, space0},
    combinator::eof,
    sequence::delimited,
};
use nom_locate::position;

#[derive(Debug, Eq, PartialEq)]
pub enum Line<'a> {
    Comment,
    Section(&'a str),
    Entry { key: &'a str, value: &'a str },
}

impl<'a> Line<'a> {
    fn parse_comment(input: RawSpan<'a>) -> ParseResult<'a, Self> {
        let (input, _) = alt((tag("#"), tag(";")))(input)?;
        let (input, _) = not_line_ending(input)?;
        Ok((input, Self::Comment))
    }

    fn parse_section(input: RawSpan<'a>) -> ParseResult<'a, Self> {
        let (input, name) = delimited(
            tag("["),
            take_while1(|x: char| x != ']' && x != '\r' && x != '\n'),
            tag("]"),
        )(input)?;

        Ok((input, Self::Section(name.fragment().trim())))
    }

    fn parse_entry(input: RawSpan<'a>) -> ParseResult<'a, Self> {
        let (input, key) =
            take_while1(|x: char| x.is_alphanumeric() || matches!(x, '_' | '-' | '.'))(input)?;
        let (input, _) = delimited(space0, alt((tag("="), tag(":"))), space0)(input)?;
        let (input, value) = not_line_ending(input)?;

        Ok((
            input,
            Self::Entry {
                key: key.fragment(),
                value: value.fragment().trim_end(),
            },
        ))
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct ParsedLine<'a> {
    pub line: Line<'a>,
    pub position: Position,
}

impl<'a> Parse<'a> for ParsedLine<'a> {
    fn parse(input: RawSpan<'a>) -> ParseResult<'a, Self> {
        let (input, pos) = position(input)?;

        let (input, line) = alt((Line::parse_comment, Line::parse_section, Line::parse_entry))(input)?;

        let (input, _) = space0(input)?;
        let (input, _) = alt((line_ending, eof))(input)?;

        Ok((
            input,
            Self {
                line,
                position: pos.into(),
            },
        ))
    }
}

#[derive(Debug)]
pub struct Section<'a> {
    pub name: &'a str,
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Section<'a> {
    /// Looks up a key; key names are case-insensitive.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
    }
}

/// A parsed INI document
#[derive(Debug)]
pub struct Ini<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> Ini<'a> {
    pub fn parse(input: &'a str) -> crate::Result<Self> {
        let mut sections: Vec<Section<'a>> = Vec::new();
        let mut rest = RawSpan::new(input);

        loop {
            let (input, _) = space0::<_, nom::error::Error<_>>(rest)
                .map_err(|_| syntax_error(rest.into(), "unreadable input"))?;

            if input.fragment().is_empty() {
                break;
            }

            // NOTE: Blank line
            if let Ok((input, _)) = line_ending::<_, nom::error::Error<_>>(input) {
                rest = input;
                continue;
            }

            let (input, parsed) = ParsedLine::parse(input)
                .map_err(|_| syntax_error(input.into(), "expected [section], key = value or comment"))?;
            rest = input;

            match parsed.line {
                Line::Comment => {}
                Line::Section(name) => {
                    if sections.iter().any(|s| s.name == name) {
                        return Err(syntax_error(
                            parsed.position,
                            &format!("duplicate section [{name}]"),
                        ));
                    }

                    sections.push(Section {
                        name,
                        entries: Vec::new(),
                    });
                }
                Line::Entry { key, value } => {
                    let Some(section) = sections.last_mut() else {
                        return Err(syntax_error(parsed.position, "entry before any [section]"));
                    };

                    if section.get(key).is_some() {
                        return Err(syntax_error(
                            parsed.position,
                            &format!("duplicate key {key:?} in [{}]", section.name),
                        ));
                    }

                    section.entries.push((key, value));
                }
            }
        }

        Ok(Self { sections })
    }

    pub fn section(&self, name: &str) -> Option<&Section<'a>> {
        self.sections.iter().find(|s| s.name == name)
    }
}

fn syntax_error(position: Position, msg: &str) -> Error {
    Error::InvalidConfiguration(format!("syntax error at {position}: {msg}"))
}

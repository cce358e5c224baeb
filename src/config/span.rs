use nom::IResult;
use nom_locate::LocatedSpan;

#[allow(clippy::module_name_repetitions)]
pub type RawSpan<'a> = LocatedSpan<&'a str>;

pub type ParseResult<'a, T> = IResult<RawSpan<'a>, T>;

/// Parses one syntactic element out of a located span
pub trait Parse<'a>: Sized {
    fn parse(input: RawSpan<'a>) -> ParseResult<'a, Self>;

    // Helper method to convert a raw str into a raw span and parse
    #[cfg(test)]
    fn parse_from_raw(input: &'a str) -> ParseResult<'a, Self> {
        Self::parse(LocatedSpan::new(input))
    }
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Position {
    pub column: usize,
    pub line: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<RawSpan<'_>> for Position {
    fn from(pos: RawSpan<'_>) -> Self {
        Self {
            column: pos.get_column(),
            line: pos.location_line(),
        }
    }
}
